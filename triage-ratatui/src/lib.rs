//! # triage-ratatui
//!
//! Ratatui frontend for triage surveys.
//!
//! Presents one question at a time in a full-screen terminal UI with a
//! progress bar, a reply panel and keyboard navigation. Moving between
//! questions slides the question panel out and the next one in.
//!
//! ## Example
//!
//! ```rust,ignore
//! use triage_ratatui::RatatuiFrontend;
//! use triage_wizard::Frontend;
//!
//! let mut frontend = RatatuiFrontend::new().with_title("Workplace triage");
//! let outcome = frontend.run(&mut session).await?;
//! ```

mod frontend;
mod stage;
mod ui;

pub use frontend::{RatatuiError, RatatuiFrontend, Theme};
pub use stage::SlideTiming;
