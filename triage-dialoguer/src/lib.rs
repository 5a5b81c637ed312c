//! # triage-dialoguer
//!
//! Dialoguer frontend for triage surveys.
//!
//! This crate runs a [`Session`](triage_wizard::Session) as a command-line
//! wizard using the `dialoguer` library. Questions are presented one at a
//! time; after the last one the user can submit, go back or start over, and
//! the reply is printed as the presenter reveals it.
//!
//! ## Example
//!
//! ```rust,ignore
//! use triage_dialoguer::DialoguerFrontend;
//! use triage_wizard::Frontend;
//!
//! let mut frontend = DialoguerFrontend::new();
//! let outcome = frontend.run(&mut session).await?;
//! ```

mod frontend;

pub use frontend::{DialoguerError, DialoguerFrontend};
