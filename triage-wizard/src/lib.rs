//! # triage-wizard
//!
//! Frontend-agnostic machinery for running a triage survey:
//! - `Wizard` - Cursor over the questions with a draft answer and animated
//!   transitions driven through a `Stage`
//! - `ChatClient` and `ChatTransport` - Submitting answers to the chat backend
//! - `ReplyPresenter` - Showing the reply at once or with a typewriter effect
//! - `Session` - The three wired together behind `submit` and `reset`
//! - `ChatDemo` - A minimal free-form chat over the same client
//!
//! ## Example
//!
//! ```rust,ignore
//! use triage_wizard::{
//!     ChatClient, ClientConfig, PayloadStyle, ReplyPresenter, ReqwestTransport, Session,
//! };
//!
//! let transport = ReqwestTransport::new(&ClientConfig::from_env()?)?;
//! let mut session = Session::new(
//!     questions,
//!     ChatClient::new(transport),
//!     ReplyPresenter::typewriter(),
//!     PayloadStyle::structured(),
//! );
//! session.wizard_mut().choose("Yes");
//! let outcome = session.submit().await;
//! ```

pub use triage_types::*;

mod wizard;
pub use wizard::{QuestionView, Wizard};

mod transition;
pub use transition::{Animation, Direction, Immediate, Stage};

mod config;
pub use config::{BASE_URL_ENV, ClientConfig, ConfigError, DEFAULT_BASE_URL};

mod payload;
pub use payload::{
    ChatRequest, ChatResponse, DEFAULT_INSTRUCTION, HealthStatus, HistoryEntry, PayloadStyle, Role,
    transcript,
};

mod transport;
pub use transport::{ChatTransport, ReqwestTransport, TransportError};

// Scripted transport for testing sessions without a backend
mod test_transport;
pub use test_transport::TestTransport;

mod client;
pub use client::{ChatClient, NETWORK_ERROR_MESSAGE, ReplyResult, display_text};

mod presenter;
pub use presenter::{Pacing, PresentMode, ReplyPresenter, RevealHandle};

mod session;
pub use session::{Session, SubmitOutcome};

mod chat;
pub use chat::{
    Author, CANNED_DELAY, CANNED_REPLY, ChatDemo, ChatLog, ChatMessage, Responder,
};

mod frontend;
pub use frontend::{Frontend, FrontendOutcome};
