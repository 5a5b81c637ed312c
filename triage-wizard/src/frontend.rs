use async_trait::async_trait;

use crate::session::{Session, SubmitOutcome};
use crate::transport::ChatTransport;

/// How a frontend run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrontendOutcome {
    /// The user left after submitting; holds the last submission's outcome.
    Submitted(SubmitOutcome),
    /// The user left without submitting.
    Quit,
}

/// Trait for render layers that drive a [`Session`].
///
/// A frontend shows the current question, feeds user input into the wizard,
/// triggers navigation and submission, and displays the presented reply.
/// Interrupting the terminal (Ctrl+C) is reported as an error, typically a
/// cancellation variant of `Self::Error`.
#[async_trait(?Send)]
pub trait Frontend {
    /// The error type for this frontend.
    type Error: Into<anyhow::Error>;

    /// Run the session until the user quits.
    async fn run<T: ChatTransport>(
        &mut self,
        session: &mut Session<T>,
    ) -> Result<FrontendOutcome, Self::Error>;
}
