use triage_types::QuestionSet;

use crate::client::{ChatClient, NETWORK_ERROR_MESSAGE, ReplyResult};
use crate::payload::PayloadStyle;
use crate::presenter::{ReplyPresenter, RevealHandle};
use crate::transport::ChatTransport;
use crate::wizard::Wizard;

/// What happened when the user pressed submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A question is still unanswered; the cursor now points at it and
    /// nothing was sent.
    Incomplete { index: usize },
    /// The backend answered, with a reply or an error.
    Replied(ReplyResult),
    /// The request never got a usable response.
    Failed,
}

/// One run of a survey: the wizard, the client that submits the answers and
/// the presenter that shows the reply.
///
/// `submit` takes `&mut self`, so a second submission cannot start while one
/// is in flight.
#[derive(Debug)]
pub struct Session<T> {
    wizard: Wizard,
    client: ChatClient<T>,
    presenter: ReplyPresenter,
    style: PayloadStyle,
    reveal: Option<RevealHandle>,
}

impl<T: ChatTransport> Session<T> {
    pub fn new(
        questions: QuestionSet,
        client: ChatClient<T>,
        presenter: ReplyPresenter,
        style: PayloadStyle,
    ) -> Self {
        Self {
            wizard: Wizard::new(questions),
            client,
            presenter,
            style,
            reveal: None,
        }
    }

    pub fn wizard(&self) -> &Wizard {
        &self.wizard
    }

    pub fn wizard_mut(&mut self) -> &mut Wizard {
        &mut self.wizard
    }

    pub fn presenter(&self) -> &ReplyPresenter {
        &self.presenter
    }

    /// Validate the answers and, if all are given, send them.
    ///
    /// Replies are presented in the presenter's mode; backend errors and
    /// network failures are shown at once.
    pub async fn submit(&mut self) -> SubmitOutcome {
        if let Some(index) = self.wizard.first_unanswered() {
            self.wizard.jump_to(index);
            tracing::debug!(index, "submission blocked by unanswered question");
            return SubmitOutcome::Incomplete { index };
        }

        let request = match self.style.request(self.wizard.answers()) {
            Ok(request) => request,
            Err(err) => {
                tracing::warn!(%err, "answers could not be serialized");
                self.show_now(NETWORK_ERROR_MESSAGE);
                return SubmitOutcome::Failed;
            }
        };

        self.presenter.clear();
        match self.client.send(&request).await {
            Ok(result @ ReplyResult::Reply(_)) => {
                self.reveal = Some(self.presenter.present(result.display_text()));
                SubmitOutcome::Replied(result)
            }
            Ok(result) => {
                self.show_now(&result.display_text());
                SubmitOutcome::Replied(result)
            }
            Err(err) => {
                tracing::warn!(%err, "submission failed");
                self.show_now(NETWORK_ERROR_MESSAGE);
                SubmitOutcome::Failed
            }
        }
    }

    /// Resolves once the last reply is fully shown.
    pub async fn reveal_finished(&mut self) {
        if let Some(reveal) = self.reveal.take() {
            reveal.finished().await;
        }
    }

    /// Empty all answers, go back to the first question and clear the
    /// displayed reply.
    pub fn reset(&mut self) {
        self.wizard.reset();
        self.presenter.clear();
        self.reveal = None;
    }

    fn show_now(&mut self, text: &str) {
        self.reveal = Some(self.presenter.present_now(text));
    }
}

#[cfg(test)]
mod tests {
    use triage_types::Question;

    use super::*;
    use crate::TestTransport;
    use crate::presenter::PresentMode;

    fn session(transport: TestTransport) -> Session<TestTransport> {
        let set = QuestionSet::new(vec![
            Question::single_select("q1", "Again?", ["Yes", "No"]),
            Question::free_text("q2", "Details?"),
        ])
        .unwrap();
        Session::new(
            set,
            ChatClient::new(transport),
            ReplyPresenter::new(PresentMode::Immediate),
            PayloadStyle::Transcript,
        )
    }

    #[tokio::test]
    async fn incomplete_submit_sends_nothing() {
        let transport = TestTransport::new().with_reply("ok");
        let mut session = session(transport.clone());
        session.wizard_mut().choose("Yes");
        session.wizard_mut().move_next();
        session.wizard_mut().set_text("   ");

        assert_eq!(
            session.submit().await,
            SubmitOutcome::Incomplete { index: 1 }
        );
        assert_eq!(session.wizard().cursor(), 1);
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn submit_commits_draft() {
        let transport = TestTransport::new().with_reply("ok");
        let mut session = session(transport.clone());
        session.wizard_mut().choose("No");
        session.wizard_mut().move_next();
        session.wizard_mut().set_text("at lunch");

        let outcome = session.submit().await;
        assert_eq!(outcome, SubmitOutcome::Replied(ReplyResult::Reply("ok".into())));
        assert_eq!(session.presenter().text(), "ok");
        assert_eq!(
            transport.requests()[0].message,
            "Q1: No\nQ2: at lunch"
        );
    }

    #[tokio::test]
    async fn reset_clears_reply() {
        let mut session = session(TestTransport::new().with_error("bad input"));
        session.wizard_mut().choose("Yes");
        session.wizard_mut().move_next();
        session.wizard_mut().set_text("x");
        session.submit().await;
        assert_eq!(session.presenter().text(), "Error: bad input");

        session.reset();
        assert_eq!(session.presenter().text(), "");
        assert_eq!(session.wizard().cursor(), 0);
        let wizard = session.wizard();
        assert_eq!(
            triage_types::find_first_unanswered(wizard.questions(), wizard.answers()),
            Some(0)
        );
    }
}
