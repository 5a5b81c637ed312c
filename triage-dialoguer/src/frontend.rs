//! Dialoguer implementation of the Frontend trait.

use std::io::Write;

use async_trait::async_trait;
use dialoguer::theme::{ColorfulTheme, SimpleTheme, Theme};
use dialoguer::{Input, Select};
use thiserror::Error;
use triage_wizard::{
    ChatTransport, Frontend, FrontendOutcome, QuestionKind, QuestionView, Session, SubmitOutcome,
};

const BACK: &str = "← Back";
const DONE: &str = "Done →";
const SUBMIT: &str = "Submit";
const START_OVER: &str = "Start over";
const QUIT: &str = "Quit";

/// Typed into a free-text prompt to return to the previous question.
const BACK_INPUT: &str = "<";

/// Error type for the Dialoguer frontend.
#[derive(Debug, Error)]
pub enum DialoguerError {
    /// User cancelled the survey (e.g., pressed Ctrl+C).
    #[error("Survey cancelled by user")]
    Cancelled,

    /// An error occurred during prompting.
    #[error("Dialoguer error: {0}")]
    Dialoguer(#[from] dialoguer::Error),

    /// Writing the reply to the terminal failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Helper to check if a dialoguer error is a cancellation (Ctrl+C)
fn is_cancelled(err: &dialoguer::Error) -> bool {
    matches!(err, dialoguer::Error::IO(io_err) if io_err.kind() == std::io::ErrorKind::Interrupted)
}

fn prompt_error(err: dialoguer::Error) -> DialoguerError {
    if is_cancelled(&err) {
        DialoguerError::Cancelled
    } else {
        DialoguerError::Dialoguer(err)
    }
}

/// What the user asked for after a prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Next,
    Back,
}

/// What the user picked in the menu after the last question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Submit,
    Back,
    StartOver,
    Quit,
}

/// Dialoguer frontend for interactive CLI prompts.
///
/// Each question is one prompt; multi-select questions are a loop of
/// single toggles so the "None of these" rule shows after every pick.
#[derive(Debug, Default, Clone)]
pub struct DialoguerFrontend {
    /// Use colorful theme for prompts.
    colorful: bool,
}

impl DialoguerFrontend {
    /// Create a new Dialoguer frontend with default (colorful) theme.
    pub fn new() -> Self {
        Self { colorful: true }
    }

    /// Create a frontend with plain (no color) theme.
    pub fn plain() -> Self {
        Self { colorful: false }
    }

    fn theme(&self) -> Box<dyn Theme> {
        if self.colorful {
            Box::new(ColorfulTheme::default())
        } else {
            Box::new(SimpleTheme)
        }
    }

    /// Ask the question under the cursor, feeding input into the wizard.
    fn ask<T: ChatTransport>(&self, session: &mut Session<T>) -> Result<Step, DialoguerError> {
        let view = session.wizard().view();
        println!();
        println!("Question {} of {}", view.index + 1, view.total);

        match view.question.kind() {
            QuestionKind::SingleSelect(_) => self.ask_single(session, &view),
            QuestionKind::MultiSelect(_) => self.ask_multi(session, &view),
            QuestionKind::FreeText(free_text) => {
                self.ask_text(session, &view, free_text.placeholder.as_deref())
            }
        }
    }

    fn ask_single<T: ChatTransport>(
        &self,
        session: &mut Session<T>,
        view: &QuestionView,
    ) -> Result<Step, DialoguerError> {
        let options = view.question.options();
        let mut items: Vec<&str> = options.iter().map(String::as_str).collect();
        if !view.is_first() {
            items.push(BACK);
        }
        let current = view
            .draft
            .as_text()
            .and_then(|text| options.iter().position(|option| option == text))
            .unwrap_or(0);

        let theme = self.theme();
        let picked = Select::with_theme(&*theme)
            .with_prompt(view.question.text())
            .items(&items)
            .default(current)
            .interact()
            .map_err(prompt_error)?;

        match options.get(picked) {
            Some(option) => {
                session.wizard_mut().choose(option);
                Ok(Step::Next)
            }
            None => Ok(Step::Back),
        }
    }

    fn ask_multi<T: ChatTransport>(
        &self,
        session: &mut Session<T>,
        view: &QuestionView,
    ) -> Result<Step, DialoguerError> {
        let options = view.question.options();
        let theme = self.theme();
        let mut cursor = 0;

        loop {
            let draft = session.wizard().draft();
            let mut items: Vec<String> = options
                .iter()
                .map(|option| {
                    let selected = draft
                        .as_selection()
                        .is_some_and(|selection| selection.contains(option));
                    format!("[{}] {option}", if selected { "x" } else { " " })
                })
                .collect();
            items.push(DONE.to_string());
            if !view.is_first() {
                items.push(BACK.to_string());
            }

            let picked = Select::with_theme(&*theme)
                .with_prompt(view.question.text())
                .items(&items)
                .default(cursor)
                .interact()
                .map_err(prompt_error)?;

            match options.get(picked) {
                Some(option) => {
                    session.wizard_mut().toggle(option);
                    cursor = picked;
                }
                None if items[picked] == DONE => return Ok(Step::Next),
                None => return Ok(Step::Back),
            }
        }
    }

    fn ask_text<T: ChatTransport>(
        &self,
        session: &mut Session<T>,
        view: &QuestionView,
        placeholder: Option<&str>,
    ) -> Result<Step, DialoguerError> {
        if let Some(placeholder) = placeholder {
            println!("  ({placeholder})");
        }
        if !view.is_first() {
            println!("  (enter {BACK_INPUT} to go back)");
        }

        let theme = self.theme();
        let text: String = Input::with_theme(&*theme)
            .with_prompt(view.question.text())
            .with_initial_text(view.draft.as_text().unwrap_or_default())
            .allow_empty(true)
            .interact_text()
            .map_err(prompt_error)?;

        if text.trim() == BACK_INPUT && !view.is_first() {
            return Ok(Step::Back);
        }
        session.wizard_mut().set_text(text);
        Ok(Step::Next)
    }

    fn ask_action(&self) -> Result<Action, DialoguerError> {
        const ACTIONS: [(&str, Action); 4] = [
            (SUBMIT, Action::Submit),
            (BACK, Action::Back),
            (START_OVER, Action::StartOver),
            (QUIT, Action::Quit),
        ];
        let items: Vec<&str> = ACTIONS.iter().map(|(label, _)| *label).collect();

        println!();
        let theme = self.theme();
        let picked = Select::with_theme(&*theme)
            .with_prompt("All questions done")
            .items(&items)
            .default(0)
            .interact()
            .map_err(prompt_error)?;
        Ok(ACTIONS[picked].1)
    }
}

/// The part of `text` not yet written, given `printed` bytes already are.
///
/// Falls back to the whole text when it no longer extends what was printed.
fn unprinted(text: &str, printed: usize) -> &str {
    text.get(printed..).unwrap_or(text)
}

/// Print the presented reply as it is revealed, until the reveal finishes.
async fn print_reply<T: ChatTransport>(session: &mut Session<T>) -> Result<(), DialoguerError> {
    let mut display = session.presenter().subscribe();
    let mut stdout = std::io::stdout();
    let mut printed = 0;
    println!();

    let finished = session.reveal_finished();
    tokio::pin!(finished);
    loop {
        tokio::select! {
            _ = &mut finished => break,
            changed = display.changed() => {
                if changed.is_err() {
                    break;
                }
                let text = display.borrow_and_update().clone();
                write!(stdout, "{}", unprinted(&text, printed))?;
                stdout.flush()?;
                printed = text.len();
            }
        }
    }

    let text = display.borrow().clone();
    writeln!(stdout, "{}", unprinted(&text, printed))?;
    Ok(())
}

#[async_trait(?Send)]
impl Frontend for DialoguerFrontend {
    type Error = DialoguerError;

    async fn run<T: ChatTransport>(
        &mut self,
        session: &mut Session<T>,
    ) -> Result<FrontendOutcome, Self::Error> {
        // Show prelude if present
        if let Some(prelude) = session.wizard().questions().prelude() {
            println!("{prelude}");
        }

        let mut last = None;
        let mut reviewing = false;
        loop {
            if !reviewing {
                match self.ask(session)? {
                    Step::Next if session.wizard().can_move_next() => {
                        session.wizard_mut().move_next();
                    }
                    Step::Next => reviewing = true,
                    Step::Back => {
                        session.wizard_mut().move_previous();
                    }
                }
                continue;
            }

            match self.ask_action()? {
                Action::Submit => {
                    let outcome = session.submit().await;
                    match &outcome {
                        SubmitOutcome::Incomplete { index } => {
                            tracing::debug!(index, "returning to unanswered question");
                            reviewing = false;
                        }
                        SubmitOutcome::Replied(_) | SubmitOutcome::Failed => {
                            print_reply(session).await?;
                            // Show epilogue if present
                            if let Some(epilogue) = session.wizard().questions().epilogue() {
                                println!();
                                println!("{epilogue}");
                            }
                        }
                    }
                    last = Some(outcome);
                }
                Action::Back => reviewing = false,
                Action::StartOver => {
                    session.reset();
                    reviewing = false;
                }
                Action::Quit => break,
            }
        }

        Ok(match last {
            Some(outcome) => FrontendOutcome::Submitted(outcome),
            None => FrontendOutcome::Quit,
        })
    }
}
