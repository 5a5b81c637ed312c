//! Ratatui implementation of the Frontend trait.
//!
//! Provides a full-screen terminal UI with a progress indicator, a reply
//! panel, keyboard navigation and sliding question transitions.

use std::io::{self, Stdout};
use std::time::Duration;

use async_trait::async_trait;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, prelude::CrosstermBackend, style::Color};
use thiserror::Error;
use triage_wizard::{
    ChatTransport, Direction, Frontend, FrontendOutcome, QuestionKind, Session, SubmitOutcome,
};

use crate::stage::{SlideStage, SlideTiming};
use crate::ui::{Screen, draw_ui};

/// How long to wait between redraws when no key is pressed.
const IDLE_FRAME: Duration = Duration::from_millis(30);

const SENDING: &str = "Sending your answers…";

/// Error type for the Ratatui frontend.
#[derive(Debug, Error)]
pub enum RatatuiError {
    /// User cancelled the survey (e.g., pressed Ctrl+C).
    #[error("Survey cancelled by user")]
    Cancelled,

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Terminal setup/restore error.
    #[error("Terminal error: {0}")]
    Terminal(String),
}

/// Color theme for the TUI.
#[derive(Debug, Clone)]
pub struct Theme {
    pub primary: Color,
    pub secondary: Color,
    pub text: Color,
    pub highlight: Color,
    pub success: Color,
    pub border: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary: Color::Cyan,
            secondary: Color::Blue,
            text: Color::White,
            highlight: Color::Yellow,
            success: Color::Green,
            border: Color::Gray,
        }
    }
}

/// What a key press asks the event loop to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Navigate(Direction),
    Submit,
    Reset,
    Quit,
    Cancel,
    Redraw,
}

/// Ratatui-based TUI frontend with rich visual interface.
///
/// This frontend presents questions one at a time in a styled terminal UI
/// with progress tracking, keyboard navigation and a reply panel that
/// follows the presenter.
#[derive(Debug, Clone)]
pub struct RatatuiFrontend {
    /// Title shown at the top of the wizard.
    title: String,
    /// Color theme for the UI.
    theme: Theme,
    timing: SlideTiming,
}

impl Default for RatatuiFrontend {
    fn default() -> Self {
        Self::new()
    }
}

impl RatatuiFrontend {
    /// Create a new Ratatui frontend with default settings.
    pub fn new() -> Self {
        Self {
            title: "Triage".to_string(),
            theme: Theme::default(),
            timing: SlideTiming::default(),
        }
    }

    /// Set the title shown at the top of the wizard.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set a custom color theme.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Set how question transitions are animated.
    pub fn with_timing(mut self, timing: SlideTiming) -> Self {
        self.timing = timing;
        self
    }

    fn setup_terminal(&self) -> Result<Terminal<CrosstermBackend<Stdout>>, RatatuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(terminal)
    }

    fn restore_terminal(
        &self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    ) -> Result<(), RatatuiError> {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
        Ok(())
    }

    async fn event_loop<T: ChatTransport>(
        &self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
        session: &mut Session<T>,
    ) -> Result<FrontendOutcome, RatatuiError> {
        let questions = session.wizard().questions();
        let title = match questions.prelude() {
            Some(prelude) => format!("{}\n{}", self.title, prelude),
            None => self.title.clone(),
        };
        let mut screen = Screen::new(title, self.theme.clone());
        screen.epilogue = questions.epilogue().map(str::to_string);
        screen.focus(&session.wizard().view());

        let mut last = None;
        loop {
            let view = session.wizard().view();
            let reply = session.presenter().text();
            terminal.draw(|frame| draw_ui(frame, &screen, &view, &reply, 0))?;

            // Poll without blocking so the reply reveal keeps running.
            if !event::poll(Duration::ZERO)? {
                tokio::time::sleep(IDLE_FRAME).await;
                continue;
            }
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }

            match handle_key(session, &mut screen, key) {
                Command::Redraw => {}
                Command::Navigate(direction) => {
                    let mut stage = SlideStage {
                        terminal: &mut *terminal,
                        screen: &mut screen,
                        reply,
                        timing: self.timing,
                    };
                    session.wizard_mut().navigate(direction, &mut stage).await?;
                }
                Command::Submit => {
                    screen.status = Some(SENDING.to_string());
                    terminal.draw(|frame| draw_ui(frame, &screen, &view, &reply, 0))?;

                    let outcome = session.submit().await;
                    screen.status = None;
                    match &outcome {
                        SubmitOutcome::Incomplete { index } => {
                            tracing::debug!(index, "returning to unanswered question");
                            screen.focus(&session.wizard().view());
                        }
                        SubmitOutcome::Replied(_) | SubmitOutcome::Failed => screen.replied = true,
                    }
                    last = Some(outcome);
                }
                Command::Reset => {
                    session.reset();
                    screen.replied = false;
                    screen.focus(&session.wizard().view());
                }
                Command::Quit => break,
                Command::Cancel => return Err(RatatuiError::Cancelled),
            }
        }

        Ok(match last {
            Some(outcome) => FrontendOutcome::Submitted(outcome),
            None => FrontendOutcome::Quit,
        })
    }
}

/// Apply a key press to the wizard and screen, returning what the event loop
/// still has to do.
fn handle_key<T: ChatTransport>(
    session: &mut Session<T>,
    screen: &mut Screen,
    key: KeyEvent,
) -> Command {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Command::Cancel,
            KeyCode::Char('s') => Command::Submit,
            KeyCode::Char('r') => Command::Reset,
            _ => Command::Redraw,
        };
    }

    let view = session.wizard().view();
    let wizard = session.wizard_mut();
    let forward = if view.is_last() {
        Command::Submit
    } else {
        Command::Navigate(Direction::Forward)
    };

    match (key.code, view.question.kind()) {
        (KeyCode::Esc, _) => Command::Quit,
        (KeyCode::Left, _) => Command::Navigate(Direction::Backward),
        (KeyCode::Right, _) => Command::Navigate(Direction::Forward),

        (KeyCode::Up, kind) if kind.is_choice() => {
            screen.highlight_up();
            Command::Redraw
        }
        (KeyCode::Down, kind) if kind.is_choice() => {
            screen.highlight_down(&view);
            Command::Redraw
        }

        (KeyCode::Char(' '), QuestionKind::SingleSelect(choice)) => {
            if let Some(option) = choice.options.get(screen.highlighted) {
                wizard.choose(option);
            }
            Command::Redraw
        }
        (KeyCode::Enter, QuestionKind::SingleSelect(choice)) => {
            match choice.options.get(screen.highlighted) {
                Some(option) => {
                    wizard.choose(option);
                    forward
                }
                None => Command::Redraw,
            }
        }

        (KeyCode::Char(' '), QuestionKind::MultiSelect(choice)) => {
            if let Some(option) = choice.options.get(screen.highlighted) {
                wizard.toggle(option);
            }
            Command::Redraw
        }
        (KeyCode::Enter, QuestionKind::MultiSelect(_)) => forward,

        (KeyCode::Enter, QuestionKind::FreeText(_)) => forward,
        (KeyCode::Backspace, QuestionKind::FreeText(_)) => match wizard.text_mut() {
            Some(text) if !text.is_empty() => {
                text.pop();
                Command::Redraw
            }
            _ => Command::Navigate(Direction::Backward),
        },
        (KeyCode::Char(c), QuestionKind::FreeText(_)) => {
            if let Some(text) = wizard.text_mut() {
                text.push(c);
            }
            Command::Redraw
        }

        (KeyCode::Backspace, _) => Command::Navigate(Direction::Backward),
        _ => Command::Redraw,
    }
}

#[async_trait(?Send)]
impl Frontend for RatatuiFrontend {
    type Error = RatatuiError;

    async fn run<T: ChatTransport>(
        &mut self,
        session: &mut Session<T>,
    ) -> Result<FrontendOutcome, Self::Error> {
        let mut terminal = self.setup_terminal()?;
        let outcome = self.event_loop(&mut terminal, session).await;
        self.restore_terminal(&mut terminal)?;
        outcome
    }
}

#[cfg(test)]
mod tests {
    use triage_wizard::{
        ChatClient, NONE_OF_THESE, PayloadStyle, PresentMode, Question, QuestionSet,
        ReplyPresenter, TestTransport,
    };

    use super::*;

    fn session() -> Session<TestTransport> {
        let set = QuestionSet::new(vec![
            Question::single_select("q1", "Again?", ["Yes", "No"]),
            Question::multi_select("q2", "Which?", ["Threats", NONE_OF_THESE]),
            Question::free_text("q3", "Details?"),
        ])
        .unwrap();
        Session::new(
            set,
            ChatClient::new(TestTransport::new()),
            ReplyPresenter::new(PresentMode::Immediate),
            PayloadStyle::Transcript,
        )
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn frontend_creation() {
        let _frontend = RatatuiFrontend::new();
        let _with_title = RatatuiFrontend::new().with_title("Test");
        let _with_theme = RatatuiFrontend::new().with_theme(Theme::default());
        let _still = RatatuiFrontend::new().with_timing(SlideTiming::disabled());
    }

    #[test]
    fn error_types() {
        let err = RatatuiError::Cancelled;
        assert_eq!(err.to_string(), "Survey cancelled by user");

        let err = RatatuiError::Terminal("test error".to_string());
        assert_eq!(err.to_string(), "Terminal error: test error");
    }

    #[test]
    fn theme_default() {
        let theme = Theme::default();
        assert_eq!(theme.primary, Color::Cyan);
        assert_eq!(theme.success, Color::Green);
    }

    #[test]
    fn enter_chooses_highlighted_option() {
        let mut session = session();
        let mut screen = Screen::new(String::new(), Theme::default());

        assert_eq!(
            handle_key(&mut session, &mut screen, press(KeyCode::Down)),
            Command::Redraw
        );
        assert_eq!(
            handle_key(&mut session, &mut screen, press(KeyCode::Enter)),
            Command::Navigate(Direction::Forward)
        );
        assert_eq!(session.wizard().draft().as_text(), Some("No"));
    }

    #[test]
    fn space_toggles_multi_select() {
        let mut session = session();
        session.wizard_mut().move_next();
        let mut screen = Screen::new(String::new(), Theme::default());

        handle_key(&mut session, &mut screen, press(KeyCode::Char(' ')));
        screen.highlight_down(&session.wizard().view());
        handle_key(&mut session, &mut screen, press(KeyCode::Char(' ')));

        let selection = session.wizard().draft().as_selection().unwrap();
        assert_eq!(selection.options(), [NONE_OF_THESE]);
    }

    #[test]
    fn typing_and_backspace_on_free_text() {
        let mut session = session();
        session.wizard_mut().jump_to(2);
        let mut screen = Screen::new(String::new(), Theme::default());

        handle_key(&mut session, &mut screen, press(KeyCode::Char('h')));
        handle_key(&mut session, &mut screen, press(KeyCode::Char('i')));
        assert_eq!(session.wizard().draft().as_text(), Some("hi"));

        handle_key(&mut session, &mut screen, press(KeyCode::Backspace));
        handle_key(&mut session, &mut screen, press(KeyCode::Backspace));
        assert_eq!(
            handle_key(&mut session, &mut screen, press(KeyCode::Backspace)),
            Command::Navigate(Direction::Backward)
        );
        // Enter on the last question submits.
        assert_eq!(
            handle_key(&mut session, &mut screen, press(KeyCode::Enter)),
            Command::Submit
        );
    }

    #[test]
    fn control_keys() {
        let mut session = session();
        let mut screen = Screen::new(String::new(), Theme::default());
        assert_eq!(handle_key(&mut session, &mut screen, ctrl('s')), Command::Submit);
        assert_eq!(handle_key(&mut session, &mut screen, ctrl('r')), Command::Reset);
        assert_eq!(handle_key(&mut session, &mut screen, ctrl('c')), Command::Cancel);
        assert_eq!(
            handle_key(&mut session, &mut screen, press(KeyCode::Esc)),
            Command::Quit
        );
    }
}
