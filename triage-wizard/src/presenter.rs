//! Revealing reply text, either at once or character by character.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Characters after which the typewriter pauses longer.
const PAUSE_AFTER: [char; 4] = ['.', '•', '-', '\n'];

/// Timing of the typewriter reveal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    /// Delay after an ordinary character.
    pub char_delay: Duration,
    /// Delay after a sentence or list break.
    pub pause_delay: Duration,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            char_delay: Duration::from_millis(15),
            pause_delay: Duration::from_millis(120),
        }
    }
}

impl Pacing {
    /// How long to wait after revealing `c`.
    pub fn delay_after(&self, c: char) -> Duration {
        if PAUSE_AFTER.contains(&c) {
            self.pause_delay
        } else {
            self.char_delay
        }
    }

    /// Total time a full reveal of `text` takes.
    pub fn duration_of(&self, text: &str) -> Duration {
        text.chars().map(|c| self.delay_after(c)).sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresentMode {
    Immediate,
    Typewriter(Pacing),
}

/// Owns the displayed reply text and publishes every change on a watch
/// channel.
///
/// Presenting new text (or clearing) cancels a reveal still in progress, so
/// two reveals never interleave.
#[derive(Debug)]
pub struct ReplyPresenter {
    display: watch::Sender<String>,
    mode: PresentMode,
    reveal: Option<CancellationToken>,
}

impl ReplyPresenter {
    pub fn new(mode: PresentMode) -> Self {
        let (display, _) = watch::channel(String::new());
        Self {
            display,
            mode,
            reveal: None,
        }
    }

    pub fn typewriter() -> Self {
        Self::new(PresentMode::Typewriter(Pacing::default()))
    }

    /// Receiver that observes every change of the displayed text.
    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.display.subscribe()
    }

    /// The text displayed right now.
    pub fn text(&self) -> String {
        self.display.borrow().clone()
    }

    /// Display `text` according to the current mode.
    ///
    /// In typewriter mode the display is emptied first and the reveal runs on
    /// a spawned task, so this must be called inside a tokio runtime.
    pub fn present(&mut self, text: impl Into<String>) -> RevealHandle {
        match self.mode {
            PresentMode::Immediate => self.present_now(text),
            PresentMode::Typewriter(pacing) => {
                self.cancel_reveal();
                self.display.send_replace(String::new());

                let token = CancellationToken::new();
                self.reveal = Some(token.clone());
                let task = tokio::spawn(reveal(
                    self.display.clone(),
                    text.into(),
                    pacing,
                    token,
                ));
                RevealHandle { task: Some(task) }
            }
        }
    }

    /// Display `text` in one step, whatever the mode.
    pub fn present_now(&mut self, text: impl Into<String>) -> RevealHandle {
        self.cancel_reveal();
        self.display.send_replace(text.into());
        RevealHandle::done()
    }

    /// Empty the display and stop any reveal in progress.
    pub fn clear(&mut self) {
        self.cancel_reveal();
        self.display.send_replace(String::new());
    }

    fn cancel_reveal(&mut self) {
        if let Some(token) = self.reveal.take() {
            token.cancel();
        }
    }
}

impl Drop for ReplyPresenter {
    fn drop(&mut self) {
        self.cancel_reveal();
    }
}

async fn reveal(
    display: watch::Sender<String>,
    text: String,
    pacing: Pacing,
    token: CancellationToken,
) {
    for c in text.chars() {
        // Checked under the channel lock, so a superseded reveal never writes
        // after the presenter has cleared the display.
        let pushed = display.send_if_modified(|shown| {
            if token.is_cancelled() {
                return false;
            }
            shown.push(c);
            true
        });
        if !pushed {
            return;
        }
        tokio::select! {
            _ = token.cancelled() => return,
            _ = tokio::time::sleep(pacing.delay_after(c)) => {}
        }
    }
    tracing::trace!(chars = text.chars().count(), "reveal finished");
}

/// Handle to one presentation.
#[derive(Debug)]
pub struct RevealHandle {
    task: Option<JoinHandle<()>>,
}

impl RevealHandle {
    fn done() -> Self {
        Self { task: None }
    }

    /// Whether the text is fully shown or the reveal was cancelled.
    pub fn is_finished(&self) -> bool {
        self.task.as_ref().is_none_or(JoinHandle::is_finished)
    }

    /// Resolves once the reveal has finished or been cancelled.
    pub async fn finished(self) {
        if let Some(task) = self.task {
            if let Err(err) = task.await {
                tracing::warn!(%err, "reveal task failed");
            }
        }
    }
}
