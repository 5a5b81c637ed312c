//! The sliding question panel.

use std::io::Stdout;
use std::time::Duration;

use async_trait::async_trait;
use ratatui::{Terminal, layout::Rect, prelude::CrosstermBackend};
use triage_wizard::{Animation, QuestionView, Stage};

use crate::frontend::RatatuiError;
use crate::ui::{Screen, draw_ui};

/// How a slide is played.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideTiming {
    /// Frames per animation. Zero disables animation.
    pub frames: u16,
    pub frame_time: Duration,
}

impl Default for SlideTiming {
    fn default() -> Self {
        Self {
            frames: 6,
            frame_time: Duration::from_millis(20),
        }
    }
}

impl SlideTiming {
    pub fn disabled() -> Self {
        Self {
            frames: 0,
            frame_time: Duration::ZERO,
        }
    }
}

/// Horizontal offset of the question panel `progress` of the way through
/// `animation`. Negative is left of the resting position.
pub(crate) fn slide_offset(animation: Animation, progress: f32, width: u16) -> i32 {
    let p = progress.clamp(0.0, 1.0);
    let width = f32::from(width);
    let offset = match animation {
        Animation::SlideOutLeft => -p * width,
        Animation::SlideOutRight => p * width,
        Animation::SlideInRight => (1.0 - p) * width,
        Animation::SlideInLeft => -(1.0 - p) * width,
    };
    offset.round() as i32
}

/// The part of `area` still visible when shifted by `offset` columns.
pub(crate) fn shifted(area: Rect, offset: i32) -> Rect {
    let shift = offset.unsigned_abs().min(u32::from(area.width)) as u16;
    if offset >= 0 {
        Rect {
            x: area.x + shift,
            width: area.width - shift,
            ..area
        }
    } else {
        Rect {
            width: area.width - shift,
            ..area
        }
    }
}

/// Stage that slides the question panel across the terminal, one frame per
/// `frame_time`.
pub(crate) struct SlideStage<'a> {
    pub terminal: &'a mut Terminal<CrosstermBackend<Stdout>>,
    pub screen: &'a mut Screen,
    /// Reply text to keep showing while the panel moves.
    pub reply: String,
    pub timing: SlideTiming,
}

impl SlideStage<'_> {
    fn draw(&mut self, view: &QuestionView, offset: i32) -> Result<(), RatatuiError> {
        let screen = &*self.screen;
        let reply = &self.reply;
        self.terminal
            .draw(|frame| draw_ui(frame, screen, view, reply, offset))?;
        Ok(())
    }
}

#[async_trait]
impl Stage for SlideStage<'_> {
    type Error = RatatuiError;

    async fn play(&mut self, animation: Animation, view: &QuestionView) -> Result<(), Self::Error> {
        let width = self.terminal.size()?.width;
        for frame in 1..=self.timing.frames {
            let progress = f32::from(frame) / f32::from(self.timing.frames);
            self.draw(view, slide_offset(animation, progress, width))?;
            tokio::time::sleep(self.timing.frame_time).await;
        }
        Ok(())
    }

    fn swap(&mut self, view: &QuestionView) -> Result<(), Self::Error> {
        self.screen.focus(view);
        if self.timing.frames > 0 {
            // The incoming panel starts fully off screen.
            return Ok(());
        }
        self.draw(view, 0)
    }
}
