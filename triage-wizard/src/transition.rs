//! Animated question transitions.
//!
//! Moving between questions is a three step sequence: the outgoing question
//! plays an exit animation, the rendered content is swapped, then the incoming
//! question plays an entry animation. The render layer provides the animated
//! container as a [`Stage`]; [`Wizard::navigate`](crate::Wizard::navigate)
//! drives the sequence and awaits each animation before starting the next
//! step. Taking the stage by `&mut` means only one transition can own it at a
//! time.

use async_trait::async_trait;

use crate::QuestionView;

/// Which way the cursor moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Forward,
    Backward,
}

/// The animations a stage must be able to play.
///
/// Forward and backward transitions use mirrored animations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Animation {
    /// Outgoing question leaves towards the left (moving forward).
    SlideOutLeft,
    /// Incoming question arrives from the right (moving forward).
    SlideInRight,
    /// Outgoing question leaves towards the right (moving backward).
    SlideOutRight,
    /// Incoming question arrives from the left (moving backward).
    SlideInLeft,
}

impl Animation {
    pub fn exit(direction: Direction) -> Self {
        match direction {
            Direction::Forward => Self::SlideOutLeft,
            Direction::Backward => Self::SlideOutRight,
        }
    }

    pub fn entry(direction: Direction) -> Self {
        match direction {
            Direction::Forward => Self::SlideInRight,
            Direction::Backward => Self::SlideInLeft,
        }
    }

    pub fn is_exit(self) -> bool {
        matches!(self, Self::SlideOutLeft | Self::SlideOutRight)
    }
}

/// The animated container that renders the current question.
#[async_trait]
pub trait Stage: Send {
    /// The error type for this stage.
    type Error: Into<anyhow::Error> + Send;

    /// Play `animation` on `view`. Resolves once the animation has finished.
    async fn play(&mut self, animation: Animation, view: &QuestionView)
    -> Result<(), Self::Error>;

    /// Replace the rendered content with `view`.
    fn swap(&mut self, view: &QuestionView) -> Result<(), Self::Error>;
}

/// Stage for renderers without an animated container: every animation
/// completes at once and the swap has no side effect.
#[derive(Debug, Clone, Copy, Default)]
pub struct Immediate;

#[async_trait]
impl Stage for Immediate {
    type Error = std::convert::Infallible;

    async fn play(&mut self, _: Animation, _: &QuestionView) -> Result<(), Self::Error> {
        Ok(())
    }

    fn swap(&mut self, _: &QuestionView) -> Result<(), Self::Error> {
        Ok(())
    }
}
