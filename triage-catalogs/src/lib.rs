//! Question catalogs shipped with the `triage` binary.

use triage_wizard::{CatalogError, PayloadStyle, QuestionSet};

pub mod quick;
pub mod workplace;

/// The catalogs a session can be started with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Catalog {
    /// Six-question workplace triage, submitted as structured JSON.
    Workplace,
    /// Three-question quick check, submitted as a transcript.
    Quick,
}

impl Catalog {
    pub fn questions(self) -> Result<QuestionSet, CatalogError> {
        match self {
            Self::Workplace => workplace::questions(),
            Self::Quick => quick::questions(),
        }
    }

    pub fn payload_style(self) -> PayloadStyle {
        match self {
            Self::Workplace => workplace::payload_style(),
            Self::Quick => quick::payload_style(),
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Workplace => "Workplace triage",
            Self::Quick => "Quick check",
        }
    }
}
