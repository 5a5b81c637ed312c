use serde::{Deserialize, Serialize};

use crate::{QuestionKind, Selection};

/// A single answer collected from a survey.
///
/// Serializes untagged: text as a JSON string, a selection as a JSON array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    /// The chosen option of a single-select question, or free text.
    Text(String),

    /// The chosen options of a multi-select question.
    MultiSelect(Selection),
}

impl AnswerValue {
    /// The empty answer with the right shape for a question kind.
    pub fn empty_for(kind: &QuestionKind) -> Self {
        match kind {
            QuestionKind::SingleSelect(_) | QuestionKind::FreeText(_) => Self::Text(String::new()),
            QuestionKind::MultiSelect(_) => Self::MultiSelect(Selection::new()),
        }
    }

    /// Check whether this value has the shape a question kind expects.
    pub fn fits(&self, kind: &QuestionKind) -> bool {
        matches!(
            (self, kind),
            (Self::Text(_), QuestionKind::SingleSelect(_) | QuestionKind::FreeText(_))
                | (Self::MultiSelect(_), QuestionKind::MultiSelect(_))
        )
    }

    /// Try to get this value as a string reference.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::MultiSelect(_) => None,
        }
    }

    /// Try to get this value as a selection.
    pub fn as_selection(&self) -> Option<&Selection> {
        match self {
            Self::MultiSelect(selection) => Some(selection),
            Self::Text(_) => None,
        }
    }

    pub fn as_selection_mut(&mut self) -> Option<&mut Selection> {
        match self {
            Self::MultiSelect(selection) => Some(selection),
            Self::Text(_) => None,
        }
    }

    /// Human-readable rendering for transcripts: text as-is, selections
    /// joined with `", "`.
    pub fn display(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::MultiSelect(selection) => selection.options().join(", "),
        }
    }

    /// Get the type name of this value for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Text(_) => "Text",
            Self::MultiSelect(_) => "MultiSelect",
        }
    }
}

impl From<String> for AnswerValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for AnswerValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<Selection> for AnswerValue {
    fn from(selection: Selection) -> Self {
        Self::MultiSelect(selection)
    }
}
