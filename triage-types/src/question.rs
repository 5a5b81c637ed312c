use serde::{Deserialize, Serialize};

/// The option text that is mutually exclusive with every sibling option
/// of a multi-select question.
pub const NONE_OF_THESE: &str = "None of these";

/// A single question in a survey.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Stable identifier, e.g. `"q1"`.
    id: String,

    /// The prompt text shown to the user. Also the key of its answer.
    text: String,

    /// The kind of question (determines the input control and answer shape).
    kind: QuestionKind,
}

impl Question {
    /// Create a new question.
    pub fn new(id: impl Into<String>, text: impl Into<String>, kind: QuestionKind) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            kind,
        }
    }

    /// Shorthand for a single-select question.
    pub fn single_select<I, S>(id: impl Into<String>, text: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(id, text, QuestionKind::SingleSelect(ChoiceQuestion::new(options)))
    }

    /// Shorthand for a multi-select question.
    pub fn multi_select<I, S>(id: impl Into<String>, text: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(id, text, QuestionKind::MultiSelect(ChoiceQuestion::new(options)))
    }

    /// Shorthand for a free-text question.
    pub fn free_text(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(id, text, QuestionKind::FreeText(FreeTextQuestion::new()))
    }

    /// Get the question id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Get the prompt text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Get the question kind.
    pub fn kind(&self) -> &QuestionKind {
        &self.kind
    }

    /// The options of a choice question; empty for free text.
    pub fn options(&self) -> &[String] {
        match &self.kind {
            QuestionKind::SingleSelect(choice) | QuestionKind::MultiSelect(choice) => {
                &choice.options
            }
            QuestionKind::FreeText(_) => &[],
        }
    }
}

/// The kind of question, determining input type and answer shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum QuestionKind {
    /// Pick exactly one option (radio group).
    SingleSelect(ChoiceQuestion),

    /// Pick any number of options (checkbox group).
    MultiSelect(ChoiceQuestion),

    /// Free text box.
    FreeText(FreeTextQuestion),
}

impl QuestionKind {
    pub fn is_choice(&self) -> bool {
        matches!(self, Self::SingleSelect(_) | Self::MultiSelect(_))
    }

    pub fn is_multi_select(&self) -> bool {
        matches!(self, Self::MultiSelect(_))
    }

    /// Short name used in log lines and error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Self::SingleSelect(_) => "single-select",
            Self::MultiSelect(_) => "multi-select",
            Self::FreeText(_) => "free-text",
        }
    }
}

/// Configuration for a choice question.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceQuestion {
    /// The available options, in display order.
    pub options: Vec<String>,
}

impl ChoiceQuestion {
    /// Create a choice question with the given options.
    pub fn new<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            options: options.into_iter().map(Into::into).collect(),
        }
    }

    /// Check whether `option` is one of this question's options.
    pub fn contains(&self, option: &str) -> bool {
        self.options.iter().any(|o| o == option)
    }

    /// Check whether the sentinel option is offered.
    pub fn has_sentinel(&self) -> bool {
        self.contains(NONE_OF_THESE)
    }
}

/// Configuration for a free-text question.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreeTextQuestion {
    /// Hint shown in an empty text box.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
}

impl FreeTextQuestion {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with a placeholder hint.
    pub fn with_placeholder(placeholder: impl Into<String>) -> Self {
        Self {
            placeholder: Some(placeholder.into()),
        }
    }
}
