//! Wire types of the chat endpoint and the shapes a survey submission takes.

use serde::{Deserialize, Serialize};
use triage_types::AnswerStore;

/// Sentence placed in front of a structured answer dump.
pub const DEFAULT_INSTRUCTION: &str = "Please assess the following workplace situation. \
     These are the answers to the triage questionnaire, keyed by question:";

/// Body of `POST /chat`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,

    /// Prior turns of the conversation. Survey submissions send none.
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
}

impl ChatRequest {
    /// A request without prior turns.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            history: Vec::new(),
        }
    }
}

/// One prior turn of a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub role: Role,
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// Body returned by `POST /chat`. Exactly one field is expected to be set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply: Option<String>,

    /// Reply text under the name the reference backend uses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_markdown: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ChatResponse {
    pub fn reply(text: impl Into<String>) -> Self {
        Self {
            reply: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            error: Some(text.into()),
            ..Self::default()
        }
    }

    /// The reply text, preferring `reply` over `reply_markdown`.
    pub fn into_reply(self) -> Option<String> {
        self.reply.or(self.reply_markdown)
    }
}

/// Body returned by `GET /healthz`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub ok: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// How collected answers are turned into the chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayloadStyle {
    /// An instruction sentence followed by the answers as pretty-printed JSON.
    Structured { instruction: String },

    /// One `"Qn: answer"` line per question.
    Transcript,
}

impl PayloadStyle {
    /// Structured dump behind [`DEFAULT_INSTRUCTION`].
    pub fn structured() -> Self {
        Self::Structured {
            instruction: DEFAULT_INSTRUCTION.to_string(),
        }
    }

    /// The chat message for a set of answers.
    pub fn message(&self, answers: &AnswerStore) -> serde_json::Result<String> {
        match self {
            Self::Structured { instruction } => {
                Ok(format!("{instruction}\n\n{}", answers.to_json_pretty()?))
            }
            Self::Transcript => Ok(transcript(answers)),
        }
    }

    /// The full request for a set of answers, with an empty history.
    pub fn request(&self, answers: &AnswerStore) -> serde_json::Result<ChatRequest> {
        self.message(answers).map(ChatRequest::new)
    }
}

/// Newline-joined `"Q1: answer"` rendering of all answers, in catalog order.
pub fn transcript(answers: &AnswerStore) -> String {
    answers
        .iter()
        .enumerate()
        .map(|(i, (_, value))| format!("Q{}: {}", i + 1, value.display()))
        .collect::<Vec<_>>()
        .join("\n")
}
