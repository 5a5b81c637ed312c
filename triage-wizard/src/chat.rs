//! A minimal two-party chat: the user's lines and the bot's answers.

use std::time::Duration;

use crate::client::{ChatClient, NETWORK_ERROR_MESSAGE};
use crate::payload::{ChatRequest, HistoryEntry, Role};
use crate::transport::{ChatTransport, ReqwestTransport};

/// The bot's line when no backend is attached.
pub const CANNED_REPLY: &str = "This is a bot reply.";

/// How long the canned bot "thinks" before answering.
pub const CANNED_DELAY: Duration = Duration::from_millis(600);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Author {
    Me,
    Bot,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub author: Author,
    pub text: String,
}

impl ChatMessage {
    pub fn me(text: impl Into<String>) -> Self {
        Self {
            author: Author::Me,
            text: text.into(),
        }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            author: Author::Bot,
            text: text.into(),
        }
    }
}

/// Append-only record of a conversation, oldest message first.
pub type ChatLog = Vec<ChatMessage>;

/// Where bot messages come from.
#[derive(Debug, Clone)]
pub enum Responder<T = ReqwestTransport> {
    /// The same text after a fixed delay.
    Canned { text: String, delay: Duration },
    /// The chat backend, sent the conversation so far as history.
    Backend(ChatClient<T>),
}

impl<T> Responder<T> {
    pub fn canned() -> Self {
        Self::Canned {
            text: CANNED_REPLY.to_string(),
            delay: CANNED_DELAY,
        }
    }
}

/// The message log of a chat, plus its responder.
#[derive(Debug, Clone)]
pub struct ChatDemo<T = ReqwestTransport> {
    log: ChatLog,
    responder: Responder<T>,
}

impl<T: ChatTransport> ChatDemo<T> {
    pub fn new(responder: Responder<T>) -> Self {
        Self {
            log: Vec::new(),
            responder,
        }
    }

    /// Every message so far, oldest first.
    pub fn messages(&self) -> &[ChatMessage] {
        &self.log
    }

    /// Post the user's `input` and wait for the bot's answer.
    ///
    /// Input is trimmed; blank input is ignored and returns `None`.
    pub async fn send(&mut self, input: &str) -> Option<&ChatMessage> {
        let text = input.trim();
        if text.is_empty() {
            return None;
        }

        let history = self.history();
        self.log.push(ChatMessage::me(text));

        let reply = match &self.responder {
            Responder::Canned { text, delay } => {
                tokio::time::sleep(*delay).await;
                text.clone()
            }
            Responder::Backend(client) => {
                let request = ChatRequest {
                    message: text.to_string(),
                    history,
                };
                match client.send(&request).await {
                    Ok(result) => result.display_text(),
                    Err(err) => {
                        tracing::warn!(%err, "chat request failed");
                        NETWORK_ERROR_MESSAGE.to_string()
                    }
                }
            }
        };

        self.log.push(ChatMessage::bot(reply));
        self.log.last()
    }

    /// The log so far as backend history.
    fn history(&self) -> Vec<HistoryEntry> {
        self.log
            .iter()
            .map(|message| HistoryEntry {
                role: match message.author {
                    Author::Me => Role::User,
                    Author::Bot => Role::Assistant,
                },
                content: message.text.clone(),
            })
            .collect()
    }
}
