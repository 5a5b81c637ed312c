use crate::payload::{ChatRequest, ChatResponse, HealthStatus};
use crate::transport::{ChatTransport, TransportError};

/// Shown when no decodable response arrived.
pub const NETWORK_ERROR_MESSAGE: &str =
    "Network error: could not reach the server. Please try again.";

/// A response the backend actually gave.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyResult {
    Reply(String),
    /// The backend rejected the request.
    Error(String),
}

impl ReplyResult {
    /// Classify a decoded response. An `error` field wins over a reply;
    /// an empty `error` counts as absent. `None` if neither is present.
    pub fn from_response(mut response: ChatResponse) -> Option<Self> {
        match response.error.take() {
            Some(error) if !error.is_empty() => Some(Self::Error(error)),
            _ => response.into_reply().map(Self::Reply),
        }
    }

    /// The text shown to the user.
    pub fn display_text(&self) -> String {
        match self {
            Self::Reply(reply) => reply.clone(),
            Self::Error(error) => format!("Error: {error}"),
        }
    }
}

/// Text shown for the outcome of [`ChatClient::send`].
pub fn display_text(outcome: &Result<ReplyResult, TransportError>) -> String {
    match outcome {
        Ok(result) => result.display_text(),
        Err(_) => NETWORK_ERROR_MESSAGE.to_string(),
    }
}

/// Sends chat requests over a [`ChatTransport`] and classifies the answers.
#[derive(Debug, Clone)]
pub struct ChatClient<T> {
    transport: T,
}

impl<T: ChatTransport> ChatClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Send one request. A body with neither reply nor error is reported as
    /// [`TransportError::Malformed`].
    pub async fn send(&self, request: &ChatRequest) -> Result<ReplyResult, TransportError> {
        tracing::info!(
            bytes = request.message.len(),
            turns = request.history.len(),
            "sending chat request"
        );
        let response = self.transport.post_chat(request).await?;
        let result = ReplyResult::from_response(response).ok_or_else(|| {
            TransportError::Malformed("response has neither reply nor error".to_string())
        })?;
        if let ReplyResult::Error(error) = &result {
            tracing::warn!(%error, "backend rejected request");
        }
        Ok(result)
    }

    pub async fn health(&self) -> Result<HealthStatus, TransportError> {
        self.transport.health().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TestTransport;

    #[test]
    fn error_wins_over_reply() {
        let response = ChatResponse {
            reply: Some("partial".into()),
            error: Some("bad input".into()),
            ..ChatResponse::default()
        };
        assert_eq!(
            ReplyResult::from_response(response),
            Some(ReplyResult::Error("bad input".into()))
        );
    }

    #[test]
    fn empty_error_is_absent() {
        let response = ChatResponse {
            reply: Some("fine".into()),
            error: Some(String::new()),
            ..ChatResponse::default()
        };
        assert_eq!(
            ReplyResult::from_response(response),
            Some(ReplyResult::Reply("fine".into()))
        );
        assert_eq!(ReplyResult::from_response(ChatResponse::default()), None);
    }

    #[test]
    fn reply_field_wins_when_both_names_are_sent() {
        let response: ChatResponse =
            serde_json::from_str(r#"{"reply":"ok","reply_markdown":"ok"}"#).unwrap();
        assert_eq!(
            ReplyResult::from_response(response),
            Some(ReplyResult::Reply("ok".into()))
        );

        let response = ChatResponse {
            reply_markdown: Some("**ok**".into()),
            ..ChatResponse::default()
        };
        assert_eq!(
            ReplyResult::from_response(response),
            Some(ReplyResult::Reply("**ok**".into()))
        );
    }

    #[test]
    fn display_texts() {
        assert_eq!(ReplyResult::Reply("ok".into()).display_text(), "ok");
        assert_eq!(
            ReplyResult::Error("bad input".into()).display_text(),
            "Error: bad input"
        );
        let failed: Result<ReplyResult, TransportError> =
            Err(TransportError::Unreachable("down".into()));
        assert_eq!(display_text(&failed), NETWORK_ERROR_MESSAGE);
    }

    #[tokio::test]
    async fn empty_body_is_malformed() {
        let transport = TestTransport::new().with_response(ChatResponse::default());
        let client = ChatClient::new(transport);
        let err = client.send(&ChatRequest::new("hi")).await.unwrap_err();
        assert!(matches!(err, TransportError::Malformed(_)));
    }

    #[tokio::test]
    async fn send_records_request() {
        let transport = TestTransport::new().with_reply("ok");
        let client = ChatClient::new(transport.clone());
        let result = client.send(&ChatRequest::new("hi")).await.unwrap();
        assert_eq!(result, ReplyResult::Reply("ok".into()));
        assert_eq!(transport.requests(), vec![ChatRequest::new("hi")]);
    }
}
