use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::payload::{ChatRequest, ChatResponse, HealthStatus};
use crate::transport::{ChatTransport, TransportError};

/// One scripted outcome of `post_chat`.
#[derive(Debug, Clone)]
enum Scripted {
    Respond(ChatResponse),
    Fail(String),
}

#[derive(Debug, Default)]
struct Script {
    responses: VecDeque<Scripted>,
    requests: Vec<ChatRequest>,
    health: Option<HealthStatus>,
}

/// A transport that replays scripted responses and records every request.
///
/// Clones share the same script, so a test can keep one handle and give the
/// other to the client. Once the script runs out every request fails as
/// unreachable.
#[derive(Debug, Clone, Default)]
pub struct TestTransport {
    script: Arc<Mutex<Script>>,
}

impl TestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a `{"reply": text}` response.
    pub fn with_reply(self, text: impl Into<String>) -> Self {
        self.with_response(ChatResponse::reply(text))
    }

    /// Queue an `{"error": text}` response.
    pub fn with_error(self, text: impl Into<String>) -> Self {
        self.with_response(ChatResponse::error(text))
    }

    pub fn with_response(self, response: ChatResponse) -> Self {
        self.lock().responses.push_back(Scripted::Respond(response));
        self
    }

    /// Queue a network failure.
    pub fn with_failure(self, reason: impl Into<String>) -> Self {
        self.lock().responses.push_back(Scripted::Fail(reason.into()));
        self
    }

    pub fn with_health(self, health: HealthStatus) -> Self {
        self.lock().health = Some(health);
        self
    }

    /// Requests received so far, oldest first.
    pub fn requests(&self) -> Vec<ChatRequest> {
        self.lock().requests.clone()
    }

    pub fn request_count(&self) -> usize {
        self.lock().requests.len()
    }

    fn lock(&self) -> MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl ChatTransport for TestTransport {
    async fn post_chat(&self, request: &ChatRequest) -> Result<ChatResponse, TransportError> {
        let mut script = self.lock();
        script.requests.push(request.clone());
        match script.responses.pop_front() {
            Some(Scripted::Respond(response)) => Ok(response),
            Some(Scripted::Fail(reason)) => Err(TransportError::Unreachable(reason)),
            None => Err(TransportError::Unreachable(
                "no scripted response left".to_string(),
            )),
        }
    }

    async fn health(&self) -> Result<HealthStatus, TransportError> {
        self.lock()
            .health
            .clone()
            .ok_or_else(|| TransportError::Unreachable("no scripted health status".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn replays_in_order() {
        let transport = TestTransport::new()
            .with_reply("first")
            .with_failure("cable unplugged");
        let request = ChatRequest::new("x");

        assert_eq!(
            transport.post_chat(&request).await.unwrap(),
            ChatResponse::reply("first")
        );
        assert!(matches!(
            transport.post_chat(&request).await,
            Err(TransportError::Unreachable(reason)) if reason == "cable unplugged"
        ));
        assert!(transport.post_chat(&request).await.is_err());
        assert_eq!(transport.request_count(), 3);
    }

    #[tokio::test]
    async fn health_is_scripted() {
        let transport = TestTransport::new();
        assert!(transport.health().await.is_err());

        let status = HealthStatus {
            ok: true,
            model: Some("test-model".into()),
            error: None,
        };
        let transport = transport.with_health(status.clone());
        assert_eq!(transport.health().await.unwrap(), status);
    }
}
