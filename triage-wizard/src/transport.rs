use async_trait::async_trait;
use reqwest::Url;

use crate::config::{ClientConfig, ConfigError};
use crate::payload::{ChatRequest, ChatResponse, HealthStatus};

/// Error type for chat transports: anything that kept a decodable response
/// from arriving.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Malformed response: {0}")]
    Malformed(String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Backend unreachable: {0}")]
    Unreachable(String),
}

/// The wire seam between the survey and the chat backend.
///
/// [`ReqwestTransport`] talks HTTP; [`TestTransport`](crate::TestTransport)
/// replays scripted responses.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// `POST {base}/chat`. Any decodable body counts as a response,
    /// whatever the HTTP status.
    async fn post_chat(&self, request: &ChatRequest) -> Result<ChatResponse, TransportError>;

    /// `GET {base}/healthz`.
    async fn health(&self) -> Result<HealthStatus, TransportError>;
}

/// HTTP transport built on `reqwest`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    chat_url: Url,
    health_url: Url,
}

impl ReqwestTransport {
    pub fn new(config: &ClientConfig) -> Result<Self, TransportError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            chat_url: config.endpoint("chat")?,
            health_url: config.endpoint("healthz")?,
        })
    }

    pub fn chat_url(&self) -> &Url {
        &self.chat_url
    }

    async fn decode<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, TransportError> {
        let status = response.status();
        let body = response.text().await?;
        tracing::debug!(%status, bytes = body.len(), "response received");
        serde_json::from_str(&body)
            .map_err(|err| TransportError::Malformed(format!("{status}: {err}")))
    }
}

#[async_trait]
impl ChatTransport for ReqwestTransport {
    async fn post_chat(&self, request: &ChatRequest) -> Result<ChatResponse, TransportError> {
        tracing::debug!(url = %self.chat_url, "posting chat request");
        let response = self
            .client
            .post(self.chat_url.clone())
            .json(request)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn health(&self) -> Result<HealthStatus, TransportError> {
        let response = self.client.get(self.health_url.clone()).send().await?;
        Self::decode(response).await
    }
}
