use std::time::Duration;

use reqwest::Url;

/// Base URL used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5001";

/// Environment variable overriding the backend base URL.
pub const BASE_URL_ENV: &str = "TRIAGE_API_BASE";

/// Error type for client configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("Base URL '{0}' must use http or https")]
    UnsupportedScheme(String),
}

/// Where the chat backend lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: Url,
    /// `None` waits until the response or a lower-level network error.
    timeout: Option<Duration>,
}

impl ClientConfig {
    /// Create a configuration for the given base URL.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        let mut url = Url::parse(base_url).map_err(|err| ConfigError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: err.to_string(),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::UnsupportedScheme(base_url.to_string()));
        }
        // Endpoints are joined onto the base, so its path must end in '/'.
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(Self {
            base_url: url,
            timeout: None,
        })
    }

    /// Read the base URL from `TRIAGE_API_BASE`, falling back to
    /// [`DEFAULT_BASE_URL`].
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var(BASE_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => Self::new(url.trim()),
            _ => Self::new(DEFAULT_BASE_URL),
        }
    }

    /// Give up on requests that take longer than `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Full URL of an endpoint below the base, e.g. `chat`.
    pub fn endpoint(&self, path: &str) -> Result<Url, ConfigError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|err| ConfigError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: err.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_onto_host() {
        let config = ClientConfig::new(DEFAULT_BASE_URL).unwrap();
        assert_eq!(
            config.endpoint("chat").unwrap().as_str(),
            "http://localhost:5001/chat"
        );
        assert_eq!(config.timeout(), None);
    }

    #[test]
    fn endpoint_keeps_base_path() {
        let config = ClientConfig::new("https://example.org/triage").unwrap();
        assert_eq!(
            config.endpoint("/chat").unwrap().as_str(),
            "https://example.org/triage/chat"
        );
    }

    #[test]
    fn rejects_bad_urls() {
        assert!(matches!(
            ClientConfig::new("not a url"),
            Err(ConfigError::InvalidBaseUrl { .. })
        ));
        assert_eq!(
            ClientConfig::new("ftp://example.org"),
            Err(ConfigError::UnsupportedScheme("ftp://example.org".into()))
        );
    }

    #[test]
    fn timeout_is_opt_in() {
        let config = ClientConfig::new(DEFAULT_BASE_URL)
            .unwrap()
            .with_timeout(Duration::from_secs(30));
        assert_eq!(config.timeout(), Some(Duration::from_secs(30)));
    }
}
