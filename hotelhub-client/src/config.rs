//! Client configuration

use std::sync::Arc;

use crate::latency::Latency;
use crate::store::{HttpRecordStore, MemoryRecordStore, RecordStore};
use crate::{ClientError, ClientResult};

/// Which record backend the services talk to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackendKind {
    /// Hosted record API over HTTPS
    Http,
    /// In-process tables, lost on exit
    #[default]
    Memory,
}

/// Client configuration for the hosted record API
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | HOTELHUB_API_URL | (unset: in-memory backend) | hosted API base URL |
/// | HOTELHUB_PROJECT_ID | | project id, required with a URL |
/// | HOTELHUB_PUBLIC_KEY | | public key, required with a URL |
/// | HOTELHUB_TIMEOUT_SECS | 30 | request timeout |
/// | HOTELHUB_SIMULATE_LATENCY | true | artificial delay before each operation |
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Hosted API base URL (e.g. "https://api.example.com/v1")
    pub api_url: Option<String>,

    /// Project the records belong to
    pub project_id: Option<String>,

    /// Public key sent as bearer credential
    pub public_key: Option<String>,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Whether operations pause with the development latency profile
    pub simulate_latency: bool,
}

impl ClientConfig {
    /// Configuration for the hosted API
    pub fn new(
        api_url: impl Into<String>,
        project_id: impl Into<String>,
        public_key: impl Into<String>,
    ) -> Self {
        Self {
            api_url: Some(api_url.into()),
            project_id: Some(project_id.into()),
            public_key: Some(public_key.into()),
            timeout: 30,
            simulate_latency: true,
        }
    }

    /// Configuration for the in-memory backend
    pub fn memory() -> Self {
        Self {
            api_url: None,
            project_id: None,
            public_key: None,
            timeout: 30,
            simulate_latency: true,
        }
    }

    /// Load configuration from environment variables
    ///
    /// Unset variables fall back to the in-memory defaults.
    pub fn from_env() -> Self {
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.trim().is_empty());

        Self {
            api_url: var("HOTELHUB_API_URL"),
            project_id: var("HOTELHUB_PROJECT_ID"),
            public_key: var("HOTELHUB_PUBLIC_KEY"),
            timeout: var("HOTELHUB_TIMEOUT_SECS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
            simulate_latency: var("HOTELHUB_SIMULATE_LATENCY")
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Enable or disable the latency simulator
    pub fn with_latency(mut self, simulate: bool) -> Self {
        self.simulate_latency = simulate;
        self
    }

    pub fn backend(&self) -> BackendKind {
        if self.api_url.is_some() {
            BackendKind::Http
        } else {
            BackendKind::Memory
        }
    }

    /// Latency profile implied by this configuration
    pub fn latency(&self) -> Latency {
        if self.simulate_latency {
            Latency::simulated()
        } else {
            Latency::none()
        }
    }

    /// Build the record backend
    ///
    /// The HTTP backend requires both credentials.
    pub fn build_store(&self) -> ClientResult<Arc<dyn RecordStore>> {
        match self.backend() {
            BackendKind::Memory => Ok(Arc::new(MemoryRecordStore::new())),
            BackendKind::Http => {
                let url = self.api_url.as_deref().unwrap_or_default();
                let project_id = self
                    .project_id
                    .as_deref()
                    .ok_or_else(|| ClientError::Config("HOTELHUB_PROJECT_ID is not set".into()))?;
                let public_key = self
                    .public_key
                    .as_deref()
                    .ok_or_else(|| ClientError::Config("HOTELHUB_PUBLIC_KEY is not set".into()))?;
                Ok(Arc::new(HttpRecordStore::new(url, project_id, public_key, self.timeout)?))
            }
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::memory()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_selection() {
        assert_eq!(ClientConfig::memory().backend(), BackendKind::Memory);
        assert_eq!(
            ClientConfig::new("https://api.test", "p", "k").backend(),
            BackendKind::Http
        );
    }

    #[test]
    fn test_http_backend_requires_credentials() {
        let mut config = ClientConfig::new("https://api.test", "p", "k");
        config.public_key = None;

        let err = config.build_store().err().unwrap();
        assert!(matches!(err, ClientError::Config(_)));
    }

    #[test]
    fn test_latency_toggle() {
        assert!(ClientConfig::memory().with_latency(false).latency().is_none());
        assert!(!ClientConfig::memory().latency().is_none());
    }
}
