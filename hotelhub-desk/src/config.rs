use hotelhub_client::{BackendKind, ClientConfig};

/// Desk configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | LOG_LEVEL | info | log level (overridden by RUST_LOG) |
/// | LOG_DIR | (unset) | directory for daily-rolling log files |
///
/// Client variables (`HOTELHUB_*`) are read by [`ClientConfig::from_env`].
#[derive(Debug, Clone)]
pub struct DeskConfig {
    pub client: ClientConfig,
    pub log_level: String,
    pub log_dir: Option<String>,
}

impl DeskConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            client: ClientConfig::from_env(),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.trim().is_empty()),
        }
    }

    /// Whether the desk runs on seeded in-memory data
    pub fn is_demo(&self) -> bool {
        self.client.backend() == BackendKind::Memory
    }
}
