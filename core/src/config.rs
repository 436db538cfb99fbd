//! Client configuration.
//!
//! `ClientConfig` is fixed at construction time; a `LeadClient` never changes
//! which endpoint it talks to.

use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_BASE_PATH: &str = "/lead";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: String,
    base_path: String,
    timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: normalize_url(base_url),
            base_path: DEFAULT_BASE_PATH.to_string(),
            timeout: None,
        }
    }

    /// Read `LEAD_API_URL`, `LEAD_API_PATH` and `LEAD_API_TIMEOUT_SECS`,
    /// falling back to the defaults for anything unset or unparsable.
    pub fn from_env() -> Self {
        let mut config = std::env::var("LEAD_API_URL")
            .map(|url| Self::new(&url))
            .unwrap_or_default();
        if let Ok(path) = std::env::var("LEAD_API_PATH") {
            config = config.with_base_path(&path);
        }
        match std::env::var("LEAD_API_TIMEOUT_SECS").map(|s| s.parse::<u64>()) {
            Ok(Ok(secs)) => config = config.with_timeout(Duration::from_secs(secs)),
            Ok(Err(err)) => tracing::warn!(%err, "ignoring invalid LEAD_API_TIMEOUT_SECS"),
            Err(_) => {}
        }
        config
    }

    pub fn with_base_path(mut self, base_path: &str) -> Self {
        self.base_path = normalize_path(base_path);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Absolute URL of `endpoint` under the base path. An empty endpoint is
    /// the collection itself.
    pub fn endpoint(&self, endpoint: &str) -> String {
        if endpoint.is_empty() {
            format!("{}{}", self.base_url, self.base_path)
        } else {
            format!("{}{}/{}", self.base_url, self.base_path, endpoint)
        }
    }
}

fn normalize_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

fn normalize_path(path: &str) -> String {
    let trimmed = path.trim_matches('/');
    if trimmed.is_empty() {
        DEFAULT_BASE_PATH.to_string()
    } else {
        format!("/{trimmed}")
    }
}
