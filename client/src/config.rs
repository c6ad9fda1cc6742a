//! Client configuration.
//!
//! Loads configuration from environment variables with sensible defaults.

use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Default platform API root.
pub const DEFAULT_API_URL: &str = "http://localhost:8009";

/// Default per-request timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT: u64 = 30;

/// HTTP client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Platform API root, without a trailing slash.
    pub api_url: String,
    /// Per-request timeout in seconds.
    pub request_timeout: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_owned(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Reads `CAREFLOW_API_URL` and `CAREFLOW_REQUEST_TIMEOUT`,
    /// falling back to defaults for anything unset or unparsable.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            api_url: env::var("CAREFLOW_API_URL")
                .map(|url| url.trim_end_matches('/').to_owned())
                .unwrap_or_else(|_| DEFAULT_API_URL.to_owned()),
            request_timeout: env::var("CAREFLOW_REQUEST_TIMEOUT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT),
        }
    }

    /// The per-request timeout as a [`Duration`].
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_the_local_platform() {
        let config = ClientConfig::default();
        assert_eq!(config.api_url, "http://localhost:8009");
        assert_eq!(config.timeout(), Duration::from_secs(30));
    }
}
