// src/config.rs
// Runtime configuration from environment variables (with .env support
// loaded by the binary). Every knob has a sensible default so the server
// starts with no configuration at all.

use std::time::Duration;

pub const ENV_BIND_ADDR: &str = "LISTEN_ADDR";
pub const ENV_HTTP_TIMEOUT_SECS: &str = "HTTP_TIMEOUT_SECS";
pub const ENV_USER_AGENT: &str = "HTTP_USER_AGENT";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 15;
const DEFAULT_USER_AGENT: &str = "social-listening/0.1 (+https://localhost)";

/// Caps applied by the query service.
pub const DEFAULT_QUERY_LIMIT: i64 = 20;
pub const MAX_QUERY_LIMIT: i64 = 200;

/// Caps applied to connector result sizes.
pub const DEFAULT_HN_HITS: u32 = 50;
pub const DEFAULT_MASTO_LIMIT: u32 = 40;
pub const DEFAULT_REDDIT_LIMIT: u32 = 25;
pub const MAX_CONNECTOR_LIMIT: u32 = 100;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub http_timeout: Duration,
    pub user_agent: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let bind_addr =
            std::env::var(ENV_BIND_ADDR).unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

        let http_timeout = std::env::var(ENV_HTTP_TIMEOUT_SECS)
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|&secs| secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS));

        let user_agent =
            std::env::var(ENV_USER_AGENT).unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string());

        Self {
            bind_addr,
            http_timeout,
            user_agent,
        }
    }

    /// Shared outbound client for all connectors.
    pub fn http_client(&self) -> reqwest::Client {
        reqwest::Client::builder()
            .timeout(self.http_timeout)
            .user_agent(self.user_agent.clone())
            .build()
            .expect("reqwest: build client")
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_usable() {
        let cfg = AppConfig::default();
        assert!(cfg.bind_addr.contains(':'));
        assert!(cfg.http_timeout.as_secs() > 0);
    }
}
