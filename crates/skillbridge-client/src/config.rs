//! Client configuration.

use std::time::Duration;

use url::Url;

use crate::error::{ApiError, ApiResult};

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Default connect timeout.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Page size requested by the job and course listings.
pub const CATALOG_PAGE_SIZE: u32 = 50;

/// Page size requested by the application listing.
pub const APLICACOES_PAGE_SIZE: u32 = 100;

/// Where the client runs, which decides the fallback backend address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RuntimeTarget {
    /// Android emulator: the host machine is reachable at 10.0.2.2.
    AndroidEmulator,
    /// Simulator, desktop or CI: the backend runs on localhost.
    #[default]
    Local,
}

impl RuntimeTarget {
    /// Parse a runtime name. Anything unrecognized runs locally.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "android" | "android-emulator" | "emulator" => RuntimeTarget::AndroidEmulator,
            _ => RuntimeTarget::Local,
        }
    }

    pub fn fallback_url(&self) -> &'static str {
        match self {
            RuntimeTarget::AndroidEmulator => "http://10.0.2.2:8080",
            RuntimeTarget::Local => "http://localhost:8080",
        }
    }
}

/// SkillBridge client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base URL, without a trailing slash
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// Connect timeout
    pub connect_timeout: Duration,
    /// User-Agent header
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: RuntimeTarget::default().fallback_url().to_string(),
            timeout: DEFAULT_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            user_agent: concat!("skillbridge-client/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ClientConfig {
    /// Create a config pointing at `base_url` with default timeouts.
    pub fn new(base_url: impl Into<String>) -> ApiResult<Self> {
        Ok(Self {
            base_url: normalize_base_url(&base_url.into())?,
            ..Self::default()
        })
    }

    /// Create config from environment variables.
    ///
    /// Base URL priority: `SKILLBRIDGE_API_URL`, `API_URL`, then the fallback
    /// for the runtime named by `SKILLBRIDGE_RUNTIME`.
    pub fn from_env() -> ApiResult<Self> {
        let runtime = std::env::var("SKILLBRIDGE_RUNTIME")
            .map(|s| RuntimeTarget::parse(&s))
            .unwrap_or_default();

        let base_url = std::env::var("SKILLBRIDGE_API_URL")
            .ok()
            .or_else(|| std::env::var("API_URL").ok())
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| runtime.fallback_url().to_string());

        let timeout_secs: u64 = std::env::var("SKILLBRIDGE_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_TIMEOUT.as_secs());

        let connect_timeout_secs: u64 = std::env::var("SKILLBRIDGE_CONNECT_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_CONNECT_TIMEOUT.as_secs());

        Ok(Self {
            base_url: normalize_base_url(&base_url)?,
            timeout: Duration::from_secs(timeout_secs),
            connect_timeout: Duration::from_secs(connect_timeout_secs),
            ..Self::default()
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Validate an http(s) URL and strip trailing slashes.
fn normalize_base_url(raw: &str) -> ApiResult<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    let parsed = Url::parse(trimmed)
        .map_err(|e| ApiError::config(format!("invalid base URL {:?}: {}", raw, e)))?;

    match parsed.scheme() {
        "http" | "https" => Ok(trimmed.to_string()),
        other => Err(ApiError::config(format!(
            "unsupported scheme {:?} in base URL {:?}",
            other, raw
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.timeout, Duration::from_secs(15));
        assert!(config.user_agent.starts_with("skillbridge-client/"));
    }

    #[test]
    fn test_new_strips_trailing_slash() {
        let config = ClientConfig::new("https://api.example.com/").unwrap();
        assert_eq!(config.base_url, "https://api.example.com");
    }

    #[test]
    fn test_new_rejects_bad_urls() {
        assert!(ClientConfig::new("not a url").is_err());
        assert!(ClientConfig::new("ftp://example.com").is_err());
    }

    #[test]
    fn test_runtime_fallbacks() {
        assert_eq!(
            RuntimeTarget::parse("android-emulator").fallback_url(),
            "http://10.0.2.2:8080"
        );
        assert_eq!(RuntimeTarget::parse("ios").fallback_url(), "http://localhost:8080");
    }
}
