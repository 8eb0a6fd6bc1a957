//! Session configuration.
//!
//! `SessionConfig` is plain data with sensible defaults. It is serde-friendly
//! so an application can embed it in its own configuration file:
//!
//! ```json
//! { "user_agent": "MyShop/2.0", "timeout_secs": 10.0, "auto_login": true }
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::api::{Gateway, GATEWAY_BASE_URL};

/// User agent sent when none is configured
const DEFAULT_USER_AGENT: &str = "NoonApiClient/1.0";

/// HTTP request timeout in seconds, applied to every gateway call.
const DEFAULT_TIMEOUT_SECS: f64 = 30.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Value of the `User-Agent` header on all outgoing requests.
    pub user_agent: String,
    /// Per-call timeout in seconds; invalid values fall back to 30.
    pub timeout_secs: f64,
    /// Log in while constructing the session.
    pub auto_login: bool,
    /// Call whoami right after each login to confirm the session works.
    pub verify_whoami_on_login: bool,
    /// Gateway origin; only changed to target a non-production gateway.
    pub base_url: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            auto_login: true,
            verify_whoami_on_login: true,
            base_url: GATEWAY_BASE_URL.to_string(),
        }
    }
}

impl SessionConfig {
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_secs = timeout.as_secs_f64();
        self
    }

    pub fn with_auto_login(mut self, auto_login: bool) -> Self {
        self.auto_login = auto_login;
        self
    }

    pub fn with_verify_whoami_on_login(mut self, verify: bool) -> Self {
        self.verify_whoami_on_login = verify;
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Per-call timeout. Negative or non-finite values fall back to the default.
    pub fn timeout(&self) -> Duration {
        Duration::try_from_secs_f64(self.timeout_secs)
            .unwrap_or_else(|_| Duration::from_secs_f64(DEFAULT_TIMEOUT_SECS))
    }

    pub fn gateway(&self) -> Gateway {
        Gateway::new(self.base_url.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.user_agent, "NoonApiClient/1.0");
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert!(config.auto_login);
        assert!(config.verify_whoami_on_login);
        assert_eq!(config.gateway(), Gateway::default());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: SessionConfig =
            serde_json::from_str(r#"{"timeout_secs": 2.5, "auto_login": false}"#).unwrap();
        assert_eq!(config.timeout(), Duration::from_millis(2500));
        assert!(!config.auto_login);
        assert_eq!(config.user_agent, "NoonApiClient/1.0");
    }

    #[test]
    fn test_invalid_timeout_falls_back() {
        let config = SessionConfig {
            timeout_secs: -1.0,
            ..SessionConfig::default()
        };
        assert_eq!(config.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_builder_setters() {
        let config = SessionConfig::default()
            .with_user_agent("Shop/1")
            .with_timeout(Duration::from_secs(5))
            .with_auto_login(false)
            .with_verify_whoami_on_login(false)
            .with_base_url("http://localhost:9000");
        assert_eq!(config.user_agent, "Shop/1");
        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert!(!config.auto_login);
        assert!(!config.verify_whoami_on_login);
        assert_eq!(
            config.gateway().identity_whoami_url(),
            "http://localhost:9000/identity/v1/whoami"
        );
    }
}
