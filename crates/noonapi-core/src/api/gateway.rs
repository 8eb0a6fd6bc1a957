/// Production origin of the noon partner API gateway.
pub const GATEWAY_BASE_URL: &str = "https://noon-api-gateway.noon.partners";

const IDENTITY_LOGIN_PATH: &str = "/identity/public/v1/api/login";
const IDENTITY_WHOAMI_PATH: &str = "/identity/v1/whoami";

/// Joins endpoint paths onto a single gateway origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gateway {
    base_url: String,
}

impl Gateway {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Join the gateway origin with a path like `/identity/v1/whoami`.
    /// A missing leading slash is added.
    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    pub fn identity_login_url(&self) -> String {
        self.url(IDENTITY_LOGIN_PATH)
    }

    pub fn identity_whoami_url(&self) -> String {
        self.url(IDENTITY_WHOAMI_PATH)
    }
}

impl Default for Gateway {
    fn default() -> Self {
        Self::new(GATEWAY_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_normalizes_leading_slash() {
        let gw = Gateway::default();
        assert_eq!(
            gw.url("/identity/v1/whoami"),
            "https://noon-api-gateway.noon.partners/identity/v1/whoami"
        );
        assert_eq!(
            gw.url("identity/v1/whoami"),
            "https://noon-api-gateway.noon.partners/identity/v1/whoami"
        );
    }

    #[test]
    fn test_identity_urls() {
        let gw = Gateway::new("http://127.0.0.1:8080/");
        assert_eq!(gw.base_url(), "http://127.0.0.1:8080");
        assert_eq!(
            gw.identity_login_url(),
            "http://127.0.0.1:8080/identity/public/v1/api/login"
        );
        assert_eq!(gw.identity_whoami_url(), "http://127.0.0.1:8080/identity/v1/whoami");
    }
}
