use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, info};
use uuid::Uuid;

use crate::api::{raise_for_error, ApiError, Gateway};
use crate::credentials::Credentials;
use crate::Result;

/// Claims of the token presented at login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Partner key id
    pub sub: String,
    /// Issued-at, epoch seconds
    pub iat: i64,
    /// Nonce, unique per token
    pub jti: String,
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    token: String,
    default_project_code: &'a str,
}

/// Login, refresh and whoami for one set of partner credentials.
///
/// The `Client` is a handle onto the session's client: clones share the
/// connection pool and the cookie jar, so the cookie set by `login` is sent on
/// every later request made through the session.
#[derive(Debug)]
pub struct AuthService {
    http: Client,
    credentials: Credentials,
    gateway: Gateway,
    timeout: Duration,
    verify_whoami_on_login: bool,
}

impl AuthService {
    pub fn new(
        http: Client,
        credentials: Credentials,
        gateway: Gateway,
        timeout: Duration,
        verify_whoami_on_login: bool,
    ) -> Self {
        Self {
            http,
            credentials,
            gateway,
            timeout,
            verify_whoami_on_login,
        }
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Sign a fresh login token. Every call gets a new `jti`, so two tokens
    /// issued within the same second still differ.
    pub fn create_token(&self) -> Result<String> {
        let claims = TokenClaims {
            sub: self.credentials.key_id().to_string(),
            iat: Utc::now().timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        let key = EncodingKey::from_rsa_pem(self.credentials.private_key().as_bytes())?;
        let token = jsonwebtoken::encode(&Header::new(Algorithm::RS256), &claims, &key)?;
        Ok(token)
    }

    /// Log in with a freshly signed token. The gateway answers with a session
    /// cookie, which the client keeps. With whoami verification enabled, login
    /// only succeeds once whoami does.
    pub async fn login(&self) -> Result<()> {
        let url = self.gateway.identity_login_url();
        let body = LoginRequest {
            token: self.create_token()?,
            default_project_code: self.credentials.project_code(),
        };

        debug!(url = %url, key_id = %self.credentials.key_id(), "Logging in");

        let response = self
            .http
            .post(&url)
            .timeout(self.timeout)
            .json(&body)
            .send()
            .await?;
        raise_for_error(response).await?;

        info!(project_code = %self.credentials.project_code(), "Logged in to noon gateway");

        if self.verify_whoami_on_login {
            self.whoami().await?;
            debug!("Session verified via whoami");
        }

        Ok(())
    }

    /// Re-authenticate after the session expired. Same as `login`.
    pub async fn refresh(&self) -> Result<()> {
        debug!("Refreshing session");
        self.login().await
    }

    /// Fetch the identity the current session is authenticated as.
    pub async fn whoami(&self) -> Result<Map<String, Value>> {
        let url = self.gateway.identity_whoami_url();

        let response = self
            .http
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await?;
        let response = raise_for_error(response).await?;

        match response.json::<Value>().await? {
            Value::Object(identity) => Ok(identity),
            other => Err(ApiError::new(
                200,
                format!("Unexpected whoami response: {}", json_kind(&other)),
            )
            .into()),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    const TEST_PRIVATE_KEY: &str = include_str!("../../tests/fixtures/test_rsa_key.pem");

    fn service(private_key: &str) -> AuthService {
        let credentials = Credentials::new(private_key, "key-123", "PRJ").unwrap();
        AuthService::new(
            Client::new(),
            credentials,
            Gateway::default(),
            Duration::from_secs(5),
            false,
        )
    }

    #[test]
    fn test_create_token_is_rs256() {
        let token = service(TEST_PRIVATE_KEY).create_token().unwrap();
        let header = jsonwebtoken::decode_header(&token).unwrap();
        assert_eq!(header.alg, Algorithm::RS256);
        assert_eq!(token.split('.').count(), 3);
    }

    #[test]
    fn test_create_token_is_unique() {
        let auth = service(TEST_PRIVATE_KEY);
        let first = auth.create_token().unwrap();
        let second = auth.create_token().unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_create_token_rejects_malformed_key() {
        let err = service("not a pem key").create_token().unwrap_err();
        assert!(matches!(err, Error::Token(_)));
    }

    #[test]
    fn test_json_kind() {
        assert_eq!(json_kind(&serde_json::json!([1])), "array");
        assert_eq!(json_kind(&serde_json::json!("x")), "string");
    }
}
