//! Root SDK entry point.
//!
//! A `Session` owns the partner credentials, one cookie-carrying HTTP client and
//! the `AuthService` bound to both. Requests sent through the session are
//! re-authenticated and retried once when the gateway answers 401.

use std::path::Path;
use std::time::Duration;

use reqwest::{Client, IntoUrl, Method, RequestBuilder, Response, StatusCode};
use tracing::{debug, warn};

use crate::auth::AuthService;
use crate::config::SessionConfig;
use crate::credentials::Credentials;
use crate::Result;

pub struct Session {
    config: SessionConfig,
    http: Client,
    auth: AuthService,
}

impl Session {
    /// Load credentials from `credentials_path` and create a session.
    ///
    /// With `auto_login` set, this logs in before returning; a failed login
    /// fails construction.
    pub async fn new(credentials_path: impl AsRef<Path>, config: SessionConfig) -> Result<Self> {
        let credentials = Credentials::from_file(credentials_path)?;
        Self::from_credentials(credentials, config).await
    }

    /// Create a session from credentials that are already loaded.
    pub async fn from_credentials(credentials: Credentials, config: SessionConfig) -> Result<Self> {
        let timeout = config.timeout();

        // The cookie store is what carries authentication after login
        let http = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(timeout)
            .cookie_store(true)
            .build()?;

        let auth = AuthService::new(
            http.clone(),
            credentials,
            config.gateway(),
            timeout,
            config.verify_whoami_on_login,
        );

        let session = Self { config, http, auth };

        if session.config.auto_login {
            session.auth.login().await?;
        }

        Ok(session)
    }

    /// Login, refresh and whoami.
    pub fn auth(&self) -> &AuthService {
        &self.auth
    }

    /// The underlying HTTP client, for advanced usage.
    pub fn http(&self) -> &Client {
        &self.http
    }

    pub fn credentials(&self) -> &Credentials {
        self.auth.credentials()
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn timeout(&self) -> Duration {
        self.config.timeout()
    }

    /// Start a request with the session's default timeout. Add headers, query
    /// parameters or a body, then pass it to [`Session::send`].
    pub fn builder<U: IntoUrl>(&self, method: Method, url: U) -> RequestBuilder {
        self.http.request(method, url).timeout(self.timeout())
    }

    /// Send a request to an absolute URL, re-authenticating and retrying once on 401.
    pub async fn request<U: IntoUrl>(&self, method: Method, url: U) -> Result<Response> {
        self.request_with(method, url, true).await
    }

    pub async fn request_with<U: IntoUrl>(
        &self,
        method: Method,
        url: U,
        retry_on_401: bool,
    ) -> Result<Response> {
        self.send(self.builder(method, url), retry_on_401).await
    }

    /// Send a prepared request.
    ///
    /// When the response is 401 and `retry_on_401` is set, the session logs in
    /// again and resends the identical request exactly once, returning the
    /// second response whatever its status. Responses are returned as-is:
    /// error statuses are left for the caller to handle. A request with a
    /// streaming body cannot be resent, so it is sent once without retry.
    pub async fn send(&self, request: RequestBuilder, retry_on_401: bool) -> Result<Response> {
        if !retry_on_401 {
            return Ok(request.send().await?);
        }

        // Keep a copy for the second attempt before the first one consumes the builder
        let Some(retry) = request.try_clone() else {
            warn!("Request body cannot be replayed, sending without retry on 401");
            return Ok(request.send().await?);
        };

        let response = request.send().await?;
        if response.status() != StatusCode::UNAUTHORIZED {
            return Ok(response);
        }

        warn!(url = %response.url(), "Request unauthorized, refreshing session");
        self.auth.refresh().await?;

        let response = retry.send().await?;
        debug!(url = %response.url(), status = %response.status(), "Retried request after refresh");
        Ok(response)
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("config", &self.config)
            .field("credentials", self.auth.credentials())
            .finish_non_exhaustive()
    }
}
