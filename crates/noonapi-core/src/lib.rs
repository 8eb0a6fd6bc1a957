//! noonapi-core - authenticated access to the noon partner API gateway.
//!
//! This crate provides:
//! - `Credentials`: partner credentials loaded from the JSON file issued by noon
//! - `AuthService`: signed-token login, refresh and whoami
//! - `Session`: the root entry point, owning the cookie-carrying HTTP client
//!   and re-authenticating once when a request comes back 401
//!
//! ```no_run
//! # async fn run() -> noonapi_core::Result<()> {
//! use noonapi_core::{Session, SessionConfig};
//!
//! let session = Session::new("~/noon_credentials.json", SessionConfig::default()).await?;
//! let me = session.auth().whoami().await?;
//! println!("{:?}", me);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod credentials;
pub mod error;
pub mod session;

pub use api::{ApiError, Gateway};
pub use auth::AuthService;
pub use config::SessionConfig;
pub use credentials::{Credentials, CredentialsError};
pub use error::{Error, Result};
pub use session::Session;

// Re-exported so callers can build requests without a direct reqwest dependency
pub use reqwest::{Method, RequestBuilder, Response, StatusCode};
