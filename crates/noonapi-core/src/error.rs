use thiserror::Error;

use crate::api::ApiError;
use crate::credentials::CredentialsError;

/// Crate-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Credentials(#[from] CredentialsError),

    #[error(transparent)]
    Api(#[from] ApiError),

    /// Timeouts, connection failures and body decoding errors, passed through
    /// exactly as reqwest reported them.
    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to sign login token: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),
}

impl Error {
    /// The domain error, if this is one.
    pub fn as_api(&self) -> Option<&ApiError> {
        match self {
            Error::Api(err) => Some(err),
            _ => None,
        }
    }

    /// HTTP status carried by the error, for domain and transport errors alike.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            Error::Api(err) => Some(err.http_status),
            Error::Http(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
