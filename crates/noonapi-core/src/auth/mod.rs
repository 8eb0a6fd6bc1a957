//! Authentication against the noon identity service.
//!
//! Login exchanges an RS256 token signed with the partner's private key for a
//! session cookie. The cookie lives in the HTTP client's cookie jar; nothing
//! else is kept after a successful login.

pub mod service;

pub use service::{AuthService, TokenClaims};
