//! noon gateway plumbing.
//!
//! This module provides the `Gateway` URL builder for the identity endpoints
//! and the `ApiError` type that every failed gateway response is mapped to.

pub mod error;
pub mod gateway;

pub use error::{raise_for_error, ApiError};
pub use gateway::{Gateway, GATEWAY_BASE_URL};
