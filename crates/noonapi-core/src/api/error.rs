use reqwest::Response;
use serde_json::Value;
use thiserror::Error;

use crate::credentials::{is_truthy, value_to_string};

/// Error returned by noon APIs.
///
/// - `http_status`: standard HTTP status (401, 403, 500, ...)
/// - `status_code`: platform error code string from the response body
/// - `status_id`: platform error code integer from the response body
/// - `details`: extra error context, empty when the body carried none
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message}")]
pub struct ApiError {
    pub http_status: u16,
    pub message: String,
    pub status_code: Option<String>,
    pub status_id: Option<i64>,
    pub details: Vec<Value>,
}

impl ApiError {
    pub fn new(http_status: u16, message: impl Into<String>) -> Self {
        Self {
            http_status,
            message: message.into(),
            status_code: None,
            status_id: None,
            details: Vec::new(),
        }
    }

    /// Map a failed response body to an error. The raw text is kept as the
    /// message whenever the body does not provide one.
    pub fn from_body(http_status: u16, text: &str) -> Self {
        let data: Value = match serde_json::from_str(text) {
            Ok(data) => data,
            Err(_) => return Self::new(http_status, text),
        };

        let body = match data {
            Value::Object(body) => body,
            other => return Self::new(http_status, value_to_string(&other)),
        };

        let message = body
            .get("message")
            .filter(|m| is_truthy(m))
            .map(value_to_string)
            .unwrap_or_else(|| text.to_string());

        let status_code = body
            .get("status_code")
            .filter(|v| !v.is_null())
            .map(value_to_string);

        let status_id = body.get("status_id").and_then(|v| match v {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        });

        let details = match body.get("details") {
            Some(Value::Array(items)) => items.clone(),
            _ => Vec::new(),
        };

        Self {
            http_status,
            message,
            status_code,
            status_id,
            details,
        }
    }
}

/// Pass successful responses through; turn any status >= 400 into an `ApiError`.
pub async fn raise_for_error(response: Response) -> crate::Result<Response> {
    let status = response.status();
    if status.as_u16() < 400 {
        return Ok(response);
    }

    let text = response.text().await?;
    Err(ApiError::from_body(status.as_u16(), &text).into())
}
