//! Shared handler helpers
//!
//! Identifier fields arrive as path segments or loosely-typed JSON (older
//! clients send ids as strings), so parsing is done explicitly at the
//! boundary with a caller-supplied 400 message instead of relying on
//! extractor rejections.

use serde_json::Value;

use crate::api::middleware::ApiError;

/// Parse an identifier from a path segment
pub fn parse_id(raw: &str, message: &str) -> Result<i64, ApiError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| ApiError::bad_request(message))
}

/// Parse an identifier from an optional JSON body field.
///
/// Accepts both JSON numbers and numeric strings; anything else (including
/// a missing field) fails with the given message.
pub fn parse_id_field(field: Option<&Value>, message: &str) -> Result<i64, ApiError> {
    match field {
        Some(Value::Number(n)) => n.as_i64().ok_or_else(|| ApiError::bad_request(message)),
        Some(Value::String(s)) => parse_id(s, message),
        _ => Err(ApiError::bad_request(message)),
    }
}

/// Require a non-empty string field
pub fn require_field(field: Option<String>, message: &str) -> Result<String, ApiError> {
    field
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ApiError::bad_request(message))
}
