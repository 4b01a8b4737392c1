//! Field rules shared by the dish and order pipelines.
//!
//! Each rule either hands back the validated value or returns the
//! [`ApiError`] for the first problem it sees. Pipelines chain rules with
//! `?`, so one failure ends the request before any later rule or mutation.

use serde_json::Value;

use crate::error::ApiError;

/// Requires `field` to be present as a non-empty string.
pub fn required_str<'a>(data: &'a Value, resource: &str, field: &str) -> Result<&'a str, ApiError> {
    data.get(field)
        .and_then(Value::as_str)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| ApiError::Validation(format!("{resource} must include a {field}")))
}

/// An integer strictly greater than zero, or nothing.
pub fn positive_int(value: Option<&Value>) -> Option<i64> {
    value.and_then(Value::as_i64).filter(|n| *n > 0)
}

/// A body `id` may be omitted, but when supplied it must match the path id.
pub fn matching_id(data: &Value, resource: &str, path_id: &str) -> Result<(), ApiError> {
    let supplied = match data.get("id") {
        None | Some(Value::Null) => return Ok(()),
        Some(Value::String(s)) if s.is_empty() => return Ok(()),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    };

    if supplied == path_id {
        Ok(())
    } else {
        Err(ApiError::Validation(format!(
            "{resource} id does not match {supplied}"
        )))
    }
}
