use serde::Serialize;
use serde_json::Value;

/// Success payloads ride in a `data` member; errors use `error` instead.
#[derive(Debug, Serialize)]
pub struct Data<T> {
    pub data: T,
}

/// The `data` member of a request body.
///
/// A missing `data` degrades to null; field lookups on null or any other
/// non-object yield nothing, so validators report the first missing field
/// rather than a parse failure.
pub fn data(body: &Value) -> &Value {
    static NULL: Value = Value::Null;

    body.get("data").unwrap_or(&NULL)
}
