//! Response envelope handling
//!
//! The tracker is inconsistent about list responses: some endpoints return
//! a bare top-level array (`/issuetype`, `/priority`), others wrap the
//! array in a named field (`/search` → `issues`, `/label` → `values`,
//! `/groups/picker` → `groups`). Each endpoint's shape is declared once as
//! an `Envelope` rather than sniffed at call time, and a mismatch fails
//! fast instead of proceeding with wrong types.

use crate::error::{Error, Result};
use crate::types::JsonValue;

/// Declared shape of a list response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Envelope<'a> {
    /// The response body is the array itself
    Bare,
    /// The array lives under the named field of a response object
    Wrapped(&'a str),
}

impl Envelope<'_> {
    /// Extract the record array from a response body.
    pub fn unwrap_records(&self, body: &JsonValue) -> Result<Vec<JsonValue>> {
        match self {
            Envelope::Bare => match body {
                JsonValue::Array(items) => Ok(items.clone()),
                other => Err(Error::unexpected(format!(
                    "expected a top-level array, got {}",
                    kind(other)
                ))),
            },
            Envelope::Wrapped(field) => match body.get(field) {
                Some(JsonValue::Array(items)) => Ok(items.clone()),
                Some(other) => Err(Error::unexpected(format!(
                    "expected '{field}' to be an array, got {}",
                    kind(other)
                ))),
                None => Err(Error::unexpected(format!(
                    "response has no '{field}' field"
                ))),
            },
        }
    }
}

fn kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bare_array() {
        let body = json!([{"id": "1"}, {"id": "2"}]);
        let records = Envelope::Bare.unwrap_records(&body).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_bare_rejects_object() {
        let err = Envelope::Bare
            .unwrap_records(&json!({"values": []}))
            .unwrap_err();
        assert!(matches!(err, Error::Unexpected { .. }));
    }

    #[test]
    fn test_wrapped_field() {
        let body = json!({"startAt": 0, "issues": [{"key": "T-1"}]});
        let records = Envelope::Wrapped("issues").unwrap_records(&body).unwrap();
        assert_eq!(records[0]["key"], "T-1");
    }

    #[test]
    fn test_wrapped_missing_field() {
        let err = Envelope::Wrapped("issues")
            .unwrap_records(&json!({"values": []}))
            .unwrap_err();
        assert!(err.to_string().contains("issues"));
    }

    #[test]
    fn test_wrapped_wrong_type() {
        let err = Envelope::Wrapped("issues")
            .unwrap_records(&json!({"issues": "nope"}))
            .unwrap_err();
        assert!(err.to_string().contains("a string"));
    }
}
