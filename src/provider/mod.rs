//! Host parameter resolution
//!
//! The host that embeds the connector owns the pipeline's parameters and
//! credentials; the connector only reads them. `ParameterProvider` is that
//! read-only seam, passed explicitly into request builders and credential
//! resolution. `Params` is a typed view over one record's parameters that
//! converts at the boundary and fails fast on shape mismatches.

use crate::error::{Error, Result};
use crate::types::{JsonObject, JsonValue};


/// Read-only access to the host's parameters and credential sets.
///
/// `parameter` resolves a named parameter for a given input record index;
/// record-level values shadow batch-level ones. `credential` resolves a
/// named credential set as an opaque JSON object.
pub trait ParameterProvider: Send + Sync {
    /// Resolve a parameter by name for the given record index.
    fn parameter(&self, name: &str, index: usize) -> Option<&JsonValue>;

    /// Resolve a named credential set.
    fn credential(&self, name: &str) -> Option<&JsonValue>;
}

// ============================================================================
// Typed parameter view
// ============================================================================

/// Typed accessors over one record's parameters.
///
/// Every accessor converts the raw JSON value into the expected Rust type
/// and returns `Validation` when a present value has the wrong shape.
#[derive(Clone, Copy)]
pub struct Params<'a> {
    provider: &'a dyn ParameterProvider,
    index: usize,
}

impl<'a> Params<'a> {
    /// Create a view bound to one record index
    pub fn new(provider: &'a dyn ParameterProvider, index: usize) -> Self {
        Self { provider, index }
    }

    /// The record index this view is bound to
    pub fn index(&self) -> usize {
        self.index
    }

    /// Raw parameter lookup
    pub fn raw(&self, name: &str) -> Option<&'a JsonValue> {
        self.provider.parameter(name, self.index)
    }

    /// Required string parameter
    pub fn str_required(&self, name: &str) -> Result<String> {
        match self.raw(name) {
            Some(value) => as_string(name, value),
            None => Err(Error::missing_parameter(name)),
        }
    }

    /// Optional string parameter; empty strings count as absent
    pub fn str_opt(&self, name: &str) -> Result<Option<String>> {
        match self.raw(name) {
            Some(value) => {
                let s = as_string(name, value)?;
                Ok(if s.is_empty() { None } else { Some(s) })
            }
            None => Ok(None),
        }
    }

    /// Boolean parameter with a default when absent
    pub fn bool_or(&self, name: &str, default: bool) -> Result<bool> {
        match self.raw(name) {
            Some(JsonValue::Bool(b)) => Ok(*b),
            Some(other) => Err(wrong_type(name, "a boolean", other)),
            None => Ok(default),
        }
    }

    /// Optional integer parameter
    pub fn i64_opt(&self, name: &str) -> Result<Option<i64>> {
        match self.raw(name) {
            Some(JsonValue::Number(n)) => match n.as_i64() {
                Some(v) => Ok(Some(v)),
                None => Err(Error::validation(format!(
                    "parameter '{name}' must be an integer"
                ))),
            },
            Some(other) => Err(wrong_type(name, "an integer", other)),
            None => Ok(None),
        }
    }

    /// Optional list of strings; accepts a JSON array of strings
    pub fn str_list_opt(&self, name: &str) -> Result<Option<Vec<String>>> {
        match self.raw(name) {
            Some(JsonValue::Array(items)) => {
                let mut out = Vec::with_capacity(items.len());
                for item in items {
                    out.push(as_string(name, item)?);
                }
                Ok(Some(out))
            }
            Some(other) => Err(wrong_type(name, "an array of strings", other)),
            None => Ok(None),
        }
    }
}

fn as_string(name: &str, value: &JsonValue) -> Result<String> {
    match value {
        JsonValue::String(s) => Ok(s.clone()),
        other => Err(wrong_type(name, "a string", other)),
    }
}

fn wrong_type(name: &str, expected: &str, got: &JsonValue) -> Error {
    Error::validation(format!(
        "parameter '{name}' must be {expected}, got {got}"
    ))
}

// ============================================================================
// Map-backed provider
// ============================================================================

/// Map-backed `ParameterProvider` used by the CLI runner and tests.
///
/// Holds batch-level parameters, per-record override maps, and named
/// credential sets. Record-level values shadow batch-level ones.
#[derive(Debug, Clone, Default)]
pub struct StaticProvider {
    batch: JsonObject,
    items: Vec<JsonObject>,
    credentials: JsonObject,
}

impl StaticProvider {
    /// Create an empty provider
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a batch-level parameter
    #[must_use]
    pub fn with_parameter(mut self, name: impl Into<String>, value: JsonValue) -> Self {
        self.batch.insert(name.into(), value);
        self
    }

    /// Append a per-record parameter map
    #[must_use]
    pub fn with_item(mut self, item: JsonObject) -> Self {
        self.items.push(item);
        self
    }

    /// Register a named credential set
    #[must_use]
    pub fn with_credential(mut self, name: impl Into<String>, value: JsonValue) -> Self {
        self.credentials.insert(name.into(), value);
        self
    }

    /// Number of input records
    pub fn item_count(&self) -> usize {
        self.items.len().max(1)
    }
}

impl ParameterProvider for StaticProvider {
    fn parameter(&self, name: &str, index: usize) -> Option<&JsonValue> {
        if let Some(item) = self.items.get(index) {
            if let Some(value) = item.get(name) {
                return Some(value);
            }
        }
        self.batch.get(name)
    }

    fn credential(&self, name: &str) -> Option<&JsonValue> {
        self.credentials.get(name)
    }
}
