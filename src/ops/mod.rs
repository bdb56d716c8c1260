//! Issue operations
//!
//! One submodule per concern: `issue` holds the request builders for the
//! issue lifecycle (create, update, get, search, changelog, transitions,
//! delete), `notify` builds the notification payload. `execute` routes one
//! input record to the right builder and normalizes the result.

pub mod issue;
pub mod notify;

#[cfg(test)]
mod tests;

use crate::error::{Error, Result};
use crate::http::Gateway;
use crate::provider::{ParameterProvider, Params};
use crate::types::JsonValue;
use std::str::FromStr;

// ============================================================================
// Operation
// ============================================================================

/// The operation requested for an input record.
///
/// Resolved from host parameters before processing and immutable per
/// record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Create a new issue
    Create,
    /// Update fields on an existing issue
    Update,
    /// Fetch one issue
    Get,
    /// Search issues with a JQL query
    Search,
    /// Read an issue's changelog
    Changelog,
    /// Send a notification about an issue
    Notify,
    /// List available status transitions for an issue
    Transitions,
    /// Delete an issue
    Delete,
}

impl Operation {
    /// Canonical parameter value for this operation
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Get => "get",
            Operation::Search => "search",
            Operation::Changelog => "changelog",
            Operation::Notify => "notify",
            Operation::Transitions => "transitions",
            Operation::Delete => "delete",
        }
    }
}

impl FromStr for Operation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "create" => Ok(Operation::Create),
            "update" => Ok(Operation::Update),
            "get" => Ok(Operation::Get),
            "search" => Ok(Operation::Search),
            "changelog" => Ok(Operation::Changelog),
            "notify" => Ok(Operation::Notify),
            "transitions" => Ok(Operation::Transitions),
            "delete" => Ok(Operation::Delete),
            other => Err(Error::validation(format!("unknown operation '{other}'"))),
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Execution
// ============================================================================

/// Result of one operation: a single record, or a list to be flattened
/// into the batch output.
#[derive(Debug)]
pub enum OpOutput {
    /// One output record
    Single(JsonValue),
    /// Several output records (search results, changelog entries, ...)
    Many(Vec<JsonValue>),
}

/// Execute `operation` for the input record at `index`.
pub async fn execute(
    gateway: &Gateway,
    operation: Operation,
    provider: &dyn ParameterProvider,
    index: usize,
) -> Result<OpOutput> {
    let params = Params::new(provider, index);
    match operation {
        Operation::Create => issue::create(gateway, params).await.map(OpOutput::Single),
        Operation::Update => issue::update(gateway, params).await.map(OpOutput::Single),
        Operation::Get => issue::get(gateway, params).await.map(OpOutput::Single),
        Operation::Search => issue::search(gateway, params).await.map(OpOutput::Many),
        Operation::Changelog => issue::changelog(gateway, params).await.map(OpOutput::Many),
        Operation::Notify => notify::notify(gateway, params).await.map(OpOutput::Single),
        Operation::Transitions => issue::transitions(gateway, params)
            .await
            .map(OpOutput::Many),
        Operation::Delete => issue::delete(gateway, params).await.map(OpOutput::Single),
    }
}
