//! Operation dispatcher
//!
//! Routes each input record to its operation and collects the batch
//! output. Records are processed strictly sequentially, in input order;
//! each record's network calls complete before the next record starts. A
//! failure on any record aborts the batch; there is no retry and no
//! partial-batch continuation at this layer.

use crate::error::Result;
use crate::http::{ApiRequest, Gateway};
use crate::ops::{self, OpOutput, Operation};
use crate::options::{self, OptionEntry, OptionLoader};
use crate::provider::{ParameterProvider, Params};
use crate::types::{JsonValue, TrackerEdition};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

// ============================================================================
// Host-facing contract
// ============================================================================

/// Result of a connection check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResult {
    /// Whether the check succeeded
    pub success: bool,
    /// Error message if failed
    pub message: Option<String>,
}

impl CheckResult {
    /// Create a successful check result
    pub fn success() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    /// Create a failed check result
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
        }
    }
}

/// The invocation protocol a host drives the connector through:
/// connectivity check, batch execution, and option loading for its
/// parameter UI.
#[async_trait]
pub trait Connector: Send + Sync {
    /// Verify the resolved credentials can reach the tracker.
    async fn check(&self) -> Result<CheckResult>;

    /// Execute a batch of input records and return the flat output list.
    async fn execute(
        &self,
        provider: &dyn ParameterProvider,
        items: usize,
    ) -> Result<Vec<JsonValue>>;

    /// Enumerate reference data for the host's parameter UI.
    async fn load_options(&self, loader: OptionLoader) -> Result<Vec<OptionEntry>>;
}

// ============================================================================
// Dispatcher
// ============================================================================

/// Per-batch counters, logged at completion
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchStats {
    /// Input records processed
    pub items: usize,
    /// Output records emitted (after flattening)
    pub records_out: usize,
}

/// Routes input records to operations and flattens the results
pub struct Dispatcher {
    gateway: Gateway,
    edition: TrackerEdition,
}

impl Dispatcher {
    /// Create a dispatcher over an existing gateway
    pub fn new(gateway: Gateway, edition: TrackerEdition) -> Self {
        Self { gateway, edition }
    }

    /// Resolve credentials from the host and create a dispatcher
    pub fn from_provider(
        provider: &dyn ParameterProvider,
        edition: TrackerEdition,
    ) -> Result<Self> {
        Ok(Self::new(Gateway::from_provider(provider, edition)?, edition))
    }

    /// The underlying gateway
    pub fn gateway(&self) -> &Gateway {
        &self.gateway
    }

    /// Process `items` input records sequentially.
    ///
    /// The operation is resolved once per batch (from record 0);
    /// operation-specific parameters are resolved per record. Array
    /// results are flattened so the output is always a flat sequence of
    /// records, one or more per input record.
    pub async fn run(
        &self,
        provider: &dyn ParameterProvider,
        items: usize,
    ) -> Result<Vec<JsonValue>> {
        let operation: Operation = Params::new(provider, 0)
            .str_required("operation")?
            .parse()?;
        info!(%operation, items, "starting batch");

        let mut out = Vec::new();
        let mut stats = BatchStats::default();

        for index in 0..items {
            match ops::execute(&self.gateway, operation, provider, index).await? {
                OpOutput::Single(value) => out.push(normalize_record(value)),
                OpOutput::Many(values) => out.extend(values),
            }
            stats.items += 1;
        }

        stats.records_out = out.len();
        info!(
            items = stats.items,
            records = stats.records_out,
            "batch complete"
        );
        Ok(out)
    }
}

#[async_trait]
impl Connector for Dispatcher {
    async fn check(&self) -> Result<CheckResult> {
        match self.gateway.send(&ApiRequest::get("/myself")).await {
            Ok(_) => Ok(CheckResult::success()),
            Err(e) => Ok(CheckResult::failure(e.to_string())),
        }
    }

    async fn execute(
        &self,
        provider: &dyn ParameterProvider,
        items: usize,
    ) -> Result<Vec<JsonValue>> {
        self.run(provider, items).await
    }

    async fn load_options(&self, loader: OptionLoader) -> Result<Vec<OptionEntry>> {
        options::load(&self.gateway, self.edition, loader).await
    }
}

/// Bodiless 2xx responses (delete, notify, update) still yield one
/// output record per input record.
fn normalize_record(value: JsonValue) -> JsonValue {
    if value.is_null() {
        json!({ "success": true })
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_result_constructors() {
        let ok = CheckResult::success();
        assert!(ok.success);
        assert!(ok.message.is_none());

        let bad = CheckResult::failure("Jira error 401: Unauthorized");
        assert!(!bad.success);
        assert_eq!(bad.message.as_deref(), Some("Jira error 401: Unauthorized"));
    }

    #[test]
    fn test_normalize_record() {
        assert_eq!(normalize_record(JsonValue::Null), json!({"success": true}));
        assert_eq!(normalize_record(json!({"key": "T-1"})), json!({"key": "T-1"}));
    }
}
