//! Job file loading
//!
//! A job file is the CLI's stand-in for a workflow host: one YAML
//! document naming the edition, the credential set, the operation, the
//! batch-level parameters, and the per-record items. It loads into a
//! `StaticProvider`, the same seam a real host would implement.

use crate::error::Result;
use crate::provider::StaticProvider;
use crate::types::{JsonObject, JsonValue, TrackerEdition};
use serde::Deserialize;
use serde_json::json;
use std::path::Path;

/// A parsed batch job definition
#[derive(Debug, Deserialize)]
pub struct JobFile {
    /// Which tracker deployment the credentials target
    #[serde(default)]
    pub edition: TrackerEdition,
    /// The credential set for that edition
    pub credentials: JsonValue,
    /// Operation applied to every record in the batch
    pub operation: String,
    /// Batch-level parameters, shared by all records
    #[serde(default)]
    pub parameters: JsonObject,
    /// Per-record parameter maps; an empty list means one record with no
    /// overrides
    #[serde(default)]
    pub items: Vec<JsonObject>,
}

impl JobFile {
    /// Turn the job into the provider the dispatcher reads from.
    pub fn into_provider(self) -> StaticProvider {
        let mut provider = StaticProvider::new()
            .with_credential(self.edition.credential_name(), self.credentials)
            .with_parameter("operation", json!(self.operation));

        for (name, value) in self.parameters {
            provider = provider.with_parameter(name, value);
        }
        for item in self.items {
            provider = provider.with_item(item);
        }
        provider
    }
}

/// Load a job file from disk
pub fn load_job(path: impl AsRef<Path>) -> Result<JobFile> {
    let text = std::fs::read_to_string(path)?;
    load_job_from_str(&text)
}

/// Parse a job definition from a YAML string
pub fn load_job_from_str(text: &str) -> Result<JobFile> {
    Ok(serde_yaml::from_str(text)?)
}
