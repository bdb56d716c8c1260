//! Option loaders
//!
//! Query-time helpers that fetch enumerable reference data from the
//! tracker and project it into (display name, value) pairs for the
//! host's parameter UI. Each loader is a single unpaginated read; a
//! failure surfaces immediately, there is no partial result.

use crate::envelope::Envelope;
use crate::error::{Error, Result};
use crate::http::{ApiRequest, Gateway};
use crate::types::{JsonValue, TrackerEdition};
use serde::Serialize;
use serde_json::json;
use std::str::FromStr;

/// A (display name, value) pair offered to the host UI.
///
/// Transient; recomputed on every load.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptionEntry {
    /// Display name
    pub name: String,
    /// Value submitted back as a parameter (id, name, or label text,
    /// depending on the endpoint)
    pub value: JsonValue,
}

/// The reference data sets the connector can enumerate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionLoader {
    /// Projects the credentials can see
    Projects,
    /// Issue types
    IssueTypes,
    /// Users
    Users,
    /// Groups
    Groups,
    /// Issue labels
    Labels,
    /// Priorities
    Priorities,
}

impl OptionLoader {
    /// Canonical loader name
    pub fn as_str(self) -> &'static str {
        match self {
            OptionLoader::Projects => "projects",
            OptionLoader::IssueTypes => "issue_types",
            OptionLoader::Users => "users",
            OptionLoader::Groups => "groups",
            OptionLoader::Labels => "labels",
            OptionLoader::Priorities => "priorities",
        }
    }
}

impl FromStr for OptionLoader {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "projects" => Ok(OptionLoader::Projects),
            "issue_types" => Ok(OptionLoader::IssueTypes),
            "users" => Ok(OptionLoader::Users),
            "groups" => Ok(OptionLoader::Groups),
            "labels" => Ok(OptionLoader::Labels),
            "priorities" => Ok(OptionLoader::Priorities),
            other => Err(Error::validation(format!("unknown option loader '{other}'"))),
        }
    }
}

/// Run one option loader against the tracker.
pub async fn load(
    gateway: &Gateway,
    edition: TrackerEdition,
    loader: OptionLoader,
) -> Result<Vec<OptionEntry>> {
    match loader {
        OptionLoader::Projects => {
            // Cloud wraps the project list in a search envelope; Server
            // still returns the bare array.
            let (path, envelope) = match edition {
                TrackerEdition::Cloud => ("/project/search", Envelope::Wrapped("values")),
                TrackerEdition::Server => ("/project", Envelope::Bare),
            };
            project_entries(gateway, path, envelope, "name", "id").await
        }
        OptionLoader::IssueTypes => {
            project_entries(gateway, "/issuetype", Envelope::Bare, "name", "id").await
        }
        OptionLoader::Users => {
            project_entries(
                gateway,
                "/users/search",
                Envelope::Bare,
                "displayName",
                "accountId",
            )
            .await
        }
        OptionLoader::Groups => {
            project_entries(
                gateway,
                "/groups/picker",
                Envelope::Wrapped("groups"),
                "name",
                "name",
            )
            .await
        }
        OptionLoader::Labels => labels(gateway).await,
        OptionLoader::Priorities => {
            project_entries(gateway, "/priority", Envelope::Bare, "name", "id").await
        }
    }
}

/// Fetch `path` and project each entry onto (name_field, value_field).
async fn project_entries(
    gateway: &Gateway,
    path: &str,
    envelope: Envelope<'_>,
    name_field: &str,
    value_field: &str,
) -> Result<Vec<OptionEntry>> {
    let response = gateway.send(&ApiRequest::get(path)).await?;
    let records = envelope.unwrap_records(&response)?;

    records
        .iter()
        .map(|record| {
            let name = record
                .get(name_field)
                .and_then(JsonValue::as_str)
                .ok_or_else(|| {
                    Error::unexpected(format!("{path} entry has no '{name_field}' string"))
                })?;
            let value = record.get(value_field).cloned().ok_or_else(|| {
                Error::unexpected(format!("{path} entry has no '{value_field}' field"))
            })?;
            Ok(OptionEntry {
                name: name.to_string(),
                value,
            })
        })
        .collect()
}

/// Labels come back as plain strings; the text serves as both name and
/// value.
async fn labels(gateway: &Gateway) -> Result<Vec<OptionEntry>> {
    let response = gateway.send(&ApiRequest::get("/label")).await?;
    let records = Envelope::Wrapped("values").unwrap_records(&response)?;

    records
        .iter()
        .map(|record| {
            let label = record
                .as_str()
                .ok_or_else(|| Error::unexpected("/label entries must be strings"))?;
            Ok(OptionEntry {
                name: label.to_string(),
                value: json!(label),
            })
        })
        .collect()
}
