//! Common types used throughout issuebridge

use serde::{Deserialize, Serialize};

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

// ============================================================================
// HTTP Types
// ============================================================================

/// HTTP method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    #[default]
    GET,
    POST,
    PUT,
    DELETE,
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::GET => reqwest::Method::GET,
            Method::POST => reqwest::Method::POST,
            Method::PUT => reqwest::Method::PUT,
            Method::DELETE => reqwest::Method::DELETE,
        }
    }
}

// ============================================================================
// Tracker Edition
// ============================================================================

/// Which deployment flavor of the tracker the credentials target.
///
/// Cloud and self-hosted (Server/Data Center) installations authenticate
/// with different credential sets and differ on a few reference endpoints;
/// the two are mutually exclusive and selected up front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackerEdition {
    /// Atlassian-hosted cloud site
    #[default]
    Cloud,
    /// Self-hosted Server / Data Center installation
    Server,
}

impl TrackerEdition {
    /// The named credential set this edition reads from the host.
    pub fn credential_name(self) -> &'static str {
        match self {
            TrackerEdition::Cloud => "cloud_api",
            TrackerEdition::Server => "server_api",
        }
    }
}
