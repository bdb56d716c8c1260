//! Error types for issuebridge
//!
//! This module defines the error hierarchy for the whole connector.
//! All public APIs return `Result<T, Error>` where Error is defined here.
//!
//! Two kinds matter to callers: `Validation` (the request could not be
//! built from the supplied parameters; nothing was sent) and `Remote`
//! (the tracker answered with a non-2xx status; the upstream status and
//! body are preserved verbatim).

use thiserror::Error;

/// The main error type for issuebridge
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Parameter / Validation Errors
    // ============================================================================
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Missing required parameter: {name}")]
    MissingParameter { name: String },

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Remote (HTTP) Errors
    // ============================================================================
    #[error("Jira request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Jira error {status}: {body}")]
    Remote { status: u16, body: String },

    #[error("Unexpected Jira response: {message}")]
    Unexpected { message: String },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl Error {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a missing parameter error
    pub fn missing_parameter(name: impl Into<String>) -> Self {
        Self::MissingParameter { name: name.into() }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a remote error from an HTTP status and response body
    pub fn remote(status: u16, body: impl Into<String>) -> Self {
        Self::Remote {
            status,
            body: body.into(),
        }
    }

    /// Create an unexpected-response error
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected {
            message: message.into(),
        }
    }

    /// True when no request was sent because the input could not be
    /// turned into one.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::Validation { .. } | Error::MissingParameter { .. }
        )
    }

    /// True when the tracker (or the transport to it) failed.
    pub fn is_remote(&self) -> bool {
        matches!(self, Error::Remote { .. } | Error::Http(_))
    }
}

/// Result type alias for issuebridge
pub type Result<T> = std::result::Result<T, Error>;
