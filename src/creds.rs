//! Credential resolution
//!
//! Token acquisition lives in the host; the connector only reads a named
//! credential set from the provider and applies it to outgoing requests.
//! The `TrackerEdition` switch selects which set is read: cloud sites
//! authenticate with email + API token, self-hosted installations with
//! username + password. Both go over HTTP basic auth. Credentials are
//! resolved once and never mutated.

use crate::error::{Error, Result};
use crate::provider::ParameterProvider;
use crate::types::{JsonValue, TrackerEdition};
use reqwest::RequestBuilder;
use url::Url;

/// A resolved credential set
#[derive(Debug, Clone)]
pub struct Credentials {
    /// Base URL of the tracker site (scheme + host)
    pub domain: Url,
    /// Basic-auth user (email on cloud, username on server)
    pub user: String,
    /// Basic-auth secret (API token on cloud, password on server)
    pub secret: String,
}

impl Credentials {
    /// Resolve the active credential set from the host.
    ///
    /// Fails with `Config` when the set selected by `edition` is absent
    /// or incomplete.
    pub fn resolve(
        provider: &dyn ParameterProvider,
        edition: TrackerEdition,
    ) -> Result<Self> {
        let name = edition.credential_name();
        let set = provider
            .credential(name)
            .ok_or_else(|| Error::config(format!("credential set '{name}' not configured")))?;

        let domain = require_field(set, name, "domain")?;
        let (user, secret) = match edition {
            TrackerEdition::Cloud => (
                require_field(set, name, "email")?,
                require_field(set, name, "api_token")?,
            ),
            TrackerEdition::Server => (
                require_field(set, name, "username")?,
                require_field(set, name, "password")?,
            ),
        };

        Ok(Self {
            domain: Url::parse(&domain)?,
            user,
            secret,
        })
    }

    /// Attach basic auth to an outgoing request
    pub fn apply(&self, req: RequestBuilder) -> RequestBuilder {
        req.basic_auth(&self.user, Some(&self.secret))
    }
}

fn require_field(set: &JsonValue, name: &str, field: &str) -> Result<String> {
    set.get(field)
        .and_then(JsonValue::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .ok_or_else(|| {
            Error::config(format!("credential set '{name}' is missing '{field}'"))
        })
}
