//! Gateway implementation

use crate::creds::Credentials;
use crate::error::{Error, Result};
use crate::provider::ParameterProvider;
use crate::types::{JsonValue, Method, TrackerEdition};
use reqwest::Client;
use tracing::{debug, warn};

/// REST base path shared by every endpoint the connector touches
const API_ROOT: &str = "/rest/api/2";

// ============================================================================
// Request description
// ============================================================================

/// One fully-described API call: method, endpoint path, optional JSON
/// body, and query parameters. This is what the request builders produce
/// and the only thing the gateway consumes.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    /// HTTP method
    pub method: Method,
    /// Endpoint path below the REST base (e.g. `/issue/PROJ-1`)
    pub path: String,
    /// Optional JSON body
    pub body: Option<JsonValue>,
    /// Query parameters, appended in insertion order
    pub query: Vec<(String, String)>,
}

impl ApiRequest {
    /// Create a request with the given method and path
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            query: Vec::new(),
        }
    }

    /// GET request
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// POST request
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// PUT request
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    /// DELETE request
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Set the JSON body
    #[must_use]
    pub fn json(mut self, body: JsonValue) -> Self {
        self.body = Some(body);
        self
    }

    /// Append a query parameter
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }
}

// ============================================================================
// Gateway
// ============================================================================

/// Authenticated single-shot HTTP access to the tracker
pub struct Gateway {
    client: Client,
    base_url: String,
    credentials: Credentials,
}

impl Gateway {
    /// Create a gateway from resolved credentials
    pub fn new(credentials: Credentials) -> Self {
        let client = Client::builder()
            .user_agent(format!("issuebridge/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("Failed to build HTTP client");

        let base_url = format!(
            "{}{}",
            credentials.domain.as_str().trim_end_matches('/'),
            API_ROOT
        );

        Self {
            client,
            base_url,
            credentials,
        }
    }

    /// Resolve credentials from the host and create a gateway
    pub fn from_provider(
        provider: &dyn ParameterProvider,
        edition: TrackerEdition,
    ) -> Result<Self> {
        Ok(Self::new(Credentials::resolve(provider, edition)?))
    }

    /// The resolved REST base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issue the request. Exactly one attempt.
    ///
    /// Non-2xx responses become `Error::Remote` carrying the upstream
    /// status and body verbatim; transport failures become `Error::Http`.
    /// A 2xx response with an empty body (delete, notify) yields
    /// `JsonValue::Null`.
    pub async fn send(&self, request: &ApiRequest) -> Result<JsonValue> {
        let url = self.build_url(&request.path);
        debug!(method = ?request.method, %url, "issuing tracker request");

        let mut req = self.client.request(request.method.into(), &url);
        if !request.query.is_empty() {
            req = req.query(&request.query);
        }
        if let Some(body) = &request.body {
            req = req.json(body);
        }
        req = self.credentials.apply(req);

        let response = req.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            warn!(status = status.as_u16(), %url, "tracker request failed");
            return Err(Error::remote(status.as_u16(), text));
        }

        if text.trim().is_empty() {
            return Ok(JsonValue::Null);
        }

        let value = serde_json::from_str(&text)?;
        Ok(value)
    }

    fn build_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl std::fmt::Debug for Gateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gateway")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}
