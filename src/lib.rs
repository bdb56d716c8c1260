//! # issuebridge
//!
//! A Rust-native connector that exposes a Jira-compatible issue
//! tracker's REST API as steps in a workflow pipeline. The host supplies
//! parameters and credentials through a read-only provider; the
//! connector turns them into authenticated HTTP requests, walks
//! paginated result sets to completion, and hands back a flat list of
//! JSON records.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use issuebridge::{load_job, Connector, Dispatcher, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let job = load_job("jobs/search.yaml")?;
//!     let edition = job.edition;
//!     let provider = job.into_provider();
//!
//!     let dispatcher = Dispatcher::from_provider(&provider, edition)?;
//!     for record in dispatcher.execute(&provider, provider.item_count()).await? {
//!         println!("{record}");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Connector Interface                         │
//! │  check() → CheckResult      execute(provider, n) → records     │
//! │  load_options(loader) → (name, value) pairs                     │
//! └─────────────────────────────────────────────────────────────────┘
//!                                │
//! ┌───────────┬───────────┬──────┴────────┬────────────┬───────────┐
//! │ Provider  │    Ops    │   Gateway     │ Pagination │  Options  │
//! ├───────────┼───────────┼───────────────┼────────────┼───────────┤
//! │ Params    │ create    │ basic auth    │ offset     │ projects  │
//! │ creds     │ update    │ single shot   │ cursor     │ types     │
//! │ job files │ search …  │ GET/POST/…    │ accumulate │ users …   │
//! └───────────┴───────────┴───────────────┴────────────┴───────────┘
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the connector
pub mod error;

/// Common types and type aliases
pub mod types;

/// Host parameter and credential resolution
pub mod provider;

/// Credential sets and basic auth
pub mod creds;

/// HTTP gateway
pub mod http;

/// Offset pagination helper
pub mod pagination;

/// Response envelope handling
pub mod envelope;

/// Issue operations and request builders
pub mod ops;

/// Option loaders for the host's parameter UI
pub mod options;

/// Operation dispatcher
pub mod engine;

/// Job file loading
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::{load_job, load_job_from_str, JobFile};
pub use engine::{CheckResult, Connector, Dispatcher};
pub use error::{Error, Result};
pub use http::{ApiRequest, Gateway};
pub use ops::Operation;
pub use options::{OptionEntry, OptionLoader};
pub use provider::{ParameterProvider, Params, StaticProvider};
pub use types::{JsonObject, JsonValue, Method, TrackerEdition};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
