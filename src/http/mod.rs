//! HTTP gateway
//!
//! Issues exactly one authenticated call per request against the tracker's
//! REST base path and hands back the parsed JSON body. No retries, no
//! backoff, no rate limiting: a failed call is classified and propagated
//! immediately, and the caller decides what to do with it.

mod gateway;

pub use gateway::{ApiRequest, Gateway};
