//! Error types for the tools API client.
//!
//! # Design
//! Each failure mode of a single request/response cycle gets its own variant
//! so callers can tell a local encoding problem from a slow backend or a
//! garbled reply. Nothing here is retried; every variant propagates unchanged
//! from the transport layer up through the service functions.

use thiserror::Error;

/// Boxed error produced by a `Transport` implementation.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors returned by `ApiClient` calls.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request body could not be serialized to JSON. Raised before any
    /// network attempt is made.
    #[error("request body could not be encoded: {0}")]
    Encoding(#[source] serde_json::Error),

    /// The underlying transport failed (refused, DNS, abrupt close).
    #[error("network error: {0}")]
    Network(#[source] BoxError),

    /// The configured deadline elapsed before the network exchange settled.
    #[error("request timed out after {timeout_ms} ms")]
    Timeout { timeout_ms: u64 },

    /// The response body was not valid JSON for the expected shape.
    #[error("response body could not be decoded: {0}")]
    Decoding(#[source] serde_json::Error),

    /// Client configuration was rejected.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl ApiError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, ApiError::Timeout { .. })
    }
}
