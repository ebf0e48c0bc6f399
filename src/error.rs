//! Error types for jibu
//!
//! This module defines all error types used throughout the application,
//! using `thiserror` for ergonomic error handling.

use std::time::Duration;
use thiserror::Error;

/// Failure of a single generation call
///
/// Every way a `send` can go wrong maps onto exactly one of these kinds.
/// None of them are retried internally; the caller decides whether to try
/// again.
#[derive(Error, Debug)]
pub enum GenerationFailure {
    /// Transport-level failure or an unexpected status from the service
    #[error("network failure: {0}")]
    Network(String),

    /// The service rejected the API key (401/403)
    #[error("authentication rejected: {0}")]
    AuthFailure(String),

    /// The service reported quota exhaustion (429)
    #[error("quota exceeded: {0}")]
    QuotaExceeded(String),

    /// The service answered but produced no usable candidate
    #[error("service returned no candidates")]
    EmptyResponse,

    /// The response body could not be decoded
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// The caller-supplied deadline expired before a reply arrived
    #[error("generation call timed out after {0:?}")]
    Timeout(Duration),
}

/// Main error type for jibu operations
///
/// This enum encompasses all possible errors that can occur during
/// configuration loading, endpoint interactions, and generation calls.
#[derive(Error, Debug)]
pub enum JibuError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Endpoint-related errors (client construction, unsupported operations)
    #[error("Endpoint error: {0}")]
    Endpoint(String),

    /// A generation call failed
    #[error("Generation failed: {0}")]
    Generation(#[from] GenerationFailure),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for jibu operations
///
/// This is a convenience alias that uses `anyhow::Error` as the error type,
/// allowing for rich error context and easy error propagation.
pub type Result<T> = anyhow::Result<T>;
