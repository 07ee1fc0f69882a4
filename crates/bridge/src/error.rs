//! Error types for the bridge.

use thiserror::Error;
use trestle_openapi_tools::error::ExtractError;

/// Main error type for bridge operations.
#[derive(Error, Debug)]
pub enum BridgeError {
    /// Server discovery failed; nothing can be aggregated.
    #[error("Discovery error: {0}")]
    Discovery(String),

    /// Fetching one server's document failed (connect, timeout, non-2xx).
    #[error("Transport failure for '{server}': {message}")]
    TransportFailure { server: String, message: String },

    /// One server returned a body that is not a usable `OpenAPI` document.
    #[error("Malformed document from '{server}': {message}")]
    MalformedDocument { server: String, message: String },

    /// Reading the configuration file failed.
    #[error("Failed to read config '{path}': {source}")]
    ConfigRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Parsing the configuration file failed.
    #[error("Failed to parse config '{path}': {source}")]
    ConfigParse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Extraction errors surfaced under the `fail` policy.
    #[error("Extraction error: {0}")]
    Extract(#[from] ExtractError),
}

/// Result type alias for bridge operations.
pub type Result<T> = std::result::Result<T, BridgeError>;
