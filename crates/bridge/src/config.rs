//! Bridge configuration (YAML).

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use trestle_openapi_tools::config::ExtractOptions;

use crate::error::{BridgeError, Result};

const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;

/// Top-level bridge configuration.
///
/// ```yaml
/// registry:
///   baseUrl: http://registry.local:8080
///   fetchTimeoutSecs: 10
/// servers:
///   - memory
///   - weather
/// extraction:
///   invalidOperations: skip
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BridgeConfig {
    /// Where `OpenAPI` documents are fetched from.
    pub registry: RegistryConfig,

    /// Ordered server identifiers to aggregate.
    #[serde(default)]
    pub servers: Vec<String>,

    /// Per-document extraction options.
    #[serde(default)]
    pub extraction: ExtractOptions,
}

/// Registry endpoint settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryConfig {
    /// Base URL; documents live at `{baseUrl}/{server}/openapi.json`.
    pub base_url: url::Url,

    /// Per-request timeout in seconds.
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,
}

fn default_fetch_timeout_secs() -> u64 {
    DEFAULT_FETCH_TIMEOUT_SECS
}

impl RegistryConfig {
    #[must_use]
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

impl BridgeConfig {
    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns a structured error naming the path if the file cannot be read
    /// or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| BridgeError::ConfigRead {
            path: path.display().to_string(),
            source: e,
        })?;
        serde_yaml::from_str(&text).map_err(|e| BridgeError::ConfigParse {
            path: path.display().to_string(),
            source: e,
        })
    }
}
