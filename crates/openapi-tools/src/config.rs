//! Extraction configuration.

use serde::{Deserialize, Serialize};

/// Options governing tool extraction from a single document.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExtractOptions {
    /// What to do with a POST operation that cannot become a tool.
    pub invalid_operations: InvalidOperationPolicy,

    /// `operationId` patterns to extract. Empty means everything.
    pub include: Vec<String>,

    /// `operationId` patterns to drop. Exclude wins over include.
    pub exclude: Vec<String>,
}

/// Policy for operations missing an id or description, or whose request
/// schema cannot be resolved.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum InvalidOperationPolicy {
    /// Log a warning and skip the operation.
    #[default]
    Skip,
    /// Abort the document's extraction with the error.
    Fail,
}
