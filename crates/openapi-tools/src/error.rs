//! Error types for `trestle-openapi-tools`.

use thiserror::Error;

/// Main error type for `OpenAPI` tool extraction.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// The document does not have the structure extraction expects.
    #[error("Invalid OpenAPI document: {0}")]
    InvalidDocument(String),

    /// A candidate operation has no `operationId` to name the tool after.
    #[error("POST {path}: missing operationId")]
    MissingOperationId { path: String },

    /// An operation has neither a usable `description` nor a `summary`.
    #[error("Operation '{operation_id}': missing description and summary")]
    MissingDescription { operation_id: String },

    /// A `$ref` chain loops back on itself.
    #[error("Cyclic $ref detected while resolving: {reference}")]
    CyclicSchemaReference { reference: String },

    /// A `$ref` points at a schema that is not in `components.schemas`.
    #[error("Unresolved $ref '{reference}' (no such schema in components.schemas)")]
    UnresolvedReference { reference: String },

    /// A `$ref` that is not a local `#/components/schemas/<Name>` pointer.
    #[error("Unsupported $ref (expected '#/components/schemas/<Name>'): {reference}")]
    UnsupportedReference { reference: String },
}

/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractError>;
