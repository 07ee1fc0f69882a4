//! Serde model of the `OpenAPI` surface consumed by tool extraction.
//!
//! Only the fields extraction reads are modeled; anything else in a document
//! is ignored. Request schemas stay raw `serde_json::Value` so that `$ref`
//! resolution can deep-copy target definitions without re-shaping them.
//! `paths` is an `IndexMap` because the document's own path order fixes the
//! order descriptors are emitted in.

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashMap;

use crate::error::{ExtractError, Result};

/// A parsed `OpenAPI` document.
#[derive(Debug, Clone, Deserialize)]
pub struct OpenApiDocument {
    /// Path -> path item, in document order.
    pub paths: IndexMap<String, PathItem>,

    /// Reusable component schemas, the namespace local `$ref`s point into.
    #[serde(default)]
    pub components: Components,
}

/// Operations of a single path. Only POST is a tool-extraction candidate.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathItem {
    #[serde(default)]
    pub post: Option<Operation>,
}

/// A single `OpenAPI` operation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    #[serde(default)]
    pub operation_id: Option<String>,

    #[serde(default)]
    pub summary: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub request_body: Option<RequestBody>,
}

/// Request body of an operation, keyed by media type.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RequestBody {
    #[serde(default)]
    pub content: HashMap<String, MediaType>,
}

/// One media type entry of a request body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MediaType {
    #[serde(default)]
    pub schema: Option<Value>,
}

/// The `components` section; only `schemas` is consumed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Components {
    #[serde(default)]
    pub schemas: Map<String, Value>,
}

impl OpenApiDocument {
    /// Parse a document from JSON or YAML text.
    ///
    /// JSON is tried first, then YAML (JSON being a YAML subset, the fallback
    /// also covers documents that are valid under both).
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::InvalidDocument`] if the text is neither, or
    /// if the document lacks a `paths` mapping.
    pub fn parse(text: &str) -> Result<Self> {
        serde_json::from_str(text)
            .or_else(|_| serde_yaml::from_str(text))
            .map_err(|e: serde_yaml::Error| ExtractError::InvalidDocument(e.to_string()))
    }

    /// Parse a document from an already-deserialized JSON value.
    ///
    /// Note that `serde_json::Value` objects do not preserve key order, so a
    /// document built this way loses its original path order; parse from text
    /// with [`OpenApiDocument::parse`] where that order matters.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::InvalidDocument`] if the value lacks a `paths`
    /// mapping or has the wrong shape.
    pub fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| ExtractError::InvalidDocument(e.to_string()))
    }
}
