//! Tool extraction from a parsed `OpenAPI` document.
//!
//! Every POST operation with an `application/json` request schema becomes one
//! tool descriptor: `operationId` as the name, `description` (or `summary`)
//! as the description, and the request schema with all `$ref`s collapsed as
//! the input schema. Descriptors come out in the document's `paths` order.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::{ExtractOptions, InvalidOperationPolicy};
use crate::document::{OpenApiDocument, Operation};
use crate::error::{ExtractError, Result};
use crate::resolver::SchemaResolver;

/// A normalized tool exposed to a tool-calling consumer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    /// Tool name (the operation's `operationId`, verbatim).
    pub name: String,
    /// Human-readable description (`description`, or `summary` as fallback).
    pub description: String,
    /// Fully resolved JSON schema for the tool's arguments.
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

/// Extract tool descriptors from `document`.
///
/// `server` is only used in skip diagnostics, never in the transformation.
///
/// # Errors
///
/// Under [`InvalidOperationPolicy::Skip`] (the default) this never fails:
/// operations that cannot become tools are logged and dropped. Under
/// [`InvalidOperationPolicy::Fail`] the first per-operation error aborts the
/// document's extraction.
pub fn extract_tools(
    server: &str,
    document: &OpenApiDocument,
    options: &ExtractOptions,
) -> Result<Vec<ToolDescriptor>> {
    let resolver = SchemaResolver::new(&document.components.schemas);
    let mut tools = Vec::new();

    for (path, path_item) in &document.paths {
        let Some(op) = &path_item.post else {
            continue;
        };

        // POST without a JSON request schema is not a tool candidate.
        let Some(schema) = request_schema(op) else {
            continue;
        };

        if !should_extract(op, options) {
            continue;
        }

        match build_descriptor(op, schema, path, &resolver) {
            Ok(tool) => tools.push(tool),
            Err(e) => match options.invalid_operations {
                InvalidOperationPolicy::Skip => {
                    tracing::warn!(
                        server = %server,
                        path = %path,
                        method = "POST",
                        error = %e,
                        "skipping operation"
                    );
                }
                InvalidOperationPolicy::Fail => return Err(e),
            },
        }
    }

    Ok(tools)
}

fn request_schema(op: &Operation) -> Option<&Value> {
    op.request_body
        .as_ref()?
        .content
        .get("application/json")?
        .schema
        .as_ref()
}

fn build_descriptor(
    op: &Operation,
    schema: &Value,
    path: &str,
    resolver: &SchemaResolver<'_>,
) -> Result<ToolDescriptor> {
    let name = op
        .operation_id
        .clone()
        .ok_or_else(|| ExtractError::MissingOperationId {
            path: path.to_string(),
        })?;

    let description = op
        .description
        .as_deref()
        .filter(|d| !d.is_empty())
        .or(op.summary.as_deref().filter(|s| !s.is_empty()))
        .ok_or_else(|| ExtractError::MissingDescription {
            operation_id: name.clone(),
        })?
        .to_string();

    let input_schema = resolver.resolve(schema)?;

    Ok(ToolDescriptor {
        name,
        description,
        input_schema,
    })
}

fn should_extract(op: &Operation, options: &ExtractOptions) -> bool {
    // Filters match on operationId; an unnamed operation passes through so
    // the configured invalid-operation policy decides its fate.
    let Some(op_id) = op.operation_id.as_deref() else {
        return true;
    };

    // Exclude patterns win.
    if options.exclude.iter().any(|p| matches_pattern(p, op_id)) {
        return false;
    }

    if !options.include.is_empty() {
        return options.include.iter().any(|p| matches_pattern(p, op_id));
    }

    true
}

/// Exact match, or prefix match when the pattern ends with `*`.
fn matches_pattern(pattern: &str, op_id: &str) -> bool {
    pattern
        .strip_suffix('*')
        .map_or(pattern == op_id, |prefix| op_id.starts_with(prefix))
}
