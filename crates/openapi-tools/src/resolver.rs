//! Local `$ref` resolution for request schemas.
//!
//! Only local component refs (`#/components/schemas/<Name>`) are supported;
//! that is the namespace the bridged backends publish into, and the only form
//! the extraction contract admits. A `$ref` node is replaced by a deep copy
//! of its target, and resolution continues inside the copy so nested refs
//! collapse too. Cycles are detected with a visited-path set and fail closed
//! instead of recursing forever.

use serde_json::{Map, Value};
use std::collections::HashSet;

use crate::error::{ExtractError, Result};

const COMPONENT_SCHEMA_PREFIX: &str = "#/components/schemas/";

/// Resolves `$ref` pointers against one document's `components.schemas`.
#[derive(Debug)]
pub struct SchemaResolver<'a> {
    schemas: &'a Map<String, Value>,
}

impl<'a> SchemaResolver<'a> {
    #[must_use]
    pub fn new(schemas: &'a Map<String, Value>) -> Self {
        Self { schemas }
    }

    /// Produce a deep copy of `schema` with every `$ref` replaced by its
    /// target definition. A schema without refs comes back unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if a ref is cyclic, missing from
    /// `components.schemas`, or not a local `#/components/schemas/<Name>`
    /// pointer.
    pub fn resolve(&self, schema: &Value) -> Result<Value> {
        let mut seen: HashSet<String> = HashSet::new();
        self.resolve_node(schema, &mut seen)
    }

    fn resolve_node(&self, node: &Value, seen: &mut HashSet<String>) -> Result<Value> {
        match node {
            Value::Object(map) => {
                if let Some(reference) = map.get("$ref") {
                    let Some(reference) = reference.as_str() else {
                        return Err(ExtractError::UnsupportedReference {
                            reference: reference.to_string(),
                        });
                    };
                    // The whole node is replaced; sibling keys do not survive.
                    return self.resolve_ref(reference, seen);
                }
                let mut out = Map::with_capacity(map.len());
                for (key, value) in map {
                    out.insert(key.clone(), self.resolve_node(value, seen)?);
                }
                Ok(Value::Object(out))
            }
            Value::Array(items) => {
                let resolved: Result<Vec<Value>> = items
                    .iter()
                    .map(|item| self.resolve_node(item, seen))
                    .collect();
                Ok(Value::Array(resolved?))
            }
            other => Ok(other.clone()),
        }
    }

    fn resolve_ref(&self, reference: &str, seen: &mut HashSet<String>) -> Result<Value> {
        if !seen.insert(reference.to_string()) {
            return Err(ExtractError::CyclicSchemaReference {
                reference: reference.to_string(),
            });
        }
        let target = self.lookup(reference)?;
        let resolved = self.resolve_node(target, seen);
        // Remove after descending: the set tracks the current path only, so
        // two branches referencing the same schema are not a cycle.
        seen.remove(reference);
        resolved
    }

    fn lookup(&self, reference: &str) -> Result<&Value> {
        let Some(token) = reference.strip_prefix(COMPONENT_SCHEMA_PREFIX) else {
            return Err(ExtractError::UnsupportedReference {
                reference: reference.to_string(),
            });
        };
        // A '/' in the raw token would address past the schema name.
        if token.is_empty() || token.contains('/') {
            return Err(ExtractError::UnsupportedReference {
                reference: reference.to_string(),
            });
        }
        let name = decode_pointer_token(token);
        self.schemas
            .get(&name)
            .ok_or_else(|| ExtractError::UnresolvedReference {
                reference: reference.to_string(),
            })
    }
}

/// Undo JSON pointer escaping (RFC 6901): `~1` -> `/`, `~0` -> `~`.
fn decode_pointer_token(token: &str) -> String {
    token.replace("~1", "/").replace("~0", "~")
}
