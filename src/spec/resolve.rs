//! JSON Reference resolution against the root document.
//!
//! All references in a Swagger 2.0 document are URI fragments pointing back
//! into the same document (`#/definitions/Pet`). Resolution works on the
//! decoded [`serde_json::Value`] tree so that pointer semantics (including
//! `~0` / `~1` token escaping) match the document as written rather than the
//! typed model. Every failure mode is a value, never a panic; callers turn
//! them into diagnostics.

use super::types::{ObjectOrReference, Parameter, Response, Schema};
use serde_json::Value;
use std::collections::BTreeSet;
use std::fmt;

/// Why a reference could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// The reference is not an in-document fragment (`#/...`)
    Unsupported { pointer: String },
    /// The pointer does not lead to any node
    NotFound { pointer: String },
    /// The pointer chain loops back on itself
    Circular { pointer: String },
    /// The pointed-to node is not the expected kind of object
    Shape {
        pointer: String,
        expected: &'static str,
    },
    /// A fully expanded document no longer decodes as Swagger 2.0
    Decode { message: String },
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveError::Unsupported { pointer } => {
                write!(f, "reference {pointer:?} is not an in-document JSON pointer")
            }
            ResolveError::NotFound { pointer } => {
                write!(f, "reference {pointer:?} does not resolve to any node")
            }
            ResolveError::Circular { pointer } => {
                write!(f, "reference {pointer:?} resolves through a circular chain")
            }
            ResolveError::Shape { pointer, expected } => {
                write!(f, "reference {pointer:?} does not point to a {expected}")
            }
            ResolveError::Decode { message } => {
                write!(f, "expanded document is not a Swagger 2.0 object: {message}")
            }
        }
    }
}

impl std::error::Error for ResolveError {}

/// Resolve an in-document reference to the node it points at.
pub fn resolve_pointer<'a>(root: &'a Value, reference: &str) -> Result<&'a Value, ResolveError> {
    let Some(fragment) = reference.strip_prefix('#') else {
        return Err(ResolveError::Unsupported {
            pointer: reference.to_string(),
        });
    };
    if fragment.is_empty() {
        return Ok(root);
    }
    if !fragment.starts_with('/') {
        return Err(ResolveError::Unsupported {
            pointer: reference.to_string(),
        });
    }
    root.pointer(fragment).ok_or_else(|| ResolveError::NotFound {
        pointer: reference.to_string(),
    })
}

/// Resolve a reference expected to name a [`Parameter`].
pub fn resolve_parameter(root: &Value, reference: &str) -> Result<Parameter, ResolveError> {
    let node = resolve_pointer(root, reference)?;
    serde_json::from_value(node.clone()).map_err(|_| ResolveError::Shape {
        pointer: reference.to_string(),
        expected: "parameter",
    })
}

/// Resolve a reference expected to name a [`Schema`].
pub fn resolve_schema(root: &Value, reference: &str) -> Result<Schema, ResolveError> {
    let node = resolve_pointer(root, reference)?;
    serde_json::from_value(node.clone()).map_err(|_| ResolveError::Shape {
        pointer: reference.to_string(),
        expected: "schema",
    })
}

/// Resolve a reference expected to name a [`Response`], following chained
/// references until an inline response is reached.
pub fn resolve_response(root: &Value, reference: &str) -> Result<Response, ResolveError> {
    let mut seen = BTreeSet::new();
    let mut pointer = reference.to_string();
    loop {
        if !seen.insert(pointer.clone()) {
            return Err(ResolveError::Circular { pointer });
        }
        let node = resolve_pointer(root, &pointer)?;
        match serde_json::from_value::<ObjectOrReference<Response>>(node.clone()) {
            Ok(ObjectOrReference::Object(response)) => return Ok(response),
            Ok(ObjectOrReference::Ref { ref_path }) => pointer = ref_path,
            Err(_) => {
                return Err(ResolveError::Shape {
                    pointer,
                    expected: "response",
                })
            }
        }
    }
}

/// Produce a copy of `root` with every `$ref` recursively inlined.
///
/// A reference already being expanded higher up the current chain is left in
/// place, so self-referential definitions stay finite. Dangling references
/// abort the expansion with the failing pointer.
pub fn expand_refs(root: &Value) -> Result<Value, ResolveError> {
    let mut expanded = root.clone();
    let mut chain = Vec::new();
    expand_node(&mut expanded, root, &mut chain)?;
    Ok(expanded)
}

fn expand_node(
    node: &mut Value,
    root: &Value,
    chain: &mut Vec<String>,
) -> Result<(), ResolveError> {
    match node {
        Value::Object(obj) => {
            if let Some(Value::String(reference)) = obj.get("$ref") {
                let reference = reference.clone();
                if chain.contains(&reference) {
                    // cycle: keep the reference so expansion stays finite
                    return Ok(());
                }
                let mut target = resolve_pointer(root, &reference)?.clone();
                chain.push(reference);
                expand_node(&mut target, root, chain)?;
                chain.pop();
                *node = target;
                return Ok(());
            }
            for child in obj.values_mut() {
                expand_node(child, root, chain)?;
            }
        }
        Value::Array(items) => {
            for child in items.iter_mut() {
                expand_node(child, root, chain)?;
            }
        }
        _ => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_resolve_pointer_with_escaped_tokens() {
        let root = json!({ "paths": { "/pets": { "get": {} } } });
        let node = resolve_pointer(&root, "#/paths/~1pets").unwrap();
        assert!(node.get("get").is_some());
    }

    #[test]
    fn test_resolve_pointer_failures() {
        let root = json!({ "definitions": {} });
        assert!(matches!(
            resolve_pointer(&root, "http://elsewhere#/definitions/Pet"),
            Err(ResolveError::Unsupported { .. })
        ));
        assert!(matches!(
            resolve_pointer(&root, "#/definitions/Pet"),
            Err(ResolveError::NotFound { .. })
        ));
    }

    #[test]
    fn test_expand_inlines_references() {
        let root = json!({
            "definitions": { "Pet": { "type": "object" } },
            "paths": { "/pets": { "get": { "responses": { "200": {
                "schema": { "$ref": "#/definitions/Pet" }
            } } } } }
        });
        let expanded = expand_refs(&root).unwrap();
        let schema = expanded
            .pointer("/paths/~1pets/get/responses/200/schema")
            .unwrap();
        assert_eq!(schema["type"], "object");
        assert!(schema.get("$ref").is_none());
    }

    #[test]
    fn test_expand_leaves_cycles_in_place() {
        let root = json!({
            "definitions": {
                "Node": { "properties": { "next": { "$ref": "#/definitions/Node" } } }
            }
        });
        let expanded = expand_refs(&root).unwrap();
        // one level is unrolled, the inner reference survives
        let inner = expanded
            .pointer("/definitions/Node/properties/next/properties/next")
            .unwrap();
        assert_eq!(inner["$ref"], "#/definitions/Node");
    }

    #[test]
    fn test_expand_reports_dangling_reference() {
        let root = json!({
            "paths": { "/x": { "get": { "responses": { "200": {
                "schema": { "$ref": "#/definitions/Missing" }
            } } } } }
        });
        assert!(matches!(
            expand_refs(&root),
            Err(ResolveError::NotFound { .. })
        ));
    }

    #[test]
    fn test_circular_response_chain() {
        let root = json!({
            "responses": {
                "A": { "$ref": "#/responses/B" },
                "B": { "$ref": "#/responses/A" }
            }
        });
        assert!(matches!(
            resolve_response(&root, "#/responses/A"),
            Err(ResolveError::Circular { .. })
        ));
    }
}
