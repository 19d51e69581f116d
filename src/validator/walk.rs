//! Schema graph traversal helpers.
//!
//! A schema node recurses through `properties`, `patternProperties`,
//! `additionalProperties`, `items`, `additionalItems`, and `allOf`, and may
//! hop to another node entirely through `$ref`. Checks that walk the full
//! graph share the child enumeration here and carry a visited-pointer set so
//! reference cycles short-circuit instead of diverging.

use crate::spec::{Schema, SchemaItems};

/// Every direct sub-schema of `schema`, paired with the path suffix used in
/// diagnostics (`.name`, `.items`, `.allOf[0]`, ...).
pub(crate) fn subschemas(schema: &Schema) -> Vec<(String, &Schema)> {
    let mut children = Vec::new();
    if let Some(items) = schema.items.as_deref() {
        match items {
            SchemaItems::One(item) => children.push((".items".to_string(), item.as_ref())),
            SchemaItems::Many(list) => {
                for (i, item) in list.iter().enumerate() {
                    children.push((format!(".items[{i}]"), item));
                }
            }
        }
    }
    if let Some(additional) = schema.additional_items.as_deref() {
        if let Some(item) = additional.schema() {
            children.push((".additionalItems".to_string(), item));
        }
    }
    for (name, prop) in &schema.properties {
        children.push((format!(".{name}"), prop));
    }
    for (pattern, prop) in &schema.pattern_properties {
        children.push((format!(".{pattern}"), prop));
    }
    if let Some(additional) = schema.additional_properties.as_deref() {
        if let Some(prop) = additional.schema() {
            children.push((".additionalProperties".to_string(), prop));
        }
    }
    for (i, member) in schema.all_of.iter().enumerate() {
        children.push((format!(".allOf[{i}]"), member));
    }
    children
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_subschemas_enumerates_every_branch() {
        let schema: Schema = serde_json::from_value(json!({
            "items": { "type": "string" },
            "additionalItems": { "type": "integer" },
            "properties": { "name": { "type": "string" } },
            "patternProperties": { "^x-": { "type": "string" } },
            "additionalProperties": { "type": "boolean" },
            "allOf": [ { "type": "object" } ]
        }))
        .unwrap();

        let suffixes: Vec<String> = subschemas(&schema).into_iter().map(|(s, _)| s).collect();
        assert_eq!(
            suffixes,
            vec![
                ".items",
                ".additionalItems",
                ".name",
                ".^x-",
                ".additionalProperties",
                ".allOf[0]"
            ]
        );
    }

    #[test]
    fn test_subschemas_skips_boolean_forms() {
        let schema: Schema = serde_json::from_value(json!({
            "additionalProperties": false,
            "additionalItems": true
        }))
        .unwrap();
        assert!(subschemas(&schema).is_empty());
    }
}
