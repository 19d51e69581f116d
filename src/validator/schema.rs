//! Thin wrappers over the `jsonschema` engine.
//!
//! The semantic validator never interprets JSON Schema keywords itself; it
//! serializes the relevant spec node back to JSON, compiles it as a draft-4
//! schema, and lets the engine judge the sample value. Compilation failures
//! become 500 diagnostics so a broken schema in the document cannot crash
//! the run.

use super::formats::FormatRegistry;
use super::result::{Issue, ValidationResult};
use crate::spec::{Document, Header, Items, Parameter, Schema};
use jsonschema::{Draft, JSONSchema};
use serde_json::Value;
use tracing::warn;

/// Validates instances against a full [`Schema`] node.
///
/// The root document's `definitions` are grafted onto the compiled schema so
/// in-document `$ref`s, including self-referential ones, resolve inside the
/// engine.
pub struct SchemaValidator {
    path: String,
    compiled: Option<JSONSchema>,
    compile_issue: Option<Issue>,
}

impl SchemaValidator {
    pub fn new(
        schema: &Schema,
        doc: &Document,
        path: impl Into<String>,
        formats: &FormatRegistry,
    ) -> Self {
        let path = path.into();
        match serde_json::to_value(schema) {
            Ok(value) => {
                let value = graft_definitions(value, doc);
                Self::from_value(value, path, formats)
            }
            Err(err) => Self::failed(path, err.to_string()),
        }
    }

    /// Compile an already-built schema value.
    pub(crate) fn from_value(value: Value, path: String, formats: &FormatRegistry) -> Self {
        let mut options = JSONSchema::options();
        options.with_draft(Draft::Draft4);
        formats.apply(&mut options);
        match options.compile(&value) {
            Ok(compiled) => SchemaValidator {
                path,
                compiled: Some(compiled),
                compile_issue: None,
            },
            Err(err) => {
                warn!(path = %path, error = %err, "schema does not compile");
                let message = format!("schema at {path} does not compile: {err}");
                Self::failed(path, message)
            }
        }
    }

    pub(crate) fn failed(path: String, message: impl Into<String>) -> Self {
        SchemaValidator {
            path,
            compiled: None,
            compile_issue: Some(Issue::new(500, message)),
        }
    }

    /// Validate one instance, mapping every engine error to a 422 issue
    /// anchored at this validator's path.
    pub fn validate(&self, instance: &Value) -> ValidationResult {
        let mut res = ValidationResult::new();
        if let Some(issue) = &self.compile_issue {
            res.errors.push(issue.clone());
            return res;
        }
        let Some(compiled) = &self.compiled else {
            return res;
        };
        if let Err(errors) = compiled.validate(instance) {
            for err in errors {
                let pointer = err.instance_path.to_string();
                let message = if pointer.is_empty() {
                    format!("{}: {}", self.path, err)
                } else {
                    format!("{}{}: {}", self.path, pointer, err)
                };
                res.error(422, message);
            }
        }
        res
    }
}

/// Validates the `default` of a simple (non-body) parameter against the
/// primitive constraints declared on the parameter itself.
pub struct ParamValidator {
    inner: SchemaValidator,
}

impl ParamValidator {
    pub fn new(param: &Parameter, formats: &FormatRegistry) -> Self {
        let label = format!(
            "default value for param {:?} in {:?}",
            param.name,
            param.in_str()
        );
        ParamValidator {
            inner: primitive_validator(param, label, formats),
        }
    }

    pub fn validate(&self, instance: &Value) -> ValidationResult {
        self.inner.validate(instance)
    }
}

/// Validates the `default` of a response header.
pub struct HeaderValidator {
    inner: SchemaValidator,
}

impl HeaderValidator {
    pub fn new(name: &str, header: &Header, formats: &FormatRegistry) -> Self {
        let label = format!("default value for header {name:?}");
        HeaderValidator {
            inner: primitive_validator(header, label, formats),
        }
    }

    pub fn validate(&self, instance: &Value) -> ValidationResult {
        self.inner.validate(instance)
    }
}

/// Validates the `default` of one level of a primitive `items` chain.
pub struct ItemsValidator {
    inner: SchemaValidator,
}

impl ItemsValidator {
    pub fn new(label: &str, location: &str, items: &Items, formats: &FormatRegistry) -> Self {
        let label = format!("default value for items {label:?} in {location:?}");
        ItemsValidator {
            inner: primitive_validator(items, label, formats),
        }
    }

    pub fn validate(&self, instance: &Value) -> ValidationResult {
        self.inner.validate(instance)
    }
}

/// Build a draft-4 schema from a primitive carrier (parameter, header, or
/// items) by serializing it and dropping the fields that are not schema
/// keywords.
fn primitive_validator<T: serde::Serialize>(
    carrier: &T,
    label: String,
    formats: &FormatRegistry,
) -> SchemaValidator {
    match serde_json::to_value(carrier) {
        Ok(mut value) => {
            strip_non_schema_keys(&mut value);
            SchemaValidator::from_value(value, label, formats)
        }
        Err(err) => SchemaValidator::failed(label, err.to_string()),
    }
}

fn strip_non_schema_keys(value: &mut Value) {
    if let Value::Object(map) = value {
        for key in [
            "name",
            "in",
            "description",
            "required",
            "collectionFormat",
            "allowEmptyValue",
            "default",
            "schema",
        ] {
            map.remove(key);
        }
        if let Some(items) = map.get_mut("items") {
            strip_non_schema_keys(items);
        }
    }
}

fn graft_definitions(mut value: Value, doc: &Document) -> Value {
    if let Value::Object(map) = &mut value {
        if !map.contains_key("definitions") {
            if let Some(definitions) = doc.json().get("definitions") {
                map.insert("definitions".to_string(), definitions.clone());
            }
        }
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::parse_document;
    use serde_json::json;

    fn doc() -> Document {
        parse_document(
            r#"{
                "swagger": "2.0",
                "info": { "title": "T", "version": "1" },
                "paths": {},
                "definitions": {
                    "Pet": {
                        "type": "object",
                        "required": ["id"],
                        "properties": { "id": { "type": "integer" } }
                    }
                }
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_schema_validator_resolves_grafted_definitions() {
        let doc = doc();
        let schema: Schema =
            serde_json::from_value(json!({ "$ref": "#/definitions/Pet" })).unwrap();
        let formats = FormatRegistry::default();
        let validator = SchemaValidator::new(&schema, &doc, "/pets", &formats);

        assert!(validator.validate(&json!({ "id": 7 })).is_clean());
        let res = validator.validate(&json!({ "id": "seven" }));
        assert_eq!(res.errors.len(), 1);
        assert!(res.errors[0].message.starts_with("/pets"));
    }

    #[test]
    fn test_param_validator_checks_primitive_constraints() {
        let param: Parameter = serde_json::from_value(json!({
            "name": "limit",
            "in": "query",
            "type": "integer",
            "maximum": 100
        }))
        .unwrap();
        let formats = FormatRegistry::default();
        let validator = ParamValidator::new(&param, &formats);

        assert!(validator.validate(&json!(50)).is_clean());
        assert!(validator.validate(&json!(500)).has_errors());
        assert!(validator.validate(&json!("many")).has_errors());
    }

    #[test]
    fn test_strip_non_schema_keys_recurses_into_items() {
        let mut value = json!({
            "name": "tags",
            "in": "query",
            "type": "array",
            "items": { "type": "string", "default": "x", "collectionFormat": "csv" }
        });
        strip_non_schema_keys(&mut value);
        assert!(value.get("name").is_none());
        assert!(value["items"].get("default").is_none());
        assert_eq!(value["items"]["type"], "string");
    }
}
