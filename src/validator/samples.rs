//! Embedded sample-value validation.
//!
//! Every `default` and `example` baked into a spec must itself validate
//! against the schema it annotates: simple parameter defaults, nested
//! `items` chains, response header defaults, `application/json` response
//! examples, and everything reachable inside body and definition schemas.
//! One bad sample never stops the rest from being checked.

use super::formats::FormatRegistry;
use super::operations::{collect_responses, try_parameter};
use super::result::ValidationResult;
use super::schema::{HeaderValidator, ItemsValidator, ParamValidator, SchemaValidator};
use super::walk;
use crate::spec::resolve;
use crate::spec::{Document, Items, ObjectOrReference, Response, Schema};

/// Validate every embedded `default` (and schema-level `example`) value.
pub(crate) fn validate_default_values(doc: &Document, formats: &FormatRegistry) -> ValidationResult {
    let mut res = ValidationResult::new();
    for (method, by_path) in doc.operations() {
        for (path, op) in by_path {
            for entry in doc.params_for(&method, &path) {
                // unresolvable parameters were reported by the parameter checks
                let Some(param) = try_parameter(doc, &entry) else {
                    continue;
                };
                if let (Some(default), None) = (&param.default, &param.schema) {
                    res.merge(ParamValidator::new(&param, formats).validate(default));
                }
                if let Some(items) = param.items.as_deref() {
                    res.merge(validate_items_defaults(
                        &param.name,
                        param.in_str(),
                        items,
                        formats,
                    ));
                }
                if let Some(schema) = param.schema.as_deref() {
                    res.merge(validate_schema_samples(doc, &param.name, schema, formats));
                }
            }

            for response in collect_responses(doc, op) {
                for (name, header) in &response.headers {
                    if let Some(default) = &header.default {
                        res.merge(HeaderValidator::new(name, header, formats).validate(default));
                    }
                    if let Some(items) = header.items.as_deref() {
                        res.merge(validate_items_defaults(name, "header", items, formats));
                    }
                }
            }
        }
    }

    for (name, schema) in &doc.spec().definitions {
        res.merge(validate_schema_samples(
            doc,
            &format!("definitions.{name}"),
            schema,
            formats,
        ));
    }
    res
}

/// Validate `default`s down a primitive `items` chain.
fn validate_items_defaults(
    label: &str,
    location: &str,
    items: &Items,
    formats: &FormatRegistry,
) -> ValidationResult {
    let mut res = ValidationResult::new();
    if let Some(default) = &items.default {
        res.merge(ItemsValidator::new(label, location, items, formats).validate(default));
    }
    if let Some(inner) = items.items.as_deref() {
        res.merge(validate_items_defaults(
            &format!("{label}[0]"),
            location,
            inner,
            formats,
        ));
    }
    res
}

/// Validate `default` and `example` on a schema and on every inline
/// sub-schema beneath it.
///
/// The recursion stays inside the carrier: referenced definitions are
/// validated once from the top-level definitions loop, so crossing `$ref`s
/// here would only duplicate their diagnostics.
fn validate_schema_samples(
    doc: &Document,
    path: &str,
    schema: &Schema,
    formats: &FormatRegistry,
) -> ValidationResult {
    let mut res = ValidationResult::new();
    if let Some(default) = &schema.default {
        res.merge(SchemaValidator::new(schema, doc, path, formats).validate(default));
    }
    if let Some(example) = &schema.example {
        res.merge(SchemaValidator::new(schema, doc, path, formats).validate(example));
    }
    for (suffix, child) in walk::subschemas(schema) {
        res.merge(validate_schema_samples(
            doc,
            &format!("{path}{suffix}"),
            child,
            formats,
        ));
    }
    res
}

/// Validate response `examples` against their response schemas.
///
/// Only `application/json` examples are checked.
pub(crate) fn validate_examples(doc: &Document, formats: &FormatRegistry) -> ValidationResult {
    let mut res = ValidationResult::new();
    for (_method, by_path) in doc.operations() {
        for (path, op) in by_path {
            let Some(responses) = &op.responses else {
                continue;
            };
            if let Some(entry) = &responses.default {
                res.merge(validate_response_example(doc, &path, entry, formats));
            }
            for entry in responses.status_codes.values() {
                res.merge(validate_response_example(doc, &path, entry, formats));
            }
        }
    }
    res
}

fn validate_response_example(
    doc: &Document,
    path: &str,
    entry: &ObjectOrReference<Response>,
    formats: &FormatRegistry,
) -> ValidationResult {
    let mut res = ValidationResult::new();
    let response = match entry {
        ObjectOrReference::Object(response) => response.clone(),
        ObjectOrReference::Ref { ref_path } => {
            match resolve::resolve_response(doc.json(), ref_path) {
                Ok(response) => response,
                Err(err) => {
                    res.error(500, err.to_string());
                    return res;
                }
            }
        }
    };

    if let Some(schema) = &response.schema {
        if let Some(example) = response.examples.get("application/json") {
            res.merge(SchemaValidator::new(schema, doc, path, formats).validate(example));
        }
        // TODO: validate examples for other media types
    }
    res
}
