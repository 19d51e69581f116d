//! Per-operation structural checks.
//!
//! Covers the checks that cut across a single operation and its path: unique
//! `operationId`s document-wide, unique `(in, name)` parameter pairs, at most
//! one body parameter, agreement between path template placeholders and
//! declared path parameters, method-scoped path overlap, and arrays declared
//! without an element type.

use super::path_template::{canonical_path, parse_path};
use super::result::ValidationResult;
use super::walk;
use crate::spec::{
    Document, ObjectOrReference, Parameter, ParameterLocation, Response, Schema,
};
use crate::spec::resolve;
use std::collections::{BTreeMap, BTreeSet};

/// Report every non-empty `operationId` that appears more than once.
pub(crate) fn validate_operation_ids(doc: &Document) -> ValidationResult {
    let mut res = ValidationResult::new();
    let mut known: BTreeMap<String, usize> = BTreeMap::new();
    for id in doc.operation_ids() {
        if !id.is_empty() {
            *known.entry(id).or_default() += 1;
        }
    }
    for (id, count) in known {
        if count > 1 {
            res.error(422, format!("{id:?} is defined {count} times"));
        }
    }
    res
}

/// Parameter-level checks for every operation:
/// unique `(in, name)`, a single body parameter, path template agreement, and
/// method-scoped path overlap.
pub(crate) fn validate_parameters(doc: &Document) -> ValidationResult {
    let mut res = ValidationResult::new();
    for (method, by_path) in doc.operations() {
        let mut known_paths: BTreeMap<String, String> = BTreeMap::new();
        for (path, op) in by_path {
            let op_id = op.operation_id.clone().unwrap_or_default();

            // two templates that differ only in placeholder names are the
            // same path for this method
            let canonical = canonical_path(&path);
            if let Some(original) = known_paths.get(&canonical) {
                res.error(422, format!("path {path} overlaps with {original}"));
            } else {
                known_paths.insert(canonical, path.clone());
            }

            // (in, name) must be unique across the operation's own parameters
            let mut names_by_location: BTreeMap<&'static str, BTreeSet<String>> = BTreeMap::new();
            for entry in &op.parameters {
                let Some(param) = resolved_parameter(doc, entry, &mut res) else {
                    continue;
                };
                let names = names_by_location.entry(param.in_str()).or_default();
                if !names.insert(param.name.clone()) {
                    res.error(
                        422,
                        format!(
                            "duplicate parameter name {:?} for {:?} in operation {:?}",
                            param.name,
                            param.in_str(),
                            op_id
                        ),
                    );
                }
            }

            // the merged list (path-level defaults included) drives the body
            // count and the declared path parameter set
            let mut first_body: Option<String> = None;
            let mut from_operation: Vec<String> = Vec::new();
            for entry in doc.params_for(&method, &path) {
                let Some(param) = resolved_parameter(doc, &entry, &mut res) else {
                    continue;
                };
                match param.location {
                    Some(ParameterLocation::Body) => {
                        if let Some(first) = &first_body {
                            res.error(
                                422,
                                format!(
                                    "operation {:?} has more than 1 body param (accepted: {:?}, dropped: {:?})",
                                    op_id, first, param.name
                                ),
                            );
                        } else {
                            first_body = Some(param.name.clone());
                        }
                    }
                    Some(ParameterLocation::Path) => from_operation.push(param.name.clone()),
                    _ => {}
                }
            }

            let (segments, indices) = parse_path(&path);
            let from_path: Vec<&str> = indices.iter().map(|&i| segments[i]).collect();
            res.merge(validate_path_param_presence(
                &path,
                &from_path,
                &from_operation,
            ));
        }
    }
    res
}

/// Every `{placeholder}` must have a matching path parameter and every path
/// parameter must appear as a placeholder.
fn validate_path_param_presence(
    path: &str,
    from_path: &[&str],
    from_operation: &[String],
) -> ValidationResult {
    let mut res = ValidationResult::new();
    for placeholder in from_path {
        let matched = from_operation
            .iter()
            .any(|name| *placeholder == format!("{{{name}}}"));
        if !matched {
            res.error(
                422,
                format!("path param {placeholder:?} has no parameter definition"),
            );
        }
    }
    for name in from_operation {
        let matched = from_path.iter().any(|seg| *seg == format!("{{{name}}}"));
        if !matched {
            res.error(
                422,
                format!("path param {name:?} is not present in path {path:?}"),
            );
        }
    }
    res
}

/// Anything declared as an array must declare an element type: parameters
/// (primitive chains and body schemas), response headers, and response body
/// schemas.
pub(crate) fn validate_items(doc: &Document) -> ValidationResult {
    let mut res = ValidationResult::new();
    for (method, by_path) in doc.operations() {
        for (path, op) in by_path {
            let op_id = op.operation_id.clone().unwrap_or_default();

            for entry in doc.params_for(&method, &path) {
                // resolution failures were already reported by the parameter
                // checks; this pass only looks at what resolves
                let Some(param) = try_parameter(doc, &entry) else {
                    continue;
                };
                if param.type_name() == "array" && param.items_type_name().is_empty() {
                    res.error(
                        422,
                        format!(
                            "param {:?} for {:?} is a collection without an element type",
                            param.name, op_id
                        ),
                    );
                    continue;
                }
                if param.location != Some(ParameterLocation::Body) {
                    let mut items = param.items.as_deref();
                    while let Some(current) = items {
                        if current.type_name() != "array" {
                            break;
                        }
                        if current.items_type_name().is_empty() {
                            res.error(
                                422,
                                format!(
                                    "param {:?} for {:?} is a collection without an element type",
                                    param.name, op_id
                                ),
                            );
                            break;
                        }
                        items = current.items.as_deref();
                    }
                } else if let Some(schema) = &param.schema {
                    let label = format!("body param {:?}", param.name);
                    check_schema_items(doc, &label, &op_id, schema, &mut BTreeSet::new(), &mut res);
                }
            }

            for response in collect_responses(doc, op) {
                for (name, header) in &response.headers {
                    if header.type_name() == "array" && header.items_type_name().is_empty() {
                        res.error(
                            422,
                            format!(
                                "header {:?} for {:?} is a collection without an element type",
                                name, op_id
                            ),
                        );
                    }
                }
                if let Some(schema) = &response.schema {
                    check_schema_items(
                        doc,
                        "response body",
                        &op_id,
                        schema,
                        &mut BTreeSet::new(),
                        &mut res,
                    );
                }
            }
        }
    }
    res
}

/// Walk the full schema graph under one carrier, reporting one diagnostic per
/// array chain that never reaches an element type. Reference cycles are
/// short-circuited through `visited`.
fn check_schema_items(
    doc: &Document,
    label: &str,
    op_id: &str,
    schema: &Schema,
    visited: &mut BTreeSet<String>,
    res: &mut ValidationResult,
) {
    if let Some(reference) = schema.ref_path.as_deref() {
        if !reference.is_empty() {
            if !visited.insert(reference.to_string()) {
                return;
            }
            match resolve::resolve_schema(doc.json(), reference) {
                Ok(target) => check_schema_items(doc, label, op_id, &target, visited, res),
                Err(err) => res.error(500, err.to_string()),
            }
            return;
        }
    }
    if schema.declares_type("array") && !schema.has_items() {
        res.error(
            422,
            format!("{label} for {op_id:?} is a collection without an element type"),
        );
        return;
    }
    for (_, child) in walk::subschemas(schema) {
        check_schema_items(doc, label, op_id, child, visited, res);
    }
}

/// Resolve a parameter entry, reporting a resolution failure as a 500 issue.
fn resolved_parameter(
    doc: &Document,
    entry: &ObjectOrReference<Parameter>,
    res: &mut ValidationResult,
) -> Option<Parameter> {
    match entry {
        ObjectOrReference::Object(param) => Some(param.clone()),
        ObjectOrReference::Ref { ref_path } => {
            match resolve::resolve_parameter(doc.json(), ref_path) {
                Ok(param) => Some(param),
                Err(err) => {
                    res.error(500, err.to_string());
                    None
                }
            }
        }
    }
}

/// Resolve a parameter entry, silently skipping failures.
pub(crate) fn try_parameter(
    doc: &Document,
    entry: &ObjectOrReference<Parameter>,
) -> Option<Parameter> {
    match entry {
        ObjectOrReference::Object(param) => Some(param.clone()),
        ObjectOrReference::Ref { ref_path } => resolve::resolve_parameter(doc.json(), ref_path).ok(),
    }
}

/// All reachable responses of an operation (`default` first, then status
/// codes), with references resolved best-effort. Unresolvable responses are
/// skipped here; the example validator reports them.
pub(crate) fn collect_responses(doc: &Document, op: &crate::spec::Operation) -> Vec<Response> {
    let mut responses = Vec::new();
    if let Some(declared) = &op.responses {
        if let Some(entry) = &declared.default {
            if let Some(response) = try_response(doc, entry) {
                responses.push(response);
            }
        }
        for entry in declared.status_codes.values() {
            if let Some(response) = try_response(doc, entry) {
                responses.push(response);
            }
        }
    }
    responses
}

fn try_response(doc: &Document, entry: &ObjectOrReference<Response>) -> Option<Response> {
    match entry {
        ObjectOrReference::Object(response) => Some(response.clone()),
        ObjectOrReference::Ref { ref_path } => resolve::resolve_response(doc.json(), ref_path).ok(),
    }
}
