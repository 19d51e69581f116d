//! Definition-level checks.
//!
//! A definition composes ancestors through its `allOf` spine. Three things
//! can go wrong there: the spine can loop back on itself, two leaves of the
//! spine can declare the same property name, and a `required` entry can name
//! a property nothing in the definition could ever hold.
//!
//! Pointer strings are the identities in all set bookkeeping; the reference
//! graph is never materialised.

use super::result::ValidationResult;
use crate::spec::resolve;
use crate::spec::{Document, Schema, SchemaOrBool};
use regex::Regex;
use std::borrow::Cow;
use std::collections::BTreeSet;

struct DuplicateProperty {
    name: String,
    definition: String,
}

/// Detect circular `allOf` ancestry and duplicated inherited property names.
///
/// A cyclic definition gets exactly one ancestry error and its property walk
/// is skipped (it would not terminate); the remaining definitions are still
/// checked.
pub(crate) fn validate_duplicate_property_names(doc: &Document) -> ValidationResult {
    let mut res = ValidationResult::new();
    for (name, schema) in &doc.spec().definitions {
        if schema.all_of.is_empty() {
            continue;
        }

        let mut ancestors = BTreeSet::from([format!("#/definitions/{name}")]);
        let cycle = circular_ancestry(doc, name, schema, &mut ancestors, &mut res);
        if !cycle.is_empty() {
            res.error(
                422,
                format!("definition {name:?} has circular ancestry: {cycle:?}"),
            );
            continue;
        }

        let mut knowns = BTreeSet::new();
        let dups = duplicate_property_names(doc, name, schema, &mut knowns, &mut res);
        if !dups.is_empty() {
            let labels: Vec<String> = dups
                .iter()
                .map(|d| format!("{}.{}", d.definition, d.name))
                .collect();
            res.error(
                422,
                format!("definition {name:?} contains duplicate properties: {labels:?}"),
            );
        }
    }
    res
}

/// Walk the `allOf` spine looking for a pointer already seen on the way down.
/// Returns the cyclic pointers, empty when the spine is acyclic.
fn circular_ancestry(
    doc: &Document,
    name: &str,
    schema: &Schema,
    knowns: &mut BTreeSet<String>,
    res: &mut ValidationResult,
) -> Vec<String> {
    let mut schema_name = name.to_string();
    let mut current: Cow<'_, Schema> = Cow::Borrowed(schema);

    if let Some(reference) = schema.ref_path.as_deref().filter(|r| !r.is_empty()) {
        match resolve::resolve_schema(doc.json(), reference) {
            Ok(target) => {
                if !knowns.insert(reference.to_string()) {
                    return vec![reference.to_string()];
                }
                schema_name = reference.to_string();
                current = Cow::Owned(target);
            }
            Err(err) => {
                res.error(500, err.to_string());
                return Vec::new();
            }
        }
    }

    for child in &current.all_of {
        let cycle = circular_ancestry(doc, &schema_name, child, knowns, res);
        if !cycle.is_empty() {
            return cycle;
        }
    }
    Vec::new()
}

/// Gather property names across the leaves of the `allOf` spine; a name seen
/// twice is a duplicate, reported against the schema (or pointer) that
/// redeclared it.
fn duplicate_property_names(
    doc: &Document,
    name: &str,
    schema: &Schema,
    knowns: &mut BTreeSet<String>,
    res: &mut ValidationResult,
) -> Vec<DuplicateProperty> {
    let mut schema_name = name.to_string();
    let mut current: Cow<'_, Schema> = Cow::Borrowed(schema);

    if let Some(reference) = schema.ref_path.as_deref().filter(|r| !r.is_empty()) {
        match resolve::resolve_schema(doc.json(), reference) {
            Ok(target) => {
                schema_name = reference.to_string();
                current = Cow::Owned(target);
            }
            Err(err) => {
                res.error(500, err.to_string());
                return Vec::new();
            }
        }
    }

    if !current.all_of.is_empty() {
        let mut dups = Vec::new();
        for child in &current.all_of {
            dups.extend(duplicate_property_names(doc, &schema_name, child, knowns, res));
        }
        return dups;
    }

    let mut dups = Vec::new();
    for property in current.properties.keys() {
        if !knowns.insert(property.clone()) {
            dups.push(DuplicateProperty {
                name: property.clone(),
                definition: schema_name.clone(),
            });
        }
    }
    dups
}

/// Every name in a definition's `required` must be declarable: present in
/// `properties`, matched by a `patternProperties` regex, or admitted by
/// `additionalProperties`.
pub(crate) fn validate_required_definitions(doc: &Document) -> ValidationResult {
    let mut res = ValidationResult::new();
    for (def_name, schema) in &doc.spec().definitions {
        if schema.required.is_empty() {
            continue;
        }

        // patterns compile once per definition; a malformed one is a
        // diagnostic, not a crash
        let mut patterns = Vec::new();
        for pattern in schema.pattern_properties.keys() {
            match Regex::new(pattern) {
                Ok(re) => patterns.push(re),
                Err(_) => res.error(
                    422,
                    format!(
                        "definition {def_name:?} has an invalid patternProperties regex: {pattern:?}"
                    ),
                ),
            }
        }

        'required: for property in &schema.required {
            if schema.properties.contains_key(property) {
                continue;
            }
            for re in &patterns {
                if re.is_match(property) {
                    continue 'required;
                }
            }
            if let Some(additional) = schema.additional_properties.as_deref() {
                match additional {
                    SchemaOrBool::Bool(true) | SchemaOrBool::Schema(_) => continue,
                    SchemaOrBool::Bool(false) => {}
                }
            }
            res.error(
                422,
                format!(
                    "{property:?} is present in required but not defined as property in definition {def_name:?}"
                ),
            );
        }
    }
    res
}
