//! The top-level spec validator.
//!
//! Validation runs in fixed phases, each of which assumes the invariants the
//! previous ones established:
//!
//! 1. The decoded document must conform to the Swagger 2.0 meta-schema; a
//!    structurally broken document makes the later walks meaningless.
//! 2. Every `$ref` must resolve; the structural checks and sample validation
//!    cross references freely afterwards.
//! 3. The structural checks all run and their results are merged, so every
//!    independent violation is reported in a single pass.
//! 4. Warning audits run last and never block.

use super::definitions;
use super::formats::FormatRegistry;
use super::operations;
use super::result::ValidationResult;
use super::samples;
use crate::spec::Document;
use jsonschema::{Draft, JSONSchema};
use once_cell::sync::Lazy;
use serde_json::Value;
use tracing::debug;

static SWAGGER_SCHEMA: Lazy<Value> = Lazy::new(|| {
    serde_json::from_str(include_str!("swagger-v2.json"))
        .expect("embedded Swagger 2.0 meta-schema is valid JSON")
});

static META_VALIDATOR: Lazy<JSONSchema> = Lazy::new(|| {
    JSONSchema::options()
        .with_draft(Draft::Draft4)
        .compile(&SWAGGER_SCHEMA)
        .expect("embedded Swagger 2.0 meta-schema compiles")
});

/// Semantic validator for Swagger 2.0 documents.
///
/// Holds no per-document state; one instance can validate any number of
/// documents, concurrently if desired.
///
/// # Example
///
/// ```rust
/// use swagcheck::{parse_document, SpecValidator};
///
/// # fn main() -> anyhow::Result<()> {
/// let doc = parse_document(
///     "swagger: \"2.0\"\ninfo: {title: Petstore, version: \"1.0\"}\npaths: {}\n",
/// )?;
/// let result = SpecValidator::new().validate(&doc);
/// assert!(!result.has_errors());
/// # Ok(())
/// # }
/// ```
pub struct SpecValidator {
    formats: FormatRegistry,
}

impl Default for SpecValidator {
    fn default() -> Self {
        SpecValidator::new()
    }
}

impl SpecValidator {
    /// A validator with the default string-format registry.
    pub fn new() -> Self {
        SpecValidator {
            formats: FormatRegistry::default(),
        }
    }

    /// A validator with a caller-supplied format registry.
    pub fn with_formats(formats: FormatRegistry) -> Self {
        SpecValidator { formats }
    }

    /// Validate a document, returning blocking errors and informational
    /// warnings.
    pub fn validate(&self, doc: &Document) -> ValidationResult {
        let mut res = ValidationResult::new();

        debug!("checking document against the Swagger 2.0 meta-schema");
        res.merge(self.validate_meta_schema(doc));
        if res.has_errors() {
            return res; // no point in continuing
        }

        debug!("expanding references");
        res.merge(self.validate_references(doc));
        if res.has_errors() {
            return res; // no point in continuing
        }

        debug!("running structural checks");
        res.merge(operations::validate_operation_ids(doc));
        res.merge(definitions::validate_duplicate_property_names(doc));
        res.merge(operations::validate_parameters(doc));
        res.merge(operations::validate_items(doc));
        res.merge(definitions::validate_required_definitions(doc));
        res.merge(samples::validate_default_values(doc, &self.formats));
        res.merge(samples::validate_examples(doc, &self.formats));

        res.merge(self.validate_unique_security_scopes(doc));
        res.merge(self.validate_unique_scopes_security_definitions(doc));
        res.merge(self.validate_referenced(doc));

        res
    }

    fn validate_meta_schema(&self, doc: &Document) -> ValidationResult {
        let mut res = ValidationResult::new();
        if let Err(errors) = META_VALIDATOR.validate(doc.json()) {
            for err in errors {
                let pointer = err.instance_path.to_string();
                let message = if pointer.is_empty() {
                    format!("spec is not valid against the Swagger 2.0 schema: {err}")
                } else {
                    format!("spec is not valid against the Swagger 2.0 schema at {pointer}: {err}")
                };
                res.error(422, message);
            }
        }
        res
    }

    /// Every reference must point at an existing node; expansion surfaces the
    /// first dangling one.
    fn validate_references(&self, doc: &Document) -> ValidationResult {
        let mut res = ValidationResult::new();
        if let Err(err) = doc.expanded() {
            res.error(500, err.to_string());
        }
        res
    }

    fn validate_unique_security_scopes(&self, _doc: &Document) -> ValidationResult {
        // Scopes listed by one security requirement should each appear once.
        // The rule set for this audit is not settled; no warnings are emitted
        // yet.
        ValidationResult::new()
    }

    fn validate_unique_scopes_security_definitions(&self, _doc: &Document) -> ValidationResult {
        // Scopes declared by a security definition should each appear once.
        // The rule set for this audit is not settled; no warnings are emitted
        // yet.
        ValidationResult::new()
    }

    fn validate_referenced(&self, _doc: &Document) -> ValidationResult {
        // Declared definitions, parameters, and responses should actually be
        // referenced somewhere. The rule set for this audit is not settled;
        // no warnings are emitted yet.
        ValidationResult::new()
    }
}
