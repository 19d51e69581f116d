//! # Validator Module
//!
//! Semantic validation for Swagger 2.0 documents: the cross-cutting checks
//! that a structurally well-formed spec can still fail.
//!
//! ## Checks Performed
//!
//! 1. **Meta-schema conformance** - the document against the Swagger 2.0
//!    JSON Schema
//! 2. **Reference integrity** - every `$ref` resolves to a real node
//! 3. **Duplicate operationIds** - ids must be unique document-wide
//! 4. **Definition ancestry** - no circular `allOf` chains, no property
//!    redeclared along the inheritance spine
//! 5. **Parameters** - unique `(in, name)` per operation, a single body
//!    parameter, path placeholders matching declared path parameters,
//!    method-scoped path overlap
//! 6. **Arrays** - anything typed `array` declares an element type
//! 7. **Required properties** - every `required` name is declarable
//! 8. **Sample values** - embedded `default`s and `example`s validate
//!    against their own schemas
//!
//! Diagnostics are split into blocking **errors** and informational
//! **warnings**, each carrying an HTTP-style code (422 for violations in the
//! document, 500 for internal failures such as unresolvable references).
//!
//! ## Usage
//!
//! ```rust
//! use swagcheck::{parse_document, SpecValidator};
//!
//! # fn main() -> anyhow::Result<()> {
//! let doc = parse_document(
//!     "swagger: \"2.0\"\ninfo: {title: Petstore, version: \"1.0\"}\npaths: {}\n",
//! )?;
//! let result = SpecValidator::new().validate(&doc).sorted();
//! for issue in &result.errors {
//!     eprintln!("{issue}");
//! }
//! # Ok(())
//! # }
//! ```

mod core;
mod definitions;
mod formats;
mod operations;
mod path_template;
mod result;
mod samples;
mod schema;
mod walk;

pub use core::SpecValidator;
pub use formats::{FormatCheck, FormatRegistry};
pub use path_template::{canonical_path, parse_path};
pub use result::{Issue, ValidationResult};
pub use schema::{HeaderValidator, ItemsValidator, ParamValidator, SchemaValidator};
