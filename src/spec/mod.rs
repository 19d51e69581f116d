//! # Spec Module
//!
//! Swagger 2.0 document model, loading, and reference resolution.
//!
//! ## Overview
//!
//! This module is responsible for:
//! - Loading Swagger 2.0 specifications from YAML/JSON files or strings
//! - Decoding documents into a typed model ([`Swagger`] and friends)
//! - Resolving JSON References (`$ref`) against the root document
//! - Producing fully expanded documents with all references inlined
//!
//! ## Key Types
//!
//! - [`Document`] - A loaded spec: raw bytes, decoded JSON tree, typed model
//! - [`Swagger`] - The typed root object (paths, definitions, parameters, ...)
//! - [`ObjectOrReference`] - An inline object or a `$ref` to one
//! - [`ResolveError`] - Why a reference could not be followed
//!
//! The model is deliberately lenient: anything that decodes stays loadable,
//! and the semantic validator reports what is wrong with it. Only a missing
//! or non-2.0 `swagger` version is rejected at load time.

mod document;
mod load;
pub mod resolve;
mod types;

pub use document::Document;
pub use load::{load_document, parse_document};
pub use resolve::ResolveError;
pub use types::*;
