pub mod cli;
pub mod spec;
pub mod validator;

pub use spec::{load_document, parse_document, Document, ResolveError};
pub use validator::{FormatRegistry, Issue, SpecValidator, ValidationResult};
