use std::fmt;

/// A single diagnostic produced by validation.
///
/// `code` follows an HTTP-style convention: 422 for semantic violations in
/// the document, 500 for internal failures (unresolvable references,
/// uncompilable schemas).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Issue {
    pub code: u16,
    pub message: String,
}

impl Issue {
    pub fn new(code: u16, message: impl Into<String>) -> Self {
        Issue {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

/// The outcome of a validation pass: blocking errors and informational
/// warnings, in the order they were found.
///
/// Results compose with [`merge`](ValidationResult::merge), which is
/// associative, so phases can build sub-results independently and
/// concatenate them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    pub errors: Vec<Issue>,
    pub warnings: Vec<Issue>,
}

impl ValidationResult {
    pub fn new() -> Self {
        ValidationResult::default()
    }

    pub fn error(&mut self, code: u16, message: impl Into<String>) {
        self.errors.push(Issue::new(code, message));
    }

    pub fn warning(&mut self, code: u16, message: impl Into<String>) {
        self.warnings.push(Issue::new(code, message));
    }

    /// Append all of `other`'s diagnostics to this result.
    pub fn merge(&mut self, other: ValidationResult) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }

    /// This result with both sequences sorted, for stable presentation.
    ///
    /// Within one run the diagnostic *set* is deterministic but the order
    /// reflects traversal; sort before diffing or displaying.
    pub fn sorted(mut self) -> Self {
        self.errors.sort();
        self.warnings.sort();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_concatenates_both_sides() {
        let mut left = ValidationResult::new();
        left.error(422, "first");
        left.warning(422, "hint");
        let mut right = ValidationResult::new();
        right.error(500, "second");

        left.merge(right);
        assert_eq!(left.errors.len(), 2);
        assert_eq!(left.warnings.len(), 1);
        assert_eq!(left.errors[0].message, "first");
        assert_eq!(left.errors[1].code, 500);
    }

    #[test]
    fn test_has_errors_ignores_warnings() {
        let mut res = ValidationResult::new();
        assert!(!res.has_errors());
        res.warning(422, "just a hint");
        assert!(!res.has_errors());
        assert!(!res.is_clean());
        res.error(422, "broken");
        assert!(res.has_errors());
    }

    #[test]
    fn test_sorted_orders_by_code_then_message() {
        let mut res = ValidationResult::new();
        res.error(500, "zzz");
        res.error(422, "aaa");
        let sorted = res.sorted();
        assert_eq!(sorted.errors[0].code, 422);
        assert_eq!(sorted.errors[1].code, 500);
    }
}
