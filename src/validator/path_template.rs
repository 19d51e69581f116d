//! Templated path analysis.
//!
//! A Swagger path like `/pets/{petId}/photos` is split into segments with the
//! positions of its `{name}` placeholders. The canonical form replaces every
//! placeholder with a fixed sentinel, so two paths that differ only in
//! placeholder names canonicalise identically; that is the overlap test.

/// Sentinel substituted for parameter segments in the canonical form.
const PARAM_SENTINEL: &str = "!";

/// Split a templated path into its segments and the indices of the segments
/// that are `{name}` placeholders. Segment order is preserved for
/// diagnostics.
pub fn parse_path(path: &str) -> (Vec<&str>, Vec<usize>) {
    let mut segments = Vec::new();
    let mut params = Vec::new();
    for (i, segment) in path.split('/').enumerate() {
        segments.push(segment);
        if !segment.is_empty() && segment.starts_with('{') && segment.ends_with('}') {
            params.push(i);
        }
    }
    (segments, params)
}

/// The canonical form of a templated path: every placeholder segment replaced
/// by [`PARAM_SENTINEL`]. Two paths overlap iff their canonical forms are
/// equal.
pub fn canonical_path(path: &str) -> String {
    let (mut segments, params) = parse_path(path);
    for &i in &params {
        segments[i] = PARAM_SENTINEL;
    }
    segments.join("/")
}
