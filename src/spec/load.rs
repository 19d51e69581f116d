use super::document::Document;
use anyhow::Context;
use std::path::Path;
use tracing::debug;

/// Load a Swagger 2.0 document from a file.
///
/// Supports both YAML and JSON, dispatching on the file extension. The
/// document is decoded into a JSON tree and the typed model; structural
/// problems beyond basic decoding are the validator's job, not the loader's.
///
/// # Errors
///
/// Returns an error if the file cannot be read, does not parse as YAML/JSON,
/// or is not a Swagger 2.0 document (`swagger: "2.0"`).
pub fn load_document(path: &Path) -> anyhow::Result<Document> {
    debug!(path = %path.display(), "loading swagger document");
    let raw = std::fs::read(path)
        .with_context(|| format!("failed to read spec file {}", path.display()))?;
    let is_yaml = path
        .extension()
        .map(|ext| ext == "yaml" || ext == "yml")
        .unwrap_or(false);
    let json: serde_json::Value = if is_yaml {
        serde_yaml::from_slice(&raw)
            .with_context(|| format!("{} is not valid YAML", path.display()))?
    } else {
        serde_json::from_slice(&raw)
            .with_context(|| format!("{} is not valid JSON", path.display()))?
    };
    Document::from_parts(raw, json)
}

/// Parse a Swagger 2.0 document from an in-memory string.
///
/// JSON input is detected by its leading `{`; everything else is parsed as
/// YAML (of which JSON is a subset anyway).
pub fn parse_document(content: &str) -> anyhow::Result<Document> {
    let json: serde_json::Value = if content.trim_start().starts_with('{') {
        serde_json::from_str(content).context("document is not valid JSON")?
    } else {
        serde_yaml::from_str(content).context("document is not valid YAML")?
    };
    Document::from_parts(content.as_bytes().to_vec(), json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rejects_openapi_3() {
        let err = parse_document("openapi: 3.0.0\ninfo: {title: T, version: '1'}\npaths: {}\n")
            .unwrap_err();
        assert!(err.to_string().contains("Swagger 2.0"));
    }

    #[test]
    fn test_parse_accepts_json_and_yaml() {
        let yaml = "swagger: \"2.0\"\ninfo: {title: T, version: '1'}\npaths: {}\n";
        let doc = parse_document(yaml).unwrap();
        assert_eq!(doc.spec().info.title, "T");

        let json = r#"{ "swagger": "2.0", "info": { "title": "T", "version": "1" }, "paths": {} }"#;
        let doc = parse_document(json).unwrap();
        assert_eq!(doc.spec().swagger, "2.0");
    }
}
