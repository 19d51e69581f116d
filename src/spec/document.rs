use super::resolve::{self, ResolveError};
use super::types::{ObjectOrReference, Operation, Parameter, Swagger};
use http::Method;
use serde_json::Value;
use std::collections::BTreeMap;

/// A loaded Swagger 2.0 document.
///
/// Owns three views of the same spec: the raw bytes as read from disk, the
/// decoded JSON tree (the ground truth for reference resolution and
/// meta-schema validation), and the typed [`Swagger`] model the validator
/// walks. The document is read-only once constructed.
#[derive(Debug, Clone)]
pub struct Document {
    raw: Vec<u8>,
    json: Value,
    swagger: Swagger,
}

/// Methods a Swagger 2.0 path item can carry, in the order operations are
/// reported.
const METHODS: [Method; 7] = [
    Method::GET,
    Method::PUT,
    Method::POST,
    Method::DELETE,
    Method::OPTIONS,
    Method::HEAD,
    Method::PATCH,
];

impl Document {
    pub(crate) fn from_parts(raw: Vec<u8>, json: Value) -> anyhow::Result<Self> {
        let version = json.get("swagger").and_then(Value::as_str).unwrap_or("");
        if version != "2.0" {
            anyhow::bail!(
                "unsupported document version {version:?}: only Swagger 2.0 documents are supported"
            );
        }
        let swagger: Swagger = serde_json::from_value(json.clone())
            .map_err(|err| anyhow::anyhow!("document does not decode as Swagger 2.0: {err}"))?;
        Ok(Document { raw, json, swagger })
    }

    /// The original bytes the document was loaded from.
    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    /// The typed spec tree.
    pub fn spec(&self) -> &Swagger {
        &self.swagger
    }

    /// The decoded JSON tree, as written in the document.
    pub fn json(&self) -> &Value {
        &self.json
    }

    /// All operations, grouped per HTTP method and keyed by path.
    ///
    /// Methods come out in a fixed order and paths in lexicographic order, so
    /// iteration is deterministic.
    pub fn operations(&self) -> Vec<(Method, BTreeMap<String, &Operation>)> {
        let mut grouped = Vec::new();
        for method in METHODS {
            let mut by_path = BTreeMap::new();
            for (path, item) in &self.swagger.paths {
                if let Some(op) = item.operation(&method) {
                    by_path.insert(path.clone(), op);
                }
            }
            if !by_path.is_empty() {
                grouped.push((method.clone(), by_path));
            }
        }
        grouped
    }

    /// The merged parameter list for one operation: path-level parameters
    /// overlaid by operation-level ones with the same `(in, name)`.
    ///
    /// References are kept as references; callers resolve them so failures
    /// surface as diagnostics. For merging purposes a reference is keyed by
    /// its resolved `(in, name)` when resolvable, and by its pointer string
    /// otherwise.
    pub fn params_for(&self, method: &Method, path: &str) -> Vec<ObjectOrReference<Parameter>> {
        let Some(item) = self.swagger.paths.get(path) else {
            return Vec::new();
        };
        let Some(op) = item.operation(method) else {
            return Vec::new();
        };

        let mut merged: Vec<(String, ObjectOrReference<Parameter>)> = item
            .parameters
            .iter()
            .map(|entry| (self.param_key(entry), entry.clone()))
            .collect();
        for entry in &op.parameters {
            let key = self.param_key(entry);
            if let Some(slot) = merged.iter_mut().find(|(k, _)| *k == key) {
                slot.1 = entry.clone();
            } else {
                merged.push((key, entry.clone()));
            }
        }
        merged.into_iter().map(|(_, entry)| entry).collect()
    }

    fn param_key(&self, entry: &ObjectOrReference<Parameter>) -> String {
        match entry {
            ObjectOrReference::Object(param) => format!("{}:{}", param.in_str(), param.name),
            ObjectOrReference::Ref { ref_path } => {
                match resolve::resolve_parameter(&self.json, ref_path) {
                    Ok(param) => format!("{}:{}", param.in_str(), param.name),
                    Err(_) => format!("$ref:{ref_path}"),
                }
            }
        }
    }

    /// Every `operationId` in the document, one entry per operation.
    ///
    /// Operations without an id contribute an empty string; deduplication
    /// checks skip those.
    pub fn operation_ids(&self) -> Vec<String> {
        let mut ids = Vec::new();
        for item in self.swagger.paths.values() {
            for (_, op) in item.operations() {
                ids.push(op.operation_id.clone().unwrap_or_default());
            }
        }
        ids
    }

    /// A second document with all `$ref`s recursively inlined.
    ///
    /// Self-referential chains are left as references so the expansion stays
    /// finite; a dangling reference is the error case.
    pub fn expanded(&self) -> Result<Document, ResolveError> {
        let json = resolve::expand_refs(&self.json)?;
        let swagger = serde_json::from_value(json.clone()).map_err(|err| ResolveError::Decode {
            message: err.to_string(),
        })?;
        Ok(Document {
            raw: self.raw.clone(),
            json,
            swagger,
        })
    }
}
