use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Either an inline object or a JSON Reference to one elsewhere in the document.
///
/// Swagger 2.0 allows parameters and responses to be declared once under the
/// top-level `parameters` / `responses` sections and pulled in by `$ref`. The
/// validator crosses references itself so that a failed resolution becomes a
/// diagnostic instead of a parse failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ObjectOrReference<T> {
    /// A `$ref` pointer such as `#/parameters/limitParam`
    Ref {
        #[serde(rename = "$ref")]
        ref_path: String,
    },
    /// The object itself, declared inline
    Object(T),
}

/// Location where a parameter is carried in an HTTP request
///
/// Corresponds to the Swagger 2.0 `in` field for parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParameterLocation {
    /// Path parameter (e.g., `/pets/{petId}`)
    Path,
    /// Query string parameter (e.g., `?limit=10`)
    Query,
    /// HTTP header parameter
    Header,
    /// Request body (carries a full schema instead of a primitive type)
    Body,
    /// Form-encoded body field
    FormData,
}

impl ParameterLocation {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterLocation::Path => "path",
            ParameterLocation::Query => "query",
            ParameterLocation::Header => "header",
            ParameterLocation::Body => "body",
            ParameterLocation::FormData => "formData",
        }
    }
}

impl fmt::Display for ParameterLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The `type` keyword of a schema: a single JSON type or a set of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypeSet {
    One(String),
    Many(Vec<String>),
}

impl TypeSet {
    pub fn contains(&self, name: &str) -> bool {
        match self {
            TypeSet::One(t) => t == name,
            TypeSet::Many(ts) => ts.iter().any(|t| t == name),
        }
    }
}

/// The `items` keyword of a schema: one element schema or an ordered tuple.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SchemaItems {
    One(Box<Schema>),
    Many(Vec<Schema>),
}

impl SchemaItems {
    pub fn len(&self) -> usize {
        match self {
            SchemaItems::One(_) => 1,
            SchemaItems::Many(schemas) => schemas.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All element schemas, in declaration order.
    pub fn schemas(&self) -> Vec<&Schema> {
        match self {
            SchemaItems::One(schema) => vec![schema],
            SchemaItems::Many(schemas) => schemas.iter().collect(),
        }
    }
}

/// `additionalProperties` / `additionalItems`: `false`, `true`, or a schema.
///
/// All three forms must stay distinguishable; the required-property check
/// treats `false` differently from the other two.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SchemaOrBool {
    Bool(bool),
    Schema(Box<Schema>),
}

impl SchemaOrBool {
    /// Whether undeclared members are permitted at all.
    pub fn allows_additional(&self) -> bool {
        match self {
            SchemaOrBool::Bool(allowed) => *allowed,
            SchemaOrBool::Schema(_) => true,
        }
    }

    pub fn schema(&self) -> Option<&Schema> {
        match self {
            SchemaOrBool::Bool(_) => None,
            SchemaOrBool::Schema(schema) => Some(schema),
        }
    }
}

/// A JSON Schema node as embedded in a Swagger 2.0 document.
///
/// Used for body parameters, response bodies, and everything under
/// `definitions`. The node is recursive through `properties`,
/// `patternProperties`, `additionalProperties`, `items`, `additionalItems`,
/// and `allOf`, and may instead (or additionally) carry a `$ref`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    #[serde(rename = "$ref", default, skip_serializing_if = "Option::is_none")]
    pub ref_path: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<TypeSet>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiple_of: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclusive_maximum: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclusive_minimum: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_items: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_items: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unique_items: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_properties: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_properties: Option<u64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
    #[serde(rename = "enum", default, skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<SchemaItems>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_items: Option<Box<SchemaOrBool>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub all_of: Vec<Schema>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, Schema>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub pattern_properties: BTreeMap<String, Schema>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<Box<SchemaOrBool>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discriminator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_only: Option<bool>,
}

impl Schema {
    /// Whether the declared `type` set contains `name`.
    pub fn declares_type(&self, name: &str) -> bool {
        self.schema_type
            .as_ref()
            .map_or(false, |t| t.contains(name))
    }

    /// Whether a non-empty element schema is declared.
    pub fn has_items(&self) -> bool {
        self.items.as_ref().map_or(false, |i| !i.is_empty())
    }
}

/// A primitive array element spec for non-body parameters and headers.
///
/// Unlike [`Schema`], `items` here only nests more `Items`; there are no
/// properties or references at this level.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Items {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub item_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Items>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection_format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclusive_maximum: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclusive_minimum: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_items: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_items: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unique_items: Option<bool>,
    #[serde(rename = "enum", default, skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiple_of: Option<f64>,
}

impl Items {
    pub fn type_name(&self) -> &str {
        self.item_type.as_deref().unwrap_or("")
    }

    /// The declared type of the nested element spec, or `""` when absent.
    pub fn items_type_name(&self) -> &str {
        self.items
            .as_ref()
            .and_then(|i| i.item_type.as_deref())
            .unwrap_or("")
    }
}

/// A single operation parameter.
///
/// Body parameters carry a [`Schema`]; all other locations describe a
/// primitive value directly on the parameter, with nested [`Items`] for
/// arrays.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(rename = "in", default, skip_serializing_if = "Option::is_none")]
    pub location: Option<ParameterLocation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Box<Schema>>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub param_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_empty_value: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Items>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection_format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclusive_maximum: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclusive_minimum: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_items: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_items: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unique_items: Option<bool>,
    #[serde(rename = "enum", default, skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiple_of: Option<f64>,
}

impl Parameter {
    /// The `in` value as written in the document, or `""` when missing.
    pub fn in_str(&self) -> &'static str {
        self.location.map(|l| l.as_str()).unwrap_or("")
    }

    pub fn type_name(&self) -> &str {
        self.param_type.as_deref().unwrap_or("")
    }

    /// The declared type of the element spec, or `""` when absent.
    pub fn items_type_name(&self) -> &str {
        self.items
            .as_ref()
            .and_then(|i| i.item_type.as_deref())
            .unwrap_or("")
    }
}

/// A response header spec: a primitive shape like [`Items`], plus description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Header {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub header_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Items>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection_format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclusive_maximum: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclusive_minimum: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_items: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_items: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unique_items: Option<bool>,
    #[serde(rename = "enum", default, skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiple_of: Option<f64>,
}

impl Header {
    pub fn type_name(&self) -> &str {
        self.header_type.as_deref().unwrap_or("")
    }

    pub fn items_type_name(&self) -> &str {
        self.items
            .as_ref()
            .and_then(|i| i.item_type.as_deref())
            .unwrap_or("")
    }
}

/// A single response: body schema, headers, and per-media-type examples.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Schema>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, Header>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub examples: BTreeMap<String, Value>,
}

/// The `responses` object of an operation: a `default` response plus
/// status-coded ones.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Responses {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<ObjectOrReference<Response>>,
    #[serde(flatten)]
    pub status_codes: BTreeMap<String, ObjectOrReference<Response>>,
}

/// A single operation (one HTTP method on one path).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub consumes: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub produces: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub schemes: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<ObjectOrReference<Parameter>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responses: Option<Responses>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security: Option<Vec<SecurityRequirement>>,
}

/// One templated path with its per-method operations and shared parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathItem {
    #[serde(rename = "$ref", default, skip_serializing_if = "Option::is_none")]
    pub ref_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub get: Option<Operation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub put: Option<Operation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post: Option<Operation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete: Option<Operation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Operation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub head: Option<Operation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patch: Option<Operation>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<ObjectOrReference<Parameter>>,
}

impl PathItem {
    /// All declared operations, in a fixed method order.
    pub fn operations(&self) -> Vec<(http::Method, &Operation)> {
        [
            (http::Method::GET, self.get.as_ref()),
            (http::Method::PUT, self.put.as_ref()),
            (http::Method::POST, self.post.as_ref()),
            (http::Method::DELETE, self.delete.as_ref()),
            (http::Method::OPTIONS, self.options.as_ref()),
            (http::Method::HEAD, self.head.as_ref()),
            (http::Method::PATCH, self.patch.as_ref()),
        ]
        .into_iter()
        .filter_map(|(method, op)| op.map(|op| (method, op)))
        .collect()
    }

    pub fn operation(&self, method: &http::Method) -> Option<&Operation> {
        self.operations()
            .into_iter()
            .find(|(m, _)| m == method)
            .map(|(_, op)| op)
    }
}

/// A security requirement: scheme name to the scopes it demands.
pub type SecurityRequirement = BTreeMap<String, Vec<String>>;

/// A security scheme declared under `securityDefinitions`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityScheme {
    #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
    pub scheme_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "in", default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flow: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authorization_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_url: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub scopes: BTreeMap<String, String>,
}

/// The `info` object. Only the fields the validator cares about are modeled.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Info {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// The root Swagger 2.0 object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Swagger {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub swagger: String,
    #[serde(default)]
    pub info: Info,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_path: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub schemes: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub consumes: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub produces: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub paths: BTreeMap<String, PathItem>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub definitions: BTreeMap<String, Schema>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub parameters: BTreeMap<String, Parameter>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub responses: BTreeMap<String, ObjectOrReference<Response>>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub security_definitions: BTreeMap<String, SecurityScheme>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub security: Vec<SecurityRequirement>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_type_set_single_and_many() {
        let one: TypeSet = serde_json::from_value(json!("array")).unwrap();
        assert!(one.contains("array"));
        assert!(!one.contains("object"));

        let many: TypeSet = serde_json::from_value(json!(["string", "array"])).unwrap();
        assert!(many.contains("array"));
        assert!(many.contains("string"));
    }

    #[test]
    fn test_additional_properties_tri_state() {
        let disallowed: Schema =
            serde_json::from_value(json!({ "additionalProperties": false })).unwrap();
        let allowed: Schema =
            serde_json::from_value(json!({ "additionalProperties": true })).unwrap();
        let schema_form: Schema =
            serde_json::from_value(json!({ "additionalProperties": { "type": "string" } }))
                .unwrap();

        assert!(!disallowed
            .additional_properties
            .unwrap()
            .allows_additional());
        assert!(allowed.additional_properties.unwrap().allows_additional());
        let ap = schema_form.additional_properties.unwrap();
        assert!(ap.allows_additional());
        assert!(ap.schema().is_some());
    }

    #[test]
    fn test_parameter_reference_form() {
        let entry: ObjectOrReference<Parameter> =
            serde_json::from_value(json!({ "$ref": "#/parameters/limitParam" })).unwrap();
        assert!(matches!(entry, ObjectOrReference::Ref { .. }));

        let entry: ObjectOrReference<Parameter> =
            serde_json::from_value(json!({ "name": "limit", "in": "query", "type": "integer" }))
                .unwrap();
        match entry {
            ObjectOrReference::Object(p) => {
                assert_eq!(p.name, "limit");
                assert_eq!(p.location, Some(ParameterLocation::Query));
            }
            ObjectOrReference::Ref { .. } => panic!("expected an inline parameter"),
        }
    }

    #[test]
    fn test_schema_items_tuple_form() {
        let schema: Schema = serde_json::from_value(json!({
            "type": "array",
            "items": [{ "type": "string" }, { "type": "integer" }]
        }))
        .unwrap();
        assert!(schema.has_items());
        assert_eq!(schema.items.unwrap().len(), 2);
    }
}
