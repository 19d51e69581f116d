use http::Method;
use std::io::Write;
use swagcheck::spec::{load_document, parse_document, ObjectOrReference, ResolveError};
use tempfile::NamedTempFile;

const YAML_SPEC: &str = r##"swagger: "2.0"
info:
  title: Test API
  version: "1.0.0"
paths:
  /items/{itemId}:
    parameters:
      - name: itemId
        in: path
        required: true
        type: string
      - name: limit
        in: query
        type: integer
    get:
      operationId: getItem
      parameters:
        - name: limit
          in: query
          type: integer
          maximum: 50
      responses:
        "200":
          description: OK
          schema:
            $ref: "#/definitions/Item"
  /items:
    post:
      parameters:
        - $ref: "#/parameters/verbose"
      responses:
        "201":
          description: created
parameters:
  verbose:
    name: verbose
    in: query
    type: boolean
definitions:
  Item:
    type: object
    properties:
      id: {type: string}
"##;

fn write_temp(content: &str, suffix: &str) -> NamedTempFile {
    let mut temp = NamedTempFile::with_suffix(suffix).expect("create temp file");
    temp.write_all(content.as_bytes()).expect("write spec");
    temp.flush().expect("flush");
    temp
}

#[test]
fn test_load_document_yaml_and_json() {
    let yaml_file = write_temp(YAML_SPEC, ".yaml");
    let doc_yaml = load_document(yaml_file.path()).expect("load yaml");

    let json_value: serde_json::Value = serde_yaml::from_str(YAML_SPEC).unwrap();
    let json_file = write_temp(&serde_json::to_string(&json_value).unwrap(), ".json");
    let doc_json = load_document(json_file.path()).expect("load json");

    assert_eq!(doc_yaml.spec().info.title, "Test API");
    assert_eq!(doc_yaml.spec(), doc_json.spec());
    assert!(!doc_yaml.raw().is_empty());
}

#[test]
fn test_operations_grouped_by_method_and_path() {
    let doc = parse_document(YAML_SPEC).unwrap();
    let operations = doc.operations();

    let (get_method, by_path) = &operations[0];
    assert_eq!(*get_method, Method::GET);
    assert!(by_path.contains_key("/items/{itemId}"));
    assert_eq!(
        by_path["/items/{itemId}"].operation_id.as_deref(),
        Some("getItem")
    );

    let post = operations
        .iter()
        .find(|(method, _)| *method == Method::POST)
        .expect("post group");
    assert!(post.1.contains_key("/items"));
}

#[test]
fn test_params_for_overlays_operation_level_on_path_level() {
    let doc = parse_document(YAML_SPEC).unwrap();
    let params = doc.params_for(&Method::GET, "/items/{itemId}");
    assert_eq!(params.len(), 2, "got {params:?}");

    let mut resolved = Vec::new();
    for entry in &params {
        match entry {
            ObjectOrReference::Object(p) => resolved.push(p.clone()),
            ObjectOrReference::Ref { ref_path } => panic!("unexpected ref {ref_path}"),
        }
    }
    assert_eq!(resolved[0].name, "itemId");
    // the operation's limit wins over the path-level one
    assert_eq!(resolved[1].name, "limit");
    assert_eq!(resolved[1].maximum, Some(50.0));
}

#[test]
fn test_params_for_keeps_referenced_entries() {
    let doc = parse_document(YAML_SPEC).unwrap();
    let params = doc.params_for(&Method::POST, "/items");
    assert_eq!(params.len(), 1);
    assert!(matches!(
        params[0],
        ObjectOrReference::Ref { ref ref_path } if ref_path == "#/parameters/verbose"
    ));
}

#[test]
fn test_operation_ids_include_missing_ones_as_empty() {
    let doc = parse_document(YAML_SPEC).unwrap();
    let ids = doc.operation_ids();
    assert_eq!(ids.len(), 2);
    assert!(ids.contains(&"getItem".to_string()));
    assert!(ids.contains(&String::new()));
}

#[test]
fn test_expanded_inlines_references() {
    let doc = parse_document(YAML_SPEC).unwrap();
    let expanded = doc.expanded().expect("expansion succeeds");

    let schema = expanded
        .json()
        .pointer("/paths/~1items~1{itemId}/get/responses/200/schema")
        .expect("schema node");
    assert!(schema.get("$ref").is_none());
    assert_eq!(schema["type"], "object");

    // the original document is untouched
    let original = doc
        .json()
        .pointer("/paths/~1items~1{itemId}/get/responses/200/schema")
        .expect("schema node");
    assert_eq!(original["$ref"], "#/definitions/Item");
}

#[test]
fn test_expanded_reports_dangling_reference() {
    let doc = parse_document(
        r##"swagger: "2.0"
info: {title: T, version: "1"}
paths:
  /x:
    get:
      responses:
        "200":
          description: OK
          schema: {$ref: "#/definitions/Nope"}
"##,
    )
    .unwrap();
    match doc.expanded() {
        Err(ResolveError::NotFound { pointer }) => assert_eq!(pointer, "#/definitions/Nope"),
        other => panic!("expected a not-found error, got {other:?}"),
    }
}

#[test]
fn test_load_document_rejects_missing_version() {
    let file = write_temp("{\"info\": {\"title\": \"T\"}}", ".json");
    let err = load_document(file.path()).unwrap_err();
    assert!(err.to_string().contains("Swagger 2.0"));
}
