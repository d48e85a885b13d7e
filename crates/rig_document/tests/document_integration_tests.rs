//! Integration tests for document access.

use rig_document::{DocumentReader, DocumentWriter, SchemaValidator};
use serde_json::json;
use tempfile::tempdir;

fn sample() -> serde_json::Value {
    json!({
        "version": 1,
        "appName": "orders",
        "namespace": "shop",
        "replicas": [1, 2, 3],
        "resources": { "cpuMin": "500m", "cpuMax": "1000m", "enabled": true }
    })
}

#[test]
fn test_yaml_write_then_read() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("k8s.yaml");

    DocumentWriter::write(&path, &sample()).unwrap();
    assert_eq!(DocumentReader::read(&path).unwrap(), sample());
}

#[test]
fn test_json_write_then_read() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("out").join("k8s.json");

    DocumentWriter::write(&path, &sample()).unwrap();
    assert_eq!(DocumentReader::read(&path).unwrap(), sample());
}

#[test]
fn test_validate_written_document() {
    let temp = tempdir().unwrap();
    let schema_path = temp.path().join("schema.json");
    let doc_path = temp.path().join("k8s.yml");

    DocumentWriter::write(
        &schema_path,
        &json!({
            "type": "object",
            "required": ["appName", "namespace"],
            "properties": { "version": { "const": 1 } }
        }),
    )
    .unwrap();
    DocumentWriter::write(&doc_path, &sample()).unwrap();

    let document = DocumentReader::read(&doc_path).unwrap();
    let result = SchemaValidator::validate(&document, &schema_path).unwrap();
    assert!(result.valid, "unexpected errors: {}", result.summary());
}
