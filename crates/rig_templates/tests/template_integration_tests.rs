//! Integration tests for the template system.

use std::fs;
use std::path::{Path, PathBuf};

use rig_document::{DocumentReader, SchemaValidator};
use rig_templates::{TemplateRenderer, TemplateTypeResolver, TEMPLATE_TYPES};
use serde_json::json;
use tempfile::tempdir;

fn templates_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../templates")
}

fn k8s_values() -> serde_json::Value {
    json!({
        "version": 1,
        "repoName": "shop/orders",
        "appName": "orders",
        "namespace": "shop",
        "servicePort": 8080,
        "readinessPath": "/ready"
    })
}

#[test]
fn test_registered_templates_exist_on_disk() {
    let root = templates_path();

    for config in TEMPLATE_TYPES {
        assert!(root.join(config.schema_path).is_file(), "missing schema for {}", config.code);
        for variant in config.variants {
            assert!(root.join(variant.dir).is_dir(), "missing variant dir {}", variant.dir);
        }
        if let Some(template) = config.stdout_template {
            assert!(root.join(template).is_file(), "missing stdout template {}", template);
        }
    }
}

#[test]
fn test_schemas_compile() {
    let resolver = TemplateTypeResolver::new(templates_path());

    for config in TEMPLATE_TYPES {
        let schema = resolver.schema_for(Path::new(config.file_names[0])).unwrap();
        SchemaValidator::validate(&json!({}), &schema).unwrap();
    }
}

#[test]
fn test_k8s_sample_is_valid() {
    let resolver = TemplateTypeResolver::new(templates_path());
    let schema = resolver.schema_for(Path::new("k8s.yaml")).unwrap();

    let result = SchemaValidator::validate(&k8s_values(), &schema).unwrap();
    assert!(result.valid, "{}", result.summary());
}

#[tokio::test]
async fn test_render_kustomize_variant() {
    let resolver = TemplateTypeResolver::new(templates_path());
    let resolved = resolver.resolve(Path::new("k8s.yaml"), None).unwrap();

    let temp = tempdir().unwrap();
    let output = temp.path().join("manifests");
    let written = TemplateRenderer::new()
        .render_dir(&k8s_values(), &resolved.template_dir, &output)
        .await
        .unwrap();

    assert!(written.contains(&output.join("base").join("deployment.yaml")));
    assert!(written.contains(&output.join("overlays").join("prod").join("kustomization.yaml")));

    let deployment: serde_json::Value =
        DocumentReader::read(output.join("base").join("deployment.yaml")).unwrap();
    assert_eq!(deployment["metadata"]["name"], json!("orders"));
    assert_eq!(
        deployment["spec"]["template"]["spec"]["containers"][0]["ports"][0]["containerPort"],
        json!(8080)
    );
}

#[tokio::test]
async fn test_render_jenkinsfile() {
    let resolver = TemplateTypeResolver::new(templates_path());
    let resolved = resolver.resolve(Path::new("build.yaml"), None).unwrap();

    let values = json!({
        "version": 1,
        "name": "orders",
        "agent": "rust:1.75",
        "stages": [
            { "name": "Build", "steps": ["cargo build --release"] },
            { "name": "Test", "steps": ["cargo test"] }
        ]
    });

    let temp = tempdir().unwrap();
    TemplateRenderer::new()
        .render_dir(&values, &resolved.template_dir, temp.path())
        .await
        .unwrap();

    let jenkinsfile = fs::read_to_string(temp.path().join("Jenkinsfile")).unwrap();
    assert!(jenkinsfile.contains("image 'rust:1.75'"));
    assert!(jenkinsfile.contains("stage('Build')"));
    assert!(jenkinsfile.contains("sh 'cargo test'"));
    assert!(!jenkinsfile.contains("post {"));
}

#[tokio::test]
async fn test_render_preserves_layout_and_substitutes() {
    let temp = tempdir().unwrap();
    let templates = temp.path().join("tpl");
    fs::create_dir_all(templates.join("sub")).unwrap();
    fs::write(templates.join("a.txt"), "hello {{name}}").unwrap();
    fs::write(templates.join("sub").join("b.txt"), "port={{port}}").unwrap();

    let output = temp.path().join("out");
    let written = TemplateRenderer::new()
        .render_dir(&json!({"name": "rig", "port": 80}), &templates, &output)
        .await
        .unwrap();

    assert_eq!(written, vec![output.join("a.txt"), output.join("sub").join("b.txt")]);
    assert_eq!(fs::read_to_string(output.join("a.txt")).unwrap(), "hello rig");
    assert_eq!(fs::read_to_string(output.join("sub").join("b.txt")).unwrap(), "port=80");
}

#[tokio::test]
async fn test_render_twice_is_identical() {
    let resolver = TemplateTypeResolver::new(templates_path());
    let resolved = resolver.resolve(Path::new("k8s.yaml"), Some("gotemplates")).unwrap();
    let renderer = TemplateRenderer::new();

    let temp = tempdir().unwrap();
    let first = renderer
        .render_dir(&k8s_values(), &resolved.template_dir, temp.path())
        .await
        .unwrap();
    let snapshot: Vec<Vec<u8>> = first.iter().map(|p| fs::read(p).unwrap()).collect();

    let second = renderer
        .render_dir(&k8s_values(), &resolved.template_dir, temp.path())
        .await
        .unwrap();
    let again: Vec<Vec<u8>> = second.iter().map(|p| fs::read(p).unwrap()).collect();

    assert_eq!(first, second);
    assert_eq!(snapshot, again);
}
