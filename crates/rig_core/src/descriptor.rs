//! The `rig.yaml` descriptor written by `install`.
//!
//! ```yaml
//! template: acme/templates/web
//! version: 1.2.0
//! digest: sha256:9f86d0...
//! parameters:
//!   replicas: "2"
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::debug;

use rig_document::{DocumentError, DocumentReader, DocumentWriter};

use crate::error::{RigError, RigResult};
use crate::uri::TemplateUri;

/// Installed template and its parameter values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RigDescriptor {
    pub template: String,
    #[serde(default, deserialize_with = "optional_scalar_string")]
    pub version: Option<String>,
    /// Digest of the template files at install time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
    #[serde(default, deserialize_with = "scalar_strings")]
    pub parameters: BTreeMap<String, String>,
}

impl RigDescriptor {
    pub const FILE_NAME: &'static str = "rig.yaml";
    pub const HIDDEN_FILE_NAME: &'static str = ".rig.yaml";

    pub fn new(uri: &TemplateUri, parameters: BTreeMap<String, String>) -> Self {
        Self {
            template: uri.descriptor_template(),
            version: uri.version.clone(),
            digest: None,
            parameters,
        }
    }

    pub fn with_digest(mut self, digest: impl Into<String>) -> Self {
        self.digest = Some(digest.into());
        self
    }

    /// Find the descriptor in `dir`, preferring `rig.yaml` over `.rig.yaml`.
    pub fn locate(dir: &Path) -> RigResult<PathBuf> {
        [Self::FILE_NAME, Self::HIDDEN_FILE_NAME]
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
            .ok_or_else(|| RigError::DescriptorNotFound(dir.to_path_buf()))
    }

    pub fn load(path: &Path) -> RigResult<Self> {
        debug!("Loading descriptor {:?}", path);
        DocumentReader::read_as(path).map_err(|e| match e {
            DocumentError::NotFound(_) => RigError::DescriptorNotFound(path.to_path_buf()),
            DocumentError::InvalidFormat { message, .. } => RigError::InvalidDescriptor {
                path: path.to_path_buf(),
                message,
            },
            other => RigError::Document(other),
        })
    }

    pub fn save(&self, path: &Path) -> RigResult<()> {
        DocumentWriter::write_as(path, self)?;
        Ok(())
    }

    /// The template reference, including the pinned version.
    ///
    /// An explicit `version` wins over a `#version` suffix on `template`.
    pub fn template_uri(&self) -> RigResult<TemplateUri> {
        let mut uri = TemplateUri::parse(&self.template)?;
        if self.version.is_some() {
            uri.version = self.version.clone();
        }
        Ok(uri)
    }

    /// Stored parameters overlaid with `overrides`.
    pub fn merged_parameters(&self, overrides: &BTreeMap<String, String>) -> BTreeMap<String, String> {
        let mut merged = self.parameters.clone();
        merged.extend(overrides.iter().map(|(k, v)| (k.clone(), v.clone())));
        merged
    }
}

/// Parameter values as render values.
pub fn parameter_values(parameters: &BTreeMap<String, String>) -> Value {
    Value::Object(
        parameters
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect(),
    )
}

/// Parse repeated `-p key=value` arguments.
///
/// Each argument may hold several comma-separated pairs. Later pairs win.
pub fn parse_parameters<S: AsRef<str>>(args: &[S]) -> RigResult<BTreeMap<String, String>> {
    let mut parameters = BTreeMap::new();

    for arg in args {
        for pair in arg.as_ref().split(',').filter(|p| !p.trim().is_empty()) {
            let (key, value) = pair
                .split_once('=')
                .ok_or_else(|| RigError::InvalidParameter(pair.to_string()))?;
            let key = key.trim();
            if key.is_empty() {
                return Err(RigError::InvalidParameter(pair.to_string()));
            }
            parameters.insert(key.to_string(), value.trim().to_string());
        }
    }

    Ok(parameters)
}

fn scalar_string(value: Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    }
}

fn optional_scalar_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Value> = Option::deserialize(deserializer)?;
    Ok(raw.filter(|value| !value.is_null()).map(scalar_string))
}

fn scalar_strings<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<BTreeMap<String, Value>> = Option::deserialize(deserializer)?;

    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(|(key, value)| (key, scalar_string(value)))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_parse_parameters() {
        let args = vec!["replicas=3".to_string(), "host=a.example.com,tier=web".to_string()];
        let parameters = parse_parameters(&args).unwrap();

        assert_eq!(parameters.len(), 3);
        assert_eq!(parameters["replicas"], "3");
        assert_eq!(parameters["tier"], "web");
    }

    #[test]
    fn test_parse_parameters_keeps_equals_in_value() {
        let parameters = parse_parameters(&["query=a=b"]).unwrap();
        assert_eq!(parameters["query"], "a=b");
    }

    #[test]
    fn test_parse_parameters_rejects_bare_word() {
        let err = parse_parameters(&["replicas"]).unwrap_err();
        assert!(matches!(err, RigError::InvalidParameter(p) if p == "replicas"));

        assert!(parse_parameters(&["=3"]).is_err());
    }

    #[test]
    fn test_save_and_load() {
        let temp = tempdir().unwrap();
        let path = temp.path().join(RigDescriptor::FILE_NAME);

        let uri = TemplateUri::parse("acme/templates/web#1.2.0").unwrap();
        let mut parameters = BTreeMap::new();
        parameters.insert("replicas".to_string(), "2".to_string());

        let descriptor = RigDescriptor::new(&uri, parameters);
        descriptor.save(&path).unwrap();

        let loaded = RigDescriptor::load(&path).unwrap();
        assert_eq!(loaded, descriptor);
        assert_eq!(loaded.template_uri().unwrap(), uri);
    }

    #[test]
    fn test_load_accepts_non_string_values() {
        let temp = tempdir().unwrap();
        let path = temp.path().join(RigDescriptor::FILE_NAME);
        fs::write(
            &path,
            "template: acme/templates/web\nparameters:\n  replicas: 3\n  debug: true\n  host:\n",
        )
        .unwrap();

        let loaded = RigDescriptor::load(&path).unwrap();
        assert_eq!(loaded.version, None);
        assert_eq!(loaded.parameters["replicas"], "3");
        assert_eq!(loaded.parameters["debug"], "true");
        assert_eq!(loaded.parameters["host"], "");
    }

    #[test]
    fn test_load_numeric_version() {
        let temp = tempdir().unwrap();
        let path = temp.path().join(RigDescriptor::FILE_NAME);
        fs::write(&path, "template: acme/templates/web\nversion: 2\n").unwrap();

        let loaded = RigDescriptor::load(&path).unwrap();
        assert_eq!(loaded.version.as_deref(), Some("2"));
        assert!(loaded.parameters.is_empty());
    }

    #[test]
    fn test_load_invalid_descriptor() {
        let temp = tempdir().unwrap();
        let path = temp.path().join(RigDescriptor::FILE_NAME);
        fs::write(&path, "parameters: {}\n").unwrap();

        let err = RigDescriptor::load(&path).unwrap_err();
        assert!(matches!(err, RigError::InvalidDescriptor { .. }));
    }

    #[test]
    fn test_locate_prefers_visible_file() {
        let temp = tempdir().unwrap();
        assert!(matches!(
            RigDescriptor::locate(temp.path()),
            Err(RigError::DescriptorNotFound(_))
        ));

        fs::write(temp.path().join(".rig.yaml"), "template: a/b/c\n").unwrap();
        assert_eq!(
            RigDescriptor::locate(temp.path()).unwrap(),
            temp.path().join(".rig.yaml")
        );

        fs::write(temp.path().join("rig.yaml"), "template: a/b/c\n").unwrap();
        assert_eq!(
            RigDescriptor::locate(temp.path()).unwrap(),
            temp.path().join("rig.yaml")
        );
    }

    #[test]
    fn test_merged_parameters() {
        let mut descriptor = RigDescriptor {
            template: "acme/templates/web".to_string(),
            version: None,
            digest: None,
            parameters: BTreeMap::new(),
        };
        descriptor.parameters.insert("replicas".to_string(), "2".to_string());
        descriptor.parameters.insert("host".to_string(), "a".to_string());

        let overrides = parse_parameters(&["host=b"]).unwrap();
        let merged = descriptor.merged_parameters(&overrides);

        assert_eq!(merged["replicas"], "2");
        assert_eq!(merged["host"], "b");
        assert_eq!(parameter_values(&merged)["host"], serde_json::json!("b"));
    }

    #[test]
    fn test_save_writes_null_version() {
        let temp = tempdir().unwrap();
        let path = temp.path().join(RigDescriptor::FILE_NAME);

        let uri = TemplateUri::parse("acme/templates/web").unwrap();
        RigDescriptor::new(&uri, BTreeMap::new()).save(&path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("version: null"));
        assert!(!content.contains("digest"));
        assert_eq!(RigDescriptor::load(&path).unwrap().version, None);
    }

    #[test]
    fn test_digest_round_trips() {
        let temp = tempdir().unwrap();
        let path = temp.path().join(RigDescriptor::FILE_NAME);

        let uri = TemplateUri::parse("acme/templates/web#1.0").unwrap();
        let descriptor = RigDescriptor::new(&uri, BTreeMap::new()).with_digest("sha256:abc");
        descriptor.save(&path).unwrap();

        assert_eq!(RigDescriptor::load(&path).unwrap().digest.as_deref(), Some("sha256:abc"));
    }

    #[test]
    fn test_inline_version_kept_without_version_key() {
        let temp = tempdir().unwrap();
        let path = temp.path().join(RigDescriptor::FILE_NAME);
        fs::write(&path, "template: acme/templates/web#1.0\n").unwrap();

        let uri = RigDescriptor::load(&path).unwrap().template_uri().unwrap();
        assert_eq!(uri.version.as_deref(), Some("1.0"));

        fs::write(&path, "template: acme/templates/web#1.0\nversion: v2\n").unwrap();
        let uri = RigDescriptor::load(&path).unwrap().template_uri().unwrap();
        assert_eq!(uri.version.as_deref(), Some("v2"));
    }
}
