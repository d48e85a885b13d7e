//! Remote template parameter manifests.
//!
//! A remote template declares its configurable inputs in a `parameters.yaml`
//! next to its `templates/` directory:
//!
//! ```yaml
//! replicas:
//!   default: 2
//!   description: Number of pods
//! host:
//!   description: Public host name
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use rig_document::DocumentReader;

use crate::error::{TemplateError, TemplateResult};

/// Declaration of a single template parameter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParameterSpec {
    /// Default value stored at install time
    #[serde(default)]
    pub default: Option<Value>,
    /// Human-readable description
    #[serde(default)]
    pub description: Option<String>,
    /// Any further keys the template author declared
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl ParameterSpec {
    /// The default as a string; missing or null defaults are empty.
    pub fn default_string(&self) -> String {
        match &self.default {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }
}

/// Parameters declared by a remote template.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemplateManifest {
    pub parameters: BTreeMap<String, ParameterSpec>,
}

impl TemplateManifest {
    pub const FILE_NAME: &'static str = "parameters.yaml";

    /// Load the manifest of a template directory.
    ///
    /// A template without `parameters.yaml` has no parameters.
    pub fn load(template_dir: &Path) -> TemplateResult<Self> {
        let path = template_dir.join(Self::FILE_NAME);

        if !path.exists() {
            debug!("No {} in {:?}", Self::FILE_NAME, template_dir);
            return Ok(Self::default());
        }

        let value = DocumentReader::read(&path)?;
        Self::from_value(value).map_err(|message| TemplateError::InvalidManifest {
            template: template_dir.display().to_string(),
            message,
        })
    }

    /// Build a manifest from a decoded `parameters.yaml` document.
    pub fn from_value(value: Value) -> Result<Self, String> {
        if value.is_null() {
            return Ok(Self::default());
        }

        let parameters: BTreeMap<String, ParameterSpec> =
            serde_json::from_value(value).map_err(|e| e.to_string())?;

        Ok(Self { parameters })
    }

    /// Parameter defaults keyed by name.
    pub fn defaults(&self) -> BTreeMap<String, String> {
        self.parameters
            .iter()
            .map(|(name, spec)| (name.clone(), spec.default_string()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let manifest = TemplateManifest::from_value(json!({
            "replicas": { "default": 2, "description": "Pods" },
            "host": { "description": "Public host" },
            "image": { "default": "nginx", "required": true }
        }))
        .unwrap();

        let defaults = manifest.defaults();
        assert_eq!(defaults["replicas"], "2");
        assert_eq!(defaults["host"], "");
        assert_eq!(defaults["image"], "nginx");
        assert_eq!(manifest.parameters["image"].extra["required"], json!(true));
    }

    #[test]
    fn test_missing_manifest_is_empty() {
        let temp = tempdir().unwrap();
        let manifest = TemplateManifest::load(temp.path()).unwrap();
        assert!(manifest.parameters.is_empty());
    }

    #[test]
    fn test_malformed_manifest() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("parameters.yaml"), "- just\n- a list\n").unwrap();

        let err = TemplateManifest::load(temp.path()).unwrap_err();
        assert!(matches!(err, TemplateError::InvalidManifest { .. }));
    }
}
