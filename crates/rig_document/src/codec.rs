//! File suffix to encoding resolution.
//!
//! This is the one place that decides how a path is decoded and encoded.
//! Reader and writer both go through [`Codec::for_path`], so adding a format
//! only touches this module.

use std::fmt;
use std::path::Path;

use serde_json::Value;

use crate::error::DocumentResult;

/// Encoding of a document on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Codec {
    Json,
    Yaml,
    Text,
}

impl Codec {
    /// Resolve the codec for a path from its suffix.
    ///
    /// `.json` is checked before `.yaml`/`.yml`; any other suffix is plain text.
    pub fn for_path(path: &Path) -> Self {
        let name = path.to_string_lossy();

        if name.ends_with(".json") {
            Codec::Json
        } else if name.ends_with(".yaml") || name.ends_with(".yml") {
            Codec::Yaml
        } else {
            Codec::Text
        }
    }

    /// Decode file content into a structured value.
    ///
    /// Text content is returned as a string value.
    pub fn decode(self, content: &str) -> DocumentResult<Value> {
        match self {
            Codec::Json => Ok(serde_json::from_str(content)?),
            Codec::Yaml => {
                let value: Option<Value> = serde_yaml::from_str(content)?;
                Ok(value.unwrap_or(Value::Null))
            }
            Codec::Text => Ok(Value::String(content.to_string())),
        }
    }

    /// Encode a structured value into file content.
    pub fn encode(self, value: &Value) -> DocumentResult<String> {
        match self {
            Codec::Json => {
                let mut content = serde_json::to_string_pretty(value)?;
                content.push('\n');
                Ok(content)
            }
            Codec::Yaml => Ok(serde_yaml::to_string(value)?),
            Codec::Text => match value {
                Value::String(s) => Ok(s.clone()),
                other => Ok(serde_json::to_string_pretty(other)?),
            },
        }
    }
}

impl fmt::Display for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Codec::Json => write!(f, "JSON"),
            Codec::Yaml => write!(f, "YAML"),
            Codec::Text => write!(f, "text"),
        }
    }
}
