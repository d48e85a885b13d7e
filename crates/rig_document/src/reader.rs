//! Document reading utilities.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::codec::Codec;
use crate::error::{DocumentError, DocumentResult};

/// Reader for documents of any supported encoding.
pub struct DocumentReader;

impl DocumentReader {
    /// Read a file and decode it according to its suffix.
    pub fn read(path: impl AsRef<Path>) -> DocumentResult<Value> {
        let path = path.as_ref();
        let codec = Codec::for_path(path);
        debug!("Reading {} document from {:?}", codec, path);

        if !path.exists() {
            return Err(DocumentError::NotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path).map_err(|e| DocumentError::io(path, e))?;

        codec
            .decode(&content)
            .map_err(|e| DocumentError::InvalidFormat {
                path: path.to_path_buf(),
                codec,
                message: e.to_string(),
            })
    }

    /// Read a file and deserialize it into a typed value.
    pub fn read_as<T: DeserializeOwned>(path: impl AsRef<Path>) -> DocumentResult<T> {
        let path = path.as_ref();
        let value = Self::read(path)?;

        serde_json::from_value(value).map_err(|e| DocumentError::InvalidFormat {
            path: path.to_path_buf(),
            codec: Codec::for_path(path),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn test_read_yaml() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("k8s.yaml");
        fs::write(&path, "appName: api\nservicePort: 80\n").unwrap();

        let value = DocumentReader::read(&path).unwrap();
        assert_eq!(value, json!({"appName": "api", "servicePort": 80}));
    }

    #[test]
    fn test_read_missing_file() {
        let temp = tempdir().unwrap();
        let err = DocumentReader::read(temp.path().join("missing.yaml")).unwrap_err();
        assert!(matches!(err, DocumentError::NotFound(_)));
    }

    #[test]
    fn test_read_malformed_json() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();

        let err = DocumentReader::read(&path).unwrap_err();
        assert!(matches!(
            err,
            DocumentError::InvalidFormat {
                codec: Codec::Json,
                ..
            }
        ));
    }
}
