//! Document writing utilities.

use std::fs;
use std::path::Path;

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::codec::Codec;
use crate::error::{DocumentError, DocumentResult};

/// Writer for documents of any supported encoding.
pub struct DocumentWriter;

impl DocumentWriter {
    /// Encode a value according to the path suffix and write it.
    ///
    /// Missing parent directories are created first.
    pub fn write(path: impl AsRef<Path>, value: &Value) -> DocumentResult<()> {
        let path = path.as_ref();
        let codec = Codec::for_path(path);
        debug!("Writing {} document to {:?}", codec, path);

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| DocumentError::io(parent, e))?;
            }
        }

        let content = codec.encode(value)?;
        fs::write(path, content).map_err(|e| DocumentError::io(path, e))
    }

    /// Serialize a typed value and write it.
    pub fn write_as<T: Serialize>(path: impl AsRef<Path>, value: &T) -> DocumentResult<()> {
        let value = serde_json::to_value(value)?;
        Self::write(path, &value)
    }

    /// Delete a file.
    pub fn delete(path: impl AsRef<Path>) -> DocumentResult<()> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(DocumentError::NotFound(path.to_path_buf()));
        }

        debug!("Deleting {:?}", path);
        fs::remove_file(path).map_err(|e| DocumentError::io(path, e))
    }
}
