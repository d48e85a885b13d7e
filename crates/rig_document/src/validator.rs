//! JSON-Schema validation of documents.

use std::path::Path;

use jsonschema::JSONSchema;
use serde_json::Value;
use tracing::debug;

use crate::error::{DocumentError, DocumentResult};
use crate::reader::DocumentReader;

/// Validation result with details.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<String>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
        }
    }

    pub fn add_error(&mut self, message: impl Into<String>) {
        self.valid = false;
        self.errors.push(message.into());
    }

    /// All errors on a single line.
    pub fn summary(&self) -> String {
        self.errors.join(", ")
    }
}

/// Validator for documents against JSON-Schema files.
pub struct SchemaValidator;

impl SchemaValidator {
    /// Validate a document against the schema stored at `schema_path`.
    ///
    /// The schema file may be JSON or YAML. A schema that cannot be read or
    /// compiled is an error, not an invalid result.
    pub fn validate(document: &Value, schema_path: impl AsRef<Path>) -> DocumentResult<ValidationResult> {
        let schema_path = schema_path.as_ref();
        let schema = DocumentReader::read(schema_path)?;
        Self::validate_against(document, &schema, schema_path)
    }

    /// Validate a document against an already loaded schema.
    pub fn validate_against(
        document: &Value,
        schema: &Value,
        schema_path: &Path,
    ) -> DocumentResult<ValidationResult> {
        let compiled = JSONSchema::compile(schema).map_err(|e| DocumentError::InvalidSchema {
            path: schema_path.to_path_buf(),
            message: e.to_string(),
        })?;

        let mut result = ValidationResult::new();

        if let Err(errors) = compiled.validate(document) {
            for error in errors {
                let pointer = error.instance_path.to_string();
                let location = if pointer.is_empty() { "/".to_string() } else { pointer };
                result.add_error(format!("{}: {}", location, error));
            }
        }

        debug!(
            "Validated document against {:?}: {} error(s)",
            schema_path,
            result.errors.len()
        );

        Ok(result)
    }
}
