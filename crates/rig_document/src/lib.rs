//! # rig_document
//!
//! Structured document access for rig.
//!
//! Every file rig reads or writes (input documents, schemas, rig descriptors,
//! template parameter manifests) goes through this crate. The on-disk encoding
//! is chosen from the file suffix:
//!
//! - `.json` → JSON
//! - `.yaml` / `.yml` → YAML
//! - anything else → plain text
//!
//! Decoded documents are always [`serde_json::Value`]s, so YAML and JSON inputs
//! flow through validation and rendering identically.
//!
//! ## Example
//!
//! ```rust,no_run
//! use rig_document::{DocumentReader, SchemaValidator};
//!
//! let document = DocumentReader::read("k8s.yaml").unwrap();
//! let result = SchemaValidator::validate(&document, "templates/k8s/schema.json").unwrap();
//! if !result.valid {
//!     for error in &result.errors {
//!         eprintln!("{}", error);
//!     }
//! }
//! ```

pub mod codec;
pub mod error;
pub mod reader;
pub mod validator;
pub mod writer;

pub use codec::Codec;
pub use error::{DocumentError, DocumentResult};
pub use reader::DocumentReader;
pub use validator::{SchemaValidator, ValidationResult};
pub use writer::DocumentWriter;
