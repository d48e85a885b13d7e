//! # rig_templates
//!
//! Template type resolution and rendering for rig.
//!
//! This crate maps input documents to the template sets that render them and
//! performs the rendering:
//!
//! - A static registry of known input types (`build.yaml`, `k8s.yaml`) with their
//!   schemas and template variants
//! - A resolver turning an input file name and optional variant into concrete paths
//! - A Handlebars renderer that mirrors a template directory into an output directory
//! - The `parameters.yaml` manifest format of remote templates
//! - A content digest used to pin installed templates
//!
//! ## Example
//!
//! ```rust,no_run
//! use rig_templates::{TemplateRenderer, TemplateTypeResolver};
//! use std::path::Path;
//!
//! # async fn run() -> rig_templates::TemplateResult<()> {
//! let resolver = TemplateTypeResolver::new("templates");
//! let resolved = resolver.resolve(Path::new("k8s.yaml"), Some("gotemplates"))?;
//!
//! let values = serde_json::json!({ "appName": "orders" });
//! let renderer = TemplateRenderer::new();
//! renderer
//!     .render_dir(&values, &resolved.template_dir, Path::new("./manifests"))
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod digest;
pub mod error;
pub mod manifest;
pub mod registry;
pub mod renderer;
pub mod resolver;

pub use digest::directory_digest;
pub use error::{TemplateError, TemplateResult};
pub use manifest::{ParameterSpec, TemplateManifest};
pub use registry::{TemplateTypeConfig, TemplateVariant, TEMPLATE_TYPES};
pub use renderer::TemplateRenderer;
pub use resolver::{ResolvedTemplate, StdoutTemplate, TemplateTypeResolver};
