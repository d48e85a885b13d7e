//! Resolution of input files to schemas and template sets.
//!
//! The resolver is pure: it never touches the filesystem, it only joins
//! registry paths onto the templates root.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{TemplateError, TemplateResult};
use crate::registry::TemplateTypeConfig;

/// Template set selected for an input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTemplate {
    /// Input type code (e.g. "k8s")
    pub code: String,
    /// Variant key that was selected
    pub variant: String,
    /// Display name of the variant (last segment of its directory)
    pub variant_name: String,
    /// Directory holding the variant's templates
    pub template_dir: PathBuf,
    /// Schema validating the input file
    pub schema_path: PathBuf,
    /// Message printed after a successful breakout
    pub completion_message: String,
}

/// Single-file template selected for the `build` flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StdoutTemplate {
    pub code: String,
    pub schema_path: PathBuf,
    pub template_file: PathBuf,
}

/// Resolves input files against the static type registry.
#[derive(Debug, Clone)]
pub struct TemplateTypeResolver {
    templates_root: PathBuf,
}

impl TemplateTypeResolver {
    /// Create a resolver rooted at a templates directory.
    pub fn new(templates_root: impl Into<PathBuf>) -> Self {
        Self {
            templates_root: templates_root.into(),
        }
    }

    pub fn templates_root(&self) -> &Path {
        &self.templates_root
    }

    /// Resolve an input file and optional variant to a template set.
    ///
    /// Only the base file name of `file` is considered.
    pub fn resolve(&self, file: &Path, variant: Option<&str>) -> TemplateResult<ResolvedTemplate> {
        let config = Self::lookup(file)?;

        let selected = match variant {
            Some(name) => config.variant(name),
            None => config.default_template(),
        }
        .ok_or_else(|| TemplateError::UnknownTemplateVariant {
            variant: variant.unwrap_or(config.default_variant).to_string(),
            file_type: config.code.to_string(),
            available: config.variant_names().join(", "),
        })?;

        let variant_name = Path::new(selected.dir)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| selected.name.to_string());

        debug!(
            "Resolved {:?} to {} variant '{}'",
            file, config.code, variant_name
        );

        Ok(ResolvedTemplate {
            code: config.code.to_string(),
            variant: selected.name.to_string(),
            variant_name,
            template_dir: self.templates_root.join(selected.dir),
            schema_path: self.templates_root.join(config.schema_path),
            completion_message: config.completion_message.to_string(),
        })
    }

    /// Resolve an input file to its single stdout template.
    pub fn resolve_stdout_template(&self, file: &Path) -> TemplateResult<StdoutTemplate> {
        let config = Self::lookup(file)?;

        let template = config
            .stdout_template
            .ok_or_else(|| TemplateError::UnknownFileType(file.display().to_string()))?;

        Ok(StdoutTemplate {
            code: config.code.to_string(),
            schema_path: self.templates_root.join(config.schema_path),
            template_file: self.templates_root.join(template),
        })
    }

    /// Schema path for an input file.
    pub fn schema_for(&self, file: &Path) -> TemplateResult<PathBuf> {
        let config = Self::lookup(file)?;
        Ok(self.templates_root.join(config.schema_path))
    }

    fn lookup(file: &Path) -> TemplateResult<&'static TemplateTypeConfig> {
        file.file_name()
            .and_then(|name| name.to_str())
            .and_then(TemplateTypeConfig::for_file_name)
            .ok_or_else(|| TemplateError::UnknownFileType(file.display().to_string()))
    }
}
