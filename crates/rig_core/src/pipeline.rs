//! Validate, breakout and build pipelines for local input documents.
//!
//! Every pipeline resolves the input file first, so unknown file types,
//! unknown variants and bad build arguments are reported before any file is
//! read. A document failing schema validation is not an error: it yields
//! [`Outcome::Invalid`] and nothing is rendered.
//!
//! Plain template directories and template text can also be rendered
//! directly against `key=value` parameters, without a schema.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, info};

use rig_document::{DocumentReader, DocumentWriter, SchemaValidator};
use rig_templates::{TemplateError, TemplateRenderer, TemplateTypeResolver};

use crate::context::{Cluster, RenderContext};
use crate::descriptor::parameter_values;
use crate::error::{RigError, RigResult};

/// Result of a pipeline run that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The document satisfies its schema.
    Valid { file: PathBuf },
    /// The document violates its schema; nothing was rendered.
    Invalid { file: PathBuf, errors: Vec<String> },
    /// Templates were rendered into an output directory.
    Written {
        files: Vec<PathBuf>,
        message: String,
        input_deleted: bool,
    },
    /// A single rendered document, meant for stdout.
    Rendered(String),
}

impl Outcome {
    pub fn is_invalid(&self) -> bool {
        matches!(self, Outcome::Invalid { .. })
    }

    /// User-facing description of a schema failure.
    pub fn invalid_message(&self) -> Option<String> {
        match self {
            Outcome::Invalid { file, errors } => Some(format!(
                "Invalid file schema in file '{}': {}",
                file.display(),
                errors.join(", ")
            )),
            _ => None,
        }
    }
}

/// Options of a breakout run.
#[derive(Debug, Clone)]
pub struct BreakoutRequest {
    pub file: PathBuf,
    pub output_dir: PathBuf,
    pub variant: Option<String>,
    pub keep_input_file: bool,
}

/// Runs the local document pipelines against a templates root.
#[derive(Clone)]
pub struct Pipeline {
    resolver: TemplateTypeResolver,
    renderer: TemplateRenderer,
}

impl Pipeline {
    pub fn new(templates_root: impl Into<PathBuf>) -> Self {
        Self {
            resolver: TemplateTypeResolver::new(templates_root),
            renderer: TemplateRenderer::new(),
        }
    }

    pub fn resolver(&self) -> &TemplateTypeResolver {
        &self.resolver
    }

    /// Check a document against the schema of its type.
    pub fn validate(&self, file: &Path) -> RigResult<Outcome> {
        let schema_path = self.resolver.schema_for(file)?;

        Ok(match self.load_valid(file, &schema_path)? {
            Ok(_) => Outcome::Valid {
                file: file.to_path_buf(),
            },
            Err(invalid) => invalid,
        })
    }

    /// Render a document's template variant into an output directory.
    ///
    /// The input file is deleted afterwards unless asked to keep it. If any
    /// template fails, files already written stay and the input is kept.
    pub async fn breakout(&self, request: &BreakoutRequest) -> RigResult<Outcome> {
        let resolved = self
            .resolver
            .resolve(&request.file, request.variant.as_deref())?;
        let context = RenderContext::new(
            &request.file,
            &request.output_dir,
            &resolved,
            request.keep_input_file,
        );
        info!(
            "Breaking out {:?} with {} templates",
            context.file_name_path, resolved.variant_name
        );

        let document = match self.load_valid(&context.file_name_path, &context.schema_path)? {
            Ok(document) => document,
            Err(invalid) => return Ok(invalid),
        };

        let files = self
            .renderer
            .render_dir(&document, &context.template_dir_path, &context.output_dir_path)
            .await?;

        if !context.keep_input_file {
            DocumentWriter::delete(&context.file_name_path)?;
            debug!("Deleted {:?}", context.file_name_path);
        }

        Ok(Outcome::Written {
            files,
            message: context.completion_message,
            input_deleted: !context.keep_input_file,
        })
    }

    /// Render a document's stdout template for a cluster and image tag.
    ///
    /// The document is validated as written; the build fields are injected
    /// afterwards.
    pub fn build(&self, file: &Path, cluster: &str, image_tag: &str) -> RigResult<Outcome> {
        let template = self.resolver.resolve_stdout_template(file)?;
        let cluster: Cluster = cluster.parse()?;
        if image_tag.trim().is_empty() {
            return Err(RigError::MissingImageTag);
        }

        let document = match self.load_valid(file, &template.schema_path)? {
            Ok(document) => document,
            Err(invalid) => return Ok(invalid),
        };

        let values = inject_build_fields(document, file, cluster, image_tag)?;
        let rendered = self.renderer.render_file(&values, &template.template_file)?;
        Ok(Outcome::Rendered(rendered))
    }

    /// Render a local template directory with parameter values.
    ///
    /// Without an output directory the rendered files come back as one
    /// multi-document stream.
    pub async fn render_template_dir(
        &self,
        template_dir: &Path,
        parameters: &BTreeMap<String, String>,
        output_dir: Option<&Path>,
    ) -> RigResult<Outcome> {
        let values = parameter_values(parameters);
        info!("Rendering local templates from {:?}", template_dir);

        match output_dir {
            Some(output_dir) => {
                let files = self.renderer.render_dir(&values, template_dir, output_dir).await?;
                Ok(Outcome::Written {
                    files,
                    message: format!(
                        "Done. Rendered {} into {}.",
                        template_dir.display(),
                        output_dir.display()
                    ),
                    input_deleted: false,
                })
            }
            None => Ok(Outcome::Rendered(
                self.renderer.render_dir_to_string(&values, template_dir)?,
            )),
        }
    }

    /// Render template text, such as a template piped on stdin.
    pub fn render_template_text(
        &self,
        source: &str,
        text: &str,
        parameters: &BTreeMap<String, String>,
    ) -> RigResult<Outcome> {
        let rendered = self
            .renderer
            .render_content(text, &parameter_values(parameters))
            .map_err(|message| TemplateError::RenderingFailed {
                path: PathBuf::from(source),
                message,
            })?;
        Ok(Outcome::Rendered(rendered.trim().to_string()))
    }

    /// Read and validate a document.
    ///
    /// Schema violations come back as `Err(Outcome::Invalid)`.
    fn load_valid(&self, file: &Path, schema_path: &Path) -> RigResult<Result<Value, Outcome>> {
        let document = DocumentReader::read(file)?;
        let result = SchemaValidator::validate(&document, schema_path)?;

        if result.valid {
            return Ok(Ok(document));
        }

        debug!("{:?} failed validation: {}", file, result.summary());
        Ok(Err(Outcome::Invalid {
            file: file.to_path_buf(),
            errors: result.errors,
        }))
    }
}

/// Add `cluster` and `imageTag` to a validated document.
pub fn inject_build_fields(
    document: Value,
    file: &Path,
    cluster: Cluster,
    image_tag: &str,
) -> RigResult<Value> {
    match document {
        Value::Object(mut map) => {
            map.insert("cluster".to_string(), Value::String(cluster.to_string()));
            map.insert("imageTag".to_string(), Value::String(image_tag.to_string()));
            Ok(Value::Object(map))
        }
        _ => Err(RigError::NotAMapping(file.to_path_buf())),
    }
}
