//! Template rendering.
//!
//! Templates are Handlebars documents. Unresolved references render as empty
//! strings and output is never HTML-escaped, since the generated files are
//! pipeline scripts and manifests.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use handlebars::Handlebars;
use serde_json::Value;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::error::{TemplateError, TemplateResult};

/// Separator between documents when a directory is rendered to one stream.
pub const DOCUMENT_SEPARATOR: &str = "\n---\n";

/// Template renderer for template files and directories.
#[derive(Clone)]
pub struct TemplateRenderer {
    engine: Arc<Handlebars<'static>>,
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRenderer {
    /// Create a new template renderer.
    pub fn new() -> Self {
        let mut engine = Handlebars::new();
        engine.register_escape_fn(handlebars::no_escape);
        engine.set_strict_mode(false);

        Self {
            engine: Arc::new(engine),
        }
    }

    /// Render template text against a set of values.
    pub fn render_content(&self, content: &str, values: &Value) -> Result<String, String> {
        self.engine
            .render_template(content, values)
            .map_err(|e| e.to_string())
    }

    /// Render a single template file to a string.
    pub fn render_file(&self, values: &Value, template_file: &Path) -> TemplateResult<String> {
        if !template_file.is_file() {
            return Err(TemplateError::NotFound(template_file.to_path_buf()));
        }

        let content = std::fs::read_to_string(template_file)?;
        self.render_content(&content, values)
            .map_err(|message| TemplateError::RenderingFailed {
                path: template_file.to_path_buf(),
                message,
            })
    }

    /// Render every file of a template directory into one multi-document stream.
    ///
    /// Files are rendered in path order. Outputs that are only whitespace are
    /// dropped; the rest are trimmed and joined with `---` separators.
    pub fn render_dir_to_string(&self, values: &Value, template_dir: &Path) -> TemplateResult<String> {
        let mut documents = Vec::new();

        for source in template_files(template_dir)? {
            let rendered = self.render_file(values, &source)?;
            let trimmed = rendered.trim();
            if !trimmed.is_empty() {
                documents.push(trimmed.to_string());
            }
        }

        Ok(documents.join(DOCUMENT_SEPARATOR))
    }

    /// Render a template directory into an output directory.
    ///
    /// The relative layout under `template_dir` is mirrored under `output_dir`.
    /// All files are rendered concurrently and this returns only once every
    /// file task has finished. If any task fails the first failure observed is
    /// returned; files already written by other tasks are left in place.
    ///
    /// Returns the written paths in sorted order.
    pub async fn render_dir(
        &self,
        values: &Value,
        template_dir: &Path,
        output_dir: &Path,
    ) -> TemplateResult<Vec<PathBuf>> {
        let sources = template_files(template_dir)?;
        info!(
            "Rendering {} template(s) from {:?} to {:?}",
            sources.len(),
            template_dir,
            output_dir
        );

        let values = Arc::new(values.clone());
        let mut tasks = JoinSet::new();

        for source in sources {
            let target = output_path(&source, template_dir, output_dir)?;
            let renderer = self.clone();
            let values = Arc::clone(&values);

            tasks.spawn(async move { renderer.render_to_path(&values, source, target).await });
        }

        let mut written = Vec::new();
        let mut first_error = None;

        while let Some(joined) = tasks.join_next().await {
            let outcome = joined.unwrap_or_else(|e| Err(TemplateError::TaskFailed(e.to_string())));

            match outcome {
                Ok(target) => written.push(target),
                Err(e) => {
                    warn!("{}", e);
                    if first_error.is_none() {
                        first_error = Some(e);
                    }
                }
            }
        }

        if let Some(e) = first_error {
            return Err(e);
        }

        written.sort();
        Ok(written)
    }

    async fn render_to_path(&self, values: &Value, source: PathBuf, target: PathBuf) -> TemplateResult<PathBuf> {
        let content = tokio::fs::read_to_string(&source).await?;

        let rendered = self
            .render_content(&content, values)
            .map_err(|message| TemplateError::RenderingFailed {
                path: source.clone(),
                message,
            })?;

        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&target, rendered).await?;

        debug!("Rendered: {:?}", target);
        Ok(target)
    }
}

/// Every regular file under a template directory, in path order.
pub fn template_files(template_dir: &Path) -> TemplateResult<Vec<PathBuf>> {
    if !template_dir.is_dir() {
        return Err(TemplateError::NotFound(template_dir.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(template_dir)
        .min_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry.map_err(std::io::Error::from)?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

/// Re-root a template path from `template_dir` under `output_dir`.
pub fn output_path(source: &Path, template_dir: &Path, output_dir: &Path) -> TemplateResult<PathBuf> {
    let relative = source
        .strip_prefix(template_dir)
        .map_err(|_| TemplateError::RenderingFailed {
            path: source.to_path_buf(),
            message: format!("not inside template directory {:?}", template_dir),
        })?;

    Ok(output_dir.join(relative))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_render_content() {
        let renderer = TemplateRenderer::new();
        let values = json!({"name": "my-app", "version": "1.0.0"});

        let rendered = renderer
            .render_content("App: {{name}}, Version: {{version}}", &values)
            .unwrap();
        assert_eq!(rendered, "App: my-app, Version: 1.0.0");
    }

    #[test]
    fn test_unresolved_reference_renders_empty() {
        let renderer = TemplateRenderer::new();
        let rendered = renderer.render_content("[{{missing}}]", &json!({})).unwrap();
        assert_eq!(rendered, "[]");
    }

    #[test]
    fn test_no_html_escaping() {
        let renderer = TemplateRenderer::new();
        let rendered = renderer
            .render_content("cmd: {{cmd}}", &json!({"cmd": "echo 'a' && b < c"}))
            .unwrap();
        assert_eq!(rendered, "cmd: echo 'a' && b < c");
    }

    #[test]
    fn test_conditionals_and_loops() {
        let renderer = TemplateRenderer::new();
        let template = "{{#if namespace}}ns={{namespace}}{{/if}};{{#each stages}}{{name}},{{/each}}";
        let values = json!({"namespace": "shop", "stages": [{"name": "build"}, {"name": "test"}]});

        assert_eq!(
            renderer.render_content(template, &values).unwrap(),
            "ns=shop;build,test,"
        );
    }

    #[test]
    fn test_output_path_preserves_layout() {
        let path = output_path(
            Path::new("/t/k8s/Kustomize/overlays/prod/patch.yaml"),
            Path::new("/t/k8s/Kustomize"),
            Path::new("out"),
        )
        .unwrap();
        assert_eq!(path, PathBuf::from("out/overlays/prod/patch.yaml"));
    }

    #[test]
    fn test_render_dir_to_string_skips_blank_documents() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("a.yaml"), "kind: Service\nname: {{name}}\n").unwrap();
        fs::write(temp.path().join("b.yaml"), "{{#if enabled}}kind: Ingress{{/if}}\n").unwrap();
        fs::write(temp.path().join("c.yaml"), "kind: Deployment\n").unwrap();

        let renderer = TemplateRenderer::new();
        let output = renderer
            .render_dir_to_string(&json!({"name": "api"}), temp.path())
            .unwrap();

        assert_eq!(output, "kind: Service\nname: api\n---\nkind: Deployment");
    }

    #[tokio::test]
    async fn test_render_dir_missing_template_dir() {
        let temp = tempdir().unwrap();
        let renderer = TemplateRenderer::new();

        let err = renderer
            .render_dir(&json!({}), &temp.path().join("nope"), &temp.path().join("out"))
            .await
            .unwrap_err();
        assert!(matches!(err, TemplateError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_render_dir_failure_keeps_siblings() {
        let temp = tempdir().unwrap();
        let templates = temp.path().join("templates");
        fs::create_dir_all(&templates).unwrap();
        fs::write(templates.join("good.txt"), "ok {{name}}").unwrap();
        fs::write(templates.join("bad.txt"), "{{#if name}}unterminated").unwrap();

        let output = temp.path().join("out");
        let renderer = TemplateRenderer::new();
        let err = renderer
            .render_dir(&json!({"name": "x"}), &templates, &output)
            .await
            .unwrap_err();

        assert!(matches!(err, TemplateError::RenderingFailed { .. }));
        assert_eq!(fs::read_to_string(output.join("good.txt")).unwrap(), "ok x");
        assert!(!output.join("bad.txt").exists());
    }
}
