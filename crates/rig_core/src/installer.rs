//! Installing remote templates into a project and building from them.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use rig_templates::{directory_digest, TemplateRenderer};

use crate::descriptor::{parameter_values, RigDescriptor};
use crate::error::{RigError, RigResult};
use crate::git::GitClient;
use crate::pipeline::Outcome;
use crate::repository::TemplateRepository;
use crate::uri::TemplateUri;

/// Directory under a remote template holding its renderable files.
pub const TEMPLATE_FILES_DIR: &str = "templates";

/// Options of an install run.
#[derive(Debug, Clone)]
pub struct InstallRequest {
    pub uri: TemplateUri,
    pub target_dir: PathBuf,
    pub overrides: BTreeMap<String, String>,
    pub force: bool,
}

pub struct Installer<G: GitClient> {
    repository: TemplateRepository<G>,
    renderer: TemplateRenderer,
}

impl<G: GitClient> Installer<G> {
    pub fn new(repository: TemplateRepository<G>) -> Self {
        Self {
            repository,
            renderer: TemplateRenderer::new(),
        }
    }

    pub fn repository(&self) -> &TemplateRepository<G> {
        &self.repository
    }

    /// Write a `rig.yaml` for a remote template.
    ///
    /// Parameter values start from the template's declared defaults and are
    /// overlaid with the requested overrides. When the template ships a
    /// `templates/` directory its digest is recorded so later builds can
    /// detect changes to it.
    pub fn install(&self, request: &InstallRequest) -> RigResult<(PathBuf, RigDescriptor)> {
        let path = request.target_dir.join(RigDescriptor::FILE_NAME);
        if path.exists() && !request.force {
            return Err(RigError::AlreadyExists(path));
        }

        let uri = &request.uri;
        self.repository.ensure_cloned(&uri.repo)?;
        let manifest = self.repository.resolve_template_parameters(
            &uri.repo,
            &uri.template,
            uri.version.as_deref(),
        )?;

        let mut parameters = manifest.defaults();
        parameters.extend(request.overrides.clone());

        let files_dir = self
            .repository
            .cache()
            .template_dir(&uri.repo, &uri.template)
            .join(TEMPLATE_FILES_DIR);

        let mut descriptor = RigDescriptor::new(uri, parameters);
        if files_dir.is_dir() {
            descriptor = descriptor.with_digest(directory_digest(&files_dir)?);
        }
        descriptor.save(&path)?;
        info!("Installed {} into {:?}", uri, path);

        Ok((path, descriptor))
    }

    /// Render the template named by a descriptor.
    ///
    /// With an output directory the files are written there; otherwise the
    /// rendered documents come back as one stream.
    pub async fn build(
        &self,
        descriptor_path: &Path,
        overrides: &BTreeMap<String, String>,
        output_dir: Option<&Path>,
    ) -> RigResult<Outcome> {
        let descriptor = RigDescriptor::load(descriptor_path)?;
        let uri = descriptor.template_uri()?;

        self.repository.ensure_cloned(&uri.repo)?;
        let template_dir =
            self.repository
                .checkout_template(&uri.repo, &uri.template, uri.version.as_deref())?;
        let files_dir = template_dir.join(TEMPLATE_FILES_DIR);

        if let Some(expected) = &descriptor.digest {
            let actual = directory_digest(&files_dir)?;
            if &actual != expected {
                return Err(RigError::DigestMismatch {
                    expected: expected.clone(),
                    actual,
                });
            }
            debug!("Template digest verified: {}", actual);
        }

        let values = parameter_values(&descriptor.merged_parameters(overrides));
        info!("Building {} from {:?}", uri, descriptor_path);

        match output_dir {
            Some(output_dir) => {
                let files = self.renderer.render_dir(&values, &files_dir, output_dir).await?;
                Ok(Outcome::Written {
                    files,
                    message: format!("Done. Rendered {} into {}.", uri, output_dir.display()),
                    input_deleted: false,
                })
            }
            None => Ok(Outcome::Rendered(
                self.renderer.render_dir_to_string(&values, &files_dir)?,
            )),
        }
    }
}
