//! Remote template repository management.
//!
//! Keeps cached clones up to date and checks out templates at a given
//! version. A template version is the tag `<template>#<version>`; without a
//! version the mainline branch is used.

use std::fs;
use std::path::PathBuf;

use tracing::{debug, info};

use rig_templates::TemplateManifest;

use crate::cache::TemplateCache;
use crate::error::{RigError, RigResult};
use crate::git::GitClient;
use crate::uri::RemoteRepo;

/// Mainline branch of template repositories.
pub const DEFAULT_BRANCH: &str = "master";

/// Tag naming a version of a template.
pub fn version_tag(template: &str, version: &str) -> String {
    format!("{}#{}", template, version)
}

/// Manages cached clones of template repositories.
pub struct TemplateRepository<G: GitClient> {
    git: G,
    cache: TemplateCache,
    branch: String,
}

impl<G: GitClient> TemplateRepository<G> {
    pub fn new(git: G, cache: TemplateCache) -> Self {
        Self {
            git,
            cache,
            branch: DEFAULT_BRANCH.to_string(),
        }
    }

    /// Use another mainline branch.
    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = branch.into();
        self
    }

    pub fn cache(&self) -> &TemplateCache {
        &self.cache
    }

    pub fn branch(&self) -> &str {
        &self.branch
    }

    /// Make sure a current clone of `repo` exists in the cache.
    ///
    /// An existing clone is refreshed in order: fetch tags, check out the
    /// mainline, clean, pull. The first git failure aborts the sequence.
    pub fn ensure_cloned(&self, repo: &RemoteRepo) -> RigResult<()> {
        let repo_dir = self.cache.repo_dir(repo);

        if repo_dir.exists() {
            info!("Updating {} in {:?}", repo, repo_dir);
            self.git.fetch_tags(&repo_dir)?;
            self.git.checkout_branch(&repo_dir, &self.branch)?;
            self.git.clean(&repo_dir)?;
            self.git.pull(&repo_dir, &self.branch)?;
        } else {
            let owner_dir = self.cache.owner_dir(repo);
            fs::create_dir_all(&owner_dir)?;
            info!("Cloning {} into {:?}", repo.ssh_url(), owner_dir);
            self.git.clone_from(&owner_dir, &repo.ssh_url())?;
        }

        Ok(())
    }

    /// Check out `template` at `version` (or the mainline) and return its directory.
    pub fn checkout_template(
        &self,
        repo: &RemoteRepo,
        template: &str,
        version: Option<&str>,
    ) -> RigResult<PathBuf> {
        let repo_dir = self.cache.repo_dir(repo);
        let template_dir = self.cache.template_dir(repo, template);

        if !template_dir.is_dir() {
            return Err(RigError::TemplateNotFound {
                template: template.to_string(),
                repo: repo.to_string(),
            });
        }

        match version {
            Some(version) => {
                let tag = version_tag(template, version);
                if !self.git.tag_exists(&repo_dir, &tag)? {
                    return Err(RigError::VersionNotFound {
                        template: template.to_string(),
                        version: version.to_string(),
                    });
                }
                debug!("Checking out tag {}", tag);
                self.git.checkout_tag(&repo_dir, &tag)?;
            }
            None => {
                debug!("Checking out branch {}", self.branch);
                self.git.checkout_branch(&repo_dir, &self.branch)?;
            }
        }

        Ok(template_dir)
    }

    /// Check out a template and read its declared parameters.
    pub fn resolve_template_parameters(
        &self,
        repo: &RemoteRepo,
        template: &str,
        version: Option<&str>,
    ) -> RigResult<TemplateManifest> {
        let template_dir = self.checkout_template(repo, template, version)?;
        Ok(TemplateManifest::load(&template_dir)?)
    }
}
