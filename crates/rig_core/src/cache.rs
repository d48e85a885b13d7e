//! Local cache of cloned template repositories.
//!
//! Layout: `<root>/<host>/<owner>/<repo>/<template>`.

use std::path::{Path, PathBuf};

use crate::error::{RigError, RigResult};
use crate::uri::RemoteRepo;

/// Directory name of the cache under the user's home directory.
pub const CACHE_DIR_NAME: &str = ".rig";

#[derive(Debug, Clone)]
pub struct TemplateCache {
    root: PathBuf,
}

impl TemplateCache {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Cache rooted at `~/.rig`.
    pub fn in_home() -> RigResult<Self> {
        dirs::home_dir()
            .map(|home| Self::new(home.join(CACHE_DIR_NAME)))
            .ok_or(RigError::HomeDirUnavailable)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory a repository is cloned into.
    pub fn owner_dir(&self, repo: &RemoteRepo) -> PathBuf {
        self.root.join(&repo.host).join(&repo.owner)
    }

    pub fn repo_dir(&self, repo: &RemoteRepo) -> PathBuf {
        self.owner_dir(repo).join(&repo.name)
    }

    pub fn template_dir(&self, repo: &RemoteRepo, template: &str) -> PathBuf {
        self.repo_dir(repo).join(template)
    }
}
