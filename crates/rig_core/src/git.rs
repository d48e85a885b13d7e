//! Git operations for the template cache.
//!
//! Only the handful of commands needed to keep a cached clone in step with
//! its remote are exposed. [`GitClient`] is the seam the repository manager
//! depends on; [`GitOps`] implements it by running the `git` binary.

use std::path::Path;
use std::process::Command;

use tracing::debug;

use crate::error::{RigError, RigResult};

/// Minimal git capability used by the template repository manager.
#[cfg_attr(test, mockall::automock)]
pub trait GitClient {
    /// Clone `url` into a new directory inside `parent`.
    fn clone_from(&self, parent: &Path, url: &str) -> RigResult<()>;

    /// Fetch all tags from the remote.
    fn fetch_tags(&self, repo: &Path) -> RigResult<()>;

    /// Check out a local branch.
    fn checkout_branch(&self, repo: &Path, branch: &str) -> RigResult<()>;

    /// Check out a tag (detached HEAD).
    fn checkout_tag(&self, repo: &Path, tag: &str) -> RigResult<()>;

    /// Remove untracked and ignored files.
    fn clean(&self, repo: &Path) -> RigResult<()>;

    /// Fast-forward a branch from the remote.
    fn pull(&self, repo: &Path, branch: &str) -> RigResult<()>;

    /// Whether a tag exists locally.
    fn tag_exists(&self, repo: &Path, tag: &str) -> RigResult<bool>;
}

/// Git operations backed by the `git` executable.
#[derive(Debug, Clone, Copy, Default)]
pub struct GitOps;

impl GitOps {
    pub fn new() -> Self {
        Self
    }

    /// Check if Git is available on the system.
    pub fn is_git_available() -> bool {
        Command::new("git")
            .arg("--version")
            .output()
            .map(|output| output.status.success())
            .unwrap_or(false)
    }

    /// Run a git command in `dir` and return its stdout.
    ///
    /// A non-zero exit is turned into [`RigError::Git`] carrying git's own output.
    fn run(&self, dir: &Path, args: &[&str]) -> RigResult<String> {
        debug!("git {} (in {:?})", args.join(" "), dir);

        let output = Command::new("git")
            .args(args)
            .current_dir(dir)
            .env("GIT_TERMINAL_PROMPT", "0")
            .output()
            .map_err(|e| RigError::Git(format!("Failed to run git {}: {}", args[0], e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stdout = String::from_utf8_lossy(&output.stdout);
            let diagnostic = if stderr.trim().is_empty() { stdout } else { stderr };
            return Err(RigError::Git(format!(
                "git {} failed: {}",
                args[0],
                diagnostic.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl GitClient for GitOps {
    fn clone_from(&self, parent: &Path, url: &str) -> RigResult<()> {
        self.run(parent, &["clone", "-q", url]).map(|_| ())
    }

    fn fetch_tags(&self, repo: &Path) -> RigResult<()> {
        self.run(repo, &["fetch", "-q", "--tags"]).map(|_| ())
    }

    fn checkout_branch(&self, repo: &Path, branch: &str) -> RigResult<()> {
        self.run(repo, &["checkout", "-q", branch]).map(|_| ())
    }

    fn checkout_tag(&self, repo: &Path, tag: &str) -> RigResult<()> {
        let reference = format!("tags/{}", tag);
        self.run(repo, &["checkout", "-q", &reference]).map(|_| ())
    }

    fn clean(&self, repo: &Path) -> RigResult<()> {
        self.run(repo, &["clean", "-d", "-f", "-x"]).map(|_| ())
    }

    fn pull(&self, repo: &Path, branch: &str) -> RigResult<()> {
        self.run(repo, &["pull", "-q", "--ff-only", "origin", branch])
            .map(|_| ())
    }

    fn tag_exists(&self, repo: &Path, tag: &str) -> RigResult<bool> {
        let listed = self.run(repo, &["tag", "--list", tag])?;
        Ok(listed.lines().any(|line| line.trim() == tag))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn git(dir: &Path, args: &[&str]) {
        let status = Command::new("git")
            .args(["-c", "user.name=rig", "-c", "user.email=rig@example.com"])
            .args(args)
            .current_dir(dir)
            .status()
            .unwrap();
        assert!(status.success(), "git {:?} failed", args);
    }

    #[test]
    fn test_git_available() {
        // This will fail if git is not installed, which is expected
        let available = GitOps::is_git_available();
        println!("Git available: {}", available);
    }

    #[test]
    fn test_clone_tag_and_clean() {
        if !GitOps::is_git_available() {
            println!("Git not available, skipping test");
            return;
        }

        let temp = TempDir::new().unwrap();
        let origin = temp.path().join("templates");
        fs::create_dir_all(origin.join("web")).unwrap();
        git(temp.path(), &["-c", "init.defaultBranch=master", "init", "-q", "templates"]);
        fs::write(origin.join("web").join("parameters.yaml"), "host: {}\n").unwrap();
        git(&origin, &["add", "."]);
        git(&origin, &["commit", "-q", "-m", "web template"]);
        git(&origin, &["tag", "web#1.0.0"]);

        let cache = temp.path().join("cache");
        fs::create_dir_all(&cache).unwrap();

        let ops = GitOps::new();
        ops.clone_from(&cache, origin.to_str().unwrap()).unwrap();

        let clone = cache.join("templates");
        assert!(clone.join("web").join("parameters.yaml").exists());
        assert!(ops.tag_exists(&clone, "web#1.0.0").unwrap());
        assert!(!ops.tag_exists(&clone, "web#2.0.0").unwrap());

        fs::write(clone.join("scratch.txt"), "left over").unwrap();
        ops.checkout_tag(&clone, "web#1.0.0").unwrap();
        ops.checkout_branch(&clone, "master").unwrap();
        ops.clean(&clone).unwrap();
        assert!(!clone.join("scratch.txt").exists());
    }

    #[test]
    fn test_failure_carries_git_output() {
        if !GitOps::is_git_available() {
            println!("Git not available, skipping test");
            return;
        }

        let temp = TempDir::new().unwrap();
        let err = GitOps::new().checkout_branch(temp.path(), "master").unwrap_err();

        match err {
            RigError::Git(message) => assert!(message.contains("git checkout failed")),
            other => panic!("unexpected error: {other}"),
        }
    }
}
