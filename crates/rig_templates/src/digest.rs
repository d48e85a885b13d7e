//! Content digest of a template directory.

use std::path::Path;

use sha2::{Digest, Sha256};

use crate::error::TemplateResult;
use crate::renderer::template_files;

/// Prefix of every digest string.
pub const DIGEST_PREFIX: &str = "sha256:";

/// SHA-256 over the contents of every file under `dir`, in path order.
///
/// Only file contents are hashed, so renaming a file without reordering it
/// keeps the digest.
pub fn directory_digest(dir: &Path) -> TemplateResult<String> {
    let mut hasher = Sha256::new();

    for file in template_files(dir)? {
        hasher.update(std::fs::read(&file)?);
    }

    let digest = hasher.finalize();
    let hex: String = digest.iter().map(|byte| format!("{:02x}", byte)).collect();
    Ok(format!("{}{}", DIGEST_PREFIX, hex))
}
