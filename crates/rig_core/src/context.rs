//! Per-invocation render context and build targets.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use rig_templates::ResolvedTemplate;

use crate::error::RigError;

/// Everything a breakout run needs once the input has been resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderContext {
    pub file_name_path: PathBuf,
    pub output_dir_path: PathBuf,
    pub template_dir_path: PathBuf,
    pub schema_path: PathBuf,
    pub keep_input_file: bool,
    pub completion_message: String,
}

impl RenderContext {
    pub fn new(file: &Path, output_dir: &Path, resolved: &ResolvedTemplate, keep_input_file: bool) -> Self {
        Self {
            file_name_path: file.to_path_buf(),
            output_dir_path: output_dir.to_path_buf(),
            template_dir_path: resolved.template_dir.clone(),
            schema_path: resolved.schema_path.clone(),
            keep_input_file,
            completion_message: resolved.completion_message.clone(),
        }
    }
}

/// Deployment target of a build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cluster {
    Dev,
    Int,
    Prod,
}

impl Cluster {
    pub const ALL: [Cluster; 3] = [Cluster::Dev, Cluster::Int, Cluster::Prod];

    pub fn as_str(&self) -> &'static str {
        match self {
            Cluster::Dev => "dev",
            Cluster::Int => "int",
            Cluster::Prod => "prod",
        }
    }
}

impl fmt::Display for Cluster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Cluster {
    type Err = RigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Cluster::ALL
            .into_iter()
            .find(|cluster| cluster.as_str() == s)
            .ok_or_else(|| RigError::InvalidCluster(s.to_string()))
    }
}
