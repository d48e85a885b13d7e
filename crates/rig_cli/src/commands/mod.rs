//! CLI command definitions.
//!
//! This module defines the command structure for the rig CLI and the
//! settings shared by every subcommand.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use thiserror::Error;
use tracing::debug;

use rig_core::{GitOps, Installer, Outcome, Pipeline, TemplateCache, TemplateRepository, DEFAULT_BRANCH};

pub mod breakout;
pub mod build;
pub mod init;
pub mod install;
pub mod validate;

/// rig - render configuration files into build and deployment artifacts
#[derive(Parser)]
#[command(name = "rig")]
#[command(version, about = "rig - render configuration files into build and deployment artifacts")]
#[command(long_about = r#"
rig turns small declarative configuration files into build pipelines and
Kubernetes manifests, and installs versioned templates from git repositories.

COMMANDS:
  init          → Write a k8s.yaml scaffold
  validate      → Check an input file against its schema
  breakout      → Render an input file into a directory of generated files
  build         → Render k8s.yaml for a cluster to stdout, or build from rig.yaml
  install       → Record a remote template in rig.yaml

EXIT CODES:
  0 - Success
  1 - General error
  2 - Invalid arguments or configuration
  3 - Validation failure
  4 - Template error
  5 - Template repository error
"#)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Directory holding input schemas and template sets
    #[arg(long, global = true, env = "RIG_TEMPLATES_DIR", default_value = "templates")]
    pub templates_dir: PathBuf,

    /// Cache of cloned template repositories [default: ~/.rig]
    #[arg(long, global = true, env = "RIG_HOME")]
    pub cache_dir: Option<PathBuf>,

    /// Mainline branch of template repositories
    #[arg(long, global = true, env = "RIG_TEMPLATE_BRANCH", default_value = DEFAULT_BRANCH)]
    pub branch: String,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn settings(&self) -> Settings {
        Settings {
            templates_dir: self.templates_dir.clone(),
            cache_dir: self.cache_dir.clone(),
            branch: self.branch.clone(),
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a k8s.yaml scaffold
    Init(init::InitArgs),

    /// Validate an input file against its schema
    Validate(validate::ValidateArgs),

    /// Render k8s.yaml to stdout, or build the template recorded in rig.yaml
    #[command(visible_alias = "gen-k8s")]
    Build(build::BuildArgs),

    /// Render an input file into a directory of generated files
    Breakout(breakout::BreakoutArgs),

    /// Install a remote template into rig.yaml
    Install(install::InstallArgs),
}

/// Global settings shared by subcommands.
#[derive(Debug, Clone)]
pub struct Settings {
    pub templates_dir: PathBuf,
    pub cache_dir: Option<PathBuf>,
    pub branch: String,
}

impl Settings {
    pub fn pipeline(&self) -> Pipeline {
        debug!("Templates root: {:?}", self.templates_dir);
        Pipeline::new(self.templates_dir.clone())
    }

    pub fn installer(&self) -> Result<Installer<GitOps>> {
        let cache = match &self.cache_dir {
            Some(dir) => TemplateCache::new(dir.clone()),
            None => TemplateCache::in_home()?,
        };
        debug!("Template cache: {:?}", cache.root());

        let repository = TemplateRepository::new(GitOps::new(), cache).with_branch(self.branch.clone());
        Ok(Installer::new(repository))
    }
}

/// An input document failed schema validation.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct SchemaViolation(pub String);

/// Print a pipeline outcome, turning schema violations into an error.
pub fn finish(outcome: Outcome) -> Result<()> {
    if let Some(message) = outcome.invalid_message() {
        return Err(SchemaViolation(message).into());
    }

    match outcome {
        Outcome::Valid { .. } => println!("File is valid."),
        Outcome::Written { files, message, .. } => {
            for file in &files {
                debug!("Wrote {}", file.display());
            }
            println!("{}", message);
        }
        Outcome::Rendered(rendered) => {
            if rendered.ends_with('\n') {
                print!("{}", rendered);
            } else {
                println!("{}", rendered);
            }
        }
        Outcome::Invalid { .. } => {}
    }

    Ok(())
}
