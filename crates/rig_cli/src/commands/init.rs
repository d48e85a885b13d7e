//! Init command - Write a k8s.yaml scaffold.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use serde_json::{json, Value};
use tracing::info;

use rig_core::RigError;
use rig_document::DocumentWriter;

const FILE_NAME: &str = "k8s.yaml";

#[derive(Args)]
pub struct InitArgs {
    /// Directory to write k8s.yaml into
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Repository name [default: current directory name]
    #[arg(long)]
    repo_name: Option<String>,

    /// App name [default: repository name, lowercased with other characters as '-']
    #[arg(long)]
    app_name: Option<String>,

    /// Kubernetes namespace
    #[arg(long, default_value = "default")]
    namespace: String,

    /// Service port
    #[arg(long, default_value_t = 80)]
    service_port: u16,

    /// Readiness probe path
    #[arg(long, default_value = "/health")]
    readiness_path: String,

    /// CPU request
    #[arg(long, default_value = "500m")]
    cpu_min: String,

    /// CPU limit
    #[arg(long, default_value = "1000m")]
    cpu_max: String,

    /// Memory limit
    #[arg(long, default_value = "800m")]
    memory: String,

    /// Overwrite an existing k8s.yaml
    #[arg(short, long)]
    force: bool,
}

pub async fn execute(args: InitArgs) -> Result<()> {
    let path = args.output_dir.join(FILE_NAME);

    if path.exists() && !args.force {
        return Err(RigError::AlreadyExists(path).into());
    }

    let repo_name = match args.repo_name.clone() {
        Some(name) => name,
        None => current_dir_name()?,
    };
    let scaffold = scaffold(&args, repo_name);

    info!("Writing {:?}", path);
    DocumentWriter::write(&path, &scaffold).map_err(RigError::from)?;

    println!("✅ Wrote {}", path.display());
    println!();
    println!("Next steps:");
    println!("  rig validate {}", path.display());
    println!("  rig build {} dev <image-tag>", path.display());

    Ok(())
}

fn current_dir_name() -> Result<String> {
    let cwd = std::env::current_dir().context("Failed to read the current directory")?;
    Ok(dir_name(&cwd))
}

fn dir_name(dir: &Path) -> String {
    dir.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "app".to_string())
}

/// A Kubernetes-style name: lowercase alphanumerics joined by single dashes.
fn app_name_from(name: &str) -> String {
    let mut app = String::new();
    for c in name.chars().map(|c| c.to_ascii_lowercase()) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            app.push(c);
        } else if !app.is_empty() && !app.ends_with('-') {
            app.push('-');
        }
    }

    match app.trim_end_matches('-') {
        "" => "app".to_string(),
        app => app.to_string(),
    }
}

fn scaffold(args: &InitArgs, repo_name: String) -> Value {
    let app_name = args
        .app_name
        .clone()
        .unwrap_or_else(|| app_name_from(&repo_name));

    json!({
        "version": 1,
        "repoName": repo_name,
        "appName": app_name,
        "namespace": args.namespace,
        "servicePort": args.service_port,
        "readinessPath": args.readiness_path,
        "cpuMin": args.cpu_min,
        "cpuMax": args.cpu_max,
        "memory": args.memory,
    })
}
