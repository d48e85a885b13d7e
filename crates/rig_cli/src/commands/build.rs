//! Build command - Render a deployment to stdout or build from rig.yaml.
//!
//! With an input file, the file's single stdout template is rendered for the
//! given cluster and image tag. A directory is rendered as a local template
//! and `--from-stdin` renders a template piped on stdin. Without any of these,
//! the remote template recorded in the current directory's `rig.yaml` is built.

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tracing::{info, warn};

use rig_core::{parse_parameters, RigDescriptor};

use super::{finish, Settings};

#[derive(Args)]
pub struct BuildArgs {
    /// Input file (k8s.yaml) or local template directory; omit to build from rig.yaml
    file: Option<PathBuf>,

    /// Target cluster: dev, int or prod
    cluster: Option<String>,

    /// Image tag to deploy
    image_tag: Option<String>,

    /// Parameter overrides as key=value (repeatable, comma-separated)
    #[arg(short, long = "parameters", value_name = "KEY=VALUE")]
    parameters: Vec<String>,

    /// Write rendered files into this directory instead of stdout
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Render a template read from stdin
    #[arg(long, conflicts_with_all = ["file", "output_dir"])]
    from_stdin: bool,
}

pub async fn execute(args: BuildArgs, settings: &Settings) -> Result<()> {
    if args.from_stdin {
        let overrides = parse_parameters(&args.parameters)?;
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read the template from stdin")?;

        let outcome = settings
            .pipeline()
            .render_template_text("<stdin>", &text, &overrides)?;
        return finish(outcome);
    }

    match args.file {
        Some(dir) if dir.is_dir() => {
            let overrides = parse_parameters(&args.parameters)?;
            let outcome = settings
                .pipeline()
                .render_template_dir(&dir, &overrides, args.output_dir.as_deref())
                .await?;
            finish(outcome)
        }
        Some(file) => {
            if !args.parameters.is_empty() || args.output_dir.is_some() {
                warn!("--parameters and --output-dir only apply to template directories and rig.yaml");
            }

            let cluster = args.cluster.unwrap_or_default();
            let image_tag = args.image_tag.unwrap_or_default();
            let outcome = settings.pipeline().build(&file, &cluster, &image_tag)?;
            finish(outcome)
        }
        None => {
            let overrides = parse_parameters(&args.parameters)?;
            let cwd = std::env::current_dir().context("Failed to read the current directory")?;
            let descriptor = RigDescriptor::locate(&cwd)?;
            info!("Building from {:?}", descriptor);

            let outcome = settings
                .installer()?
                .build(&descriptor, &overrides, args.output_dir.as_deref())
                .await?;
            finish(outcome)
        }
    }
}
