//! Install command - Record a remote template in rig.yaml.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use rig_core::{parse_parameters, InstallRequest, TemplateUri};

use super::Settings;

#[derive(Args)]
pub struct InstallArgs {
    /// Template to install: [host/]owner/repo/template[#version]
    uri: String,

    /// Parameter values as key=value (repeatable, comma-separated)
    #[arg(short, long = "parameters", value_name = "KEY=VALUE")]
    parameters: Vec<String>,

    /// Directory to write rig.yaml into
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Overwrite an existing rig.yaml
    #[arg(long)]
    force: bool,
}

pub async fn execute(args: InstallArgs, settings: &Settings) -> Result<()> {
    let uri = TemplateUri::parse(&args.uri)?;
    let overrides = parse_parameters(&args.parameters)?;
    let installer = settings.installer()?;

    println!("Installing {}...", uri);

    let (path, descriptor) = installer.install(&InstallRequest {
        uri,
        target_dir: args.output_dir,
        overrides,
        force: args.force,
    })?;

    println!("📄 Wrote {} ({} parameters)", path.display(), descriptor.parameters.len());
    println!("Done. Add static parameters to rig.yaml then build the template with 'rig build'.");

    Ok(())
}
