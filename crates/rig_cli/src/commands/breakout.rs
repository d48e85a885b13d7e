//! Breakout command - Render an input file into generated files.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use rig_core::BreakoutRequest;

use super::{finish, Settings};

#[derive(Args)]
pub struct BreakoutArgs {
    /// Input file (build.yaml, k8s.yaml, ...)
    file: PathBuf,

    /// Directory to write the generated files into [default: .]
    output_dir: Option<PathBuf>,

    /// Template variant, e.g. kustomize or gotemplates
    variant: Option<String>,

    /// Keep the input file instead of deleting it
    #[arg(short, long)]
    keep_input: bool,
}

pub async fn execute(args: BreakoutArgs, settings: &Settings) -> Result<()> {
    let request = BreakoutRequest {
        file: args.file,
        output_dir: args.output_dir.unwrap_or_else(|| PathBuf::from(".")),
        variant: args.variant,
        keep_input_file: args.keep_input,
    };

    let outcome = settings.pipeline().breakout(&request).await?;
    finish(outcome)
}
