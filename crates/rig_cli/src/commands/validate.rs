//! Validate command - Check an input file against its schema.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use tracing::debug;

use super::{finish, Settings};

#[derive(Args)]
pub struct ValidateArgs {
    /// Input file (build.yaml, k8s.yaml, k8s.json, ...)
    file: PathBuf,
}

pub async fn execute(args: ValidateArgs, settings: &Settings) -> Result<()> {
    debug!("Validating {:?}", args.file);

    let outcome = settings.pipeline().validate(&args.file)?;
    finish(outcome)
}
