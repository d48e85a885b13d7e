//! rig CLI - Main entry point.
//!
//! Exit codes:
//! - 0: Success
//! - 1: General error
//! - 2: Invalid arguments or configuration
//! - 3: Validation failure
//! - 4: Template error
//! - 5: Template repository error

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use rig_core::RigError;
use rig_document::DocumentError;

mod commands;

use commands::{Cli, Commands, SchemaViolation};

/// CI-friendly exit codes
pub struct ExitCodes;

impl ExitCodes {
    pub const SUCCESS: u8 = 0;
    pub const GENERAL_ERROR: u8 = 1;
    pub const INVALID_ARGS: u8 = 2;
    pub const VALIDATION_FAILURE: u8 = 3;
    pub const TEMPLATE_ERROR: u8 = 4;
    pub const REPOSITORY_ERROR: u8 = 5;
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let settings = cli.settings();
    let result = match cli.command {
        Commands::Init(args) => commands::init::execute(args).await,
        Commands::Validate(args) => commands::validate::execute(args, &settings).await,
        Commands::Build(args) => commands::build::execute(args, &settings).await,
        Commands::Breakout(args) => commands::breakout::execute(args, &settings).await,
        Commands::Install(args) => commands::install::execute(args, &settings).await,
    };

    match result {
        Ok(()) => ExitCode::from(ExitCodes::SUCCESS),
        Err(e) => {
            report_error(&e);
            ExitCode::from(categorize_error(&e))
        }
    }
}

/// Log to stderr; stdout carries rendered output only.
fn init_logging(verbose: bool, quiet: bool) {
    let default_directives = if verbose {
        "rig=debug,warn"
    } else if quiet {
        "rig=error,error"
    } else {
        "rig=info,warn"
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives));

    let log_result = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    if log_result.is_err() {
        // Logging already initialized, continue
    }
}

fn rig_error(e: &anyhow::Error) -> Option<&RigError> {
    e.chain().find_map(|cause| cause.downcast_ref::<RigError>())
}

/// Expected failures get a one-line message, anything else the full chain.
fn report_error(e: &anyhow::Error) {
    if let Some(violation) = e.downcast_ref::<SchemaViolation>() {
        eprintln!("{}", violation);
        return;
    }

    match rig_error(e) {
        Some(err) if err.is_user_facing() => eprintln!("❌ Error: {:#}", e),
        _ => eprintln!("❌ Error: {:?}", e),
    }
}

/// Categorize error to determine exit code
fn categorize_error(e: &anyhow::Error) -> u8 {
    if e.downcast_ref::<SchemaViolation>().is_some() {
        return ExitCodes::VALIDATION_FAILURE;
    }

    match rig_error(e) {
        Some(err) if err.is_configuration() => ExitCodes::INVALID_ARGS,
        Some(err) if err.is_repository() => ExitCodes::REPOSITORY_ERROR,
        Some(RigError::Document(DocumentError::InvalidFormat { .. })) | Some(RigError::NotAMapping(_)) => {
            ExitCodes::VALIDATION_FAILURE
        }
        Some(RigError::Template(_)) | Some(RigError::Document(DocumentError::InvalidSchema { .. })) => {
            ExitCodes::TEMPLATE_ERROR
        }
        _ => ExitCodes::GENERAL_ERROR,
    }
}
