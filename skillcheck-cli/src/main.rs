//! Skillcheck CLI - structural and content validator for skill packages.
//!
//! Commands:
//! - `skillcheck validate [path]`: Validate a skill package and print the report
//! - `skillcheck package <path> [output_dir]`: Validate, then write `<name>.skill`
//!
//! Environment variables:
//! - SKILLCHECK_STRICT, SKILLCHECK_FORMAT: Defaults for `--strict` and `--format`
//! - SKILLCHECK_LIMITS__<KEY>: Override a validation limit
//! - RUST_LOG: Log filter when `--debug` is not given
//!
//! Exit codes:
//! - 0: Success
//! - 1: Validation failed or error

mod cli;
mod package;
mod validate;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use package::PackageOptions;

/// Map a command result to an exit code, printing errors
fn handle_result(result: anyhow::Result<i32>) -> i32 {
    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            1
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Initialize tracing with appropriate level
    let filter = if cli.debug {
        EnvFilter::new("skillcheck=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .init();

    let exit_code = match cli.command {
        Commands::Validate {
            path,
            strict,
            format,
        } => handle_result(validate::run_validate(&path, strict, format)),

        Commands::Package {
            path,
            output_dir,
            strict,
            skip_validation,
            validate_only,
            format,
        } => handle_result(package::run_package(
            &path,
            &output_dir,
            &PackageOptions {
                strict,
                skip_validation,
                validate_only,
                format,
            },
        )),
    };

    std::process::exit(exit_code);
}
