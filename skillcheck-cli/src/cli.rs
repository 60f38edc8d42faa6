//! CLI definition for the skillcheck command-line interface.
//!
//! Only depends on `clap`, `std` and the library's [`OutputFormat`].

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use skillcheck::OutputFormat;

/// Skillcheck - structural and content validator for skill packages.
///
/// A skill package is a directory holding a SKILL.md manifest (a YAML
/// metadata block between `---` lines followed by a Markdown body) and
/// optional scripts/, references/ and assets/ directories.
#[derive(Parser, Debug)]
#[command(name = "skillcheck")]
#[command(version)]
#[command(about = "Structural and content validator for skill packages")]
#[command(
    long_about = "Skillcheck validates skill packages: the SKILL.md manifest, its metadata \
    block, the body, helper scripts and reference documents.\n\n\
    Settings are read from ~/.skillcheck/config.{toml,yaml,json}, then \
    ./.skillcheck/config.{toml,yaml,json}, then SKILLCHECK_* environment variables.\n\n\
    Environment variables:\n  \
    SKILLCHECK_STRICT                   Treat warnings as errors\n  \
    SKILLCHECK_FORMAT                   Output format (text, table, json)\n  \
    SKILLCHECK_LIMITS__BODY_MAX_LINES   Override a limit (any key under limits)"
)]
pub struct Cli {
    /// Enable debug output to stderr
    #[arg(short, long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate a skill package and print the report
    ///
    /// Exits 0 when the package passes and 1 otherwise.
    Validate {
        /// Path to the skill directory
        #[arg(default_value = ".")]
        path: PathBuf,
        /// Treat warnings as errors
        #[arg(long)]
        strict: bool,
        /// Output format: text, table or json
        #[arg(long, value_name = "FORMAT")]
        format: Option<OutputFormat>,
    },

    /// Validate a skill package and write it to <name>.skill
    ///
    /// Refuses to package when validation fails.
    Package {
        /// Path to the skill directory
        path: PathBuf,
        /// Directory the archive is written to
        #[arg(default_value = ".")]
        output_dir: PathBuf,
        /// Treat warnings as errors
        #[arg(long)]
        strict: bool,
        /// Package without validating first
        #[arg(long, conflicts_with = "validate_only")]
        skip_validation: bool,
        /// Validate and print the report without packaging
        #[arg(long)]
        validate_only: bool,
        /// Output format for the report: text, table or json
        #[arg(long, value_name = "FORMAT")]
        format: Option<OutputFormat>,
    },
}
