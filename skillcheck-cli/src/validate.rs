//! `skillcheck validate`

use std::path::{Path, PathBuf};

use anyhow::Result;
use skillcheck::{
    print_report_table, OutputFormat, Package, SkillValidator, SkillcheckConfig,
    ValidationReport,
};

/// Load configuration and apply command line overrides on top
pub fn resolve_config(strict: bool, format: Option<OutputFormat>) -> Result<SkillcheckConfig> {
    let mut config = SkillcheckConfig::load()?;
    config.strict |= strict;
    if let Some(format) = format {
        config.format = format;
    }
    tracing::debug!(
        "Effective settings: strict={}, format={}",
        config.strict,
        config.format
    );
    Ok(config)
}

/// Canonicalize existing paths so `.` resolves to the real directory name
pub fn resolve_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}

/// Print a report in the requested format
pub fn print_report(report: &ValidationReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print!("{}", report.render_text()),
        OutputFormat::Table => print_report_table(report),
        OutputFormat::Json => println!("{}", report.render_json()?),
    }
    Ok(())
}

/// Validate a package and return the exit code for its verdict
pub fn run_validate(path: &Path, strict: bool, format: Option<OutputFormat>) -> Result<i32> {
    let config = resolve_config(strict, format)?;
    let package = Package::new(resolve_path(path));

    let report = SkillValidator::from_config(&config).validate(&package);
    print_report(&report, config.format)?;

    Ok(if report.overall_pass() { 0 } else { 1 })
}
