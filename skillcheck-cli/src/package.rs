//! `skillcheck package`

use std::path::Path;

use anyhow::Result;
use skillcheck::structure::check_root;
use skillcheck::{OutputFormat, Package, SkillValidator};

use crate::validate::{print_report, resolve_config, resolve_path};

/// Options for a package run
#[derive(Debug, Clone, Default)]
pub struct PackageOptions {
    pub strict: bool,
    pub skip_validation: bool,
    pub validate_only: bool,
    pub format: Option<OutputFormat>,
}

/// Validate and package a skill, returning the exit code
pub fn run_package(path: &Path, output_dir: &Path, options: &PackageOptions) -> Result<i32> {
    let config = resolve_config(options.strict, options.format)?;
    let package = Package::new(resolve_path(path));

    let overall_pass = if options.skip_validation {
        tracing::warn!("Skipping validation for {}", package);
        check_root(&package)?;
        true
    } else {
        let report = SkillValidator::from_config(&config).validate(&package);
        print_report(&report, config.format)?;
        report.overall_pass()
    };

    if options.validate_only {
        return Ok(if overall_pass { 0 } else { 1 });
    }

    let archive = skillcheck::package(&package, output_dir, overall_pass)?;

    let mut lines = Vec::with_capacity(archive.entries.len() + 1);
    lines.extend(archive.entries.iter().map(|entry| format!("  Added: {}", entry)));
    lines.push(format!(
        "Packaged skill to: {} ({} bytes)",
        archive.path.display(),
        archive.size
    ));

    // keep stdout parseable when the report is JSON
    for line in lines {
        if config.format == OutputFormat::Json {
            eprintln!("{}", line);
        } else {
            println!("{}", line);
        }
    }

    Ok(0)
}
