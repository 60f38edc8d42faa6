//! Runs every check over a package and aggregates the result
//!
//! The run is a single pass with a fatal gate in front. If the root or the
//! manifest cannot be read, the report holds that one error. Otherwise the
//! checks run in a fixed order and every outcome is kept:
//!
//! 1. directory layout
//! 2. metadata block (parse, required fields, unknown keys, optional shapes)
//! 3. body
//! 4. scripts
//! 5. reference documents

use crate::assets::{validate_references, validate_scripts};
use crate::body::validate_body;
use crate::config::{Limits, SkillcheckConfig};
use crate::error::StructuralError;
use crate::manifest::{read_manifest, ManifestDocument};
use crate::metadata::parse_and_check;
use crate::outcome::{CheckCategory, CheckOutcome};
use crate::package::Package;
use crate::report::{ReportMode, ValidationReport};
use crate::structure::{check_root, validate_structure};
use tracing::{debug, info, warn};

/// Validates skill packages with a fixed set of limits and a report mode
#[derive(Debug, Clone, Default)]
pub struct SkillValidator {
    limits: Limits,
    mode: ReportMode,
}

impl SkillValidator {
    pub fn new(limits: Limits, mode: ReportMode) -> Self {
        Self { limits, mode }
    }

    /// Build a validator from loaded configuration
    pub fn from_config(config: &SkillcheckConfig) -> Self {
        Self::new(config.limits, ReportMode::from_strict(config.strict))
    }

    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    pub fn mode(&self) -> ReportMode {
        self.mode
    }

    /// Validate a package and produce its report.
    ///
    /// Never fails: problems with the package are outcomes in the report.
    pub fn validate(&self, package: &Package) -> ValidationReport {
        info!("Validating skill at {}", package);

        let outcomes = match open(package) {
            Ok(document) => self.run_checks(package, &document),
            Err(error) => {
                warn!("Structural check failed for {}: {}", package, error);
                vec![CheckOutcome::error(
                    CheckCategory::Structure,
                    error.to_string(),
                )]
            }
        };

        let report = ValidationReport::new(package.directory_name(), outcomes, self.mode);
        info!(
            "Skill '{}': {}",
            report.skill(),
            if report.overall_pass() { "passed" } else { "failed" }
        );
        report
    }

    fn run_checks(&self, package: &Package, document: &ManifestDocument) -> Vec<CheckOutcome> {
        let mut outcomes = validate_structure(package);

        let (metadata, metadata_outcomes) =
            parse_and_check(document.metadata_block(), package, &self.limits);
        if metadata.is_none() {
            debug!("Continuing without metadata for {}", package);
        }
        outcomes.extend(metadata_outcomes);

        outcomes.extend(validate_body(document.body(), package, &self.limits));
        outcomes.extend(validate_scripts(package, &self.limits));
        outcomes.extend(validate_references(package, &self.limits));

        debug!("Collected {} outcomes for {}", outcomes.len(), package);
        outcomes
    }
}

/// Fatal gate: the root must be a directory holding a well-formed manifest
fn open(package: &Package) -> Result<ManifestDocument, StructuralError> {
    check_root(package)?;
    read_manifest(package)
}

/// Validate a package with default limits
pub fn validate(package: &Package, mode: ReportMode) -> ValidationReport {
    SkillValidator::new(Limits::default(), mode).validate(package)
}
