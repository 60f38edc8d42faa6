//! Skillcheck
//!
//! Structural and content validation for skill packages: a directory with a
//! `SKILL.md` manifest (a YAML metadata block followed by a Markdown body)
//! and optional `scripts/`, `references/` and `assets/` subdirectories.
//!
//! ## Overview
//!
//! A run reads the package, evaluates every rule and collects the results as
//! [`CheckOutcome`]s. Rule violations never abort the run. Only a missing
//! root, a missing or miscased manifest, or broken `---` delimiters stop it,
//! and even then the result is a [`ValidationReport`] holding that one error.
//!
//! ```no_run
//! use skillcheck::{Package, ReportMode, SkillValidator, Limits};
//!
//! let validator = SkillValidator::new(Limits::default(), ReportMode::Standard);
//! let report = validator.validate(&Package::new("skills/pdf-tools"));
//! print!("{}", report.render_text());
//! std::process::exit(if report.overall_pass() { 0 } else { 1 });
//! ```
//!
//! ## Verdict
//!
//! A report passes when it holds no failed error-level outcome. In
//! [`ReportMode::Strict`] every failed warning counts as an error too.

pub mod archive;
pub mod assets;
pub mod body;
pub mod config;
pub mod error;
pub mod fields;
pub mod manifest;
pub mod metadata;
pub mod outcome;
pub mod package;
pub mod report;
pub mod structure;
pub mod table;
pub mod validator;

// Re-export key types
pub use archive::{package, PackageArchive};
pub use config::{ConfigLoader, Limits, OutputFormat, SkillcheckConfig};
pub use error::{Result, SkillcheckError, StructuralError};
pub use manifest::{read_manifest, ManifestDocument};
pub use metadata::{Metadata, MetadataValue};
pub use outcome::{CheckCategory, CheckOutcome, Severity};
pub use package::{Package, MANIFEST_FILE};
pub use report::{ReportMode, ValidationReport};
pub use table::{print_report_table, render_table};
pub use validator::{validate, SkillValidator};
