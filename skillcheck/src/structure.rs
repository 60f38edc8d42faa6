//! Directory layout checks
//!
//! [`check_root`] is part of the fatal gate. [`validate_structure`] runs
//! once the manifest has been read and only records outcomes.

use crate::error::StructuralError;
use crate::outcome::{CheckCategory, CheckOutcome};
use crate::package::{Package, CONVENTIONAL_DIRS, MANIFEST_FILE};
use tracing::trace;

/// Entries that should not ship inside a skill
pub const FORBIDDEN_FILES: [&str; 15] = [
    "README.md",
    "readme.md",
    "README.txt",
    "CHANGELOG.md",
    "changelog.md",
    "CHANGELOG.txt",
    "INSTALLATION.md",
    "INSTALL.md",
    "install.md",
    "INSTALLATION_GUIDE.md",
    "QUICK_REFERENCE.md",
    ".gitignore",
    ".git",
    "__pycache__",
    ".pytest_cache",
];

/// Check that the package root exists and is a directory
pub fn check_root(package: &Package) -> Result<(), StructuralError> {
    let root = package.root_path();
    if !root.exists() {
        return Err(StructuralError::RootNotFound {
            path: root.to_path_buf(),
        });
    }
    if !root.is_dir() {
        return Err(StructuralError::NotADirectory {
            path: root.to_path_buf(),
        });
    }
    Ok(())
}

/// Whether an entry name is on the forbidden list
pub fn is_forbidden(name: &str) -> bool {
    FORBIDDEN_FILES.contains(&name)
}

/// Record the layout findings of a package whose manifest was read
pub fn validate_structure(package: &Package) -> Vec<CheckOutcome> {
    let mut outcomes = vec![CheckOutcome::pass(
        CheckCategory::Structure,
        format!("{} found", MANIFEST_FILE),
    )];

    for name in package.entry_names() {
        if is_forbidden(&name) {
            trace!("Forbidden entry '{}'", name);
            outcomes.push(CheckOutcome::warning(
                CheckCategory::Structure,
                format!("Forbidden file found: {}", name),
            ));
        }
    }

    for dir_name in CONVENTIONAL_DIRS {
        let path = package.resolve(dir_name);
        if path.exists() && !path.is_dir() {
            outcomes.push(CheckOutcome::error(
                CheckCategory::Structure,
                format!("{} should be a directory, not a file", dir_name),
            ));
        }
    }

    outcomes
}
