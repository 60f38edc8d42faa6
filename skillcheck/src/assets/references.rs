//! Checks for reference documents under `references/`

use crate::config::Limits;
use crate::outcome::{CheckCategory, CheckOutcome};
use crate::package::{file_label, Package, REFERENCES_DIR};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use tracing::{debug, warn};

/// Extensions recognized as reference documents
pub const REFERENCE_EXTENSIONS: [&str; 1] = ["md"];

static HEADING_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^#+.*$").expect("valid heading line regex"));

/// Validate every reference document directly inside `references/`.
///
/// Only findings are recorded; a substantive document produces no outcome.
pub fn validate_references(package: &Package, limits: &Limits) -> Vec<CheckOutcome> {
    let mut outcomes = Vec::new();

    for path in package.files_in(REFERENCES_DIR, &REFERENCE_EXTENSIONS) {
        let name = file_label(&path);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                warn!("Cannot read reference {}: {}", path.display(), e);
                outcomes.push(CheckOutcome::error(
                    CheckCategory::Content,
                    format!("Cannot read reference {}: {}", name, e),
                ));
                continue;
            }
        };

        let trimmed = content.trim();
        if trimmed.chars().count() < limits.reference_min_chars {
            debug!("Reference {} is nearly empty", name);
            outcomes.push(CheckOutcome::warning(
                CheckCategory::Content,
                format!("Reference file nearly empty: {}", name),
            ));
        }

        let prose = HEADING_LINE.replace_all(trimmed, "");
        if prose.trim().chars().count() < limits.reference_min_chars {
            outcomes.push(CheckOutcome::warning(
                CheckCategory::Content,
                format!("Reference file has headings but little content: {}", name),
            ));
        }
    }

    outcomes
}
