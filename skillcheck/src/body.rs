//! Body content checks for SKILL.md

use crate::config::Limits;
use crate::outcome::{CheckCategory, CheckOutcome};
use crate::package::Package;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, trace};

/// `[label](target.md)` links
static MARKDOWN_REFERENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+\.md)\)").expect("valid reference regex"));

/// ATX heading at the start of a line
static HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^#{1,6} ").expect("valid heading regex"));

/// URL scheme prefix such as `https:` or `mailto:`
static URL_SCHEME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.-]*:").expect("valid scheme regex"));

/// Markers left behind by scaffolding
const PLACEHOLDER_MARKERS: [&str; 2] = ["[TODO", "TODO:"];

/// A `[label](target)` link found in the body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference<'a> {
    pub label: &'a str,
    pub target: &'a str,
}

/// Every `.md` link in the body, in source order, repeats included
pub fn references(body: &str) -> impl Iterator<Item = Reference<'_>> {
    MARKDOWN_REFERENCE.captures_iter(body).filter_map(|caps| {
        Some(Reference {
            label: caps.get(1)?.as_str(),
            target: caps.get(2)?.as_str(),
        })
    })
}

/// Whether a link target points outside the package
pub fn is_external(target: &str) -> bool {
    URL_SCHEME.is_match(target)
}

/// Validate the body of the manifest
pub fn validate_body(body: &str, package: &Package, limits: &Limits) -> Vec<CheckOutcome> {
    let body = body.trim();
    if body.is_empty() {
        return vec![CheckOutcome::error(
            CheckCategory::Content,
            "SKILL.md body is empty",
        )];
    }

    let mut outcomes = Vec::new();
    let line_count = body.split('\n').count();
    debug!("Validating body ({} lines)", line_count);

    if line_count > limits.body_max_lines {
        outcomes.push(CheckOutcome::warning(
            CheckCategory::Content,
            format!(
                "SKILL.md body exceeds {} lines ({}). Consider moving detail to references/",
                limits.body_max_lines, line_count
            ),
        ));
    }

    if PLACEHOLDER_MARKERS.iter().any(|m| body.contains(m)) {
        outcomes.push(CheckOutcome::warning(
            CheckCategory::Content,
            "SKILL.md contains TODO placeholders",
        ));
    }

    if !HEADING.is_match(body) {
        outcomes.push(CheckOutcome::warning(
            CheckCategory::Content,
            "SKILL.md should have at least one heading",
        ));
    }

    for reference in references(body) {
        if is_external(reference.target) {
            continue;
        }
        let resolved = package.resolve(reference.target);
        trace!(
            "Resolving reference [{}]({}) -> {}",
            reference.label,
            reference.target,
            resolved.display()
        );
        if !resolved.exists() {
            outcomes.push(CheckOutcome::warning(
                CheckCategory::Content,
                format!("Broken reference: {} (file not found)", reference.target),
            ));
        }
    }

    outcomes.push(CheckOutcome::pass(
        CheckCategory::Content,
        format!("Valid body ({} lines)", line_count),
    ));
    outcomes
}
