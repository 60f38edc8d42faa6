//! Field validators for `name` and `description`

use crate::config::Limits;
use crate::metadata::MetadataValue;
use crate::outcome::{CheckCategory, CheckOutcome};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

/// Lowercase alphanumeric segments joined by single hyphens
static NAME_FORMAT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*$").expect("valid name regex"));

/// First- or second-person pronoun not preceded by a letter
static PERSONAL_VOICE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^|[^A-Za-z])(I|We|You) ").expect("valid voice regex"));

/// Phrases that state when a skill should be invoked
pub const TRIGGER_PHRASES: [&str; 4] = ["use when", "use for", "when", "for"];

/// Check that a name is hyphen-case
pub fn is_hyphen_case(name: &str) -> bool {
    NAME_FORMAT.is_match(name)
}

/// Validate the `name` field.
///
/// The info outcome is only emitted when no rule for this field failed.
pub fn validate_name(
    value: &MetadataValue,
    directory_name: &str,
    limits: &Limits,
) -> Vec<CheckOutcome> {
    let Some(name) = value.as_str() else {
        return vec![CheckOutcome::error(
            CheckCategory::Field,
            format!("'name' must be a string, got: {}", value.type_name()),
        )];
    };

    let mut outcomes = Vec::new();

    let length = name.chars().count();
    if length > limits.name_max_chars {
        outcomes.push(CheckOutcome::error(
            CheckCategory::Field,
            format!(
                "'name' exceeds {} characters: {}",
                limits.name_max_chars, length
            ),
        ));
    }

    if !is_hyphen_case(name) {
        outcomes.push(CheckOutcome::error(
            CheckCategory::Field,
            format!(
                "'name' must be hyphen-case (lowercase letters, digits, single hyphens): {}",
                name
            ),
        ));
    }

    if name != directory_name {
        outcomes.push(CheckOutcome::warning(
            CheckCategory::Field,
            format!(
                "'name' ({}) should match directory name ({})",
                name, directory_name
            ),
        ));
    }

    if outcomes.is_empty() {
        outcomes.push(CheckOutcome::pass(
            CheckCategory::Field,
            format!("Valid name: {}", name),
        ));
    } else {
        trace!("Name '{}' failed {} rule(s)", name, outcomes.len());
    }

    outcomes
}

/// Validate the `description` field
pub fn validate_description(value: &MetadataValue, limits: &Limits) -> Vec<CheckOutcome> {
    let Some(description) = value.as_str() else {
        return vec![CheckOutcome::error(
            CheckCategory::Field,
            format!("'description' must be a string, got: {}", value.type_name()),
        )];
    };

    let mut outcomes = Vec::new();
    let length = description.chars().count();

    if length > limits.description_max_chars {
        outcomes.push(CheckOutcome::error(
            CheckCategory::Field,
            format!(
                "'description' exceeds {} characters: {}",
                limits.description_max_chars, length
            ),
        ));
    }

    if length < limits.description_min_chars {
        outcomes.push(CheckOutcome::warning(
            CheckCategory::Field,
            format!(
                "'description' too short (<{} chars): {}",
                limits.description_min_chars, length
            ),
        ));
    }

    if let Some(pronoun) = personal_pronoun(description) {
        outcomes.push(CheckOutcome::warning(
            CheckCategory::Field,
            format!(
                "'description' should use third-person voice (found: '{}')",
                pronoun
            ),
        ));
    }

    if !has_trigger_phrase(description) {
        outcomes.push(CheckOutcome::warning(
            CheckCategory::Field,
            "'description' should say when to use the skill (e.g. 'Use when...')",
        ));
    }

    outcomes.push(CheckOutcome::pass(
        CheckCategory::Field,
        format!("Valid description ({} chars)", length),
    ));
    outcomes
}

/// First personal pronoun token in the text, if any
pub fn personal_pronoun(text: &str) -> Option<&str> {
    PERSONAL_VOICE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Whether the text states an invocation condition
pub fn has_trigger_phrase(text: &str) -> bool {
    let lower = text.to_lowercase();
    TRIGGER_PHRASES.iter().any(|phrase| lower.contains(phrase))
}
