//! Aggregation of check outcomes into a pass/fail verdict
//!
//! A [`ValidationReport`] is built once, at the end of a run, from the full
//! ordered list of outcomes. Strict mode is applied here and only here: the
//! outcomes keep the severity their check assigned, and the report maps
//! warnings to errors when tallying and grouping.

use crate::outcome::{CheckOutcome, Severity};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

const RULE_WIDTH: usize = 50;

/// How warnings are tallied
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportMode {
    /// Warnings never fail the verdict
    #[default]
    Standard,
    /// Every warning counts as an error
    Strict,
}

impl ReportMode {
    /// Map a boolean `strict` flag to a mode
    pub fn from_strict(strict: bool) -> Self {
        if strict {
            ReportMode::Strict
        } else {
            ReportMode::Standard
        }
    }

    /// Severity an outcome is tallied under in this mode
    pub fn effective_severity(&self, outcome: &CheckOutcome) -> Severity {
        match (self, outcome.severity) {
            (ReportMode::Strict, Severity::Warning) if !outcome.passed => Severity::Error,
            (_, severity) => severity,
        }
    }
}

/// The aggregate result of one validation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    skill: String,
    mode: ReportMode,
    overall_pass: bool,
    error_count: usize,
    warning_count: usize,
    outcomes: Vec<CheckOutcome>,
}

impl ValidationReport {
    /// Build a report from the outcomes of a run
    pub fn new(skill: impl Into<String>, outcomes: Vec<CheckOutcome>, mode: ReportMode) -> Self {
        let (error_count, warning_count) =
            outcomes
                .iter()
                .filter(|o| !o.passed)
                .fold((0, 0), |(errors, warnings), o| {
                    match mode.effective_severity(o) {
                        Severity::Error => (errors + 1, warnings),
                        Severity::Warning => (errors, warnings + 1),
                        Severity::Info => (errors, warnings),
                    }
                });

        Self {
            skill: skill.into(),
            mode,
            overall_pass: error_count == 0,
            error_count,
            warning_count,
            outcomes,
        }
    }

    /// Re-tally the same outcomes under another mode
    pub fn with_mode(self, mode: ReportMode) -> Self {
        Self::new(self.skill, self.outcomes, mode)
    }

    /// Directory name of the validated skill
    pub fn skill(&self) -> &str {
        &self.skill
    }

    pub fn mode(&self) -> ReportMode {
        self.mode
    }

    /// True iff no outcome is tallied as an error
    pub fn overall_pass(&self) -> bool {
        self.overall_pass
    }

    pub fn error_count(&self) -> usize {
        self.error_count
    }

    pub fn warning_count(&self) -> usize {
        self.warning_count
    }

    /// All outcomes in the order they were produced
    pub fn outcomes(&self) -> &[CheckOutcome] {
        &self.outcomes
    }

    /// Passed outcomes
    pub fn passed(&self) -> Vec<&CheckOutcome> {
        self.outcomes.iter().filter(|o| o.passed).collect()
    }

    /// Failed outcomes tallied as warnings under the report mode
    pub fn warnings(&self) -> Vec<&CheckOutcome> {
        self.failed_with(Severity::Warning)
    }

    /// Failed outcomes tallied as errors under the report mode
    pub fn errors(&self) -> Vec<&CheckOutcome> {
        self.failed_with(Severity::Error)
    }

    fn failed_with(&self, severity: Severity) -> Vec<&CheckOutcome> {
        self.outcomes
            .iter()
            .filter(|o| !o.passed && self.mode.effective_severity(o) == severity)
            .collect()
    }

    /// One-line verdict
    pub fn summary(&self) -> String {
        match (self.error_count, self.warning_count) {
            (0, 0) => "All checks passed!".to_string(),
            (0, warnings) => format!("Passed with {} warning(s)", warnings),
            (errors, warnings) => {
                format!("Failed: {} error(s), {} warning(s)", errors, warnings)
            }
        }
    }

    /// Render the report as grouped, human-readable text
    pub fn render_text(&self) -> String {
        let rule = "=".repeat(RULE_WIDTH);
        let mut out = String::new();

        let _ = writeln!(out, "Validating skill: {}", self.skill);
        let _ = writeln!(out, "{}", rule);

        for (title, items) in [
            ("Passed:", self.passed()),
            ("Warnings:", self.warnings()),
            ("Errors:", self.errors()),
        ] {
            if items.is_empty() {
                continue;
            }
            let _ = writeln!(out, "\n{}", title);
            for outcome in items {
                let _ = writeln!(out, "   \u{2022} {}", outcome.message);
            }
        }

        let _ = writeln!(out, "\n{}", rule);
        let _ = writeln!(out, "{}", self.summary());
        out
    }

    /// Render the report as pretty-printed JSON
    pub fn render_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
