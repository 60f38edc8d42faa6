//! Individual rule results
//!
//! Every rule evaluation produces one [`CheckOutcome`]. Outcomes are plain
//! values: created once by a validator, collected in order, never mutated.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a check outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Must be fixed before the skill can be packaged
    Error,
    /// Should be addressed but does not fail validation
    Warning,
    /// Informational, used for passed checks
    Info,
}

impl Severity {
    /// Get the string representation of the severity
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }

    /// Check if this is an error level
    pub fn is_error(&self) -> bool {
        matches!(self, Severity::Error)
    }

    /// Check if this is a warning level
    pub fn is_warning(&self) -> bool {
        matches!(self, Severity::Warning)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What kind of rule produced an outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckCategory {
    /// Directory layout, manifest presence and delimiters
    Structure,
    /// Metadata block syntax, allowed keys, field shapes
    Schema,
    /// Per-field rules for `name` and `description`
    Field,
    /// Body hygiene, broken references, thin reference documents
    Content,
    /// Script parsing and script conventions
    Syntax,
}

impl CheckCategory {
    /// Display label used in tables
    pub fn label(&self) -> &'static str {
        match self {
            CheckCategory::Structure => "Structure",
            CheckCategory::Schema => "Schema",
            CheckCategory::Field => "Field",
            CheckCategory::Content => "Content",
            CheckCategory::Syntax => "Syntax",
        }
    }
}

impl fmt::Display for CheckCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The result of evaluating a single rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckOutcome {
    pub passed: bool,
    pub severity: Severity,
    pub category: CheckCategory,
    pub message: String,
}

impl CheckOutcome {
    /// A passed check, always reported at `info` level
    pub fn pass(category: CheckCategory, message: impl Into<String>) -> Self {
        Self {
            passed: true,
            severity: Severity::Info,
            category,
            message: message.into(),
        }
    }

    /// A failed check at `error` level
    pub fn error(category: CheckCategory, message: impl Into<String>) -> Self {
        Self {
            passed: false,
            severity: Severity::Error,
            category,
            message: message.into(),
        }
    }

    /// A failed check at `warning` level
    pub fn warning(category: CheckCategory, message: impl Into<String>) -> Self {
        Self {
            passed: false,
            severity: Severity::Warning,
            category,
            message: message.into(),
        }
    }

    /// True for failed checks at `error` level
    pub fn is_error(&self) -> bool {
        !self.passed && self.severity.is_error()
    }

    /// True for failed checks at `warning` level
    pub fn is_warning(&self) -> bool {
        !self.passed && self.severity.is_warning()
    }
}
