//! Error types for skillcheck
//!
//! Two families live here. [`StructuralError`] is the fatal gate: when the
//! package root or its manifest cannot be read, nothing else is validated.
//! [`SkillcheckError`] covers the infrastructure around validation
//! (configuration, packaging, I/O) and is what callers propagate with `?`.
//!
//! Rule violations are never errors in this sense. They are recorded as
//! [`CheckOutcome`](crate::CheckOutcome)s and aggregated into a report.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for skillcheck operations
pub type Result<T> = std::result::Result<T, SkillcheckError>;

/// Fatal failures that abort a validation run before any rule is evaluated
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructuralError {
    /// The package root does not exist
    #[error("Skill directory not found: {}", path.display())]
    RootNotFound { path: PathBuf },

    /// The package root exists but is not a directory
    #[error("Path is not a directory: {}", path.display())]
    NotADirectory { path: PathBuf },

    /// No manifest file in the package root
    #[error("SKILL.md not found (required)")]
    MissingManifest,

    /// A manifest exists under a different letter case
    #[error("SKILL.md must be uppercase (found: {found})")]
    MiscasedManifest { found: String },

    /// The manifest does not follow the `---` metadata block convention
    #[error("{reason}")]
    MalformedDelimiter { reason: String },

    /// The manifest exists but could not be read as UTF-8 text
    #[error("Cannot read SKILL.md: {message}")]
    Unreadable { message: String },
}

impl StructuralError {
    pub(crate) fn missing_opening_delimiter() -> Self {
        Self::MalformedDelimiter {
            reason: "SKILL.md must start with '---' (YAML frontmatter delimiter)".to_string(),
        }
    }

    pub(crate) fn missing_closing_delimiter() -> Self {
        Self::MalformedDelimiter {
            reason: "Invalid frontmatter: missing closing '---'".to_string(),
        }
    }
}

/// Errors raised around a validation run
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SkillcheckError {
    /// IO operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration could not be loaded or extracted
    #[error("Failed to load configuration: {0}")]
    Config(#[from] Box<figment::Error>),

    /// Writing the package archive failed
    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// Walking the package tree failed
    #[error("Failed to walk package directory: {0}")]
    Walk(#[from] walkdir::Error),

    /// JSON rendering failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The package did not pass validation, so it must not be packaged
    #[error("Validation failed: refusing to package '{name}'")]
    ValidationFailed { name: String },

    /// The fatal gate failed outside of a validation run
    #[error(transparent)]
    Structural(#[from] StructuralError),
}

impl From<figment::Error> for SkillcheckError {
    fn from(error: figment::Error) -> Self {
        SkillcheckError::Config(Box::new(error))
    }
}
