//! Reading SKILL.md and splitting it into metadata block and body
//!
//! The manifest must open with a `---` line and close the metadata block
//! with a second `---` line. Anything after the closing delimiter is the
//! body. Failing this convention is fatal for the run.

use crate::error::StructuralError;
use crate::package::{Package, MANIFEST_FILE};
use std::fs;
use tracing::{debug, trace};

const DELIMITER: &str = "---";

/// The manifest of a package, split at its delimiters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestDocument {
    raw: String,
    metadata_block: String,
    body: String,
}

impl ManifestDocument {
    /// Split raw manifest text into metadata block and body.
    ///
    /// Both segments are trimmed of surrounding whitespace.
    pub fn parse(raw: impl Into<String>) -> Result<Self, StructuralError> {
        let raw = raw.into();
        let text = raw.strip_prefix('\u{feff}').unwrap_or(&raw);

        let mut lines = text.split_inclusive('\n');
        let first = lines.next().unwrap_or_default();
        if !is_delimiter(first) {
            return Err(StructuralError::missing_opening_delimiter());
        }

        let block_start = first.len();
        let mut offset = block_start;
        for line in lines {
            if is_delimiter(line) {
                let metadata_block = text[block_start..offset].trim().to_string();
                let body = text[offset + line.len()..].trim().to_string();
                trace!(
                    "Split manifest: {} bytes of metadata, {} bytes of body",
                    metadata_block.len(),
                    body.len()
                );
                return Ok(Self {
                    raw,
                    metadata_block,
                    body,
                });
            }
            offset += line.len();
        }

        Err(StructuralError::missing_closing_delimiter())
    }

    /// Full manifest text as read from disk
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Text between the two delimiter lines
    pub fn metadata_block(&self) -> &str {
        &self.metadata_block
    }

    /// Text after the closing delimiter
    pub fn body(&self) -> &str {
        &self.body
    }
}

fn is_delimiter(line: &str) -> bool {
    line.trim_end() == DELIMITER
}

/// Locate, read and split the manifest of a package.
///
/// A manifest present only under a different letter case is reported as
/// [`StructuralError::MiscasedManifest`], not as missing. Entry names are
/// compared from the directory listing so the check also holds on
/// case-insensitive filesystems.
pub fn read_manifest(package: &Package) -> Result<ManifestDocument, StructuralError> {
    let names = package.entry_names();

    if !names.iter().any(|n| n == MANIFEST_FILE) {
        return match names
            .into_iter()
            .find(|n| n.eq_ignore_ascii_case(MANIFEST_FILE))
        {
            Some(found) => Err(StructuralError::MiscasedManifest { found }),
            None => Err(StructuralError::MissingManifest),
        };
    }

    let path = package.manifest_path();
    debug!("Reading manifest {}", path.display());
    let raw = fs::read_to_string(&path).map_err(|e| StructuralError::Unreadable {
        message: e.to_string(),
    })?;

    ManifestDocument::parse(raw)
}
