//! Packaging a validated skill into a distributable `.skill` archive
//!
//! The archive is a ZIP file whose entries all live under a single top-level
//! folder named after the package directory.

use crate::error::{Result, SkillcheckError};
use crate::package::Package;
use std::fs::{self, File};
use std::io;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info, trace, warn};
use walkdir::WalkDir;

/// File extension of packaged skills
pub const ARCHIVE_EXTENSION: &str = "skill";

/// Entry names never copied into an archive, matched against every path component
pub const EXCLUDED_NAMES: [&str; 7] = [
    "__pycache__",
    ".pytest_cache",
    ".git",
    ".gitignore",
    ".DS_Store",
    "Thumbs.db",
    ".env",
];

/// File extensions never copied into an archive
pub const EXCLUDED_EXTENSIONS: [&str; 2] = ["pyc", "pyo"];

/// A written archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageArchive {
    pub path: PathBuf,
    /// Entry names in the order they were written
    pub entries: Vec<String>,
    /// Size of the archive in bytes
    pub size: u64,
}

/// Whether a single file or directory name is excluded from archives
pub fn is_excluded(name: &str) -> bool {
    EXCLUDED_NAMES.contains(&name)
        || Path::new(name)
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| EXCLUDED_EXTENSIONS.contains(&ext))
}

/// Write `<output_dir>/<directory_name>.skill`.
///
/// Refuses with [`SkillcheckError::ValidationFailed`] unless the package
/// passed validation. The output directory is created when missing.
pub fn package(package: &Package, output_dir: &Path, overall_pass: bool) -> Result<PackageArchive> {
    let name = package.directory_name().to_string();
    if !overall_pass {
        return Err(SkillcheckError::ValidationFailed { name });
    }

    fs::create_dir_all(output_dir)?;
    let output_dir = output_dir.canonicalize()?;
    let root = package.root_path().canonicalize()?;
    let archive_path = output_dir.join(format!("{}.{}", name, ARCHIVE_EXTENSION));
    debug!(
        "Packaging {} into {}",
        root.display(),
        archive_path.display()
    );

    let entries = create_or_discard(&archive_path, |file| {
        let mut zip = zip::ZipWriter::new(file);
        let options = zip::write::FileOptions::default()
            .compression_method(zip::CompressionMethod::Deflated);

        let mut entries = Vec::new();
        for entry in WalkDir::new(&root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_excluded(&e.file_name().to_string_lossy()))
        {
            let entry = entry?;
            let path = entry.path();
            if !entry.file_type().is_file() || path == archive_path {
                continue;
            }

            let entry_name = entry_name(&name, path.strip_prefix(&root).unwrap_or(path));
            trace!("Adding {}", entry_name);
            zip.start_file(entry_name.as_str(), options)?;
            io::copy(&mut File::open(path)?, &mut zip)?;
            entries.push(entry_name);
        }

        zip.finish()?;
        Ok(entries)
    })?;

    let size = fs::metadata(&archive_path)?.len();
    info!(
        "Packaged {} file(s) into {} ({} bytes)",
        entries.len(),
        archive_path.display(),
        size
    );

    Ok(PackageArchive {
        path: archive_path,
        entries,
        size,
    })
}

/// Create `path` and hand it to `write`, removing the file again if `write` fails
fn create_or_discard<T>(path: &Path, write: impl FnOnce(File) -> Result<T>) -> Result<T> {
    let result = write(File::create(path)?);
    if result.is_err() {
        debug!("Removing partial archive {}", path.display());
        if let Err(e) = fs::remove_file(path) {
            warn!("Cannot remove partial archive {}: {}", path.display(), e);
        }
    }
    result
}

/// `<top>/<relative>` with `/` separators on every platform
fn entry_name(top: &str, relative: &Path) -> String {
    let mut name = top.to_string();
    for component in relative.components() {
        if let Component::Normal(part) = component {
            name.push('/');
            name.push_str(&part.to_string_lossy());
        }
    }
    name
}
