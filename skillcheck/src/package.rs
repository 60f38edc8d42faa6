//! The unit under validation: a skill directory.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// File name of the mandatory manifest
pub const MANIFEST_FILE: &str = "SKILL.md";

/// Subdirectory holding executable helper scripts
pub const SCRIPTS_DIR: &str = "scripts";

/// Subdirectory holding reference documents loaded on demand
pub const REFERENCES_DIR: &str = "references";

/// Subdirectory holding static assets
pub const ASSETS_DIR: &str = "assets";

/// Conventional subdirectories, in the order they are checked
pub const CONVENTIONAL_DIRS: [&str; 3] = [SCRIPTS_DIR, REFERENCES_DIR, ASSETS_DIR];

/// A skill directory, supplied by the caller and only ever read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    root_path: PathBuf,
    directory_name: String,
}

impl Package {
    /// Create a package from its root directory.
    ///
    /// The directory name is the last path segment. Paths without one
    /// (`.`, `..`) are canonicalized first when they exist.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root_path = root.into();
        let directory_name = last_segment(&root_path)
            .or_else(|| {
                root_path
                    .canonicalize()
                    .ok()
                    .and_then(|p| last_segment(&p))
            })
            .unwrap_or_default();

        Self {
            root_path,
            directory_name,
        }
    }

    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    /// Last path segment, compared against the `name` field
    pub fn directory_name(&self) -> &str {
        &self.directory_name
    }

    /// Path of the manifest inside the root
    pub fn manifest_path(&self) -> PathBuf {
        self.root_path.join(MANIFEST_FILE)
    }

    /// Resolve a path relative to the package root
    pub fn resolve(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.root_path.join(relative)
    }

    /// Names of the entries directly inside the root, sorted.
    ///
    /// Unreadable roots yield an empty list; the structural gate reports
    /// those before anything calls this.
    pub fn entry_names(&self) -> Vec<String> {
        list_names(&self.root_path)
    }

    /// Files inside `subdir` whose extension is in `extensions`, sorted by name
    pub fn files_in(&self, subdir: &str, extensions: &[&str]) -> Vec<PathBuf> {
        let dir = self.root_path.join(subdir);
        let mut files: Vec<PathBuf> = match fs::read_dir(&dir) {
            Ok(entries) => entries
                .flatten()
                .map(|e| e.path())
                .filter(|p| p.is_file())
                .filter(|p| {
                    p.extension()
                        .and_then(|ext| ext.to_str())
                        .is_some_and(|ext| extensions.contains(&ext))
                })
                .collect(),
            Err(_) => Vec::new(),
        };
        files.sort();
        files
    }
}

impl fmt::Display for Package {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.root_path.display())
    }
}

fn last_segment(path: &Path) -> Option<String> {
    path.file_name().map(|n| n.to_string_lossy().to_string())
}

pub(crate) fn list_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = match fs::read_dir(dir) {
        Ok(entries) => entries
            .flatten()
            .map(|e| e.file_name().to_string_lossy().to_string())
            .collect(),
        Err(_) => Vec::new(),
    };
    names.sort();
    names
}

/// Display name of a file for messages
pub(crate) fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
