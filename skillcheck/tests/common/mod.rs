//! Fixture builder for skill directories on disk

#![allow(dead_code)]

use skillcheck::Package;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const GOOD_DESCRIPTION: &str =
    "Extracts text and tables from PDF files. Use when the user works with PDF documents.";

pub const GOOD_SCRIPT: &str = "#!/usr/bin/env python3\n\"\"\"Extract text from a PDF.\"\"\"\n\nimport sys\n\n\ndef main():\n    print(sys.argv[1:])\n\n\nif __name__ == \"__main__\":\n    main()\n";

pub const GOOD_REFERENCE: &str = "# Forms API\n\nThe forms module exposes fill, flatten and inspect. Each takes a path and returns a document handle.\n";

/// A skill directory inside a temporary parent
pub struct SkillFixture {
    _temp: TempDir,
    root: PathBuf,
}

impl SkillFixture {
    /// Empty directory named `name`
    pub fn empty(name: &str) -> Self {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join(name);
        fs::create_dir_all(&root).unwrap();
        Self { _temp: temp, root }
    }

    /// Directory with a manifest built from `metadata` and `body`
    pub fn with_manifest(name: &str, metadata: &str, body: &str) -> Self {
        Self::empty(name).file("SKILL.md", &format!("---\n{}\n---\n{}", metadata, body))
    }

    /// A package that passes every check
    pub fn valid(name: &str) -> Self {
        Self::with_manifest(
            name,
            &format!("name: {}\ndescription: {}", name, GOOD_DESCRIPTION),
            "\n# PDF Tools\n\nRun `scripts/extract.py` and read [the API](references/api.md).\n",
        )
        .file("scripts/extract.py", GOOD_SCRIPT)
        .file("references/api.md", GOOD_REFERENCE)
    }

    /// Write a file, creating parent directories
    pub fn file(self, relative: &str, content: &str) -> Self {
        let path = self.root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
        self
    }

    pub fn dir(self, relative: &str) -> Self {
        fs::create_dir_all(self.root.join(relative)).unwrap();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn parent(&self) -> &Path {
        self._temp.path()
    }

    pub fn package(&self) -> Package {
        Package::new(&self.root)
    }
}
