//! Configuration loading for skillcheck
//!
//! Sources are merged with figment, later sources overriding earlier ones:
//!
//! 1. Built-in defaults
//! 2. `~/.skillcheck/config.{toml,yaml,yml,json}`
//! 3. `./.skillcheck/config.{toml,yaml,yml,json}`
//! 4. Environment variables prefixed `SKILLCHECK_`, nested keys split on `__`
//!
//! Command line flags are applied on top by the caller.

use crate::error::Result;
use figment::{
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, trace};

/// Name of the configuration directory in the home and project directories
pub const CONFIG_DIR_NAME: &str = ".skillcheck";

/// Prefix for configuration environment variables
pub const ENV_PREFIX: &str = "SKILLCHECK_";

/// Candidate file names in merge order within one directory
const CONFIG_FILE_NAMES: [&str; 4] = [
    "config.toml",
    "config.yaml",
    "config.yml",
    "config.json",
];

/// Numeric thresholds used by the validators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    pub name_max_chars: usize,
    pub description_max_chars: usize,
    pub description_min_chars: usize,
    pub body_max_lines: usize,
    pub reference_min_chars: usize,
    /// How far into a script to look for its documentation block
    pub doc_window_chars: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            name_max_chars: 40,
            description_max_chars: 1024,
            description_min_chars: 20,
            body_max_lines: 500,
            reference_min_chars: 50,
            doc_window_chars: 500,
        }
    }
}

/// How a report is rendered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Table,
    Json,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Table => "table",
            OutputFormat::Json => "json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!(
                "unknown output format '{}' (expected text, table or json)",
                other
            )),
        }
    }
}

/// Resolved settings for a run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillcheckConfig {
    /// Treat warnings as errors when deciding the verdict
    pub strict: bool,
    pub format: OutputFormat,
    pub limits: Limits,
}

impl SkillcheckConfig {
    /// Load from the default locations and the environment
    pub fn load() -> Result<Self> {
        ConfigLoader::new().load()
    }
}

/// Discovers configuration files and merges them with figment
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    project_dir: Option<PathBuf>,
    global_dir: Option<PathBuf>,
}

impl ConfigLoader {
    /// Loader that resolves `./.skillcheck` and `~/.skillcheck` at load time
    pub fn new() -> Self {
        Self::default()
    }

    /// Loader reading from explicit directories instead of the defaults
    pub fn with_directories(project_dir: Option<PathBuf>, global_dir: Option<PathBuf>) -> Self {
        Self {
            project_dir,
            global_dir,
        }
    }

    /// Configuration files that exist, lowest precedence first
    pub fn discover(&self) -> Vec<PathBuf> {
        let global_dir = self.global_dir.clone().or_else(resolve_global_dir);
        let project_dir = self.project_dir.clone().or_else(resolve_project_dir);

        let mut files = Vec::new();
        for dir in [global_dir, project_dir].into_iter().flatten() {
            files.extend(search_directory(&dir));
        }

        debug!("Discovered {} configuration files", files.len());
        files
    }

    /// Build the merged figment without extracting it
    pub fn figment(&self) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(SkillcheckConfig::default()));

        for path in self.discover() {
            trace!("Merging config file {}", path.display());
            figment = match path.extension().and_then(|e| e.to_str()) {
                Some("toml") => figment.merge(Toml::file(&path)),
                Some("json") => figment.merge(Json::file(&path)),
                _ => figment.merge(Yaml::file(&path)),
            };
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    pub fn load(&self) -> Result<SkillcheckConfig> {
        let config: SkillcheckConfig = self.figment().extract()?;
        debug!(
            "Loaded configuration: strict={}, format={}",
            config.strict, config.format
        );
        Ok(config)
    }
}

fn search_directory(dir: &Path) -> Vec<PathBuf> {
    if !dir.is_dir() {
        trace!("No configuration directory at {}", dir.display());
        return Vec::new();
    }
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .filter(|path| path.is_file())
        .collect()
}

fn resolve_project_dir() -> Option<PathBuf> {
    let dir = std::env::current_dir().ok()?.join(CONFIG_DIR_NAME);
    dir.is_dir().then_some(dir)
}

fn resolve_global_dir() -> Option<PathBuf> {
    let dir = dirs::home_dir()?.join(CONFIG_DIR_NAME);
    dir.is_dir().then_some(dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;
    use tempfile::TempDir;

    fn empty_loader() -> (TempDir, TempDir, ConfigLoader) {
        let project = TempDir::new().unwrap();
        let global = TempDir::new().unwrap();
        let loader = ConfigLoader::with_directories(
            Some(project.path().to_path_buf()),
            Some(global.path().to_path_buf()),
        );
        (project, global, loader)
    }

    #[test]
    fn test_default_limits() {
        let limits = Limits::default();
        assert_eq!(limits.name_max_chars, 40);
        assert_eq!(limits.description_max_chars, 1024);
        assert_eq!(limits.description_min_chars, 20);
        assert_eq!(limits.body_max_lines, 500);
        assert_eq!(limits.reference_min_chars, 50);
        assert_eq!(limits.doc_window_chars, 500);
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("text".parse::<OutputFormat>(), Ok(OutputFormat::Text));
        assert_eq!("TABLE".parse::<OutputFormat>(), Ok(OutputFormat::Table));
        assert_eq!("json".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert!("xml".parse::<OutputFormat>().is_err());
    }

    #[test]
    #[serial]
    fn test_load_defaults_without_files() {
        let (_project, _global, loader) = empty_loader();
        assert!(loader.discover().is_empty());
        assert_eq!(loader.load().unwrap(), SkillcheckConfig::default());
    }

    #[test]
    #[serial]
    fn test_project_overrides_global() {
        let (project, global, loader) = empty_loader();
        fs::write(
            global.path().join("config.toml"),
            "strict = true\nformat = \"table\"\n\n[limits]\nbody_max_lines = 300\n",
        )
        .unwrap();
        fs::write(
            project.path().join("config.yaml"),
            "format: json\nlimits:\n  name_max_chars: 64\n",
        )
        .unwrap();

        let files = loader.discover();
        assert_eq!(files.len(), 2);
        assert!(files[0].starts_with(global.path()));

        let config = loader.load().unwrap();
        assert!(config.strict);
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.limits.body_max_lines, 300);
        assert_eq!(config.limits.name_max_chars, 64);
        assert_eq!(config.limits.description_max_chars, 1024);
    }

    #[test]
    #[serial]
    fn test_json_config_file() {
        let (project, _global, loader) = empty_loader();
        fs::write(
            project.path().join("config.json"),
            r#"{"limits": {"reference_min_chars": 10}}"#,
        )
        .unwrap();

        let config = loader.load().unwrap();
        assert_eq!(config.limits.reference_min_chars, 10);
        assert!(!config.strict);
    }

    #[test]
    #[serial]
    fn test_environment_overrides_files() {
        let (project, _global, loader) = empty_loader();
        fs::write(project.path().join("config.toml"), "strict = false\n").unwrap();

        std::env::set_var("SKILLCHECK_STRICT", "true");
        std::env::set_var("SKILLCHECK_LIMITS__BODY_MAX_LINES", "800");
        let config = loader.load();
        std::env::remove_var("SKILLCHECK_STRICT");
        std::env::remove_var("SKILLCHECK_LIMITS__BODY_MAX_LINES");

        let config = config.unwrap();
        assert!(config.strict);
        assert_eq!(config.limits.body_max_lines, 800);
    }

    #[test]
    #[serial]
    fn test_invalid_value_is_config_error() {
        let (project, _global, loader) = empty_loader();
        fs::write(project.path().join("config.toml"), "format = \"xml\"\n").unwrap();

        let err = loader.load().unwrap_err();
        assert!(err.to_string().starts_with("Failed to load configuration"));
    }
}
