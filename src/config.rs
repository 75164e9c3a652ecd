//! User configuration.
//!
//! Configuration is owned by the user and only read here. It is loaded
//! from a JSON file, in order of priority:
//! 1. An explicit path (from `--config`)
//! 2. The `DASHDOCS_CONFIG` environment variable
//! 3. `<config dir>/dashdocs/config.json`
//!
//! A missing default file yields [`Config::default`]. The docsets root can
//! additionally be overridden with `DASHDOCS_DOCSETS_PATH`.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming a config file.
pub const CONFIG_ENV: &str = "DASHDOCS_CONFIG";

/// Environment variable overriding the docsets root.
pub const DOCSETS_PATH_ENV: &str = "DASHDOCS_DOCSETS_PATH";

/// Hard cap on rows returned per docset.
pub const MAX_RESULTS: usize = 1000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding installed `*.docset` bundles.
    pub docsets_root: PathBuf,
    /// Patterns shorter than this (in characters) return no results.
    pub min_length: usize,
    /// Candidate display template, see [`crate::services::format_candidate`].
    pub candidate_format: String,
    /// Docsets searched in every context.
    pub common_docsets: Vec<String>,
    /// Rows fetched per docset, clamped to [`MAX_RESULTS`].
    pub max_results: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            docsets_root: crate::default_docsets_root(),
            min_length: 3,
            candidate_format: "{docset} {name}".to_string(),
            common_docsets: Vec::new(),
            max_results: MAX_RESULTS,
        }
    }
}

impl Config {
    /// Loads configuration, applying the environment overrides.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if an explicitly named file cannot be read, and
    /// `Error::Json` if any config file is malformed.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = match explicit
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from))
        {
            Some(path) => Self::from_file(&path)?,
            None => match default_config_path() {
                Some(path) if path.is_file() => Self::from_file(&path)?,
                _ => Self::default(),
            },
        };

        if let Some(root) = std::env::var_os(DOCSETS_PATH_ENV) {
            config.docsets_root = PathBuf::from(root);
        }

        config.validate()?;
        Ok(config)
    }

    /// Reads a config file without consulting the environment.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` or `Error::Json` if the file is unreadable or malformed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw)?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Rows fetched per docset.
    #[must_use]
    pub fn row_limit(&self) -> usize {
        self.max_results.clamp(1, MAX_RESULTS)
    }

    fn validate(&self) -> Result<()> {
        if self.candidate_format.is_empty() {
            return Err(Error::Config("candidate_format must not be empty".into()));
        }
        Ok(())
    }
}

/// Default config file location, `<config dir>/dashdocs/config.json`.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("dashdocs").join("config.json"))
}
