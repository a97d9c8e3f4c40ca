//! Configuration for gloss, loaded from `config.toml`.
//!
//! # Architecture
//!
//! 1. The binary calls [`crate::paths::discover`] to find the `.gloss/` directory
//! 2. [`Config::load_with_overrides`] picks the config path: CLI override > discovered > defaults
//! 3. [`Config::project_path`] resolves the project file against the `.gloss/` directory
//!
//! # Testing
//!
//! Tests use [`Config::load()`] with explicit paths to temporary directories.

use crate::schema::Schema;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Schema used to read and write the project file.
    pub schema: Schema,

    /// Project file holding annotations and bookmarks.
    ///
    /// Relative paths resolve against the `.gloss/` directory.
    #[serde(default = "default_project_file")]
    pub project_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schema: Schema::default(),
            project_file: default_project_file(),
        }
    }
}

fn default_project_file() -> PathBuf {
    PathBuf::from("project.json")
}

impl Config {
    /// Read and deserialize a TOML config file from the given path.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load configuration with priority: CLI override > discovered path > defaults.
    pub fn load_with_overrides(
        cli_override: Option<&Path>,
        discovered_path: Option<&Path>,
    ) -> Result<Self> {
        if let Some(path) = cli_override {
            return Self::load(path);
        }
        if let Some(path) = discovered_path {
            return Self::load(path);
        }
        Ok(Self::default())
    }

    pub fn project_path(&self, gloss_dir: &Path) -> PathBuf {
        if self.project_file.is_absolute() {
            self.project_file.clone()
        } else {
            gloss_dir.join(&self.project_file)
        }
    }
}
