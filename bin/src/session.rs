use crate::cli::Cli;
use anyhow::{Context, Result};
use gloss::{paths, Config, Project, Schema};
use std::path::{Path, PathBuf};

/// A loaded project plus where and how to write it back.
pub struct Session {
    pub project: Project,
    project_path: PathBuf,
    schema: Schema,
    dirty: bool,
}

impl Session {
    pub fn new(project: Project, project_path: PathBuf, schema: Schema) -> Self {
        Self {
            project,
            project_path,
            schema,
            dirty: false,
        }
    }

    /// Discover config and project file from the CLI arguments and load them.
    pub fn load(cli: &Cli) -> Result<Self> {
        let discovered = paths::discover(&cli.root);
        let config =
            Config::load_with_overrides(cli.config.as_deref(), discovered.config_path.as_deref())?;

        let project_path = match &cli.project {
            Some(path) => path.clone(),
            None => config.project_path(&discovered.dir_or(&cli.root)),
        };

        let project = Project::load_json(&cli.root, &project_path, config.schema)
            .with_context(|| format!("Failed to load project: {}", project_path.display()))?;

        tracing::info!(
            root = %cli.root.display(),
            project = %project_path.display(),
            schema = %config.schema,
            "session loaded"
        );
        Ok(Self::new(project, project_path, config.schema))
    }

    pub fn project_path(&self) -> &Path {
        &self.project_path
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Write the project back if anything changed.
    pub fn save(&mut self) -> Result<()> {
        if !self.dirty {
            return Ok(());
        }
        self.project
            .save_json(&self.project_path, self.schema)
            .with_context(|| format!("Failed to save project: {}", self.project_path.display()))?;
        self.dirty = false;
        Ok(())
    }
}
