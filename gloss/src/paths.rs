//! Discovery of the `.gloss/` directory holding config and project files.

use std::path::{Path, PathBuf};

pub const GLOSS_DIR: &str = ".gloss";
pub const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlossPaths {
    pub gloss_dir: Option<PathBuf>,
    pub config_path: Option<PathBuf>,
}

impl GlossPaths {
    /// Directory project files resolve against, creating nothing. Falls back to
    /// `<start>/.gloss` when discovery found none.
    pub fn dir_or(&self, start_dir: &Path) -> PathBuf {
        self.gloss_dir
            .clone()
            .unwrap_or_else(|| start_dir.join(GLOSS_DIR))
    }
}

/// Walk up from `start_dir` looking for `.gloss/`, then try the user config dir.
pub fn discover(start_dir: &Path) -> GlossPaths {
    let dir = walk_ancestors(start_dir).or_else(system_config_dir);

    match dir {
        Some(d) => {
            tracing::info!("using gloss directory: {}", d.display());
            paths_from_dir(&d)
        },
        None => {
            tracing::debug!("no .gloss directory found");
            GlossPaths::default()
        },
    }
}

fn walk_ancestors(start_dir: &Path) -> Option<PathBuf> {
    start_dir
        .ancestors()
        .map(|dir| dir.join(GLOSS_DIR))
        .find(|candidate| candidate.is_dir())
}

fn system_config_dir() -> Option<PathBuf> {
    let dir = dirs::config_dir()?.join("gloss");
    dir.is_dir().then_some(dir)
}

fn paths_from_dir(dir: &Path) -> GlossPaths {
    let config = dir.join(CONFIG_FILE);
    GlossPaths {
        gloss_dir: Some(dir.to_path_buf()),
        config_path: config.is_file().then_some(config),
    }
}
