//! File locations, read once from the environment.

use std::env;
use std::path::{Path, PathBuf};

const SAVE_FILE: &str = "savegame.json";
const SCORES_FILE: &str = "highscores.txt";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub save_path: PathBuf,
    pub scores_path: PathBuf,
}

impl StoreConfig {
    /// Both files inside `dir`
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            save_path: dir.join(SAVE_FILE),
            scores_path: dir.join(SCORES_FILE),
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Self {
        let mut config = Self::in_dir(data_dir());
        if let Some(path) = env_path("BLOCKFALL_SAVE_PATH") {
            config.save_path = path;
        }
        if let Some(path) = env_path("BLOCKFALL_SCORES_PATH") {
            config.scores_path = path;
        }
        config
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::in_dir(".")
    }
}

fn env_path(key: &str) -> Option<PathBuf> {
    env::var_os(key)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

fn data_dir() -> PathBuf {
    if let Some(dir) = env_path("BLOCKFALL_DATA_DIR") {
        return dir;
    }
    env_path("XDG_DATA_HOME")
        .or_else(|| env_path("HOME").map(|home| home.join(".local").join("share")))
        .map(|base| base.join("blockfall"))
        .unwrap_or_else(|| PathBuf::from("."))
}
