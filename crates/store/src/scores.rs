//! High score file (one leaderboard slot per line).

use std::path::{Path, PathBuf};

use log::warn;

use crate::core::Leaderboard;
use crate::{atomic_write, read_optional, StoreError};

#[derive(Debug, Clone)]
pub struct ScoreStore {
    path: PathBuf,
}

impl ScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the leaderboard, strictly
    pub fn try_load(&self) -> Result<Leaderboard, StoreError> {
        let Some(bytes) = read_optional(&self.path)? else {
            return Ok(Leaderboard::new());
        };
        let malformed = |reason: String| StoreError::Malformed {
            path: self.path.clone(),
            reason,
        };
        let text = String::from_utf8(bytes).map_err(|e| malformed(e.to_string()))?;
        Leaderboard::parse_lines(&text).map_err(|e| malformed(e.to_string()))
    }

    /// Read the leaderboard; a missing or unreadable file yields five empty slots
    pub fn load(&self) -> Leaderboard {
        self.try_load().unwrap_or_else(|e| {
            warn!("ignoring high scores: {}", e);
            Leaderboard::new()
        })
    }

    pub fn persist(&self, leaderboard: &Leaderboard) -> Result<(), StoreError> {
        atomic_write(&self.path, leaderboard.to_lines().as_bytes())
    }
}
