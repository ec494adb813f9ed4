//! Saved game file (JSON session snapshot).

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::info;

use crate::core::SessionSnapshot;
use crate::{atomic_write, read_optional, StoreError};

#[derive(Debug, Clone)]
pub struct SaveStore {
    path: PathBuf,
}

impl SaveStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the snapshot, replacing any earlier save
    pub fn save(&self, snapshot: &SessionSnapshot) -> Result<(), StoreError> {
        let json = serde_json::to_vec_pretty(snapshot).map_err(|e| StoreError::Malformed {
            path: self.path.clone(),
            reason: e.to_string(),
        })?;
        atomic_write(&self.path, &json)?;
        info!("saved game to {}", self.path.display());
        Ok(())
    }

    /// Read the saved snapshot; `Ok(None)` when there is no save
    ///
    /// Only JSON structure is checked here. Semantic checks (dimensions, piece
    /// ids, collisions) happen when the snapshot is loaded into a session.
    pub fn load(&self) -> Result<Option<SessionSnapshot>, StoreError> {
        let Some(bytes) = read_optional(&self.path)? else {
            return Ok(None);
        };
        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|e| StoreError::Malformed {
                path: self.path.clone(),
                reason: e.to_string(),
            })
    }

    /// Delete the save; a missing file is not an error
    pub fn clear(&self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::Unavailable {
                path: self.path.clone(),
                source,
            }),
        }
    }
}
