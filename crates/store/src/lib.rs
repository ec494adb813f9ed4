//! Store module - saved games and high scores on disk
//!
//! Two files, both small and rewritten whole:
//!
//! - **Saved game**: the session snapshot as JSON (`savegame.json`)
//! - **High scores**: five lines, each a score or `-` (`highscores.txt`)
//!
//! Every write goes to a sibling `.tmp` file which is then renamed over the
//! target, so a failed write leaves the previous file intact. Nothing here ever
//! touches a live session: callers decide what to do with what was read.
//!
//! # Environment Variables
//!
//! - `BLOCKFALL_SAVE_PATH`: saved game file
//! - `BLOCKFALL_SCORES_PATH`: high score file
//! - `BLOCKFALL_DATA_DIR`: directory for both files when not set individually
//!   (default: `$XDG_DATA_HOME/blockfall`, then `$HOME/.local/share/blockfall`)

pub mod config;
pub mod saves;
pub mod scores;

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use config::StoreConfig;
pub use saves::SaveStore;
pub use scores::ScoreStore;

/// Persistence failure
#[derive(Debug)]
pub enum StoreError {
    /// The file could not be read or written
    Unavailable { path: PathBuf, source: io::Error },
    /// The file exists but its contents are not a valid record
    Malformed { path: PathBuf, reason: String },
}

impl StoreError {
    pub fn path(&self) -> &Path {
        match self {
            StoreError::Unavailable { path, .. } | StoreError::Malformed { path, .. } => path,
        }
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Unavailable { path, source } => {
                write!(f, "cannot access {}: {}", path.display(), source)
            }
            StoreError::Malformed { path, reason } => {
                write!(f, "{} is malformed: {}", path.display(), reason)
            }
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Unavailable { source, .. } => Some(source),
            StoreError::Malformed { .. } => None,
        }
    }
}

fn unavailable(path: &Path) -> impl FnOnce(io::Error) -> StoreError + '_ {
    move |source| StoreError::Unavailable {
        path: path.to_path_buf(),
        source,
    }
}

/// Read a whole file; `Ok(None)` when it does not exist
fn read_optional(path: &Path) -> Result<Option<Vec<u8>>, StoreError> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(unavailable(path)(e)),
    }
}

/// Sibling temp file: `.tmp` appended to the full file name, so `a` and `a.txt` never share one
fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write through a temp file and rename over the target
fn atomic_write(path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(unavailable(path))?;
        }
    }

    let tmp = tmp_path(path);
    fs::write(&tmp, bytes).map_err(unavailable(path))?;
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(unavailable(path)(e));
    }
    Ok(())
}
