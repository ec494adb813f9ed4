//! Structural snapshots of live game state
//!
//! Snapshots are plain serde data: the playfield as nested rows (row 0 = bottom,
//! `null` = empty, otherwise the piece id), both pieces as kind/position, plus
//! speed and score. Anything read back is validated before it touches a session.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::pieces::Piece;
use crate::types::{PieceKind, LEADERBOARD_SIZE};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayfieldSnapshot {
    pub width: usize,
    pub height: usize,
    pub cells: Vec<Vec<Option<u8>>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PieceSnapshot {
    pub kind: u8,
    pub x: i32,
    pub y: i32,
    /// Clockwise quarter turns from spawn; absent means spawn orientation
    #[serde(default)]
    pub rotation: u8,
}

impl From<&Piece> for PieceSnapshot {
    fn from(value: &Piece) -> Self {
        Self {
            kind: value.kind().id(),
            x: value.x(),
            y: value.y(),
            rotation: value.rotation(),
        }
    }
}

impl PieceSnapshot {
    /// Rebuild the piece; position is not checked against any field here
    pub fn to_piece(&self) -> Result<Piece, SnapshotError> {
        let kind = PieceKind::from_id(self.kind).ok_or(SnapshotError::PieceKind(self.kind))?;
        if self.rotation > 3 {
            return Err(SnapshotError::Rotation(self.rotation));
        }
        Ok(Piece::with_rotation(kind, self.rotation, self.x, self.y))
    }
}

/// Everything needed to resume a round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub playfield: PlayfieldSnapshot,
    pub active_piece: PieceSnapshot,
    pub next_piece: PieceSnapshot,
    pub speed: f32,
    pub score: u32,
}

/// Persisted state failed structural validation
#[derive(Debug, Clone, PartialEq)]
pub enum SnapshotError {
    Dimensions { width: usize, height: usize },
    RowCount { expected: usize, found: usize },
    RowWidth { row: usize, expected: usize, found: usize },
    PieceKind(u8),
    Rotation(u8),
    Speed(f32),
    PieceBlocked { x: i32, y: i32 },
    ScoreLine { line: usize, text: String },
    ScoreCount(usize),
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotError::Dimensions { width, height } => {
                write!(f, "invalid playfield dimensions {}x{}", width, height)
            }
            SnapshotError::RowCount { expected, found } => {
                write!(f, "expected {} rows, found {}", expected, found)
            }
            SnapshotError::RowWidth {
                row,
                expected,
                found,
            } => write!(f, "row {} has {} cells, expected {}", row, found, expected),
            SnapshotError::PieceKind(id) => write!(f, "unknown piece id {}", id),
            SnapshotError::Rotation(r) => write!(f, "rotation {} out of range 0..4", r),
            SnapshotError::Speed(s) => write!(f, "speed {} out of range", s),
            SnapshotError::PieceBlocked { x, y } => {
                write!(f, "active piece at ({}, {}) overlaps the stack", x, y)
            }
            SnapshotError::ScoreLine { line, text } => {
                write!(f, "line {}: {:?} is not a score", line, text)
            }
            SnapshotError::ScoreCount(n) => {
                write!(f, "expected at most {} scores, found {}", LEADERBOARD_SIZE, n)
            }
        }
    }
}

impl std::error::Error for SnapshotError {}
