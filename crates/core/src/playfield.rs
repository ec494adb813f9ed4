//! Playfield module - the grid of settled blocks
//!
//! The playfield is a `width × height` grid where each cell is empty or holds the
//! kind of the piece that locked there. Dimensions are fixed at construction.
//! Uses a flat row-major vector for cache locality.
//! Coordinates: (x, y) where x runs left to right and y runs **bottom to top**;
//! row 0 is the bottom-most playable row.

use std::fmt;

use log::debug;

use crate::pieces::{Piece, Shape};
use crate::snapshot::{PlayfieldSnapshot, SnapshotError};
use crate::types::{Cell, PieceKind, FIELD_HEIGHT, FIELD_WIDTH};

/// The settled-block grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playfield {
    width: usize,
    height: usize,
    /// Flat vector of cells, row-major order (y * width + x), row 0 first
    cells: Vec<Cell>,
}

impl Playfield {
    /// Create an empty playfield
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn new(width: usize, height: usize) -> Self {
        assert!(width > 0 && height > 0, "playfield dimensions must be positive");
        Self {
            width,
            height,
            cells: vec![None; width * height],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some(y as usize * self.width + x as usize)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is within bounds and empty
    pub fn is_empty_at(&self, x: i32, y: i32) -> bool {
        matches!(self.get(x, y), Some(None))
    }

    /// Check whether `shape` placed with its box's bottom-left corner at (x, y)
    /// lies fully inside the field on empty cells
    ///
    /// Every movement, rotation and spawn check goes through this predicate.
    pub fn is_free(&self, shape: &Shape, x: i32, y: i32) -> bool {
        shape
            .filled()
            .iter()
            .all(|&(dx, dy)| self.is_empty_at(x + dx, y + dy))
    }

    /// Cells of row `y`, left to right
    pub fn row(&self, y: usize) -> &[Cell] {
        let start = y * self.width;
        &self.cells[start..start + self.width]
    }

    /// Rows bottom to top
    pub fn rows(&self) -> impl DoubleEndedIterator<Item = &[Cell]> + '_ {
        self.cells.chunks(self.width)
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        y < self.height && self.row(y).iter().all(|cell| cell.is_some())
    }

    /// Number of occupied cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Write the piece's cells into the grid
    ///
    /// # Panics
    ///
    /// The caller must have checked the position with [`Playfield::is_free`];
    /// locking an overlapping or out-of-bounds piece is a programming error.
    pub fn lock(&mut self, piece: &Piece) {
        assert!(
            piece.fits(self),
            "lock at ({}, {}) overlaps the stack or leaves the field",
            piece.x(),
            piece.y()
        );
        for (x, y) in piece.cells() {
            self.set(x, y, Some(piece.kind()));
        }
        debug!(
            "locked {} at ({}, {})",
            piece.kind().as_str(),
            piece.x(),
            piece.y()
        );
    }

    /// Remove every full row, compact the rest downward and pad with empty rows at the top
    ///
    /// Single filtering pass: surviving rows keep their relative order.
    /// Returns the number of rows removed.
    pub fn clear_full_rows(&mut self) -> u32 {
        let width = self.width;
        let mut kept: Vec<Cell> = Vec::with_capacity(self.cells.len());
        for row in self.cells.chunks(width) {
            if row.iter().any(|cell| cell.is_none()) {
                kept.extend_from_slice(row);
            }
        }

        let cleared = self.height - kept.len() / width;
        if cleared == 0 {
            return 0;
        }

        kept.resize(self.cells.len(), None);
        self.cells = kept;
        debug!("cleared {} row(s)", cleared);
        cleared as u32
    }

    /// Clear the entire field
    pub fn reset(&mut self) {
        self.cells.fill(None);
    }

    /// Structural copy of dimensions and occupancy
    pub fn snapshot(&self) -> PlayfieldSnapshot {
        PlayfieldSnapshot {
            width: self.width,
            height: self.height,
            cells: self
                .rows()
                .map(|row| row.iter().map(|cell| cell.map(PieceKind::id)).collect())
                .collect(),
        }
    }

    /// Rebuild a field from a snapshot, rejecting inconsistent data
    pub fn from_snapshot(snapshot: &PlayfieldSnapshot) -> Result<Self, SnapshotError> {
        let (width, height, cells) = (snapshot.width, snapshot.height, &snapshot.cells);

        // Coordinates are i32, so each side must fit one.
        let too_large = |n: usize| i32::try_from(n).is_err();
        if width == 0 || height == 0 || too_large(width) || too_large(height) {
            return Err(SnapshotError::Dimensions { width, height });
        }
        if cells.len() != height {
            return Err(SnapshotError::RowCount {
                expected: height,
                found: cells.len(),
            });
        }
        // Shape is checked against the parsed rows before anything is allocated.
        if let Some((y, row)) = cells.iter().enumerate().find(|(_, row)| row.len() != width) {
            return Err(SnapshotError::RowWidth {
                row: y,
                expected: width,
                found: row.len(),
            });
        }
        let len = width
            .checked_mul(height)
            .ok_or(SnapshotError::Dimensions { width, height })?;

        let mut flat = Vec::with_capacity(len);
        for id in cells.iter().flatten() {
            flat.push(match *id {
                None => None,
                Some(id) => Some(PieceKind::from_id(id).ok_or(SnapshotError::PieceKind(id))?),
            });
        }
        Ok(Self {
            width,
            height,
            cells: flat,
        })
    }
}

impl Default for Playfield {
    fn default() -> Self {
        Self::new(FIELD_WIDTH, FIELD_HEIGHT)
    }
}

/// ASCII grid, top row first: `.` for empty, the kind letter for filled cells
impl fmt::Display for Playfield {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows().rev() {
            for cell in row {
                match cell {
                    Some(kind) => write!(f, "{}", kind.as_char())?,
                    None => write!(f, ".")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill_row(field: &mut Playfield, y: i32, kind: PieceKind) {
        for x in 0..field.width() as i32 {
            field.set(x, y, Some(kind));
        }
    }

    #[test]
    fn test_index_calculation() {
        let field = Playfield::new(10, 20);
        assert_eq!(field.index(0, 0), Some(0));
        assert_eq!(field.index(9, 0), Some(9));
        assert_eq!(field.index(0, 1), Some(10));
        assert_eq!(field.index(9, 19), Some(199));
        assert_eq!(field.index(-1, 0), None);
        assert_eq!(field.index(10, 0), None);
        assert_eq!(field.index(0, 20), None);
    }

    #[test]
    #[should_panic]
    fn test_zero_dimension_panics() {
        let _ = Playfield::new(0, 20);
    }

    #[test]
    fn test_clear_keeps_order_and_pads_top() {
        let mut field = Playfield::new(4, 4);
        fill_row(&mut field, 0, PieceKind::I);
        field.set(1, 1, Some(PieceKind::T));
        fill_row(&mut field, 2, PieceKind::O);
        field.set(3, 3, Some(PieceKind::Z));

        assert_eq!(field.clear_full_rows(), 2);
        assert_eq!(field.get(1, 0), Some(Some(PieceKind::T)));
        assert_eq!(field.get(3, 1), Some(Some(PieceKind::Z)));
        assert!(field.row(2).iter().all(|c| c.is_none()));
        assert!(field.row(3).iter().all(|c| c.is_none()));
        assert_eq!(field.filled_count(), 2);
    }

    #[test]
    fn test_clear_nothing_is_noop() {
        let mut field = Playfield::new(4, 4);
        field.set(0, 0, Some(PieceKind::L));
        let before = field.clone();
        assert_eq!(field.clear_full_rows(), 0);
        assert_eq!(field, before);
    }

    #[test]
    fn test_display_draws_top_row_first() {
        let mut field = Playfield::new(3, 2);
        field.set(0, 0, Some(PieceKind::J));
        field.set(2, 1, Some(PieceKind::S));
        assert_eq!(field.to_string(), "..S\nJ..\n");
    }

    #[test]
    fn test_snapshot_roundtrip_preserves_cells() {
        let mut field = Playfield::new(5, 6);
        field.set(0, 0, Some(PieceKind::I));
        field.set(4, 5, Some(PieceKind::Z));
        let snap = field.snapshot();
        assert_eq!(snap.cells[0][0], Some(0));
        assert_eq!(snap.cells[5][4], Some(6));
        assert_eq!(Playfield::from_snapshot(&snap).unwrap(), field);
    }
}
