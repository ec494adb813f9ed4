//! Pieces module - tetromino shape tables and the falling piece
//!
//! Shapes are N×N occupancy matrices (N ∈ {2, 3, 4}) stored inline. Matrix row 0
//! is the top of the bounding box; the last matrix row sits on the piece's `y`
//! row in field space (bottom-anchored). Column `c` maps to field column `x + c`.
//!
//! Rotation happens in place inside the bounding box. There are no wall kicks:
//! a rotation that would overlap the stack or leave the field is rejected.

use arrayvec::ArrayVec;

use crate::playfield::Playfield;
use crate::types::{PieceKind, PIECE_KIND_COUNT};

/// Largest bounding box side (the I piece)
pub const MAX_SHAPE_SIZE: usize = 4;

/// Filled-cell offsets of a shape, `(dx, dy)` with `dy` counted upward from the box bottom
pub type ShapeCells = ArrayVec<(i32, i32), { MAX_SHAPE_SIZE * MAX_SHAPE_SIZE }>;

/// An N×N boolean occupancy matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    size: u8,
    cells: [[bool; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
}

const fn shape(size: u8, bits: [[u8; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE]) -> Shape {
    let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
    let mut r = 0;
    while r < MAX_SHAPE_SIZE {
        let mut c = 0;
        while c < MAX_SHAPE_SIZE {
            cells[r][c] = bits[r][c] != 0;
            c += 1;
        }
        r += 1;
    }
    Shape { size, cells }
}

/// Spawn orientation of every kind, indexed by `PieceKind::id()`
const SHAPES: [Shape; PIECE_KIND_COUNT] = [
    // I: vertical bar in column 1
    shape(4, [[0, 1, 0, 0], [0, 1, 0, 0], [0, 1, 0, 0], [0, 1, 0, 0]]),
    // J
    shape(3, [[1, 0, 0, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]]),
    // L
    shape(3, [[0, 0, 1, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]]),
    // O
    shape(2, [[1, 1, 0, 0], [1, 1, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]),
    // S
    shape(3, [[0, 1, 1, 0], [1, 1, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]),
    // T
    shape(3, [[0, 1, 0, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]]),
    // Z
    shape(3, [[1, 1, 0, 0], [0, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]]),
];

impl Shape {
    /// Spawn orientation for a kind
    pub fn for_kind(kind: PieceKind) -> Self {
        SHAPES[kind.id() as usize]
    }

    /// Side length N of the bounding box
    pub fn size(&self) -> usize {
        self.size as usize
    }

    /// Whether matrix cell `(row, col)` is filled; row 0 is the top of the box
    pub fn get(&self, row: usize, col: usize) -> bool {
        row < self.size() && col < self.size() && self.cells[row][col]
    }

    /// Rotate 90° clockwise: `new[c][N-1-r] = old[r][c]`
    pub fn rotated_cw(&self) -> Self {
        let n = self.size();
        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for r in 0..n {
            for c in 0..n {
                cells[c][n - 1 - r] = self.cells[r][c];
            }
        }
        Self {
            size: self.size,
            cells,
        }
    }

    /// Apply `turns` clockwise quarter turns
    pub fn rotated(&self, turns: u8) -> Self {
        (0..turns % 4).fold(*self, |s, _| s.rotated_cw())
    }

    /// Offsets of filled cells relative to the box's bottom-left corner
    pub fn filled(&self) -> ShapeCells {
        let n = self.size();
        let mut out = ShapeCells::new();
        for r in 0..n {
            for c in 0..n {
                if self.cells[r][c] {
                    out.push((c as i32, (n - 1 - r) as i32));
                }
            }
        }
        out
    }
}

/// The currently controlled falling piece
///
/// Position and orientation only change through methods that check the
/// playfield first, so a piece that was valid stays valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    kind: PieceKind,
    shape: Shape,
    /// Clockwise quarter turns applied since spawn (0..4)
    rotation: u8,
    x: i32,
    y: i32,
}

impl Piece {
    /// Create a piece in spawn orientation at an explicit position
    pub fn new(kind: PieceKind, x: i32, y: i32) -> Self {
        Self::with_rotation(kind, 0, x, y)
    }

    /// Create a piece turned `rotation` quarter turns clockwise from spawn
    pub fn with_rotation(kind: PieceKind, rotation: u8, x: i32, y: i32) -> Self {
        let rotation = rotation % 4;
        Self {
            kind,
            shape: Shape::for_kind(kind).rotated(rotation),
            rotation,
            x,
            y,
        }
    }

    /// Place a new piece horizontally centered with its box touching the top of the field
    pub fn spawn(kind: PieceKind, width: usize, height: usize) -> Self {
        let n = Shape::for_kind(kind).size() as i32;
        let x = (width as i32 - n) / 2;
        let y = height as i32 - n;
        Self::new(kind, x, y)
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn rotation(&self) -> u8 {
        self.rotation
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    /// Absolute field coordinates of every filled cell
    pub fn cells(&self) -> ShapeCells {
        self.shape
            .filled()
            .into_iter()
            .map(|(dx, dy)| (self.x + dx, self.y + dy))
            .collect()
    }

    /// Check whether the piece fits the field where it stands
    pub fn fits(&self, field: &Playfield) -> bool {
        field.is_free(&self.shape, self.x, self.y)
    }

    /// Move by `(dx, dy)` if the target is free; otherwise leave the piece untouched
    pub fn try_move(&mut self, dx: i32, dy: i32, field: &Playfield) -> bool {
        let (x, y) = (self.x + dx, self.y + dy);
        if !field.is_free(&self.shape, x, y) {
            return false;
        }
        self.x = x;
        self.y = y;
        true
    }

    /// Rotate clockwise in place; no kicks, rejected if the result does not fit
    pub fn rotate_clockwise(&mut self, field: &Playfield) -> bool {
        let rotated = self.shape.rotated_cw();
        if !field.is_free(&rotated, self.x, self.y) {
            return false;
        }
        self.shape = rotated;
        self.rotation = (self.rotation + 1) % 4;
        true
    }

    /// Soft-drop until blocked; returns the number of rows fallen
    pub fn hard_drop(&mut self, field: &Playfield) -> u32 {
        let mut rows = 0;
        while self.try_move(0, -1, field) {
            rows += 1;
        }
        rows
    }

    /// Row the piece would come to rest on, for ghost rendering
    pub fn ghost_y(&self, field: &Playfield) -> i32 {
        let mut ghost = *self;
        ghost.hard_drop(field);
        ghost.y
    }
}
