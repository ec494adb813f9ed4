//! RNG module - uniform random piece generation
//!
//! Each spawn picks one of the seven kinds uniformly at random. The generator
//! is a small seeded LCG so whole rounds can be replayed from a seed in tests.

use crate::types::{PieceKind, PIECE_KIND_COUNT};

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // The low bits of an LCG cycle with a short period; use the high half.
        (self.next_u32() >> 16) % max
    }
}

/// Uniform piece generator
#[derive(Debug, Clone)]
pub struct PieceSource {
    seed: u32,
    rng: SimpleRng,
}

impl PieceSource {
    /// Create a new source with the given seed
    pub fn new(seed: u32) -> Self {
        Self {
            seed,
            rng: SimpleRng::new(seed),
        }
    }

    /// Draw the next kind, each of the seven equally likely
    pub fn draw(&mut self) -> PieceKind {
        let id = self.rng.next_range(PIECE_KIND_COUNT as u32) as usize;
        PieceKind::ALL[id]
    }

    /// Seed the source was created with
    pub fn seed(&self) -> u32 {
        self.seed
    }
}

impl Default for PieceSource {
    fn default() -> Self {
        Self::new(1)
    }
}
