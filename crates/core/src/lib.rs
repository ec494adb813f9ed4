//! Core simulation - pure, deterministic, and testable
//!
//! This crate contains the playfield rules and the game state machine. It does
//! no I/O: persistence lives in `blockfall-store`, drawing and input mapping live
//! in whatever frontend drives a [`Session`].
//!
//! # Module Structure
//!
//! - [`pieces`]: shape tables, in-place rotation, the falling [`Piece`]
//! - [`playfield`]: occupancy grid, collision test, row clearing
//! - [`clock`]: fixed-rate gravity ticks derived from the current speed
//! - [`session`]: Running / Paused / GameOver state machine, scoring, speed
//! - [`leaderboard`]: top-5 score list and its line format
//! - [`snapshot`]: serde snapshot types and their validation errors
//! - [`rng`]: seeded uniform piece generator
//!
//! # Rules
//!
//! - Pieces spawn centered at the top of the field; a blocked spawn ends the round
//! - Rotation is clockwise and in place; no wall kicks
//! - Every cleared row scores 1 point and adds 0.1 ticks/s of speed (capped at 6.0)
//! - Hard drop locks immediately
//!
//! # Example
//!
//! ```
//! use blockfall_core::{Outcome, Session};
//! use blockfall_types::GameAction;
//!
//! let mut session = Session::new(12345);
//! session.handle_command(GameAction::MoveRight);
//! session.handle_command(GameAction::Rotate);
//! let outcome = session.handle_command(GameAction::HardDrop);
//!
//! assert!(matches!(outcome, Outcome::Locked { .. }));
//! assert_eq!(session.playfield().filled_count(), 4);
//! ```
//!
//! # Timing
//!
//! Call [`Session::tick`] with the elapsed milliseconds since the last call; it
//! runs one gravity step per `1000 / speed` ms. Frontends with their own timer
//! can instead call [`Session::advance`] every [`Session::tick_interval_ms`].

pub mod clock;
pub mod leaderboard;
pub mod pieces;
pub mod playfield;
pub mod rng;
pub mod session;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use clock::GravityClock;
pub use leaderboard::Leaderboard;
pub use pieces::{Piece, Shape};
pub use playfield::Playfield;
pub use rng::{PieceSource, SimpleRng};
pub use session::{Outcome, Session};
pub use snapshot::{PieceSnapshot, PlayfieldSnapshot, SessionSnapshot, SnapshotError};
