//! Shared types module - data structures and constants used by every crate
//!
//! Everything here is plain data with no external dependencies, so the same
//! vocabulary can be used by the simulation core, the persistence layer and
//! whatever presentation layer drives the game.
//!
//! # Playfield Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9, left to right)
//! - **Height**: 20 rows (indexed 0-19, **bottom to top**)
//!
//! Row 0 is the bottom-most playable row; gravity pulls toward lower row indices.
//!
//! # Speed
//!
//! Speed is expressed in gravity ticks per second:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `BASE_SPEED` | 2.0 | Speed at the start of every round |
//! | `SPEED_STEP` | 0.1 | Added once per cleared row |
//! | `MAX_SPEED` | 6.0 | Upper clamp |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Command, GameAction, PieceKind, FIELD_HEIGHT, FIELD_WIDTH};
//!
//! assert_eq!(PieceKind::from_id(5), Some(PieceKind::T));
//! assert_eq!(PieceKind::T.id(), 5);
//! assert_eq!(PieceKind::from_str("t"), Some(PieceKind::T));
//!
//! assert_eq!(Command::from_str("drop"), Some(Command::Action(GameAction::HardDrop)));
//! assert_eq!(Command::from_str("save"), Some(Command::SaveGame));
//!
//! assert_eq!(FIELD_WIDTH, 10);
//! assert_eq!(FIELD_HEIGHT, 20);
//! ```

/// Playfield width in cells (10 columns)
pub const FIELD_WIDTH: usize = 10;

/// Playfield height in cells (20 rows)
pub const FIELD_HEIGHT: usize = 20;

/// Gravity speed at the start of a round (ticks per second)
pub const BASE_SPEED: f32 = 2.0;

/// Gravity speed ceiling (ticks per second)
pub const MAX_SPEED: f32 = 6.0;

/// Speed gained per cleared row
pub const SPEED_STEP: f32 = 0.1;

/// Number of slots on the leaderboard
pub const LEADERBOARD_SIZE: usize = 5;

/// Number of distinct piece kinds
pub const PIECE_KIND_COUNT: usize = 7;

/// Token written for an unused leaderboard slot
pub const EMPTY_SCORE_TOKEN: &str = "-";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speed_bounds_are_ordered() {
        assert!(BASE_SPEED < MAX_SPEED);
        assert!(SPEED_STEP > 0.0);
        // 40 rows take the base speed to the ceiling.
        assert!((BASE_SPEED + 40.0 * SPEED_STEP - MAX_SPEED).abs() < 1e-4);
    }

    #[test]
    fn piece_ids_roundtrip() {
        for id in 0..PIECE_KIND_COUNT as u8 {
            let kind = PieceKind::from_id(id).unwrap();
            assert_eq!(kind.id(), id);
        }
        assert_eq!(PieceKind::from_id(7), None);
    }

    #[test]
    fn command_aliases() {
        assert_eq!(
            Command::from_str("moveLeft"),
            Some(Command::Action(GameAction::MoveLeft))
        );
        assert_eq!(
            Command::from_str("LEFT"),
            Some(Command::Action(GameAction::MoveLeft))
        );
        assert_eq!(
            Command::from_str("rotate"),
            Some(Command::Action(GameAction::Rotate))
        );
        assert_eq!(Command::from_str("menu"), Some(Command::ExitToMenu));
        assert_eq!(Command::from_str("load"), Some(Command::LoadGame));
        assert_eq!(Command::from_str("bogus"), None);
    }
}

/// The seven tetromino piece kinds
///
/// The integer id (`I=0 .. Z=6`) is what the playfield stores and what saved
/// games carry. Renderers use it for color lookup; the core treats it as an
/// opaque tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// All kinds in id order
    pub const ALL: [PieceKind; PIECE_KIND_COUNT] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Stable integer id in `0..7`
    pub fn id(self) -> u8 {
        self as u8
    }

    /// Look up a kind by id; `None` for ids outside `0..7`
    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.get(id as usize).copied()
    }

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            "o" => Some(PieceKind::O),
            "s" => Some(PieceKind::S),
            "t" => Some(PieceKind::T),
            "z" => Some(PieceKind::Z),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::J => "j",
            PieceKind::L => "l",
            PieceKind::O => "o",
            PieceKind::S => "s",
            PieceKind::T => "t",
            PieceKind::Z => "z",
        }
    }

    /// Uppercase letter, for text displays
    pub fn as_char(&self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::J => 'J',
            PieceKind::L => 'L',
            PieceKind::O => 'O',
            PieceKind::S => 'S',
            PieceKind::T => 'T',
            PieceKind::Z => 'Z',
        }
    }
}

/// A cell on the playfield
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Cell filled by a locked piece of that kind
pub type Cell = Option<PieceKind>;

/// Session-level actions
///
/// These are the commands a running session validates and applies itself.
/// Movement commands are ignored unless the session is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down
    SoftDrop,
    /// Rotate piece 90° clockwise
    Rotate,
    /// Drop piece to its lowest legal position and lock it
    HardDrop,
    /// Suspend gravity and ignore input
    Pause,
    /// Leave the paused state
    Resume,
    /// Start a fresh round
    NewGame,
}

impl GameAction {
    /// Parse action from string (case-insensitive, accepts short aliases)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" | "left" => Some(GameAction::MoveLeft),
            "moveright" | "right" => Some(GameAction::MoveRight),
            "softdrop" | "down" => Some(GameAction::SoftDrop),
            "rotate" | "rotatecw" | "up" => Some(GameAction::Rotate),
            "harddrop" | "drop" => Some(GameAction::HardDrop),
            "pause" => Some(GameAction::Pause),
            "resume" => Some(GameAction::Resume),
            "newgame" | "new" | "restart" => Some(GameAction::NewGame),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::Rotate => "rotate",
            GameAction::HardDrop => "hardDrop",
            GameAction::Pause => "pause",
            GameAction::Resume => "resume",
            GameAction::NewGame => "newGame",
        }
    }
}

/// Everything a presentation layer may send
///
/// Gameplay actions go to the session; the rest touch persistence or menu
/// flow and are handled one level up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Action(GameAction),
    SaveGame,
    LoadGame,
    ExitToMenu,
}

impl Command {
    /// Parse a command name (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "savegame" | "save" => Some(Command::SaveGame),
            "loadgame" | "load" => Some(Command::LoadGame),
            "exittomenu" | "menu" => Some(Command::ExitToMenu),
            other => GameAction::from_str(other).map(Command::Action),
        }
    }
}

impl From<GameAction> for Command {
    fn from(action: GameAction) -> Self {
        Command::Action(action)
    }
}

/// Lifecycle state of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Running,
    Paused,
    GameOver,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Running => "running",
            SessionStatus::Paused => "paused",
            SessionStatus::GameOver => "game over",
        }
    }
}
