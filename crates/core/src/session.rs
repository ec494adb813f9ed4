//! Session module - one game from spawn to game over
//!
//! The session owns the playfield, the active and next pieces, score, speed and
//! the leaderboard. It is mutated by exactly two entry points, which a frontend
//! interleaves but never runs concurrently:
//!
//! - [`Session::tick`] / [`Session::advance`]: gravity, driven by the
//!   [`GravityClock`] at `speed` ticks per second
//! - [`Session::handle_command`]: discrete player commands
//!
//! Pausing and game over disarm the clock instead of making `advance` poll a flag.

use log::{debug, info};

use crate::clock::GravityClock;
use crate::leaderboard::Leaderboard;
use crate::pieces::Piece;
use crate::playfield::Playfield;
use crate::rng::PieceSource;
use crate::snapshot::{PieceSnapshot, SessionSnapshot, SnapshotError};
use crate::types::{
    GameAction, SessionStatus, BASE_SPEED, FIELD_HEIGHT, FIELD_WIDTH, MAX_SPEED, SPEED_STEP,
};

/// What a tick or command did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing changed (rejected move, command invalid in this state, no tick due)
    Ignored,
    /// The command or tick took effect without locking a piece
    Applied,
    /// The active piece locked; the next piece is in play
    Locked { cleared: u32 },
    /// The next piece could not spawn; `rank` is its leaderboard slot, if any
    GameOver { score: u32, rank: Option<usize> },
}

impl Outcome {
    fn from_moved(moved: bool) -> Self {
        if moved {
            Outcome::Applied
        } else {
            Outcome::Ignored
        }
    }
}

/// Complete state of one game
#[derive(Debug, Clone)]
pub struct Session {
    playfield: Playfield,
    active: Piece,
    next: Piece,
    source: PieceSource,
    leaderboard: Leaderboard,
    clock: GravityClock,
    status: SessionStatus,
    score: u32,
    speed: f32,
}

impl Session {
    /// Create a running 10x20 session with the given RNG seed
    pub fn new(seed: u32) -> Self {
        Self::with_dimensions(seed, FIELD_WIDTH, FIELD_HEIGHT)
    }

    /// Create a running session on a custom-sized field
    pub fn with_dimensions(seed: u32, width: usize, height: usize) -> Self {
        let mut source = PieceSource::new(seed);
        let active = Piece::spawn(source.draw(), width, height);
        let next = Piece::spawn(source.draw(), width, height);
        let mut session = Self {
            playfield: Playfield::new(width, height),
            active,
            next,
            source,
            leaderboard: Leaderboard::new(),
            clock: GravityClock::new(BASE_SPEED),
            status: SessionStatus::Running,
            score: 0,
            speed: BASE_SPEED,
        };
        session.start_round();
        session
    }

    /// Clear the field, deal two fresh pieces and start running at base speed
    ///
    /// The leaderboard survives resets.
    pub fn reset(&mut self) {
        self.playfield.reset();
        self.active = self.spawn_piece();
        self.next = self.spawn_piece();
        self.start_round();
    }

    fn start_round(&mut self) {
        self.score = 0;
        self.speed = BASE_SPEED;
        self.status = SessionStatus::Running;
        self.clock.restart(BASE_SPEED);
        if !self.active.fits(&self.playfield) {
            // Only reachable on fields too small for the piece.
            self.game_over();
        }
    }

    fn spawn_piece(&mut self) -> Piece {
        Piece::spawn(
            self.source.draw(),
            self.playfield.width(),
            self.playfield.height(),
        )
    }

    pub fn playfield(&self) -> &Playfield {
        &self.playfield
    }

    pub fn active(&self) -> &Piece {
        &self.active
    }

    pub fn next(&self) -> &Piece {
        &self.next
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Gravity speed in ticks per second
    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status == SessionStatus::Running
    }

    pub fn leaderboard(&self) -> &Leaderboard {
        &self.leaderboard
    }

    /// Install a leaderboard loaded from disk
    pub fn set_leaderboard(&mut self, leaderboard: Leaderboard) {
        self.leaderboard = leaderboard;
    }

    /// Current gravity interval, for frontends that run their own timer
    pub fn tick_interval_ms(&self) -> u32 {
        self.clock.interval_ms()
    }

    /// Whether the gravity clock is counting (false while paused or over)
    pub fn clock_armed(&self) -> bool {
        self.clock.is_armed()
    }

    pub fn seed(&self) -> u32 {
        self.source.seed()
    }

    /// Landing row of the active piece
    pub fn ghost_y(&self) -> i32 {
        self.active.ghost_y(&self.playfield)
    }

    /// Feed elapsed time to the gravity clock and run every tick that falls due
    ///
    /// Reports the most significant result: a game over stops processing at once,
    /// otherwise any locks are merged into one `Locked` with the total rows cleared.
    pub fn tick(&mut self, elapsed_ms: u32) -> Outcome {
        self.clock.accumulate(elapsed_ms);

        let mut moved = false;
        let mut locked = false;
        let mut cleared = 0;
        while self.clock.take_due() {
            match self.advance() {
                Outcome::Ignored => {}
                Outcome::Applied => moved = true,
                Outcome::Locked { cleared: n } => {
                    locked = true;
                    cleared += n;
                }
                over @ Outcome::GameOver { .. } => return over,
            }
        }

        if locked {
            Outcome::Locked { cleared }
        } else {
            Outcome::from_moved(moved)
        }
    }

    /// One gravity step: fall one row, or lock and bring in the next piece
    pub fn advance(&mut self) -> Outcome {
        if !self.is_running() {
            return Outcome::Ignored;
        }
        if self.active.try_move(0, -1, &self.playfield) {
            return Outcome::Applied;
        }
        self.lock_active()
    }

    /// Apply a player command; anything invalid in the current state is ignored
    pub fn handle_command(&mut self, action: GameAction) -> Outcome {
        match (self.status, action) {
            (_, GameAction::NewGame) => {
                self.reset();
                Outcome::Applied
            }
            (SessionStatus::Running, GameAction::MoveLeft) => {
                Outcome::from_moved(self.active.try_move(-1, 0, &self.playfield))
            }
            (SessionStatus::Running, GameAction::MoveRight) => {
                Outcome::from_moved(self.active.try_move(1, 0, &self.playfield))
            }
            (SessionStatus::Running, GameAction::SoftDrop) => {
                Outcome::from_moved(self.active.try_move(0, -1, &self.playfield))
            }
            (SessionStatus::Running, GameAction::Rotate) => {
                Outcome::from_moved(self.active.rotate_clockwise(&self.playfield))
            }
            (SessionStatus::Running, GameAction::HardDrop) => {
                self.active.hard_drop(&self.playfield);
                self.lock_active()
            }
            (SessionStatus::Running, GameAction::Pause) => {
                self.status = SessionStatus::Paused;
                self.clock.disarm();
                debug!("paused");
                Outcome::Applied
            }
            (SessionStatus::Paused, GameAction::Resume) => {
                self.status = SessionStatus::Running;
                self.clock.arm();
                debug!("resumed");
                Outcome::Applied
            }
            _ => Outcome::Ignored,
        }
    }

    /// Lock the active piece, clear rows, promote the next piece
    fn lock_active(&mut self) -> Outcome {
        self.playfield.lock(&self.active);
        let cleared = self.playfield.clear_full_rows();

        for _ in 0..cleared {
            self.score = self.score.saturating_add(1);
            self.speed = (self.speed + SPEED_STEP).min(MAX_SPEED);
        }
        // Re-armed in the same step as the speed change.
        self.clock.set_speed(self.speed);

        self.active = self.next;
        self.next = self.spawn_piece();

        if !self.active.fits(&self.playfield) {
            return self.game_over();
        }
        Outcome::Locked { cleared }
    }

    fn game_over(&mut self) -> Outcome {
        self.status = SessionStatus::GameOver;
        self.clock.disarm();
        let rank = self.leaderboard.record(self.score);
        info!(
            "game over: score {}, rank {}",
            self.score,
            rank.map_or_else(|| "-".to_string(), |r| (r + 1).to_string())
        );
        Outcome::GameOver {
            score: self.score,
            rank,
        }
    }

    /// Capture playfield, both pieces, speed and score
    pub fn save(&self) -> SessionSnapshot {
        SessionSnapshot {
            playfield: self.playfield.snapshot(),
            active_piece: PieceSnapshot::from(&self.active),
            next_piece: PieceSnapshot::from(&self.next),
            speed: self.speed,
            score: self.score,
        }
    }

    /// Restore a snapshot and resume running
    ///
    /// Everything is validated before anything is assigned; on error the
    /// session is left exactly as it was.
    pub fn load(&mut self, snapshot: &SessionSnapshot) -> Result<(), SnapshotError> {
        let playfield = Playfield::from_snapshot(&snapshot.playfield)?;
        let active = snapshot.active_piece.to_piece()?;
        let next = snapshot.next_piece.to_piece()?;

        let speed = snapshot.speed;
        if !speed.is_finite() || !(BASE_SPEED..=MAX_SPEED).contains(&speed) {
            return Err(SnapshotError::Speed(speed));
        }
        if !active.fits(&playfield) {
            return Err(SnapshotError::PieceBlocked {
                x: active.x(),
                y: active.y(),
            });
        }

        self.playfield = playfield;
        self.active = active;
        self.next = next;
        self.speed = speed;
        self.score = snapshot.score;
        self.status = SessionStatus::Running;
        self.clock.restart(speed);
        info!("loaded game: score {}, speed {:.1}", self.score, self.speed);
        Ok(())
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PieceKind;

    #[test]
    fn test_new_session_is_running() {
        let session = Session::new(12345);
        assert_eq!(session.status(), SessionStatus::Running);
        assert_eq!(session.score(), 0);
        assert_eq!(session.speed(), BASE_SPEED);
        assert!(session.active().fits(session.playfield()));
        assert_eq!(session.playfield().filled_count(), 0);
        assert_eq!(session.tick_interval_ms(), 500);
    }

    #[test]
    fn test_advance_moves_down_one_row() {
        let mut session = Session::new(12345);
        let y = session.active().y();
        assert_eq!(session.advance(), Outcome::Applied);
        assert_eq!(session.active().y(), y - 1);
    }

    #[test]
    fn test_advance_locks_when_blocked() {
        let mut session = Session::new(12345);
        let next_kind = session.next().kind();
        let mut outcome = Outcome::Applied;
        for _ in 0..40 {
            outcome = session.advance();
            if outcome != Outcome::Applied {
                break;
            }
        }
        assert_eq!(outcome, Outcome::Locked { cleared: 0 });
        assert_eq!(session.playfield().filled_count(), 4);
        assert_eq!(session.active().kind(), next_kind);
    }

    #[test]
    fn test_pause_disarms_clock() {
        let mut session = Session::new(1);
        assert_eq!(session.handle_command(GameAction::Pause), Outcome::Applied);
        assert!(!session.clock_armed());

        let before = *session.active();
        assert_eq!(session.tick(5_000), Outcome::Ignored);
        assert_eq!(session.handle_command(GameAction::MoveLeft), Outcome::Ignored);
        assert_eq!(session.handle_command(GameAction::HardDrop), Outcome::Ignored);
        assert_eq!(*session.active(), before);

        assert_eq!(session.handle_command(GameAction::Resume), Outcome::Applied);
        assert!(session.clock_armed());
        assert_eq!(session.status(), SessionStatus::Running);
    }

    #[test]
    fn test_resume_while_running_is_noop() {
        let mut session = Session::new(1);
        assert_eq!(session.handle_command(GameAction::Resume), Outcome::Ignored);
        assert_eq!(session.status(), SessionStatus::Running);
    }

    #[test]
    fn test_tick_runs_due_advances() {
        let mut session = Session::new(3);
        let y = session.active().y();
        assert_eq!(session.tick(499), Outcome::Ignored);
        assert_eq!(session.tick(1), Outcome::Applied);
        assert_eq!(session.tick(1000), Outcome::Applied);
        assert_eq!(session.active().y(), y - 3);
    }

    #[test]
    fn test_tiny_field_is_over_immediately() {
        let session = Session::with_dimensions(1, 1, 1);
        assert_eq!(session.status(), SessionStatus::GameOver);
        assert!(!session.clock_armed());
    }

    #[test]
    fn test_save_captures_pieces() {
        let session = Session::new(77);
        let snap = session.save();
        assert_eq!(snap.active_piece.kind, session.active().kind().id());
        assert_eq!(snap.next_piece.x, session.next().x());
        assert_eq!(snap.playfield.cells.len(), 20);
        assert!(PieceKind::from_id(snap.next_piece.kind).is_some());
    }
}
