//! App controller - routes frontend commands to the session and the stores
//!
//! Gameplay actions go straight to the [`Session`]. Saving, loading and menu
//! flow need the filesystem or live outside a round, so they are handled here.
//! Persistence failures never touch the running game; they come back as a
//! [`AppEvent::Notice`] for the frontend to show.

use log::warn;

use crate::core::{Outcome, Session};
use crate::store::{SaveStore, ScoreStore, StoreConfig};
use crate::types::{Command, GameAction, SessionStatus};

/// Result of one dispatched command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// A gameplay action or tick ran
    Session(Outcome),
    Saved,
    Loaded,
    /// The main menu is showing; the round is paused underneath
    EnteredMenu,
    /// Transient message for the player (save/load trouble)
    Notice(String),
    /// Command not valid right now
    Ignored,
}

pub struct App {
    session: Session,
    saves: SaveStore,
    scores: ScoreStore,
    in_menu: bool,
}

impl App {
    /// Wrap a session, installing the persisted leaderboard
    pub fn new(mut session: Session, config: &StoreConfig) -> Self {
        let scores = ScoreStore::new(config.scores_path.clone());
        session.set_leaderboard(scores.load());
        Self {
            session,
            saves: SaveStore::new(config.save_path.clone()),
            scores,
            in_menu: false,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn in_menu(&self) -> bool {
        self.in_menu
    }

    /// Advance gravity by wall time
    pub fn tick(&mut self, elapsed_ms: u32) -> AppEvent {
        let outcome = self.session.tick(elapsed_ms);
        self.after_outcome(outcome)
    }

    pub fn dispatch(&mut self, command: Command) -> AppEvent {
        if self.in_menu {
            return self.dispatch_in_menu(command);
        }

        match command {
            Command::Action(action) => {
                let outcome = self.session.handle_command(action);
                self.after_outcome(outcome)
            }
            Command::SaveGame => self.save(),
            Command::LoadGame => self.load(),
            Command::ExitToMenu => {
                self.session.handle_command(GameAction::Pause);
                self.in_menu = true;
                AppEvent::EnteredMenu
            }
        }
    }

    fn dispatch_in_menu(&mut self, command: Command) -> AppEvent {
        match command {
            Command::Action(GameAction::NewGame) => {
                self.in_menu = false;
                let outcome = self.session.handle_command(GameAction::NewGame);
                AppEvent::Session(outcome)
            }
            Command::Action(GameAction::Resume) => {
                match self.session.handle_command(GameAction::Resume) {
                    Outcome::Ignored => AppEvent::Ignored,
                    outcome => {
                        self.in_menu = false;
                        AppEvent::Session(outcome)
                    }
                }
            }
            Command::LoadGame => {
                let event = self.load();
                if event == AppEvent::Loaded {
                    self.in_menu = false;
                }
                event
            }
            _ => AppEvent::Ignored,
        }
    }

    fn after_outcome(&mut self, outcome: Outcome) -> AppEvent {
        if let Outcome::GameOver { rank: Some(_), .. } = outcome {
            if let Err(e) = self.scores.persist(self.session.leaderboard()) {
                warn!("could not write high scores: {}", e);
                return AppEvent::Notice(format!("high scores not saved: {}", e));
            }
        }
        AppEvent::Session(outcome)
    }

    fn save(&mut self) -> AppEvent {
        if self.session.status() == SessionStatus::GameOver {
            return AppEvent::Notice("nothing to save".to_string());
        }
        match self.saves.save(&self.session.save()) {
            Ok(()) => AppEvent::Saved,
            Err(e) => {
                warn!("save failed: {}", e);
                AppEvent::Notice(format!("could not save: {}", e))
            }
        }
    }

    fn load(&mut self) -> AppEvent {
        let snapshot = match self.saves.load() {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) => return AppEvent::Notice("no saved game".to_string()),
            Err(e) => {
                warn!("load failed: {}", e);
                return AppEvent::Notice(format!("could not load: {}", e));
            }
        };
        match self.session.load(&snapshot) {
            Ok(()) => AppEvent::Loaded,
            Err(e) => {
                warn!("saved game rejected: {}", e);
                AppEvent::Notice(format!("saved game is corrupt: {}", e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn unique_temp_dir() -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        std::env::temp_dir().join(format!("blockfall_app_unit_{nanos}"))
    }

    #[test]
    fn test_menu_blocks_gameplay() {
        let dir = unique_temp_dir();
        let mut app = App::new(Session::new(5), &StoreConfig::in_dir(&dir));

        assert_eq!(app.dispatch(Command::ExitToMenu), AppEvent::EnteredMenu);
        assert!(app.in_menu());
        assert_eq!(app.session().status(), SessionStatus::Paused);
        assert_eq!(
            app.dispatch(Command::Action(GameAction::MoveLeft)),
            AppEvent::Ignored
        );
        assert_eq!(app.dispatch(Command::SaveGame), AppEvent::Ignored);

        assert_eq!(
            app.dispatch(Command::Action(GameAction::Resume)),
            AppEvent::Session(Outcome::Applied)
        );
        assert!(!app.in_menu());
        assert!(app.session().is_running());
    }

    #[test]
    fn test_load_without_save_is_notice() {
        let dir = unique_temp_dir();
        let mut app = App::new(Session::new(5), &StoreConfig::in_dir(&dir));
        assert_eq!(
            app.dispatch(Command::LoadGame),
            AppEvent::Notice("no saved game".to_string())
        );
    }
}
