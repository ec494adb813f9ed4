//! Integration tests for the app controller: session, saves and high scores together

use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use blockfall::core::{Outcome, PieceSnapshot, Session};
use blockfall::store::{SaveStore, StoreConfig};
use blockfall::types::{Command, GameAction, PieceKind, SessionStatus};
use blockfall::{App, AppEvent};

fn unique_temp_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    std::env::temp_dir().join(format!("{prefix}_{nanos}"))
}

fn act(app: &mut App, action: GameAction) -> AppEvent {
    app.dispatch(Command::Action(action))
}

/// Session whose next hard drop ends the game with `score` points
fn doomed_session(score: u32) -> Session {
    let mut session = Session::new(17);
    let mut snap = session.save();
    for row in snap.playfield.cells.iter_mut().take(19) {
        for (x, cell) in row.iter_mut().enumerate() {
            *cell = if x == 0 { None } else { Some(PieceKind::Z.id()) };
        }
    }
    snap.active_piece = PieceSnapshot {
        kind: PieceKind::I.id(),
        x: 5,
        y: 17,
        rotation: 1,
    };
    snap.next_piece = PieceSnapshot {
        kind: PieceKind::O.id(),
        x: 4,
        y: 18,
        rotation: 0,
    };
    snap.score = score;
    session.load(&snap).unwrap();
    session
}

#[test]
fn test_game_lifecycle() {
    let dir = unique_temp_dir("blockfall_lifecycle");
    let mut app = App::new(Session::new(12345), &StoreConfig::in_dir(&dir));
    assert!(app.session().is_running());
    assert!(!app.in_menu());

    let y = app.session().active().y();
    assert_eq!(app.tick(500), AppEvent::Session(Outcome::Applied));
    assert_eq!(app.session().active().y(), y - 1);

    assert_eq!(
        act(&mut app, GameAction::HardDrop),
        AppEvent::Session(Outcome::Locked { cleared: 0 })
    );
    assert_eq!(app.session().playfield().filled_count(), 4);

    assert_eq!(
        act(&mut app, GameAction::Pause),
        AppEvent::Session(Outcome::Applied)
    );
    assert_eq!(app.tick(5_000), AppEvent::Session(Outcome::Ignored));
    assert_eq!(
        act(&mut app, GameAction::Resume),
        AppEvent::Session(Outcome::Applied)
    );
}

#[test]
fn test_save_then_load_restores_state() {
    let dir = unique_temp_dir("blockfall_app_save_load");
    let mut app = App::new(Session::new(777), &StoreConfig::in_dir(&dir));

    act(&mut app, GameAction::MoveRight);
    act(&mut app, GameAction::HardDrop);
    act(&mut app, GameAction::Rotate);
    let saved = app.session().save();
    assert_eq!(app.dispatch(Command::SaveGame), AppEvent::Saved);

    act(&mut app, GameAction::HardDrop);
    act(&mut app, GameAction::HardDrop);
    assert_ne!(app.session().save(), saved);

    assert_eq!(app.dispatch(Command::LoadGame), AppEvent::Loaded);
    assert_eq!(app.session().save(), saved);
    assert_eq!(app.session().status(), SessionStatus::Running);

    let _ = fs::remove_dir_all(dir);
}

#[test]
fn test_corrupt_save_leaves_game_untouched() {
    let dir = unique_temp_dir("blockfall_app_corrupt");
    let config = StoreConfig::in_dir(&dir);
    let mut app = App::new(Session::new(9), &config);
    act(&mut app, GameAction::HardDrop);
    let before = app.session().save();

    // Well-formed JSON that fails validation.
    let mut bad = before.clone();
    bad.playfield.cells.truncate(5);
    SaveStore::new(config.save_path.clone()).save(&bad).unwrap();
    assert!(matches!(
        app.dispatch(Command::LoadGame),
        AppEvent::Notice(msg) if msg.starts_with("saved game is corrupt")
    ));
    assert_eq!(app.session().save(), before);

    // Not JSON at all.
    fs::write(&config.save_path, "garbage").unwrap();
    assert!(matches!(
        app.dispatch(Command::LoadGame),
        AppEvent::Notice(msg) if msg.starts_with("could not load")
    ));
    assert_eq!(app.session().save(), before);

    let _ = fs::remove_dir_all(dir);
}

#[test]
fn test_save_claiming_huge_field_is_rejected() {
    let dir = unique_temp_dir("blockfall_app_huge_field");
    let config = StoreConfig::in_dir(&dir);
    let mut app = App::new(Session::new(4), &config);
    let before = app.session().save();

    fs::create_dir_all(&dir).unwrap();
    fs::write(
        &config.save_path,
        r#"{"playfield":{"width":1000000000000000,"height":1,"cells":[[null]]},
            "active_piece":{"kind":0,"x":0,"y":0},
            "next_piece":{"kind":0,"x":0,"y":0},
            "speed":2.0,"score":0}"#,
    )
    .unwrap();

    assert!(matches!(app.dispatch(Command::LoadGame), AppEvent::Notice(_)));
    assert_eq!(app.session().save(), before);

    let _ = fs::remove_dir_all(dir);
}

#[test]
fn test_game_over_writes_high_scores() {
    let dir = unique_temp_dir("blockfall_app_scores");
    let config = StoreConfig::in_dir(&dir);
    let mut app = App::new(doomed_session(11), &config);

    assert_eq!(
        act(&mut app, GameAction::HardDrop),
        AppEvent::Session(Outcome::GameOver {
            score: 11,
            rank: Some(0)
        })
    );
    assert_eq!(
        fs::read_to_string(&config.scores_path).unwrap(),
        "11\n-\n-\n-\n-\n"
    );

    // Nothing to save once the round is over; a new round is.
    assert!(matches!(app.dispatch(Command::SaveGame), AppEvent::Notice(_)));
    assert_eq!(
        act(&mut app, GameAction::NewGame),
        AppEvent::Session(Outcome::Applied)
    );

    // A fresh app picks the scores back up.
    let reopened = App::new(Session::new(1), &config);
    assert_eq!(reopened.session().leaderboard().best(), Some(11));

    let _ = fs::remove_dir_all(dir);
}

#[test]
fn test_menu_new_game_and_load() {
    let dir = unique_temp_dir("blockfall_app_menu");
    let mut app = App::new(Session::new(31), &StoreConfig::in_dir(&dir));
    assert_eq!(app.dispatch(Command::SaveGame), AppEvent::Saved);
    act(&mut app, GameAction::HardDrop);

    assert_eq!(app.dispatch(Command::ExitToMenu), AppEvent::EnteredMenu);
    assert_eq!(app.dispatch(Command::LoadGame), AppEvent::Loaded);
    assert!(!app.in_menu());
    assert_eq!(app.session().playfield().filled_count(), 0);

    app.dispatch(Command::ExitToMenu);
    assert_eq!(
        act(&mut app, GameAction::NewGame),
        AppEvent::Session(Outcome::Applied)
    );
    assert!(!app.in_menu());
    assert!(app.session().is_running());

    let _ = fs::remove_dir_all(dir);
}
