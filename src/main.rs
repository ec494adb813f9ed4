//! Headless console runner (default binary).
//!
//! Reads one command per line from stdin and prints the field after each one.
//! Time only passes on `tick [ms]`, which makes sessions easy to script:
//!
//! ```text
//! left | right | down | rotate | drop | pause | resume | new
//! save | load | menu | tick [ms] | quit
//! ```

use std::io::{self, BufRead, Write};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use log::info;

use blockfall::core::Session;
use blockfall::store::StoreConfig;
use blockfall::types::Command;
use blockfall::{App, AppEvent};

/// Default step for a bare `tick`
const DEFAULT_TICK_MS: u32 = 100;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let seed = seed_from_env()?;
    let config = StoreConfig::from_env();
    info!(
        "seed {}, saves at {}, scores at {}",
        seed,
        config.save_path.display(),
        config.scores_path.display()
    );

    let mut app = App::new(Session::new(seed), &config);
    let stdin = io::stdin();
    let mut out = io::stdout().lock();

    draw(&mut out, &app)?;
    for line in stdin.lock().lines() {
        let line = line.context("reading stdin")?;
        let mut words = line.split_whitespace();
        let Some(word) = words.next() else {
            continue;
        };

        let event = match word {
            "quit" | "q" => return Ok(()),
            "tick" | "t" => match parse_tick(words.next()) {
                Some(ms) => app.tick(ms),
                None => {
                    writeln!(out, "bad tick length, expected milliseconds")?;
                    continue;
                }
            },
            other => match Command::from_str(other) {
                Some(command) => app.dispatch(command),
                None => {
                    writeln!(out, "unknown command {other:?}")?;
                    continue;
                }
            },
        };

        match event {
            AppEvent::Notice(msg) => writeln!(out, "! {msg}")?,
            AppEvent::Ignored => writeln!(out, "(ignored)")?,
            _ => {}
        }
        draw(&mut out, &app)?;
    }
    Ok(())
}

/// Length argument of `tick`; `None` when it is not a whole number of milliseconds
fn parse_tick(arg: Option<&str>) -> Option<u32> {
    match arg {
        Some(ms) => ms.parse().ok(),
        None => Some(DEFAULT_TICK_MS),
    }
}

fn seed_from_env() -> Result<u32> {
    if let Ok(raw) = std::env::var("BLOCKFALL_SEED") {
        return raw
            .trim()
            .parse()
            .with_context(|| format!("BLOCKFALL_SEED={raw:?} is not a u32"));
    }
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .subsec_nanos();
    Ok(nanos)
}

/// Field with the active piece drawn as `#`, then a status line
fn draw(out: &mut impl Write, app: &App) -> io::Result<()> {
    let session = app.session();
    let field = session.playfield();
    let active = session.active().cells();

    for y in (0..field.height() as i32).rev() {
        let mut row = String::with_capacity(field.width() + 2);
        row.push('|');
        for x in 0..field.width() as i32 {
            let ch = match field.get(x, y).flatten() {
                Some(kind) => kind.as_char(),
                None if active.contains(&(x, y)) => '#',
                None => '.',
            };
            row.push(ch);
        }
        row.push('|');
        writeln!(out, "{row}")?;
    }

    let best = session
        .leaderboard()
        .best()
        .map_or_else(|| "-".to_string(), |s| s.to_string());
    writeln!(
        out,
        "score {}  speed {:.1}  next {}  best {}  [{}{}]",
        session.score(),
        session.speed(),
        session.next().kind().as_char(),
        best,
        session.status().as_str(),
        if app.in_menu() { ", menu" } else { "" }
    )?;
    out.flush()
}
