//! Leaderboard module - fixed top-5 score list
//!
//! Slots are `Option<u32>`: `None` is an unused slot. Filled slots are sorted
//! descending and always precede unused ones. A new score goes in front of the
//! first slot that is unused or holds a strictly lower score, so a tie lands
//! behind the existing equal score.
//!
//! The text form is one slot per line, either a decimal score or `-`.

use log::debug;

use crate::snapshot::SnapshotError;
use crate::types::{EMPTY_SCORE_TOKEN, LEADERBOARD_SIZE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Leaderboard {
    entries: [Option<u32>; LEADERBOARD_SIZE],
}

impl Leaderboard {
    /// All slots unused
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from arbitrary slots, restoring the ordering invariant
    pub fn from_entries(entries: [Option<u32>; LEADERBOARD_SIZE]) -> Self {
        let mut entries = entries;
        // `Option` orders `None` first; reversing puts scores high-to-low, then `None`s.
        entries.sort_unstable_by(|a, b| b.cmp(a));
        Self { entries }
    }

    pub fn entries(&self) -> &[Option<u32>; LEADERBOARD_SIZE] {
        &self.entries
    }

    /// Highest recorded score
    pub fn best(&self) -> Option<u32> {
        self.entries[0]
    }

    /// Insert `score` if it places; returns the 0-based rank it took
    pub fn record(&mut self, score: u32) -> Option<usize> {
        let rank = self
            .entries
            .iter()
            .position(|slot| slot.map_or(true, |existing| score > existing))?;

        // Shift the tail down one slot; the last entry falls off.
        self.entries.copy_within(rank..LEADERBOARD_SIZE - 1, rank + 1);
        self.entries[rank] = Some(score);
        debug!("score {} recorded at rank {}", score, rank + 1);
        Some(rank)
    }

    /// One line per slot
    pub fn to_lines(&self) -> String {
        let mut out = String::new();
        for slot in &self.entries {
            match slot {
                Some(score) => out.push_str(&score.to_string()),
                None => out.push_str(EMPTY_SCORE_TOKEN),
            }
            out.push('\n');
        }
        out
    }

    /// Parse the line format; missing trailing lines count as unused slots
    pub fn parse_lines(text: &str) -> Result<Self, SnapshotError> {
        let mut lines: Vec<&str> = text.lines().map(str::trim).collect();
        while lines.last() == Some(&"") {
            lines.pop();
        }

        if lines.len() > LEADERBOARD_SIZE {
            return Err(SnapshotError::ScoreCount(lines.len()));
        }

        let mut entries = [None; LEADERBOARD_SIZE];
        for (i, line) in lines.iter().enumerate() {
            entries[i] = match *line {
                EMPTY_SCORE_TOKEN => None,
                text => Some(text.parse::<u32>().map_err(|_| SnapshotError::ScoreLine {
                    line: i + 1,
                    text: text.to_string(),
                })?),
            };
        }
        Ok(Self::from_entries(entries))
    }
}
