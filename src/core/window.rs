//! Sliding window over the most recent selection rounds.
//!
//! The window keeps at most [`WINDOW_ROUNDS`] past rounds, oldest first,
//! and classifies how recently a name was selected. The selector uses the
//! classification to push recently-selected birds behind fresh ones.

use std::fmt;

/// Number of past rounds held against re-selection.
pub const WINDOW_ROUNDS: usize = 2;

/// Where in the window a name was last seen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Recency {
    /// In the older of two held rounds.
    Older,
    /// In the most recent held round.
    Newest,
}

/// The last [`WINDOW_ROUNDS`] selections, oldest first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecentWindow {
    rounds: Vec<Vec<String>>,
}

impl RecentWindow {
    pub fn new() -> Self {
        Self { rounds: Vec::new() }
    }

    /// Rebuild a window from persisted rounds, oldest first.
    ///
    /// Trims from the front so at most the newest [`WINDOW_ROUNDS`]
    /// entries survive, whatever the file held.
    pub fn from_rounds(mut rounds: Vec<Vec<String>>) -> Self {
        while rounds.len() > WINDOW_ROUNDS {
            rounds.remove(0);
        }
        Self { rounds }
    }

    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rounds.len()
    }

    pub fn rounds(&self) -> &[Vec<String>] {
        &self.rounds
    }

    /// Append a completed round, dropping the oldest beyond capacity.
    pub fn push(&mut self, round: Vec<String>) {
        if self.rounds.len() >= WINDOW_ROUNDS {
            self.rounds.remove(0);
        }
        self.rounds.push(round);
    }

    /// Classify a name against the held rounds.
    ///
    /// The older round wins when a name appears in both, so a bird seen
    /// twice in a row still counts as "longest since selected" among the
    /// deferred candidates.
    pub fn recency(&self, name: &str) -> Option<Recency> {
        if let Some(older) = self.older() {
            if older.iter().any(|n| n == name) {
                return Some(Recency::Older);
            }
        }
        if let Some(newest) = self.rounds.last() {
            if newest.iter().any(|n| n == name) {
                return Some(Recency::Newest);
            }
        }
        None
    }

    /// The older of two held rounds; `None` unless the window is full.
    pub fn older(&self) -> Option<&Vec<String>> {
        if self.rounds.len() == WINDOW_ROUNDS {
            self.rounds.first()
        } else {
            None
        }
    }
}

impl fmt::Display for RecentWindow {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for round in &self.rounds {
            writeln!(f, "{}", round.join("|"))?;
        }
        Ok(())
    }
}
