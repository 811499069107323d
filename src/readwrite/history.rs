//! On-disk selection history.
//!
//! Two plain-text files live in the state directory: the recent window
//! (rewritten every round, at most [`WINDOW_ROUNDS`] lines) and the full
//! log (append-only, one line per round since the last reset). Each line
//! is the round's selected names joined with `|`, oldest round first.

use std::fs;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use crate::core::window::RecentWindow;
use crate::core::HistorySink;
use crate::errors::{Result, SubflockError};

pub const RECENT_HISTORY_FILE: &str = "recent_history.txt";
pub const FULL_HISTORY_FILE: &str = "full_history.txt";

const SEPARATOR: char = '|';

/// Persists the recent window and the full log of a sequence of rounds.
pub struct HistoryStore {
    dir: PathBuf,
}

impl HistoryStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn recent_path(&self) -> PathBuf {
        self.dir.join(RECENT_HISTORY_FILE)
    }

    fn full_path(&self) -> PathBuf {
        self.dir.join(FULL_HISTORY_FILE)
    }

    /// Load the recent window; an absent file is an empty window.
    pub fn load_recent_window(&self) -> Result<RecentWindow> {
        Ok(RecentWindow::from_rounds(read_rounds(&self.recent_path())?))
    }

    /// Load the full log, oldest round first; absent file means no rounds.
    pub fn load_full_log(&self) -> Result<Vec<Vec<String>>> {
        read_rounds(&self.full_path())
    }

    /// Rewrite the recent window file.
    ///
    /// Writes a sibling temp file and renames it over the target, so a
    /// load never observes a half-written window.
    pub fn save_recent_window(&self, window: &RecentWindow) -> Result<()> {
        let path = self.recent_path();
        let tmp_path = path.with_extension("txt.tmp");
        let mut file = fs::File::create(&tmp_path).map_err(write_error(&tmp_path))?;
        for round in window.rounds() {
            writeln!(file, "{}", join(round)).map_err(write_error(&tmp_path))?;
        }
        file.sync_all().map_err(write_error(&tmp_path))?;
        fs::rename(&tmp_path, &path).map_err(write_error(&path))?;
        Ok(())
    }

    /// Append one round to the full log.
    pub fn append_full_log(&self, round: &[String]) -> Result<()> {
        let path = self.full_path();
        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(write_error(&path))?;
        writeln!(file, "{}", join(round)).map_err(write_error(&path))?;
        file.sync_all().map_err(write_error(&path))?;
        Ok(())
    }

    /// Remove both history files. Missing files are fine; reset is for
    /// starting an experiment from a clean slate.
    pub fn reset(&self) -> Result<()> {
        for path in [self.recent_path(), self.full_path()] {
            match fs::remove_file(&path) {
                Ok(()) => {}
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
                Err(err) => return Err(SubflockError::WriteError(format!(
                    "failed to remove {}: {err}",
                    path.display()
                ))),
            }
        }
        Ok(())
    }
}

impl HistorySink for HistoryStore {
    fn save_window(&self, window: &RecentWindow) -> Result<()> {
        self.save_recent_window(window)
    }

    fn append_round(&self, round: &[String]) -> Result<()> {
        self.append_full_log(round)
    }
}

fn join(round: &[String]) -> String {
    round.join(&SEPARATOR.to_string())
}

fn read_rounds(path: &Path) -> Result<Vec<Vec<String>>> {
    if !path.is_file() {
        return Ok(Vec::new());
    }
    let file = fs::File::open(path)
        .map_err(|err| SubflockError::ReadError(format!("failed to open {}: {err}", path.display())))?;
    let mut rounds = Vec::new();
    for line in BufReader::new(file).lines() {
        let line = line.map_err(|err| {
            SubflockError::ReadError(format!("failed to read {}: {err}", path.display()))
        })?;
        if line.is_empty() {
            continue;
        }
        rounds.push(line.split(SEPARATOR).map(|name| name.to_string()).collect());
    }
    Ok(rounds)
}

fn write_error(path: &Path) -> impl Fn(std::io::Error) -> SubflockError + '_ {
    move |err| SubflockError::WriteError(format!("failed to write {}: {err}", path.display()))
}
