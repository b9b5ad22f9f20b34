//! Durable high score and leaderboard.
//!
//! Loads never fail: a missing file yields the default silently, anything
//! else that goes wrong yields the default plus a warning in the log. Saves
//! report errors to the caller, which is expected to log them and carry on
//! with the in-memory state.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::error::StorageError;
use crate::leaderboard::{Leaderboard, LeaderboardEntry};

/// Plain text file holding one decimal integer.
#[derive(Debug, Clone)]
pub struct HighScoreFile {
    path: PathBuf,
}

impl HighScoreFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn read(&self) -> Result<u32, StorageError> {
        let content = fs::read_to_string(&self.path).map_err(|e| StorageError::io(&self.path, e))?;
        content
            .trim()
            .parse()
            .map_err(|_| StorageError::InvalidHighScore {
                path: self.path.clone(),
                content,
            })
    }

    pub fn load(&self) -> u32 {
        match self.read() {
            Ok(score) => score,
            Err(e) if e.is_not_found() => 0,
            Err(e) => {
                log::warn!("{e}; high score reset to 0");
                0
            }
        }
    }

    pub fn save(&self, score: u32) -> Result<(), StorageError> {
        write_replacing(&self.path, score.to_string().as_bytes())
    }
}

/// UTF-8 JSON array of `{"name": ..., "score": ...}` objects.
#[derive(Debug, Clone)]
pub struct LeaderboardFile {
    path: PathBuf,
    capacity: usize,
}

impl LeaderboardFile {
    pub fn new(path: impl Into<PathBuf>, capacity: usize) -> Self {
        Self {
            path: path.into(),
            capacity,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn read(&self) -> Result<Leaderboard, StorageError> {
        let json = fs::read_to_string(&self.path).map_err(|e| StorageError::io(&self.path, e))?;
        let entries: Vec<LeaderboardEntry> =
            serde_json::from_str(&json).map_err(|source| StorageError::InvalidLeaderboard {
                path: self.path.clone(),
                source,
            })?;
        let board = Leaderboard::from_entries(entries.clone(), self.capacity);
        if board.entries() != entries.as_slice() {
            log::warn!(
                "{} was out of order or over capacity; kept the top {}",
                self.path.display(),
                board.len()
            );
        }
        Ok(board)
    }

    pub fn load(&self) -> Leaderboard {
        match self.read() {
            Ok(board) => board,
            Err(e) if e.is_not_found() => Leaderboard::new(self.capacity),
            Err(e) => {
                log::warn!("{e}; starting with an empty leaderboard");
                Leaderboard::new(self.capacity)
            }
        }
    }

    pub fn save(&self, board: &Leaderboard) -> Result<(), StorageError> {
        let mut json = Vec::new();
        let mut ser = serde_json::Serializer::with_formatter(&mut json, PrettyFormatter::with_indent(b"    "));
        board.entries().serialize(&mut ser)?;
        write_replacing(&self.path, &json)
    }
}

/// Writes a sibling temp file and renames it over `path`, so readers never
/// see a half-written record.
fn write_replacing(path: &Path, contents: &[u8]) -> Result<(), StorageError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| StorageError::io(parent, e))?;
    }
    let mut tmp: OsString = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    fs::write(&tmp, contents).map_err(|e| StorageError::io(&tmp, e))?;
    fs::rename(&tmp, path).map_err(|e| StorageError::io(path, e))
}
