use std::path::PathBuf;

use thiserror::Error;

use crate::leaderboard::MAX_NAME_LEN;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("could not access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{} does not hold a non-negative integer: {content:?}", path.display())]
    InvalidHighScore { path: PathBuf, content: String },
    #[error("{} is not a valid leaderboard: {source}", path.display())]
    InvalidLeaderboard {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Encode(#[from] serde_json::Error),
}

impl StorageError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StorageError::Io {
            path: path.into(),
            source,
        }
    }

    /// True when the backing file simply does not exist yet.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StorageError::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}

/// Why a typed name cannot go on the leaderboard.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameError {
    #[error("name is empty")]
    Empty,
    #[error("name is longer than {} characters", MAX_NAME_LEN)]
    TooLong,
    #[error("name contains characters that cannot be displayed")]
    NotPrintable,
}
