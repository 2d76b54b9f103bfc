//! Error types for scoreboard commands and the persistence gateway.

use thiserror::Error;

/// A command addressed a category or player that is not in the current state.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScoreboardError {
    #[error("no category at index {0}")]
    UnknownCategory(usize),
    #[error("no player with id {0:?}")]
    UnknownPlayer(String),
}

/// Failure while reading or writing the key-value store. Never fatal: the
/// gateway logs these and falls back to in-memory defaults.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("storage is not available in this environment")]
    Unavailable,
    #[error("storage read failed: {0}")]
    Read(String),
    #[error("storage write failed: {0}")]
    Write(String),
    #[error("stored value under {key:?} is not valid: {source}")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("value could not be encoded: {0}")]
    Encode(#[from] serde_json::Error),
}
