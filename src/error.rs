//! Error types for mypa.

use thiserror::Error;

/// Errors produced by the mypa library and CLI.
#[derive(Debug, Error)]
pub enum MypaError {
    /// An operation was attempted from a state that forbids it.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// A task or record could not be found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Configuration or path resolution failed.
    #[error("configuration error: {0}")]
    Config(String),

    /// The SQLite database failed.
    #[error("database error: {0}")]
    Database(String),

    /// User input or stored data could not be parsed.
    #[error("parse error: {0}")]
    Parse(String),

    /// Reading a persisted blob failed.
    #[error("failed to read persisted state: {0}")]
    PersistenceRead(String),

    /// Writing a persisted blob failed.
    #[error("failed to write persisted state: {0}")]
    PersistenceWrite(String),

    /// The terminal could not be set up or drawn.
    #[error("terminal error: {0}")]
    Terminal(String),

    /// Underlying I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for MypaError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

impl MypaError {
    /// Shorthand for an [`MypaError::InvalidState`].
    pub fn invalid_state(msg: impl Into<String>) -> Self {
        Self::InvalidState(msg.into())
    }

    /// Whether this error is a rejected state transition.
    #[must_use]
    pub const fn is_invalid_state(&self) -> bool {
        matches!(self, Self::InvalidState(_))
    }
}
