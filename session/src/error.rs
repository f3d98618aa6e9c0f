//! Session error types.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure to build a session from source.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file does not exist.
    #[error("source file not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// The file could not be read as UTF-8 text.
    #[error("cannot read {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The text is not a well-formed class file.
    #[error("cannot parse source: {0}")]
    Unparsable(#[from] sculptor_parser::ParseError),
}

impl LoadError {
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::NotFound { path: path.into() }
    }

    pub fn unreadable(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Unreadable {
            path: path.into(),
            source,
        }
    }
}

/// Session errors.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Load error.
    #[error("load error: {0}")]
    Load(#[from] LoadError),

    /// Mutation error (aborts the drain).
    #[error("mutation error: {0}")]
    Mutation(#[from] sculptor_mutation::MutationError),

    /// Output could not be written.
    #[error("cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Persist without a target path on a session not loaded from a file.
    #[error("no output path: the session was not loaded from a file")]
    NoPath,
}

impl SessionError {
    pub fn write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }
}

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;
