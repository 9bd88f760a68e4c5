//! Error types raised by profile store implementations.

use thiserror::Error;

/// Errors surfaced by profile store implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("profile store lock was poisoned")]
    LockPoisoned,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),
}

pub type Result<T> = std::result::Result<T, RepositoryError>;
