//! Errors reported by media engines.

use thiserror::Error;

/// Result type alias for engine operations.
pub type EngineResult<T> = std::result::Result<T, EngineError>;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("invalid source uri {uri:?}: {reason}")]
    InvalidUri { uri: String, reason: String },

    #[error("failed to fetch {uri}: {reason}")]
    Fetch { uri: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to decode {uri}: {reason}")]
    Decode { uri: String, reason: String },

    #[error("audio output unavailable: {0}")]
    Output(String),

    #[error("unknown sound #{0}")]
    UnknownSound(u64),

    #[error("seek failed: {0}")]
    Seek(String),

    #[error("audio engine is no longer running")]
    EngineGone,
}
