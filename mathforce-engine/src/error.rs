//! Error types for mathforce-engine

use thiserror::Error;

/// Error type for engine operations
///
/// Unmeasurable scores, empty question pools and unreadable persisted state
/// are not errors: they surface as `None`, an empty `Vec`, or the empty
/// default respectively. This enum covers what the caller cannot recover
/// from locally.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Grade outside the supported range
    #[error("Invalid grade: {0} (expected 5-11)")]
    InvalidGrade(u8),

    /// Difficulty level outside the supported range
    #[error("Invalid difficulty: {0} (expected 1-5)")]
    InvalidDifficulty(u8),

    /// Invalid role name
    #[error("Invalid role: {0}")]
    InvalidRole(String),

    /// A finished session was asked to record or finalize again
    #[error("Session {0} is already finalized")]
    SessionFinalized(uuid::Uuid),

    /// Key-value backend failure
    #[error("Storage error: {0}")]
    Storage(String),

    /// IO operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization or deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for EngineError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;
