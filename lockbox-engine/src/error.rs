//! Error types for the engine.
//!
//! Two classes cross into the response envelope: domain errors (invalid
//! credentials, not found, validation) surface with their plain message,
//! while engine defects (I/O, serialization, internal invariant breaks)
//! surface with the well-known `"Internal error: "` prefix that adapters
//! may pattern-match on.

use thiserror::Error;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that can occur inside the engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// No live session; the command requires a prior login.
    #[error("not authenticated")]
    NotAuthenticated,

    /// The supplied access token does not parse or carries a bad version.
    #[error("invalid access token: {0}")]
    InvalidToken(String),

    /// Credentials were well-formed but wrong.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// A referenced secret/project does not exist (or is not visible).
    #[error("{0} not found")]
    NotFound(String),

    /// Request failed validation.
    #[error("validation error: {0}")]
    Validation(String),

    /// Engine-internal defect.
    #[error("Internal error: {0}")]
    Internal(String),

    /// State-file I/O failure.
    #[error("state file error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization failure inside the engine.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl EngineError {
    /// The message placed in a response envelope's `errorMessage` field.
    /// Defects get the `"Internal error: "` prefix, domain errors do not.
    #[must_use]
    pub fn envelope_message(&self) -> String {
        match self {
            Self::Io(e) => format!("Internal error: {e}"),
            Self::Serialization(e) => format!("Internal error: {e}"),
            other => other.to_string(),
        }
    }
}
