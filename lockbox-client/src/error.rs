//! The error taxonomy crossing the boundary.
//!
//! Propagation policy: `Transport` and `MalformedResponse` are
//! programmer-visible defects and propagate unrecovered; `Application` is
//! the expected channel for user-correctable failures and keeps its
//! message intact; `Cancelled` is distinguishable from `Application` so
//! callers can decide whether to retry. Nothing is swallowed silently.

use lockbox_protocol::CodecError;
use thiserror::Error;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors surfaced to adapters.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Native resource allocation failed during initialize. Fatal to that
    /// attempt; the caller may retry.
    #[error("initialization failed: {0}")]
    Initialization(String),

    /// The boundary call itself could not complete (stale handle, worker
    /// panic). A boundary-level bug, not a user-data problem.
    #[error("transport error: {0}")]
    Transport(String),

    /// `success=false` in a well-formed response envelope. The message is
    /// human-readable text; the `"Internal error: "` prefix marks engine
    /// defects but the text is otherwise unstructured.
    #[error("{0}")]
    Application(String),

    /// The caller abandoned the operation before a response arrived. Does
    /// not imply the engine-side effect was rolled back.
    #[error("operation cancelled before a response arrived")]
    Cancelled,

    /// Decode-time contract violation: a defect in the protocol
    /// implementation, never recovered silently.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl From<CodecError> for ClientError {
    fn from(err: CodecError) -> Self {
        match err {
            CodecError::MalformedResponse(msg) => Self::MalformedResponse(msg),
            other => Self::Transport(other.to_string()),
        }
    }
}
