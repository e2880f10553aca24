//! Error types for the envelope codec.

use thiserror::Error;

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors that can occur while encoding or decoding envelope documents.
#[derive(Debug, Error)]
pub enum CodecError {
    /// A command could not be serialized to its canonical document.
    #[error("failed to encode command: {0}")]
    Encode(serde_json::Error),

    /// An inbound command document does not match any known shape.
    #[error("malformed command: {0}")]
    MalformedCommand(String),

    /// A response document violates the envelope contract. Always a
    /// protocol-implementation defect, never recovered silently.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}
