//! Pure encode/decode over command and response documents.
//!
//! Decode failures carry the serde context so a conformance failure names
//! the offending field instead of just "invalid JSON".

use crate::command::Command;
use crate::error::{CodecError, CodecResult};
use crate::response::Response;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Encodes a command into its canonical JSON document.
pub fn encode_command(command: &Command) -> CodecResult<String> {
    serde_json::to_string(command).map_err(CodecError::Encode)
}

/// Decodes an inbound command document (engine side of the boundary).
pub fn decode_command(document: &str) -> CodecResult<Command> {
    serde_json::from_str(document).map_err(|e| CodecError::MalformedCommand(e.to_string()))
}

/// Encodes a response envelope to JSON.
pub fn encode_response<T: Serialize>(response: &Response<T>) -> CodecResult<String> {
    serde_json::to_string(response).map_err(CodecError::Encode)
}

/// Decodes a response document against the expected payload shape and
/// checks the envelope invariants:
///
/// - `success=true`  ⇒ `errorMessage` absent
/// - `success=false` ⇒ `errorMessage` present and `data` absent
pub fn decode_response<T: DeserializeOwned>(document: &str) -> CodecResult<Response<T>> {
    let response: Response<T> =
        serde_json::from_str(document).map_err(|e| CodecError::MalformedResponse(e.to_string()))?;

    if response.success && response.error_message.is_some() {
        return Err(CodecError::MalformedResponse(
            "success=true with errorMessage set".into(),
        ));
    }
    if !response.success {
        if response.error_message.is_none() {
            return Err(CodecError::MalformedResponse(
                "success=false without errorMessage".into(),
            ));
        }
        if response.data.is_some() {
            return Err(CodecError::MalformedResponse(
                "success=false with data set".into(),
            ));
        }
    }

    Ok(response)
}
