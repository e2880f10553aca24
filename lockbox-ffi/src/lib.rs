//! C ABI exports for the Lockbox secrets SDK.
//!
//! Boundary contract (conceptually `initialize` / `run_command` / `free`):
//!
//! - [`lockbox_init`] parses a JSON settings document and returns a raw
//!   handle id, or `0` on failure.
//! - [`lockbox_run_command`] runs one command document against a handle
//!   and returns a `{ success, data, errorMessage }` envelope string.
//!   Transport-level faults (null pointer, bad UTF-8, stale handle) are
//!   reported in the same envelope shape so callers have one parse path;
//!   those envelopes additionally carry a machine-readable `errorCode`
//!   field distinguishing them from application errors.
//! - [`lockbox_free`] releases the handle exactly once.
//! - [`lockbox_free_string`] reclaims any string this library returned.
//!
//! A handle must not be used from two threads at once, and must not be
//! used after `lockbox_free`. Misuse is reported as an envelope error,
//! never undefined behavior. No panic crosses this boundary.

use lockbox_client::HandleManager;
use lockbox_engine::Settings;
use serde::Deserialize;
use std::ffi::{CStr, CString, c_char};
use std::path::PathBuf;
use std::sync::OnceLock;
use tracing::warn;

/// Process-wide handle registry. The core stays dependency-injected; this
/// static exists only because C callers cannot hold the manager.
static MANAGER: OnceLock<HandleManager> = OnceLock::new();

fn manager() -> &'static HandleManager {
    MANAGER.get_or_init(|| {
        // First initialization also wires logging for the host process.
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
        HandleManager::new()
    })
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct InitRequest {
    #[serde(flatten)]
    settings: Settings,
    /// Optional state-file path; restoration is attempted immediately.
    #[serde(default)]
    state_path: Option<PathBuf>,
}

/// Builds the error envelope for boundary-level faults. These carry a
/// machine-readable `errorCode` (`null_pointer`, `invalid_utf8`,
/// `transport`) alongside the human-readable message, so callers never
/// have to pattern-match message text to classify a fault.
fn error_envelope(code: &str, message: &str) -> String {
    serde_json::json!({
        "success": false,
        "errorCode": code,
        "errorMessage": message,
    })
    .to_string()
}

fn into_c_string(payload: String) -> *mut c_char {
    CString::new(payload).unwrap_or_default().into_raw()
}

unsafe fn read_utf8<'a>(ptr: *const c_char) -> Result<&'a str, (&'static str, String)> {
    if ptr.is_null() {
        return Err(("null_pointer", "input pointer is null".to_string()));
    }
    unsafe { CStr::from_ptr(ptr) }
        .to_str()
        .map_err(|_| ("invalid_utf8", "input is not valid UTF-8".to_string()))
}

/// Initializes an engine from a JSON settings document and returns its
/// handle id. Returns `0` when the document is unreadable; missing fields
/// fall back to engine defaults and never fail initialization.
///
/// # Safety
/// `settings_json` must be a valid null-terminated UTF-8 JSON string, or null
/// (null selects all defaults).
#[unsafe(no_mangle)]
pub unsafe extern "C" fn lockbox_init(settings_json: *const c_char) -> u64 {
    let request = if settings_json.is_null() {
        InitRequest {
            settings: Settings::default(),
            state_path: None,
        }
    } else {
        let raw = match unsafe { read_utf8(settings_json) } {
            Ok(raw) => raw,
            Err((_, message)) => {
                warn!("lockbox_init rejected input: {message}");
                return 0;
            }
        };
        match serde_json::from_str(raw) {
            Ok(request) => request,
            Err(e) => {
                warn!("lockbox_init rejected settings document: {e}");
                return 0;
            }
        }
    };

    match manager().initialize(request.settings, request.state_path) {
        Ok(handle) => handle.into_raw(),
        Err(e) => {
            warn!("lockbox_init failed: {e}");
            0
        }
    }
}

/// Runs one command document against a handle. Always returns an envelope
/// string, even for boundary-level faults.
///
/// # Safety
/// `command_json` must be a valid null-terminated UTF-8 JSON string. The
/// returned pointer must be freed with `lockbox_free_string`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn lockbox_run_command(
    handle: u64,
    command_json: *const c_char,
) -> *mut c_char {
    let raw = match unsafe { read_utf8(command_json) } {
        Ok(raw) => raw,
        Err((code, message)) => return into_c_string(error_envelope(code, &message)),
    };

    match manager().invoke_raw(handle, raw) {
        Ok(response) => into_c_string(response),
        Err(e) => into_c_string(error_envelope("transport", &e.to_string())),
    }
}

/// Releases a handle. Exactly one free per handle id; later frees are
/// rejected (and logged) without touching freed state.
#[unsafe(no_mangle)]
pub extern "C" fn lockbox_free(handle: u64) {
    if let Err(e) = manager().release_raw(handle) {
        warn!("lockbox_free: {e}");
    }
}

/// Reclaims a string previously returned by this library.
///
/// # Safety
/// `ptr` must be a pointer returned by `lockbox_run_command` (or null,
/// which is a no-op), and must not be used after this call.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn lockbox_free_string(ptr: *mut c_char) {
    if ptr.is_null() {
        return;
    }
    drop(unsafe { CString::from_raw(ptr) });
}
