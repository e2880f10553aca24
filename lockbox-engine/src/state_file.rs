//! On-disk session mirror.
//!
//! The state file is an engine-versioned JSON document at a caller-supplied
//! path. Adapters treat the path as opaque and never parse the contents;
//! only this module reads or writes it. A missing or unreadable file on
//! restore is not an error, it simply means no prior session exists.

use crate::error::EngineResult;
use crate::session::SessionState;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Current state-file format version.
pub const STATE_FILE_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StateFile {
    version: u32,
    #[serde(flatten)]
    session: SessionState,
}

/// Persists a session to `path`, replacing any previous contents.
pub fn save(path: &Path, session: &SessionState) -> EngineResult<()> {
    let file = StateFile {
        version: STATE_FILE_VERSION,
        session: session.clone(),
    };
    let json = serde_json::to_string_pretty(&file)?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, json)?;
    debug!(path = %path.display(), "session state persisted");
    Ok(())
}

/// Attempts to restore a session from `path`.
///
/// Returns `None` when the file is missing, unreadable, unparseable, or
/// carries an unknown version. Corrupt files are logged and skipped, never
/// surfaced as errors: the caller simply has no prior session.
pub fn load(path: &Path) -> Option<SessionState> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) => {
            debug!(path = %path.display(), "no restorable state file: {e}");
            return None;
        }
    };
    let file: StateFile = match serde_json::from_str(&raw) {
        Ok(file) => file,
        Err(e) => {
            warn!(path = %path.display(), "ignoring corrupt state file: {e}");
            return None;
        }
    };
    if file.version != STATE_FILE_VERSION {
        warn!(
            path = %path.display(),
            version = file.version,
            "ignoring state file with unknown version"
        );
        return None;
    }
    Some(file.session)
}

/// Removes the state file if present. Used by logout when the caller asked
/// for deletion.
pub fn remove(path: &Path) -> EngineResult<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}
