//! The typed command runner: the single entry point adapters call.
//!
//! `run` is one synchronous round trip: encode, invoke, decode, map the
//! envelope onto the error taxonomy. `run_with_timeout` is the same trip
//! raced against a deadline on a blocking worker; losing the race yields
//! [`ClientError::Cancelled`] and abandons the in-flight call, which is
//! not interruptible mid-flight and carries no rollback guarantee.

use crate::error::{ClientError, ClientResult};
use crate::handle::{Handle, HandleManager};
use lockbox_engine::Settings;
use lockbox_protocol::{Command, decode_response, encode_command};
use serde::de::DeserializeOwned;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Owns one handle and runs typed commands through it. The handle itself
/// is never exposed to adapters.
pub struct CommandRunner {
    manager: Arc<HandleManager>,
    handle: Handle,
}

impl CommandRunner {
    /// Initializes an engine and wraps its handle. When `state_path` is
    /// given, a prior session at that path is restored if one exists.
    pub fn initialize(
        manager: Arc<HandleManager>,
        settings: Settings,
        state_path: Option<PathBuf>,
    ) -> ClientResult<Self> {
        let handle = manager.initialize(settings, state_path)?;
        Ok(Self { manager, handle })
    }

    /// Runs one command and decodes the response into `T`.
    ///
    /// Blocks until the engine returns. Callers on a shared event loop
    /// must dispatch this onto a worker context (or use
    /// [`CommandRunner::run_with_timeout`], which does).
    pub fn run<T: DeserializeOwned>(&self, command: &Command) -> ClientResult<T> {
        let document = encode_command(command)?;
        let raw = self.manager.invoke(&self.handle, &document)?;
        Self::unwrap_envelope(&raw)
    }

    /// Runs one command on a blocking worker, racing it against `timeout`.
    ///
    /// On timeout the call is abandoned, not interrupted: the engine may
    /// still complete the work. The reserved cancellation-test command
    /// exists so adapters can verify that an abandoned call does not
    /// corrupt subsequent state.
    pub async fn run_with_timeout<T: DeserializeOwned>(
        &self,
        command: &Command,
        timeout: Duration,
    ) -> ClientResult<T> {
        let document = encode_command(command)?;
        let manager = Arc::clone(&self.manager);
        let id = self.handle.id();
        let call = tokio::task::spawn_blocking(move || manager.invoke_raw(id, &document));

        match tokio::time::timeout(timeout, call).await {
            Err(_) => {
                debug!(handle = id, "call abandoned after {timeout:?}");
                Err(ClientError::Cancelled)
            }
            Ok(Err(join_err)) => Err(ClientError::Transport(format!(
                "boundary worker panicked: {join_err}"
            ))),
            Ok(Ok(raw)) => Self::unwrap_envelope(&raw?),
        }
    }

    /// Clears the session. Deleting the state file is the caller's choice.
    pub fn logout(&self, delete_state_file: bool) -> ClientResult<()> {
        self.manager.logout(&self.handle, delete_state_file)
    }

    /// Releases the underlying handle. Consumes the runner; the engine's
    /// native resources are torn down exactly once.
    pub fn release(self) -> ClientResult<()> {
        self.manager.release(self.handle)
    }

    fn unwrap_envelope<T: DeserializeOwned>(raw: &str) -> ClientResult<T> {
        let response = decode_response::<T>(raw)?;
        if response.success {
            response.data.ok_or_else(|| {
                ClientError::MalformedResponse("success=true without data".into())
            })
        } else {
            // decode_response guarantees the message is present on failure.
            Err(ClientError::Application(
                response.error_message.unwrap_or_default(),
            ))
        }
    }
}
