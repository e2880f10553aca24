//! The native Lockbox secrets engine.
//!
//! This crate is the "far side" of the command boundary: it owns the
//! authentication session, the organization store, state-file persistence,
//! and the dispatch of decoded command documents. Callers never construct
//! engine state directly; they send command documents through
//! `lockbox-client` and receive response envelopes back.
//!
//! # Session model
//!
//! A session is created by one of three login flows (password, API key,
//! machine access token), refreshed transparently when a command arrives
//! near or past token expiry, and mirrored to an engine-owned state file
//! when a path was supplied. The state file is versioned JSON that only
//! this crate reads or writes.

mod engine;
mod error;
mod fingerprint;
mod session;
mod settings;
mod state_file;
mod store;

pub use engine::Engine;
pub use error::{EngineError, EngineResult};
pub use session::{AccessToken, SessionState, SESSION_TTL_SECS, TOKEN_REFRESH_WINDOW_SECS};
pub use settings::{
    DeviceType, Settings, DEFAULT_API_URL, DEFAULT_IDENTITY_URL, DEFAULT_USER_AGENT,
};
pub use state_file::STATE_FILE_VERSION;
