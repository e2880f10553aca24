//! Handle lifecycle and typed command running for the Lockbox engine.
//!
//! This crate is the only thing adapters call. It owns two concerns:
//!
//! - **Handle lifecycle**: [`HandleManager`] creates engine instances,
//!   hands out move-only [`Handle`]s, mediates every invocation, and
//!   guarantees exactly-once release. Raw-id variants of each operation
//!   exist for FFI callers that cannot hold a `Handle` across the
//!   boundary; a tombstone registry turns stale ids into reported errors
//!   instead of memory corruption.
//! - **Command running**: [`CommandRunner`] encodes a typed command,
//!   performs one blocking round trip, decodes the envelope, and maps
//!   failures onto the [`ClientError`] taxonomy. Cancellation is a
//!   caller-side race: the blocking call is dispatched to a worker and
//!   abandoned on timeout, with no rollback guarantee for the engine-side
//!   effect.
//!
//! A single handle must not be invoked concurrently from two execution
//! contexts; calls on one handle are serialized, and ordering across
//! different handles is unspecified.
//!
//! There is no ambient state here: construct a [`HandleManager`], pass it
//! to whatever issues commands.

mod error;
mod handle;
mod runner;
mod sync;

pub use error::{ClientError, ClientResult};
pub use handle::{Handle, HandleManager};
pub use runner::CommandRunner;
pub use sync::SyncOutcome;
