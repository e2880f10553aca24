//! Core type definitions for the Lockbox secrets SDK.
//!
//! This crate defines the fundamental types shared by the protocol codec,
//! the engine, and the client:
//! - Organization, project, and secret identifiers (UUID v4)
//! - The `Secret` and `Project` data model
//!
//! Everything protocol-shaped (commands, envelopes) belongs in
//! `lockbox-protocol`, not here.

mod ids;
mod model;

pub use ids::{OrganizationId, ProjectId, SecretId};
pub use model::{Project, Secret};
