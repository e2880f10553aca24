//! Shared helpers for client tests.

#![allow(dead_code)]

use lockbox_client::{CommandRunner, HandleManager};
use lockbox_engine::Settings;
use lockbox_protocol::{AccessTokenLoginRequest, Command, LoginResponse};
use lockbox_types::OrganizationId;
use std::path::PathBuf;
use std::sync::Arc;

pub fn manager() -> Arc<HandleManager> {
    Arc::new(HandleManager::new())
}

pub fn runner(manager: &Arc<HandleManager>) -> CommandRunner {
    CommandRunner::initialize(Arc::clone(manager), Settings::default(), None)
        .expect("initialize never fails for valid settings")
}

/// A valid machine access token for the given organization.
pub fn access_token(org: OrganizationId) -> String {
    format!("0.{org}.machine-secret")
}

/// Logs a runner in for a fresh organization, optionally persisting to a
/// state file, and returns the organization id.
pub fn login(runner: &CommandRunner, state_path: Option<PathBuf>) -> OrganizationId {
    let org = OrganizationId::new();
    let resp: LoginResponse = runner
        .run(&Command::LoginAccessToken(AccessTokenLoginRequest {
            access_token: access_token(org),
            state_path,
        }))
        .expect("login");
    assert!(resp.authenticated);
    org
}
