//! Shared helpers for engine tests.

#![allow(dead_code)]

use lockbox_engine::{Engine, Settings};
use lockbox_protocol::{
    AccessTokenLoginRequest, Command, Response, decode_response, encode_command,
};
use lockbox_types::OrganizationId;
use serde::de::DeserializeOwned;

/// A fresh engine with default settings and no state file.
pub fn engine() -> Engine {
    Engine::new(Settings::default())
}

/// A valid machine access token for the given organization.
pub fn access_token(org: OrganizationId) -> String {
    format!("0.{org}.machine-secret")
}

/// Runs one typed command through the document boundary.
pub fn run<T: DeserializeOwned>(engine: &mut Engine, command: &Command) -> Response<T> {
    let doc = encode_command(command).expect("encode");
    let raw = engine.execute(&doc);
    decode_response(&raw).expect("well-formed envelope")
}

/// Logs in with a valid access token for a fresh organization and returns
/// the organization id.
pub fn login(engine: &mut Engine) -> OrganizationId {
    let org = OrganizationId::new();
    let cmd = Command::LoginAccessToken(AccessTokenLoginRequest {
        access_token: access_token(org),
        state_path: None,
    });
    let resp: Response<serde_json::Value> = run(engine, &cmd);
    assert!(resp.success, "login failed: {:?}", resp.error_message);
    org
}
