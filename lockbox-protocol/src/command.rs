//! Command documents — the one-of-populated tagged union adapters send.
//!
//! Serde's externally-tagged enum representation gives the canonical
//! document shape for free: exactly one top-level key, named after the
//! variant, holding the request payload. A document with zero or more
//! than one key fails to decode, so "exactly one populated variant" is
//! enforced by construction rather than by validation code.
//!
//! Nested sub-commands (`secrets`, `projects`) follow the same rule one
//! level down.

use chrono::{DateTime, Utc};
use lockbox_types::{OrganizationId, ProjectId, SecretId};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A command document: exactly one populated variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Command {
    /// Email/master-password login.
    PasswordLogin(PasswordLoginRequest),

    /// Client-id/client-secret login (personal API key).
    ApiKeyLogin(ApiKeyLoginRequest),

    /// Machine-account access-token login.
    LoginAccessToken(AccessTokenLoginRequest),

    /// Derive the user's API key for the current session.
    GetUserApiKey(UserApiKeyRequest),

    /// Compute a fingerprint phrase for key material.
    Fingerprint(FingerprintRequest),

    /// Boolean-gated delta sync of an organization's secrets.
    Sync(SyncRequest),

    /// Secret CRUD sub-commands.
    Secrets(SecretsCommand),

    /// Project CRUD sub-commands.
    Projects(ProjectsCommand),

    /// Reserved conformance command: sleeps, then returns 42. Used by
    /// adapters to verify that an abandoned call does not corrupt
    /// subsequent state.
    CancellationTest(CancellationTestRequest),

    /// Reserved conformance command: always fails with the well-known
    /// internal-error message.
    ErrorTest(ErrorTestRequest),
}

/// Secret sub-commands: exactly one populated variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SecretsCommand {
    Get(SecretGetRequest),
    GetByIds(SecretsGetRequest),
    Create(SecretCreateRequest),
    List(SecretIdentifiersRequest),
    Update(SecretPutRequest),
    Delete(SecretsDeleteRequest),
}

/// Project sub-commands: exactly one populated variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProjectsCommand {
    Get(ProjectGetRequest),
    Create(ProjectCreateRequest),
    List(ProjectsListRequest),
    Update(ProjectPutRequest),
    Delete(ProjectsDeleteRequest),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordLoginRequest {
    pub email: String,
    pub password: String,
    /// Where to persist the resulting session; omitted means no state file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiKeyLoginRequest {
    pub client_id: String,
    pub client_secret: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessTokenLoginRequest {
    /// Machine access token, `0.<organization-uuid>.<client-secret>`.
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserApiKeyRequest {
    /// Master-password (or equivalent) confirmation secret.
    pub secret: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FingerprintRequest {
    pub fingerprint_material: String,
    pub public_key: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncRequest {
    pub organization_id: OrganizationId,
    /// When omitted the engine performs a full fetch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_synced_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecretGetRequest {
    pub id: SecretId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecretsGetRequest {
    pub ids: Vec<SecretId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecretCreateRequest {
    pub organization_id: OrganizationId,
    pub key: String,
    pub value: String,
    pub note: String,
    /// Projects to assign the secret to; at most one is honored today.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_ids: Option<Vec<ProjectId>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecretIdentifiersRequest {
    pub organization_id: OrganizationId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecretPutRequest {
    pub id: SecretId,
    pub organization_id: OrganizationId,
    pub key: String,
    pub value: String,
    pub note: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_ids: Option<Vec<ProjectId>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecretsDeleteRequest {
    pub ids: Vec<SecretId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectGetRequest {
    pub id: ProjectId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectCreateRequest {
    pub organization_id: OrganizationId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectsListRequest {
    pub organization_id: OrganizationId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPutRequest {
    pub id: ProjectId,
    pub organization_id: OrganizationId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectsDeleteRequest {
    pub ids: Vec<ProjectId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancellationTestRequest {
    /// How long the engine sleeps before answering; defaults to 500.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_millis: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorTestRequest {}
