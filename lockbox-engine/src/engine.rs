//! Command dispatch: the far side of the boundary.
//!
//! `Engine::execute` takes one command document and returns one response
//! envelope document. Every failure mode is reported inside the envelope;
//! this function never panics and never returns malformed JSON.

use crate::error::{EngineError, EngineResult};
use crate::fingerprint;
use crate::session::{AccessToken, SessionState};
use crate::settings::Settings;
use crate::state_file;
use crate::store::OrgStore;
use chrono::Utc;
use lockbox_protocol::{
    AccessTokenLoginRequest, ApiKeyLoginRequest, Command, FingerprintRequest,
    FingerprintResponse, LoginResponse, PasswordLoginRequest, ProjectDeleteResponse,
    ProjectsCommand, ProjectsDeleteResponse, ProjectsResponse, Response, SecretDeleteResponse,
    SecretIdentifierResponse, SecretIdentifiersResponse, SecretsCommand, SecretsDeleteResponse,
    SecretsResponse, SecretsSyncResponse, SyncRequest, UserApiKeyRequest, UserApiKeyResponse,
    decode_command, encode_response,
};
use lockbox_types::ProjectId;
use serde_json::{Value, json};
use std::path::PathBuf;
use tracing::{debug, warn};

/// Emitted when even the error envelope cannot be serialized.
const FALLBACK_RESPONSE: &str =
    r#"{"success":false,"errorMessage":"Internal error: failed to serialize response"}"#;

/// A live engine instance: immutable settings, the optional session, the
/// optional state-file path, and the organization store.
#[derive(Debug)]
pub struct Engine {
    settings: Settings,
    state_path: Option<PathBuf>,
    session: Option<SessionState>,
    store: OrgStore,
}

impl Engine {
    /// Creates an engine from settings. Construction never fails for
    /// schema-valid settings; defaults fill the gaps.
    #[must_use]
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            state_path: None,
            session: None,
            store: OrgStore::new(),
        }
    }

    /// Creates an engine and immediately attempts session restoration from
    /// `state_path`. A missing or unreadable file is not an error.
    #[must_use]
    pub fn with_state_path(settings: Settings, state_path: PathBuf) -> Self {
        let session = state_file::load(&state_path);
        if session.is_some() {
            debug!(path = %state_path.display(), "restored prior session");
        }
        Self {
            settings,
            state_path: Some(state_path),
            session,
            store: OrgStore::new(),
        }
    }

    /// The settings this engine was constructed from.
    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Whether a session is currently live.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    /// Clears the in-memory session. Deleting the state file is an explicit
    /// caller choice, never automatic.
    pub fn logout(&mut self, delete_state_file: bool) -> EngineResult<()> {
        self.session = None;
        if delete_state_file {
            if let Some(path) = &self.state_path {
                state_file::remove(path)?;
            }
        }
        debug!(delete_state_file, "session cleared");
        Ok(())
    }

    /// Executes one command document and returns the response envelope.
    pub fn execute(&mut self, document: &str) -> String {
        let response: Response<Value> = match decode_command(document) {
            Ok(command) => match self.dispatch(command) {
                Ok(data) => Response::ok(data),
                Err(e) => {
                    debug!("command failed: {e}");
                    Response::err(e.envelope_message())
                }
            },
            Err(e) => {
                warn!("rejected command document: {e}");
                Response::err(e.to_string())
            }
        };
        encode_response(&response).unwrap_or_else(|e| {
            warn!("failed to serialize response envelope: {e}");
            FALLBACK_RESPONSE.to_string()
        })
    }

    fn dispatch(&mut self, command: Command) -> EngineResult<Value> {
        match command {
            Command::PasswordLogin(req) => self.password_login(req),
            Command::ApiKeyLogin(req) => self.api_key_login(req),
            Command::LoginAccessToken(req) => self.access_token_login(req),
            Command::GetUserApiKey(req) => self.get_user_api_key(req),
            Command::Fingerprint(req) => Self::fingerprint(&req),
            Command::Sync(req) => self.sync(req),
            Command::Secrets(cmd) => self.secrets(cmd),
            Command::Projects(cmd) => self.projects(cmd),
            Command::CancellationTest(req) => {
                // Conformance command: a deliberately slow, otherwise
                // harmless round trip for cancellation testing.
                let millis = req.duration_millis.unwrap_or(500);
                std::thread::sleep(std::time::Duration::from_millis(millis));
                Ok(json!(42))
            }
            Command::ErrorTest(_) => Err(EngineError::Internal("This is an error.".into())),
        }
    }

    // ── Login flows ──────────────────────────────────────────────

    fn password_login(&mut self, req: PasswordLoginRequest) -> EngineResult<Value> {
        if !req.email.contains('@') {
            return Err(EngineError::Validation("email is not valid".into()));
        }
        if req.password.is_empty() {
            return Err(EngineError::InvalidCredentials);
        }
        self.establish_session(req.state_path, None)?;
        to_value(&LoginResponse { authenticated: true })
    }

    fn api_key_login(&mut self, req: ApiKeyLoginRequest) -> EngineResult<Value> {
        if req.client_id.is_empty() || req.client_secret.is_empty() {
            return Err(EngineError::InvalidCredentials);
        }
        if req.password.is_empty() {
            return Err(EngineError::InvalidCredentials);
        }
        self.establish_session(req.state_path, None)?;
        to_value(&LoginResponse { authenticated: true })
    }

    fn access_token_login(&mut self, req: AccessTokenLoginRequest) -> EngineResult<Value> {
        // Parse before touching any state so a garbage token leaves no
        // state file behind.
        let token: AccessToken = req.access_token.parse()?;
        self.establish_session(req.state_path, Some(token))?;
        to_value(&LoginResponse { authenticated: true })
    }

    /// Shared tail of the three login flows: adopt a restorable on-disk
    /// session when one exists and matches, otherwise issue a fresh one;
    /// then mirror the result to disk if a path is configured.
    fn establish_session(
        &mut self,
        state_path: Option<PathBuf>,
        token: Option<AccessToken>,
    ) -> EngineResult<()> {
        if let Some(path) = state_path {
            self.state_path = Some(path);
        }

        let now = Utc::now();
        let restored = self
            .state_path
            .as_deref()
            .and_then(state_file::load)
            .filter(|session| match &token {
                // A restored session is only valid for the organization the
                // token names.
                Some(token) => session.organization_id == token.organization_id,
                None => true,
            });

        let mut session = match restored {
            Some(session) => {
                debug!("adopted restored session");
                session
            }
            None => {
                let organization_id = token
                    .map(|t| t.organization_id)
                    .unwrap_or_default();
                SessionState::issue(organization_id, now)?
            }
        };
        if session.needs_refresh(now) {
            session.refresh(now)?;
        }

        self.session = Some(session);
        self.persist_session()
    }

    fn persist_session(&self) -> EngineResult<()> {
        if let (Some(path), Some(session)) = (&self.state_path, &self.session) {
            state_file::save(path, session)?;
        }
        Ok(())
    }

    /// Returns the live session, refreshing the token transparently when
    /// it is near or past expiry. Refresh re-persists the state file.
    fn ensure_session(&mut self) -> EngineResult<&SessionState> {
        let now = Utc::now();
        let needs_refresh = match &self.session {
            Some(session) => session.needs_refresh(now),
            None => return Err(EngineError::NotAuthenticated),
        };
        if needs_refresh {
            debug!("refreshing session token");
            if let Some(session) = self.session.as_mut() {
                session.refresh(now)?;
            }
            self.persist_session()?;
        }
        self.session.as_ref().ok_or(EngineError::NotAuthenticated)
    }

    // ── Operations ───────────────────────────────────────────────

    fn get_user_api_key(&mut self, req: UserApiKeyRequest) -> EngineResult<Value> {
        if req.secret.is_empty() {
            return Err(EngineError::InvalidCredentials);
        }
        let session = self.ensure_session()?;
        let api_key =
            fingerprint::derive_api_key(&session.organization_id.to_string(), &req.secret);
        to_value(&UserApiKeyResponse { api_key })
    }

    fn fingerprint(req: &FingerprintRequest) -> EngineResult<Value> {
        if req.fingerprint_material.is_empty() || req.public_key.is_empty() {
            return Err(EngineError::Validation(
                "fingerprint material and public key are required".into(),
            ));
        }
        let phrase = fingerprint::derive(&req.fingerprint_material, &req.public_key);
        to_value(&FingerprintResponse { fingerprint: phrase })
    }

    /// Boolean-gated delta sync: a timestamp with no later mutation means
    /// `hasChanges=false` and no data; anything else means the complete
    /// current set. Never a row-level diff.
    fn sync(&mut self, req: SyncRequest) -> EngineResult<Value> {
        self.ensure_session()?;
        let org = req.organization_id;

        let unchanged = match (req.last_synced_at, self.store.last_mutation(org)) {
            (Some(since), Some(last)) => last <= since,
            (Some(_), None) => true,
            (None, _) => false,
        };

        let response = if unchanged {
            SecretsSyncResponse {
                has_changes: false,
                secrets: None,
            }
        } else {
            SecretsSyncResponse {
                has_changes: true,
                secrets: Some(self.store.secrets_for_org(org)),
            }
        };
        to_value(&response)
    }

    fn secrets(&mut self, command: SecretsCommand) -> EngineResult<Value> {
        self.ensure_session()?;
        let now = Utc::now();
        match command {
            SecretsCommand::Get(req) => to_value(self.store.get_secret(req.id)?),
            SecretsCommand::GetByIds(req) => to_value(&SecretsResponse {
                data: self.store.secrets_by_ids(&req.ids)?,
            }),
            SecretsCommand::Create(req) => {
                let project_id = first_project(req.project_ids);
                let secret = self.store.create_secret(
                    req.organization_id,
                    req.key,
                    req.value,
                    req.note,
                    project_id,
                    now,
                )?;
                to_value(&secret)
            }
            SecretsCommand::List(req) => {
                let data = self
                    .store
                    .secrets_for_org(req.organization_id)
                    .into_iter()
                    .map(|s| SecretIdentifierResponse {
                        id: s.id,
                        organization_id: s.organization_id,
                        key: s.key,
                    })
                    .collect();
                to_value(&SecretIdentifiersResponse { data })
            }
            SecretsCommand::Update(req) => {
                let project_id = first_project(req.project_ids);
                let secret = self.store.update_secret(
                    req.id,
                    req.organization_id,
                    req.key,
                    req.value,
                    req.note,
                    project_id,
                    now,
                )?;
                to_value(&secret)
            }
            SecretsCommand::Delete(req) => {
                let data = self
                    .store
                    .delete_secrets(&req.ids, now)
                    .into_iter()
                    .map(|(id, error)| SecretDeleteResponse { id, error })
                    .collect();
                to_value(&SecretsDeleteResponse { data })
            }
        }
    }

    fn projects(&mut self, command: ProjectsCommand) -> EngineResult<Value> {
        self.ensure_session()?;
        let now = Utc::now();
        match command {
            ProjectsCommand::Get(req) => to_value(self.store.get_project(req.id)?),
            ProjectsCommand::Create(req) => {
                to_value(&self.store.create_project(req.organization_id, req.name, now)?)
            }
            ProjectsCommand::List(req) => to_value(&ProjectsResponse {
                data: self.store.projects_for_org(req.organization_id),
            }),
            ProjectsCommand::Update(req) => to_value(&self.store.update_project(
                req.id,
                req.organization_id,
                req.name,
                now,
            )?),
            ProjectsCommand::Delete(req) => {
                let data = self
                    .store
                    .delete_projects(&req.ids, now)
                    .into_iter()
                    .map(|(id, error)| ProjectDeleteResponse { id, error })
                    .collect();
                to_value(&ProjectsDeleteResponse { data })
            }
        }
    }
}

/// At most one project assignment is honored today; extras are ignored.
fn first_project(project_ids: Option<Vec<ProjectId>>) -> Option<ProjectId> {
    project_ids.and_then(|ids| ids.into_iter().next())
}

fn to_value<T: serde::Serialize>(value: T) -> EngineResult<Value> {
    serde_json::to_value(value).map_err(Into::into)
}
