//! Authentication session state and machine access tokens.
//!
//! Machine access tokens use the format: `0.<organization-uuid>.<client-secret>`
//! where `0` is the token format version. The organization UUID doubles as
//! the organization encryption context for the session.

use crate::error::{EngineError, EngineResult};
use chrono::{DateTime, Duration, Utc};
use lockbox_types::OrganizationId;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

/// Session lifetime in seconds (2 hours).
pub const SESSION_TTL_SECS: i64 = 2 * 60 * 60;

/// A session within this many seconds of expiry is refreshed before the
/// next command is dispatched.
pub const TOKEN_REFRESH_WINDOW_SECS: i64 = 5 * 60;

/// Supported access-token format version.
const TOKEN_VERSION: &str = "0";

/// A parsed machine access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken {
    pub organization_id: OrganizationId,
    pub client_secret: String,
}

impl FromStr for AccessToken {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(3, '.');
        let version = parts.next().unwrap_or_default();
        let org = parts.next().ok_or_else(|| {
            EngineError::InvalidToken("expected `<version>.<organization>.<secret>`".into())
        })?;
        let secret = parts.next().ok_or_else(|| {
            EngineError::InvalidToken("expected `<version>.<organization>.<secret>`".into())
        })?;

        if version != TOKEN_VERSION {
            return Err(EngineError::InvalidToken(format!(
                "unsupported token version `{version}`"
            )));
        }
        if secret.is_empty() {
            return Err(EngineError::InvalidToken("empty client secret".into()));
        }
        let organization_id = OrganizationId::parse(org)
            .map_err(|e| EngineError::InvalidToken(format!("bad organization id: {e}")))?;

        Ok(Self {
            organization_id,
            client_secret: secret.to_string(),
        })
    }
}

/// Live authentication state for an engine instance.
///
/// Created on successful login, rotated transparently by
/// [`SessionState::refresh`], destroyed only by explicit logout or handle
/// release. Process exit leaves the on-disk mirror behind for restoration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    pub token_expiry: DateTime<Utc>,
    /// Organization encryption context; fixed for the session's lifetime.
    pub organization_id: OrganizationId,
}

impl SessionState {
    /// Creates a fresh session for an organization at `now`.
    pub fn issue(organization_id: OrganizationId, now: DateTime<Utc>) -> EngineResult<Self> {
        Ok(Self {
            access_token: mint_token(),
            refresh_token: Some(mint_token()),
            token_expiry: expiry_from(now)?,
            organization_id,
        })
    }

    /// True when the access token is near or past expiry.
    #[must_use]
    pub fn needs_refresh(&self, now: DateTime<Utc>) -> bool {
        let window = Duration::seconds(TOKEN_REFRESH_WINDOW_SECS);
        now + window >= self.token_expiry
    }

    /// Rotates the access token and extends expiry by one session TTL.
    /// The caller never sees or manages the rotation; it happens inside
    /// command dispatch.
    pub fn refresh(&mut self, now: DateTime<Utc>) -> EngineResult<()> {
        self.access_token = mint_token();
        self.refresh_token = Some(mint_token());
        self.token_expiry = expiry_from(now)?;
        Ok(())
    }
}

fn expiry_from(now: DateTime<Utc>) -> EngineResult<DateTime<Utc>> {
    now.checked_add_signed(Duration::seconds(SESSION_TTL_SECS))
        .ok_or_else(|| EngineError::Internal("token expiry out of range".into()))
}

fn mint_token() -> String {
    format!("lbs_{}", Uuid::new_v4().simple())
}
