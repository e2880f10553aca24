//! The sync-coordinator convention, as a typed helper.
//!
//! The protocol's "delta" is boolean-gated: `hasChanges=false` means skip
//! re-processing, `hasChanges=true` means the complete current set came
//! back (never a row-level diff). Callers needing per-record change
//! detection diff the returned full set against their own previous copy.

use crate::error::{ClientError, ClientResult};
use crate::runner::CommandRunner;
use chrono::{DateTime, Utc};
use lockbox_protocol::{Command, SecretsSyncResponse, SyncRequest};
use lockbox_types::{OrganizationId, Secret};

/// Interpreted result of one sync round trip.
#[derive(Debug, Clone, PartialEq)]
pub enum SyncOutcome {
    /// Nothing changed since the supplied instant; keep the local copy.
    Unchanged,
    /// The complete current secret set; replace the local copy wholesale.
    Changed(Vec<Secret>),
}

impl CommandRunner {
    /// Requests incremental (`last_synced_at` given) or full (`None`) sync
    /// and interprets the has-changes signal, rejecting envelopes that
    /// violate the convention.
    pub fn sync(
        &self,
        organization_id: OrganizationId,
        last_synced_at: Option<DateTime<Utc>>,
    ) -> ClientResult<SyncOutcome> {
        let response: SecretsSyncResponse = self.run(&Command::Sync(SyncRequest {
            organization_id,
            last_synced_at,
        }))?;

        match (response.has_changes, response.secrets) {
            (true, Some(secrets)) => Ok(SyncOutcome::Changed(secrets)),
            (false, None) => Ok(SyncOutcome::Unchanged),
            (true, None) => Err(ClientError::MalformedResponse(
                "hasChanges=true without data".into(),
            )),
            (false, Some(_)) => Err(ClientError::MalformedResponse(
                "hasChanges=false with data".into(),
            )),
        }
    }
}
