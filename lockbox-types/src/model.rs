//! The secret and project data model.
//!
//! These are the wire shapes returned inside response envelopes; field
//! names are camelCase on the wire.

use crate::{OrganizationId, ProjectId, SecretId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A secret: a key/value pair with a note, owned by an organization and
/// optionally assigned to a project.
///
/// `organization_id` is immutable after creation; updates may move a
/// secret between projects but never between organizations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Secret {
    pub id: SecretId,
    pub organization_id: OrganizationId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<ProjectId>,
    pub key: String,
    pub value: String,
    pub note: String,
    pub creation_date: DateTime<Utc>,
    pub revision_date: DateTime<Utc>,
}

/// A project: a named grouping of secrets within an organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    pub organization_id: OrganizationId,
    pub name: String,
    pub creation_date: DateTime<Utc>,
    pub revision_date: DateTime<Utc>,
}
