//! In-memory organization store: secrets, projects, and the per-organization
//! last-mutation instant that drives the boolean-gated sync signal.

use crate::error::{EngineError, EngineResult};
use chrono::{DateTime, Utc};
use lockbox_types::{OrganizationId, Project, ProjectId, Secret, SecretId};
use std::collections::HashMap;

/// Backing store for secrets and projects across organizations.
#[derive(Debug, Default)]
pub struct OrgStore {
    secrets: HashMap<SecretId, Secret>,
    projects: HashMap<ProjectId, Project>,
    last_mutation: HashMap<OrganizationId, DateTime<Utc>>,
}

impl OrgStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recent mutation instant for an organization, if any
    /// mutation has ever happened.
    pub fn last_mutation(&self, org: OrganizationId) -> Option<DateTime<Utc>> {
        self.last_mutation.get(&org).copied()
    }

    fn touch(&mut self, org: OrganizationId, now: DateTime<Utc>) {
        self.last_mutation.insert(org, now);
    }

    /// An assigned project must exist and belong to the same organization;
    /// a foreign project behaves as not-found.
    fn check_project_assignment(
        &self,
        org: OrganizationId,
        project_id: Option<ProjectId>,
    ) -> EngineResult<()> {
        if let Some(pid) = project_id {
            let project = self
                .projects
                .get(&pid)
                .ok_or_else(|| EngineError::NotFound("project".into()))?;
            if project.organization_id != org {
                return Err(EngineError::NotFound("project".into()));
            }
        }
        Ok(())
    }

    // ── Secrets ──────────────────────────────────────────────────

    pub fn create_secret(
        &mut self,
        org: OrganizationId,
        key: String,
        value: String,
        note: String,
        project_id: Option<ProjectId>,
        now: DateTime<Utc>,
    ) -> EngineResult<Secret> {
        if key.is_empty() {
            return Err(EngineError::Validation("secret key must not be empty".into()));
        }
        self.check_project_assignment(org, project_id)?;
        let secret = Secret {
            id: SecretId::new(),
            organization_id: org,
            project_id,
            key,
            value,
            note,
            creation_date: now,
            revision_date: now,
        };
        self.secrets.insert(secret.id, secret.clone());
        self.touch(org, now);
        Ok(secret)
    }

    pub fn get_secret(&self, id: SecretId) -> EngineResult<&Secret> {
        self.secrets
            .get(&id)
            .ok_or_else(|| EngineError::NotFound("secret".into()))
    }

    pub fn secrets_by_ids(&self, ids: &[SecretId]) -> EngineResult<Vec<Secret>> {
        ids.iter().map(|id| self.get_secret(*id).cloned()).collect()
    }

    /// All secrets for an organization, in insertion-independent id order.
    pub fn secrets_for_org(&self, org: OrganizationId) -> Vec<Secret> {
        let mut secrets: Vec<Secret> = self
            .secrets
            .values()
            .filter(|s| s.organization_id == org)
            .cloned()
            .collect();
        secrets.sort_by_key(|s| s.id.as_uuid());
        secrets
    }

    pub fn update_secret(
        &mut self,
        id: SecretId,
        org: OrganizationId,
        key: String,
        value: String,
        note: String,
        project_id: Option<ProjectId>,
        now: DateTime<Utc>,
    ) -> EngineResult<Secret> {
        if key.is_empty() {
            return Err(EngineError::Validation("secret key must not be empty".into()));
        }
        self.check_project_assignment(org, project_id)?;
        // Organization id is immutable; a mismatched org behaves as not-found
        // rather than revealing the secret exists elsewhere.
        let existing = self
            .secrets
            .get(&id)
            .filter(|s| s.organization_id == org)
            .ok_or_else(|| EngineError::NotFound("secret".into()))?;

        let mut updated = existing.clone();
        updated.key = key;
        updated.value = value;
        updated.note = note;
        updated.project_id = project_id;
        updated.revision_date = now;
        self.secrets.insert(id, updated.clone());
        self.touch(org, now);
        Ok(updated)
    }

    /// Deletes each id independently; per-id failures are reported in the
    /// result rows, not as an overall error.
    pub fn delete_secrets(
        &mut self,
        ids: &[SecretId],
        now: DateTime<Utc>,
    ) -> Vec<(SecretId, Option<String>)> {
        ids.iter()
            .map(|id| match self.secrets.remove(id) {
                Some(secret) => {
                    self.touch(secret.organization_id, now);
                    (*id, None)
                }
                None => (*id, Some("secret not found".to_string())),
            })
            .collect()
    }

    // ── Projects ─────────────────────────────────────────────────

    pub fn create_project(
        &mut self,
        org: OrganizationId,
        name: String,
        now: DateTime<Utc>,
    ) -> EngineResult<Project> {
        if name.is_empty() {
            return Err(EngineError::Validation("project name must not be empty".into()));
        }
        let project = Project {
            id: ProjectId::new(),
            organization_id: org,
            name,
            creation_date: now,
            revision_date: now,
        };
        self.projects.insert(project.id, project.clone());
        self.touch(org, now);
        Ok(project)
    }

    pub fn get_project(&self, id: ProjectId) -> EngineResult<&Project> {
        self.projects
            .get(&id)
            .ok_or_else(|| EngineError::NotFound("project".into()))
    }

    pub fn projects_for_org(&self, org: OrganizationId) -> Vec<Project> {
        let mut projects: Vec<Project> = self
            .projects
            .values()
            .filter(|p| p.organization_id == org)
            .cloned()
            .collect();
        projects.sort_by_key(|p| p.id.as_uuid());
        projects
    }

    pub fn update_project(
        &mut self,
        id: ProjectId,
        org: OrganizationId,
        name: String,
        now: DateTime<Utc>,
    ) -> EngineResult<Project> {
        if name.is_empty() {
            return Err(EngineError::Validation("project name must not be empty".into()));
        }
        let existing = self
            .projects
            .get(&id)
            .filter(|p| p.organization_id == org)
            .ok_or_else(|| EngineError::NotFound("project".into()))?;

        let mut updated = existing.clone();
        updated.name = name;
        updated.revision_date = now;
        self.projects.insert(id, updated.clone());
        self.touch(org, now);
        Ok(updated)
    }

    pub fn delete_projects(
        &mut self,
        ids: &[ProjectId],
        now: DateTime<Utc>,
    ) -> Vec<(ProjectId, Option<String>)> {
        ids.iter()
            .map(|id| match self.projects.remove(id) {
                Some(project) => {
                    // Detach, don't delete, the project's secrets.
                    for secret in self.secrets.values_mut() {
                        if secret.project_id == Some(*id) {
                            secret.project_id = None;
                            secret.revision_date = now;
                        }
                    }
                    self.touch(project.organization_id, now);
                    (*id, None)
                }
                None => (*id, Some("project not found".to_string())),
            })
            .collect()
    }
}
