use chrono::Utc;
use lockbox_types::{OrganizationId, ProjectId, Secret, SecretId};
use pretty_assertions::assert_eq;

fn sample_secret(project_id: Option<ProjectId>) -> Secret {
    let now = Utc::now();
    Secret {
        id: SecretId::new(),
        organization_id: OrganizationId::new(),
        project_id,
        key: "DATABASE_URL".into(),
        value: "postgres://localhost/app".into(),
        note: "local dev".into(),
        creation_date: now,
        revision_date: now,
    }
}

#[test]
fn secret_wire_fields_are_camel_case() {
    let secret = sample_secret(Some(ProjectId::new()));
    let json = serde_json::to_value(&secret).unwrap();
    let obj = json.as_object().unwrap();
    assert!(obj.contains_key("organizationId"));
    assert!(obj.contains_key("projectId"));
    assert!(obj.contains_key("creationDate"));
    assert!(obj.contains_key("revisionDate"));
    assert!(!obj.contains_key("organization_id"));
}

#[test]
fn secret_without_project_omits_the_key() {
    let secret = sample_secret(None);
    let json = serde_json::to_value(&secret).unwrap();
    assert!(!json.as_object().unwrap().contains_key("projectId"));
}

#[test]
fn secret_round_trips_through_json() {
    let secret = sample_secret(Some(ProjectId::new()));
    let json = serde_json::to_string(&secret).unwrap();
    let back: Secret = serde_json::from_str(&json).unwrap();
    assert_eq!(back, secret);
}
