use lockbox_types::{OrganizationId, ProjectId, SecretId};
use std::str::FromStr;
use uuid::Uuid;

#[test]
fn new_ids_are_unique() {
    assert_ne!(SecretId::new(), SecretId::new());
    assert_ne!(ProjectId::new(), ProjectId::new());
    assert_ne!(OrganizationId::new(), OrganizationId::new());
}

#[test]
fn parse_round_trips_display() {
    let id = SecretId::new();
    let parsed = SecretId::parse(&id.to_string()).unwrap();
    assert_eq!(id, parsed);
}

#[test]
fn from_str_rejects_garbage() {
    assert!(OrganizationId::from_str("not-a-uuid").is_err());
    assert!(SecretId::parse("").is_err());
}

#[test]
fn from_uuid_preserves_value() {
    let raw = Uuid::new_v4();
    let id = ProjectId::from_uuid(raw);
    assert_eq!(id.as_uuid(), raw);
}

#[test]
fn serde_is_transparent() {
    let id = SecretId::new();
    let json = serde_json::to_string(&id).unwrap();
    assert_eq!(json, format!("\"{id}\""));
    let back: SecretId = serde_json::from_str(&json).unwrap();
    assert_eq!(back, id);
}
