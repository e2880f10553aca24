//! Boolean-gated delta sync semantics.

use chrono::{Duration, Utc};
use lockbox_protocol::{
    Command, Response, SecretCreateRequest, SecretsCommand, SecretsSyncResponse, SyncRequest,
};
use lockbox_types::{OrganizationId, Secret};

mod common;

fn sync(
    engine: &mut lockbox_engine::Engine,
    org: OrganizationId,
    last_synced_at: Option<chrono::DateTime<Utc>>,
) -> SecretsSyncResponse {
    let resp: Response<SecretsSyncResponse> = common::run(
        engine,
        &Command::Sync(SyncRequest {
            organization_id: org,
            last_synced_at,
        }),
    );
    assert!(resp.success, "sync failed: {:?}", resp.error_message);
    resp.data.unwrap()
}

fn create_secret(engine: &mut lockbox_engine::Engine, org: OrganizationId, key: &str) -> Secret {
    let resp: Response<Secret> = common::run(
        engine,
        &Command::Secrets(SecretsCommand::Create(SecretCreateRequest {
            organization_id: org,
            key: key.into(),
            value: "v".into(),
            note: String::new(),
            project_ids: None,
        })),
    );
    resp.data.unwrap()
}

#[test]
fn full_fetch_always_reports_changes() {
    let mut engine = common::engine();
    let org = common::login(&mut engine);

    // Even an empty organization returns the (empty) full set.
    let outcome = sync(&mut engine, org, None);
    assert!(outcome.has_changes);
    assert_eq!(outcome.secrets.unwrap(), vec![]);

    create_secret(&mut engine, org, "A");
    let outcome = sync(&mut engine, org, None);
    assert!(outcome.has_changes);
    assert_eq!(outcome.secrets.unwrap().len(), 1);
}

#[test]
fn unchanged_since_timestamp_reports_no_changes_and_no_data() {
    let mut engine = common::engine();
    let org = common::login(&mut engine);
    create_secret(&mut engine, org, "A");

    let after = Utc::now() + Duration::seconds(1);
    let outcome = sync(&mut engine, org, Some(after));
    assert!(!outcome.has_changes);
    assert!(outcome.secrets.is_none());
}

#[test]
fn mutation_after_timestamp_resends_the_full_set() {
    let mut engine = common::engine();
    let org = common::login(&mut engine);
    create_secret(&mut engine, org, "A");

    let checkpoint = Utc::now() - Duration::milliseconds(1);
    create_secret(&mut engine, org, "B");

    let outcome = sync(&mut engine, org, Some(checkpoint));
    assert!(outcome.has_changes);
    // Full set, not a delta: both secrets come back.
    let keys: Vec<String> = outcome
        .secrets
        .unwrap()
        .into_iter()
        .map(|s| s.key)
        .collect();
    assert!(keys.contains(&"A".to_string()));
    assert!(keys.contains(&"B".to_string()));
}

#[test]
fn never_mutated_organization_is_unchanged_for_any_timestamp() {
    let mut engine = common::engine();
    let org = common::login(&mut engine);

    let outcome = sync(&mut engine, org, Some(Utc::now() - Duration::days(365)));
    assert!(!outcome.has_changes);
    assert!(outcome.secrets.is_none());
}

#[test]
fn sync_requires_authentication() {
    let mut engine = common::engine();
    let resp: Response<SecretsSyncResponse> = common::run(
        &mut engine,
        &Command::Sync(SyncRequest {
            organization_id: OrganizationId::new(),
            last_synced_at: None,
        }),
    );
    assert!(!resp.success);
}
