//! Typed command running: envelope mapping, error taxonomy, the state-file
//! restore scenario, and the project rename scenario.

use lockbox_client::{ClientError, CommandRunner, SyncOutcome};
use lockbox_engine::Settings;
use lockbox_protocol::{
    Command, ErrorTestRequest, LoginResponse, ProjectCreateRequest, ProjectGetRequest,
    ProjectPutRequest, ProjectsCommand, SecretIdentifiersRequest, SecretIdentifiersResponse,
    SecretsCommand,
};
use lockbox_types::Project;
use std::sync::Arc;
use tempfile::tempdir;

mod common;

#[test]
fn application_errors_keep_their_message_intact() {
    let manager = common::manager();
    let runner = common::runner(&manager);

    let err = runner
        .run::<serde_json::Value>(&Command::ErrorTest(ErrorTestRequest {}))
        .unwrap_err();
    match err {
        ClientError::Application(msg) => {
            assert_eq!(msg, "Internal error: This is an error.");
        }
        other => panic!("expected Application, got {other:?}"),
    }
}

#[test]
fn invalid_access_token_yields_application_error() {
    let manager = common::manager();
    let runner = common::runner(&manager);

    let err = runner
        .run::<LoginResponse>(&Command::LoginAccessToken(
            lockbox_protocol::AccessTokenLoginRequest {
                access_token: "garbage token".into(),
                state_path: None,
            },
        ))
        .unwrap_err();
    match err {
        ClientError::Application(msg) => assert!(!msg.is_empty()),
        other => panic!("expected Application, got {other:?}"),
    }
}

#[test]
fn login_then_restore_on_a_second_initialize() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("state.json");
    let manager = common::manager();

    // First runner: explicit login, persisting to the state file.
    let first = common::runner(&manager);
    let org = common::login(&first, Some(path.clone()));
    first.release().unwrap();

    // Second runner: same path, no login call. The restored session must
    // be usable immediately.
    let second = CommandRunner::initialize(
        Arc::clone(&manager),
        Settings::default(),
        Some(path),
    )
    .unwrap();
    let listed: SecretIdentifiersResponse = second
        .run(&Command::Secrets(SecretsCommand::List(
            SecretIdentifiersRequest {
                organization_id: org,
            },
        )))
        .expect("restored session should authenticate secrets.list");
    assert!(listed.data.is_empty());
    second.release().unwrap();
}

#[test]
fn project_rename_scenario() {
    let manager = common::manager();
    let runner = common::runner(&manager);
    let org = common::login(&runner, None);

    let created: Project = runner
        .run(&Command::Projects(ProjectsCommand::Create(
            ProjectCreateRequest {
                organization_id: org,
                name: "NewTestProject".into(),
            },
        )))
        .unwrap();

    let _: Project = runner
        .run(&Command::Projects(ProjectsCommand::Update(
            ProjectPutRequest {
                id: created.id,
                organization_id: org,
                name: "NewTestProject Renamed".into(),
            },
        )))
        .unwrap();

    let fetched: Project = runner
        .run(&Command::Projects(ProjectsCommand::Get(ProjectGetRequest {
            id: created.id,
        })))
        .unwrap();
    assert_eq!(fetched.name, "NewTestProject Renamed");
    runner.release().unwrap();
}

#[test]
fn logout_requires_a_new_login_before_further_commands() {
    let manager = common::manager();
    let runner = common::runner(&manager);
    let org = common::login(&runner, None);

    runner.logout(false).unwrap();
    let err = runner.sync(org, None).unwrap_err();
    assert!(matches!(err, ClientError::Application(_)));

    common::login(&runner, None);
    assert!(matches!(runner.sync(org, None), Ok(SyncOutcome::Changed(_))));
}

#[test]
fn release_consumes_the_runner_exactly_once() {
    let manager = common::manager();
    let runner = common::runner(&manager);
    assert_eq!(manager.live_count(), 1);
    runner.release().unwrap();
    assert_eq!(manager.live_count(), 0);
    // `runner` is moved; a second release does not compile, which is the
    // ownership contract working as intended.
}
