//! Tests for DispatchService against the recording collaborator

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde_json::json;

use rpresence::application::services::{DispatchOutcome, DispatchService};
use rpresence::application::ApplicationError;
use rpresence::config::{Settings, DEFAULT_CLIENT_ID};
use rpresence::domain::{Assets, InvocationRequest, Mode, Presence, Timestamps};
use rpresence::util::testing::{init_test_setup, Call, FailOn, RecordingConnector};

fn service(connector: &RecordingConnector) -> DispatchService {
    init_test_setup();
    DispatchService::new(Arc::new(connector.clone()), Arc::new(Settings::default()))
}

fn presence() -> Presence {
    Presence {
        state: "state = (Idle)".into(),
        details: "details = mpv".into(),
        timestamps: Timestamps {
            start: 1_700_000_000,
            end: Some(1_700_000_060),
        },
        assets: Assets {
            large_image: "mpv".into(),
            large_text: "large_text = mpv Media Player".into(),
            small_image: "player_stop".into(),
            small_text: "small_text = Idle".into(),
        },
    }
}

fn request(mode: Mode) -> InvocationRequest {
    InvocationRequest {
        mode,
        payload: json!({}),
        presence: mode.is_update().then(presence),
    }
}

#[test]
fn given_shutdown_when_dispatching_then_clears_once_then_closes_once() {
    // Arrange
    let connector = RecordingConnector::new();

    // Act
    let outcome = service(&connector)
        .dispatch(&request(Mode::Shutdown), Duration::ZERO)
        .unwrap();

    // Assert
    assert_eq!(outcome, DispatchOutcome::Cleared);
    assert_eq!(
        connector.calls(),
        vec![
            Call::Connect(DEFAULT_CLIENT_ID.to_string()),
            Call::Clear,
            Call::Close
        ]
    );
}

#[test]
fn given_idle_when_dispatching_then_updates_with_all_fields_and_releases() {
    let connector = RecordingConnector::new();

    let outcome = service(&connector)
        .dispatch(&request(Mode::Idle), Duration::ZERO)
        .unwrap();

    assert_eq!(outcome, DispatchOutcome::Updated(presence()));
    assert_eq!(
        connector.calls(),
        vec![
            Call::Connect(DEFAULT_CLIENT_ID.to_string()),
            Call::Update(presence()),
            Call::Close
        ]
    );
}

#[test]
fn given_not_idle_when_dispatching_then_never_clears() {
    let connector = RecordingConnector::new();

    service(&connector)
        .dispatch(&request(Mode::NotIdle), Duration::ZERO)
        .unwrap();

    assert_eq!(connector.count(|c| matches!(c, Call::Update(_))), 1);
    assert_eq!(connector.count(|c| *c == Call::Clear), 0);
    assert_eq!(connector.count(|c| *c == Call::Close), 1);
}

#[test]
fn given_host_not_running_when_dispatching_then_unavailable_and_no_calls() {
    let connector = RecordingConnector::failing_on(FailOn::Connect);

    let err = service(&connector)
        .dispatch(&request(Mode::Shutdown), Duration::ZERO)
        .unwrap_err();

    assert!(matches!(err, ApplicationError::Unavailable { .. }));
    assert_eq!(
        connector.calls(),
        vec![Call::Connect(DEFAULT_CLIENT_ID.to_string())]
    );
}

#[test]
fn given_failing_update_when_dispatching_then_connection_still_released() {
    let connector = RecordingConnector::failing_on(FailOn::Update);

    let err = service(&connector)
        .dispatch(&request(Mode::Idle), Duration::ZERO)
        .unwrap_err();

    assert!(matches!(err, ApplicationError::OperationFailed { .. }));
    assert!(err.to_string().contains("update presence"));
    assert_eq!(connector.count(|c| *c == Call::Close), 1);
}

#[test]
fn given_failing_clear_when_shutting_down_then_closes_exactly_once() {
    let connector = RecordingConnector::failing_on(FailOn::Clear);

    let err = service(&connector)
        .dispatch(&request(Mode::Shutdown), Duration::ZERO)
        .unwrap_err();

    assert!(err.to_string().contains("clear presence"));
    assert_eq!(connector.count(|c| *c == Call::Close), 1);
}

#[test]
fn given_failing_close_when_shutting_down_then_reports_and_does_not_retry() {
    let connector = RecordingConnector::failing_on(FailOn::Close);

    let err = service(&connector)
        .dispatch(&request(Mode::Shutdown), Duration::ZERO)
        .unwrap_err();

    assert!(err.to_string().contains("close presence connection"));
    assert_eq!(connector.count(|c| *c == Call::Close), 1);
}

#[test]
fn given_update_mode_without_presence_when_dispatching_then_domain_error() {
    let connector = RecordingConnector::new();
    let mut req = request(Mode::Idle);
    req.presence = None;

    let err = service(&connector)
        .dispatch(&req, Duration::ZERO)
        .unwrap_err();

    assert!(matches!(err, ApplicationError::Domain(_)));
    assert_eq!(connector.count(|c| matches!(c, Call::Update(_))), 0);
    assert_eq!(connector.count(|c| *c == Call::Close), 1);
}

#[test]
fn given_custom_client_id_when_dispatching_then_connects_with_it() {
    init_test_setup();
    let connector = RecordingConnector::new();
    let settings = Settings {
        client_id: "42".into(),
        ..Settings::default()
    };
    let service = DispatchService::new(Arc::new(connector.clone()), Arc::new(settings));

    service
        .dispatch(&request(Mode::Shutdown), Duration::ZERO)
        .unwrap();

    assert_eq!(connector.calls()[0], Call::Connect("42".into()));
}

#[test]
fn given_linger_when_updating_then_holds_connection_before_release() {
    let connector = RecordingConnector::new();
    let linger = Duration::from_millis(200);
    let started = Instant::now();

    let outcome = service(&connector)
        .dispatch(&request(Mode::Idle), linger)
        .unwrap();

    assert!(started.elapsed() >= linger);
    assert_eq!(outcome, DispatchOutcome::Updated(presence()));
    assert_eq!(
        connector.calls(),
        vec![
            Call::Connect(DEFAULT_CLIENT_ID.to_string()),
            Call::Update(presence()),
            Call::Close
        ]
    );
}
