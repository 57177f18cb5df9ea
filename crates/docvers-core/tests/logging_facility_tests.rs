#![allow(clippy::unwrap_used, clippy::expect_used)]

use docvers_core::core_types::schema::{EVENT_END, EVENT_END_ERROR, EVENT_START};
use docvers_core::errors::{DocversError, ExError, ExErrorKind};
use docvers_core::logging_facility::test_capture::init_test_capture;
use docvers_core::{log_op_end, log_op_error, log_op_start};
use docvers_core::{merge, Entity, Node, VersionContext, VersionOptions};
use tracing::Level;

#[test]
fn test_log_op_start_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_unique_1";

    log_op_start!(op_name);

    capture.assert_event_exists(op_name, EVENT_START);
}

#[test]
fn test_log_op_end_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_unique_2";

    log_op_end!(op_name, duration_ms = 42);

    let end_events: Vec<_> = capture
        .events_for_op(op_name)
        .into_iter()
        .filter(|e| e.event.as_deref() == Some(EVENT_END))
        .collect();

    assert_eq!(end_events.len(), 1, "Should have exactly one end event");
    assert_eq!(end_events[0].fields.get("duration_ms"), Some(&"42".to_string()));
}

#[test]
fn test_log_op_error_includes_code_and_kind() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_3";

    let err = DocversError::InvalidDocument {
        path: "api.json".to_string(),
        reason: "expected an array".to_string(),
    };
    log_op_error!(op_name, err, duration_ms = 10);

    let events = capture.events_for_op(op_name);
    let error_event = events
        .iter()
        .find(|e| e.event.as_deref() == Some(EVENT_END_ERROR))
        .expect("Should have error event");

    assert_eq!(error_event.level, Level::ERROR);
    assert_eq!(
        error_event.fields.get("err_code"),
        Some(&"ERR_INVALID_DOCUMENT".to_string())
    );
    assert_eq!(
        error_event.fields.get("err_kind"),
        Some(&"InvalidDocument".to_string())
    );
}

#[test]
fn test_log_op_error_renders_version_context() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_detail_unique_9";

    let err = ExError::new(ExErrorKind::InvalidDocument)
        .with_version("1.1.0")
        .with_path("versions.json[1]");
    log_op_error!(op_name, err, duration_ms = 1, version_count = 2);

    let events = capture.events_for_op(op_name);
    let error_event = events
        .iter()
        .find(|e| e.event.as_deref() == Some(EVENT_END_ERROR))
        .expect("Should have error event");

    let detail = error_event.fields.get("err_detail").expect("detail recorded");
    assert!(detail.contains("(version: 1.1.0)"));
    assert_eq!(error_event.fields.get("version_count"), Some(&"2".to_string()));
}

#[test]
fn test_boundary_fields_are_recorded() {
    let capture = init_test_capture();
    let op_name = "test_boundary_fields_unique_4";

    log_op_start!(op_name, destination = "docs/api.html", version_count = 3);
    log_op_end!(op_name, duration_ms = 7, output_count = 3);

    let events = capture.events_for_op(op_name);
    assert_eq!(events.len(), 2);
    assert_eq!(
        events[0].fields.get("destination"),
        Some(&"docs/api.html".to_string())
    );
    assert_eq!(events[1].fields.get("output_count"), Some(&"3".to_string()));
    assert!(events.iter().all(|e| e.component.is_some()));
}

#[test]
#[should_panic(expected = "Expected event")]
fn test_assert_event_exists_fails_for_unknown_op() {
    let capture = init_test_capture();
    capture.assert_event_exists("nonexistent_op_truly_unique_999", EVENT_START);
}

#[test]
fn test_count_events() {
    let capture = init_test_capture();
    let op1 = "test_count_events_op1_unique_5";
    let op2 = "test_count_events_op2_unique_5";

    log_op_start!(op1);
    log_op_start!(op2);
    log_op_end!(op1, duration_ms = 10);

    let starts = capture.count_events(|e| {
        e.event.as_deref() == Some(EVENT_START)
            && (e.op.as_deref() == Some(op1) || e.op.as_deref() == Some(op2))
    });
    let ends = capture.count_events(|e| {
        e.event.as_deref() == Some(EVENT_END) && e.op.as_deref() == Some(op1)
    });

    assert_eq!(starts, 2);
    assert_eq!(ends, 1);
}

#[test]
fn test_sibling_key_collision_is_warned() {
    let capture = init_test_capture();
    let options = VersionOptions::default();
    let ctx = VersionContext::new(&options);
    let twin = Node::Entity(Entity::new("function").param("collision_unique_twin"));

    let merged = merge(&[twin.clone(), twin.clone()], &[twin], &ctx);

    assert_eq!(merged.len(), 2);
    let warned = capture.count_events(|e| {
        e.level == Level::WARN
            && e
                .fields
                .get("entity_key")
                .is_some_and(|key| key.contains("collision_unique_twin"))
    });
    assert!(warned >= 1);
}
