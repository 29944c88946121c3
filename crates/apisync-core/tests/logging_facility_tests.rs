#![allow(clippy::unwrap_used, clippy::expect_used)]

use apisync_core::errors::ApiSyncError;
use apisync_core::logging_facility::test_capture::init_test_capture;
use apisync_core::{log_op_end, log_op_error, log_op_start};
use apisync_core_types::schema::{EVENT_END, EVENT_END_ERROR, EVENT_START};

#[test]
fn test_log_op_start_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_unique_1";

    log_op_start!(op_name);

    let start_events = capture.count_events(|e| {
        e.op.as_deref() == Some(op_name) && e.event.as_deref() == Some(EVENT_START)
    });
    assert_eq!(start_events, 1);
}

#[test]
fn test_log_op_end_records_duration() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_unique_2";

    log_op_end!(op_name, duration_ms = 42);

    let events = capture.events_for_op(op_name);
    assert_eq!(events.len(), 1, "Should have exactly one end event");
    assert_eq!(events[0].event.as_deref(), Some(EVENT_END));
    assert_eq!(events[0].field("duration_ms"), Some("42"));
}

#[test]
fn test_log_op_error_includes_kind_and_code() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_3";

    let err = ApiSyncError::SharedTypeStillReferenced {
        name: "Pet".to_string(),
        referenced_by: vec!["pet.addPet".to_string()],
    };
    log_op_error!(op_name, err, duration_ms = 10);

    capture.assert_event_exists(op_name, EVENT_END_ERROR);
    let event = capture
        .events_for_op(op_name)
        .into_iter()
        .find(|e| e.event.as_deref() == Some(EVENT_END_ERROR))
        .expect("Should have error event");
    assert_eq!(event.field("err.code"), Some("ERR_REFERENTIAL_INTEGRITY"));
    assert_eq!(event.field("err.kind"), Some("ReferentialIntegrity"));
}

#[test]
fn test_log_macros_with_entity_fields() {
    let capture = init_test_capture();
    let op_name = "test_log_macros_fields_unique_4";

    log_op_start!(op_name, module = "pet", endpoint = "addPet");
    log_op_end!(op_name, duration_ms = 1, change_count = 2u64);

    let events = capture.events_for_op(op_name);
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].field("module"), Some("pet"));
    assert_eq!(events[0].field("endpoint"), Some("addPet"));
    assert_eq!(events[1].field("change_count"), Some("2"));
    assert!(events[0]
        .component
        .as_deref()
        .unwrap()
        .starts_with("logging_facility_tests"));
}
