use erp_core::expressions::StateRoot;
use erp_core::{State, StateError};
use serde_json::json;

#[test]
fn initial_state_merges_defaults_under_caller_fields() {
    let state = State::initial(json!({
        "configuration": { "resource": "https://h" },
        "custom": 1
    }))
    .unwrap();

    assert_eq!(
        state.to_json(),
        json!({
            "configuration": { "resource": "https://h" },
            "references": [],
            "data": null,
            "custom": 1
        })
    );
}

#[test]
fn caller_fields_win_over_defaults() {
    let state = State::initial(json!({
        "references": [1, 2],
        "data": { "id": 7 }
    }))
    .unwrap();
    assert_eq!(state.references, vec![json!(1), json!(2)]);
    assert_eq!(state.data, json!({ "id": 7 }));
}

#[test]
fn null_initial_state_is_the_default_shape() {
    let state = State::initial(serde_json::Value::Null).unwrap();
    assert_eq!(state, State::default());
}

#[test]
fn non_object_initial_state_is_rejected() {
    let err = State::initial(json!([1])).unwrap_err();
    assert!(matches!(err, StateError::NotAnObject("array")));
}

#[test]
fn with_response_body_only_touches_response() {
    let before = State::initial(json!({ "configuration": { "a": 1 }, "data": 3 })).unwrap();
    let after = before.clone().with_response_body(json!({ "ok": true }));

    assert_eq!(after.response_body(), Some(&json!({ "ok": true })));
    assert_eq!(after.configuration, before.configuration);
    assert_eq!(after.data, before.data);
    assert_eq!(after.references, before.references);
    assert_eq!(after.extra, before.extra);
}

#[test]
fn keys_beside_response_body_survive_a_round_trip() {
    let state = State::initial(json!({
        "response": { "body": 1, "headers": { "etag": "W/1" }, "status": 200 }
    }))
    .unwrap();

    let after = state.with_response_body(json!({ "id": "c-1" }));

    assert_eq!(
        after.to_json()["response"],
        json!({ "body": { "id": "c-1" }, "headers": { "etag": "W/1" }, "status": 200 })
    );
}

#[test]
fn push_data_appends_previous_value_to_references() {
    let state = State::default().with_data(json!(1)).push_data(json!(2));
    assert_eq!(state.data, json!(2));
    assert_eq!(state.references, vec![json!(1)]);
    assert_eq!(state.root_value(StateRoot::LastReference).into_owned(), json!(1));
}
