use std::sync::{Arc, Mutex};

use erp_core::{State, StateError};
use erp_exec::{alter_state, each, execute, AdaptorError, BoxedOperation};
use serde_json::json;

fn record(log: &Arc<Mutex<Vec<usize>>>, index: usize) -> BoxedOperation {
    let log = Arc::clone(log);
    Box::new(alter_state(move |state: State| {
        log.lock().unwrap().push(index);
        Ok(state.push_data(json!(index)))
    }))
}

#[tokio::test]
async fn empty_pipeline_returns_merged_initial_state() {
    let state = execute(&[], json!({ "configuration": { "resource": "https://h" }, "x": 1 }))
        .await
        .unwrap();

    assert_eq!(
        state.to_json(),
        json!({
            "configuration": { "resource": "https://h" },
            "references": [],
            "data": null,
            "x": 1
        })
    );
}

#[tokio::test]
async fn operations_run_in_order_and_thread_state() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let ops = vec![record(&log, 0), record(&log, 1), record(&log, 2)];

    let state = execute(&ops, json!({})).await.unwrap();

    assert_eq!(*log.lock().unwrap(), vec![0, 1, 2]);
    assert_eq!(state.data, json!(2));
    assert_eq!(state.references, vec![json!(null), json!(0), json!(1)]);
}

#[tokio::test]
async fn first_failure_stops_the_pipeline() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let ops: Vec<BoxedOperation> = vec![
        record(&log, 0),
        Box::new(alter_state(|_state: State| Err(AdaptorError::upstream("boom")))),
        record(&log, 2),
    ];

    let err = execute(&ops, json!({})).await.unwrap_err();

    assert!(matches!(err, AdaptorError::Upstream(ref m) if m == "boom"));
    assert_eq!(*log.lock().unwrap(), vec![0]);
}

#[tokio::test]
async fn non_object_initial_state_fails_before_any_operation() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let ops = vec![record(&log, 0)];

    let err = execute(&ops, json!("nope")).await.unwrap_err();

    assert!(matches!(err, AdaptorError::State(StateError::NotAnObject("string"))));
    assert!(log.lock().unwrap().is_empty());
}

#[tokio::test]
async fn each_runs_once_per_item_and_restores_data() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let inner = {
        let seen = Arc::clone(&seen);
        Box::new(alter_state(move |state: State| {
            seen.lock().unwrap().push(state.data.clone());
            Ok(state)
        }))
    };
    let ops: Vec<BoxedOperation> = vec![Box::new(each("$data#/items", inner))];

    let state = execute(&ops, json!({ "data": { "items": [{ "id": 1 }, { "id": 2 }] } }))
        .await
        .unwrap();

    assert_eq!(*seen.lock().unwrap(), vec![json!({ "id": 1 }), json!({ "id": 2 })]);
    assert_eq!(state.data, json!({ "items": [{ "id": 1 }, { "id": 2 }] }));
}

#[tokio::test]
async fn each_over_a_non_array_is_an_expression_error() {
    let ops: Vec<BoxedOperation> = vec![Box::new(each(
        "$data#/items",
        Box::new(alter_state(|state: State| Ok(state))),
    ))];

    let err = execute(&ops, json!({ "data": { "items": 3 } })).await.unwrap_err();

    assert_eq!(err.kind(), "expression");
}
