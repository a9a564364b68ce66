mod common;

use std::sync::Arc;

use common::{json_response, odata_state, MockHttpClient, RecordingEventSink};
use erp_core::types::{DeleteParams, QueryParams};
use erp_exec::{Adaptor, Event};
use serde_json::json;

#[tokio::test]
async fn successful_run_emits_events_in_order() {
    let sink = Arc::new(RecordingEventSink::default());
    let http = MockHttpClient::new(vec![json_response(200, json!({ "value": [] }))]);
    let adaptor = Adaptor::new(http).with_event_sink(sink.clone());
    let ops = vec![adaptor.query(QueryParams::new("contacts"))];

    adaptor.execute(&ops, odata_state()).await.unwrap();

    assert_eq!(
        sink.kinds(),
        vec![
            "pipeline.started",
            "operation.started",
            "request.built",
            "response.classified",
            "operation.succeeded",
            "pipeline.finished",
        ]
    );
}

#[tokio::test]
async fn failed_run_reports_the_failing_operation() {
    let sink = Arc::new(RecordingEventSink::default());
    let http = MockHttpClient::new(vec![json_response(403, json!(null))]);
    let adaptor = Adaptor::new(http).with_event_sink(sink.clone());
    let ops = vec![
        adaptor.delete_entity(DeleteParams::new("contacts", "1")),
        adaptor.delete_entity(DeleteParams::new("contacts", "2")),
    ];

    adaptor.execute(&ops, odata_state()).await.unwrap_err();

    let events = sink.events();
    assert!(events.iter().any(|e| matches!(
        e,
        Event::ResponseClassified { status: Some(403), succeeded: false, .. }
    )));
    assert!(events.iter().any(|e| matches!(
        e,
        Event::OperationFailed { index: 0, kind: "status", .. }
    )));
    assert!(matches!(
        events.last(),
        Some(Event::PipelineFinished { succeeded: false, .. })
    ));
    assert!(!events
        .iter()
        .any(|e| matches!(e, Event::OperationStarted { index: 1, .. })));
}

#[tokio::test]
async fn request_events_never_carry_header_values() {
    let sink = Arc::new(RecordingEventSink::default());
    let http = MockHttpClient::new(vec![json_response(200, json!({}))]);
    let adaptor = Adaptor::new(http).with_event_sink(sink.clone());
    let ops = vec![adaptor.query(QueryParams::new("contacts"))];

    adaptor.execute(&ops, odata_state()).await.unwrap();

    for event in sink.events() {
        assert!(!event.to_json().to_string().contains("Bearer t"));
    }
}

#[test]
fn event_json_is_tagged_with_its_kind() {
    let event = Event::RequestBuilt {
        operation: "query".into(),
        method: "GET".into(),
        url: "https://h/api/data/v1/contacts".into(),
    };
    assert_eq!(
        event.to_json(),
        json!({
            "type": "request.built",
            "operation": "query",
            "method": "GET",
            "url": "https://h/api/data/v1/contacts"
        })
    );
}
