use std::collections::BTreeMap;

use erp_exec::executor::{classify, parse_body, HttpResponseParts};
use erp_exec::{AdaptorError, HttpError};
use serde_json::json;

fn resp(status: u16, body: &str) -> HttpResponseParts {
    HttpResponseParts {
        status,
        headers: BTreeMap::new(),
        body: body.as_bytes().to_vec(),
    }
}

#[test]
fn accepted_statuses_succeed() {
    for status in [200, 201, 202, 204] {
        assert!(classify(None, Some(&resp(status, ""))).is_ok(), "{status}");
    }
}

#[test]
fn other_statuses_fail_with_the_code_in_the_message() {
    let err = classify(None, Some(&resp(404, "{\"error\":\"missing\"}"))).unwrap_err();
    assert!(err.to_string().contains("404"));
    assert!(matches!(err, AdaptorError::Status { status: 404, ref body } if body == &json!({ "error": "missing" })));

    for status in [100, 203, 301, 400, 500] {
        assert_eq!(classify(None, Some(&resp(status, ""))).unwrap_err().status_code(), Some(status));
    }
}

#[test]
fn transport_error_wins_over_a_response() {
    let err = classify(Some(HttpError::Network("reset".into())), Some(&resp(200, ""))).unwrap_err();
    assert!(matches!(err, AdaptorError::Transport(HttpError::Network(ref m)) if m == "reset"));
}

#[test]
fn missing_response_is_a_transport_error() {
    let err = classify(None, None).unwrap_err();
    assert_eq!(err.kind(), "transport");
}

#[test]
fn body_parsing() {
    assert_eq!(parse_body(&resp(204, "")), json!(null));
    assert_eq!(parse_body(&resp(200, " \n")), json!(null));
    assert_eq!(parse_body(&resp(200, "{\"a\":[1]}")), json!({ "a": [1] }));
    assert_eq!(parse_body(&resp(200, "plain text")), json!("plain text"));
}
