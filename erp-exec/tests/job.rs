mod common;

use common::{json_response, response, MockHttpClient};
use erp_core::parse_job_str;
use erp_core::DocumentFormat;
use erp_exec::Adaptor;
use serde_json::json;

const JOB: &str = r#"
state:
  configuration:
    resource: https://h
    apiVersion: 9.2
  data:
    contacts:
      - { id: a1, name: Ada }
      - { id: b2, name: Grace }
operations:
  - each:
      dataSource: $data#/contacts
      operation:
        update:
          entityName: contacts
          entityId: $data#/id
          body:
            fullname: "Dr. { $data#/name }"
  - query:
      entityName: contacts
      query:
        fields: [fullname]
        limit: 2
"#;

#[tokio::test]
async fn yaml_job_runs_with_state_overrides() {
    let http = MockHttpClient::new(vec![
        response(204, ""),
        response(204, ""),
        json_response(200, json!({ "value": [{ "fullname": "Dr. Ada" }] })),
    ]);
    let adaptor = Adaptor::new(http.clone());
    let parsed = parse_job_str(JOB, DocumentFormat::Auto).unwrap();

    let state = adaptor
        .run_job(
            &parsed.job,
            Some(json!({ "configuration": { "accessToken": "Bearer t" } })),
        )
        .await
        .unwrap();

    let requests = http.requests();
    assert_eq!(requests.len(), 3);
    assert_eq!(requests[0].url.as_str(), "https://h/api/data/v9.2/contacts(a1)");
    assert_eq!(requests[1].url.as_str(), "https://h/api/data/v9.2/contacts(b2)");
    assert_eq!(http.request_json(0), json!({ "fullname": "Dr. Ada" }));
    assert_eq!(http.request_json(1), json!({ "fullname": "Dr. Grace" }));
    assert_eq!(
        requests[2].url.as_str(),
        "https://h/api/data/v9.2/contacts?$select=fullname"
    );
    assert_eq!(requests[2].headers["Prefer"], "odata.maxpagesize=2");
    assert_eq!(requests[2].headers["Authorization"], "Bearer t");

    assert_eq!(
        state.response_body(),
        Some(&json!({ "value": [{ "fullname": "Dr. Ada" }] }))
    );
    assert_eq!(state.data["contacts"][1]["id"], "b2");
}
