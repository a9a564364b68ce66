#![allow(dead_code)]

use std::collections::{BTreeMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use erp_exec::executor::{HttpRequestParts, HttpResponseParts};
use erp_exec::{Event, EventSink, HttpClient, HttpError};
use serde_json::Value as JsonValue;

/// Replays queued outcomes in order and keeps every request it was asked to send.
#[derive(Default)]
pub struct MockHttpClient {
    outcomes: Mutex<VecDeque<Result<HttpResponseParts, HttpError>>>,
    requests: Mutex<Vec<HttpRequestParts>>,
}

impl MockHttpClient {
    pub fn new(outcomes: Vec<Result<HttpResponseParts, HttpError>>) -> Arc<Self> {
        Arc::new(Self {
            outcomes: Mutex::new(outcomes.into()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn requests(&self) -> Vec<HttpRequestParts> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_json(&self, index: usize) -> JsonValue {
        serde_json::from_slice(&self.requests()[index].body).unwrap()
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn send(
        &self,
        req: HttpRequestParts,
        _timeout: Duration,
        _max_response_bytes: usize,
    ) -> Result<HttpResponseParts, HttpError> {
        self.requests.lock().unwrap().push(req);
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(HttpError::Other("no response queued".to_string())))
    }
}

pub fn response(status: u16, body: &str) -> Result<HttpResponseParts, HttpError> {
    Ok(HttpResponseParts {
        status,
        headers: BTreeMap::new(),
        body: body.as_bytes().to_vec(),
    })
}

pub fn json_response(status: u16, body: JsonValue) -> Result<HttpResponseParts, HttpError> {
    response(status, &body.to_string())
}

#[derive(Default)]
pub struct RecordingEventSink {
    events: Mutex<Vec<Event>>,
}

impl RecordingEventSink {
    pub fn kinds(&self) -> Vec<&'static str> {
        self.events.lock().unwrap().iter().map(Event::kind).collect()
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }
}

#[async_trait]
impl EventSink for RecordingEventSink {
    async fn emit(&self, event: Event) {
        self.events.lock().unwrap().push(event);
    }
}

pub fn odata_state() -> JsonValue {
    serde_json::json!({
        "configuration": {
            "resource": "https://h",
            "apiVersion": "1",
            "accessToken": "Bearer t"
        }
    })
}
