use std::sync::Arc;

use erp_core::odata::EntityRequest;
use serde_json::Value as JsonValue;

use crate::error::AdaptorError;
use crate::executor::events::{Event, EventSink, NoOpEventSink};
use crate::executor::http::{HttpClient, HttpRequestParts, HttpResponseParts};
use crate::executor::response::{classify_outcome, parse_body};
use crate::executor::types::ClientConfig;

/// The HTTP client, limits and event sink every network-bound operation shares.
#[derive(Clone)]
pub struct Transport {
    http: Arc<dyn HttpClient>,
    events: Arc<dyn EventSink>,
    config: ClientConfig,
}

impl Transport {
    pub fn new(http: Arc<dyn HttpClient>) -> Self {
        Self {
            http,
            events: Arc::new(NoOpEventSink),
            config: ClientConfig::default(),
        }
    }

    pub fn with_event_sink(mut self, events: Arc<dyn EventSink>) -> Self {
        self.events = events;
        self
    }

    pub fn with_config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    pub fn events(&self) -> &Arc<dyn EventSink> {
        &self.events
    }

    /// One round trip: send, classify, report. No retries.
    pub async fn send(
        &self,
        operation: &str,
        req: HttpRequestParts,
    ) -> Result<HttpResponseParts, AdaptorError> {
        self.events
            .emit(Event::RequestBuilt {
                operation: operation.to_string(),
                method: req.method.clone(),
                url: req.url.to_string(),
            })
            .await;

        let outcome = self
            .http
            .send(req, self.config.timeout, self.config.max_response_bytes)
            .await;
        let status = outcome.as_ref().ok().map(|r| r.status);
        let classified = classify_outcome(outcome);

        self.events
            .emit(Event::ResponseClassified {
                operation: operation.to_string(),
                status,
                succeeded: classified.is_ok(),
            })
            .await;

        classified
    }

    /// Send an OData entity request and return its parsed body.
    pub async fn send_entity(
        &self,
        operation: &str,
        req: EntityRequest,
    ) -> Result<JsonValue, AdaptorError> {
        let parts = to_http_parts(req)?;
        let resp = self.send(operation, parts).await?;
        Ok(parse_body(&resp))
    }
}

/// The query string is set rather than parsed, so a `#` inside `$filter` is encoded
/// as `%23` instead of starting a fragment.
fn to_http_parts(req: EntityRequest) -> Result<HttpRequestParts, AdaptorError> {
    let (base, query) = match req.url.split_once('?') {
        Some((base, query)) => (base, Some(query)),
        None => (req.url.as_str(), None),
    };
    let mut url = url::Url::parse(base).map_err(|e| AdaptorError::InvalidUrl {
        url: req.url.clone(),
        message: e.to_string(),
    })?;
    url.set_query(query);
    let body = match &req.body {
        Some(b) => serde_json::to_vec(b).map_err(|e| AdaptorError::upstream(e.to_string()))?,
        None => Vec::new(),
    };
    Ok(HttpRequestParts {
        method: req.method.as_str().to_string(),
        url,
        headers: req.headers,
        body,
    })
}
