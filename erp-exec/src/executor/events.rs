use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value as JsonValue};
use uuid::Uuid;

/// Observability side channel. Emitting an event never changes what an operation returns.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    PipelineStarted {
        run_id: Uuid,
        operations: usize,
    },
    PipelineFinished {
        run_id: Uuid,
        succeeded: bool,
    },
    OperationStarted {
        run_id: Uuid,
        index: usize,
        name: String,
    },
    OperationSucceeded {
        run_id: Uuid,
        index: usize,
        name: String,
    },
    OperationFailed {
        run_id: Uuid,
        index: usize,
        name: String,
        kind: &'static str,
        error: String,
    },
    /// Header values are never part of the event.
    RequestBuilt {
        operation: String,
        method: String,
        url: String,
    },
    ResponseClassified {
        operation: String,
        status: Option<u16>,
        succeeded: bool,
    },
}

impl Event {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::PipelineStarted { .. } => "pipeline.started",
            Self::PipelineFinished { .. } => "pipeline.finished",
            Self::OperationStarted { .. } => "operation.started",
            Self::OperationSucceeded { .. } => "operation.succeeded",
            Self::OperationFailed { .. } => "operation.failed",
            Self::RequestBuilt { .. } => "request.built",
            Self::ResponseClassified { .. } => "response.classified",
        }
    }

    pub fn to_json(&self) -> JsonValue {
        let kind = self.kind();
        match self {
            Self::PipelineStarted { run_id, operations } => {
                json!({ "type": kind, "run_id": run_id.to_string(), "operations": operations })
            }
            Self::PipelineFinished { run_id, succeeded } => {
                json!({ "type": kind, "run_id": run_id.to_string(), "succeeded": succeeded })
            }
            Self::OperationStarted { run_id, index, name }
            | Self::OperationSucceeded { run_id, index, name } => {
                json!({ "type": kind, "run_id": run_id.to_string(), "index": index, "name": name })
            }
            Self::OperationFailed {
                run_id,
                index,
                name,
                kind: error_kind,
                error,
            } => {
                json!({
                    "type": kind,
                    "run_id": run_id.to_string(),
                    "index": index,
                    "name": name,
                    "error_kind": error_kind,
                    "error": error
                })
            }
            Self::RequestBuilt {
                operation,
                method,
                url,
            } => {
                json!({ "type": kind, "operation": operation, "method": method, "url": url })
            }
            Self::ResponseClassified {
                operation,
                status,
                succeeded,
            } => {
                json!({ "type": kind, "operation": operation, "status": status, "succeeded": succeeded })
            }
        }
    }
}

#[async_trait]
pub trait EventSink: Send + Sync {
    async fn emit(&self, event: Event);
}

pub struct CompositeEventSink {
    sinks: Vec<Arc<dyn EventSink>>,
}

impl Default for CompositeEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl CompositeEventSink {
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    pub fn add(&mut self, sink: Arc<dyn EventSink>) {
        self.sinks.push(sink);
    }
}

#[async_trait]
impl EventSink for CompositeEventSink {
    async fn emit(&self, event: Event) {
        for sink in &self.sinks {
            sink.emit(event.clone()).await;
        }
    }
}

/// One JSON object per line on stdout.
pub struct StdoutEventSink;

#[async_trait]
impl EventSink for StdoutEventSink {
    async fn emit(&self, event: Event) {
        println!(
            "{}",
            serde_json::to_string(&event.to_json()).unwrap_or_default()
        );
    }
}

/// Forwards events to `tracing`; failures at `warn`, everything else at `info`/`debug`.
pub struct TracingEventSink;

#[async_trait]
impl EventSink for TracingEventSink {
    async fn emit(&self, event: Event) {
        match &event {
            Event::PipelineStarted { run_id, operations } => {
                tracing::info!(%run_id, operations, "pipeline started");
            }
            Event::PipelineFinished { run_id, succeeded } => {
                tracing::info!(%run_id, succeeded, "pipeline finished");
            }
            Event::OperationStarted { run_id, index, name } => {
                tracing::debug!(%run_id, index, name = %name, "operation started");
            }
            Event::OperationSucceeded { run_id, index, name } => {
                tracing::info!(%run_id, index, name = %name, "operation succeeded");
            }
            Event::OperationFailed {
                run_id,
                index,
                name,
                kind,
                error,
            } => {
                tracing::warn!(%run_id, index, name = %name, kind, error = %error, "operation failed");
            }
            Event::RequestBuilt {
                operation,
                method,
                url,
            } => {
                tracing::info!(operation = %operation, method = %method, url = %url, "request built");
            }
            Event::ResponseClassified {
                operation,
                status,
                succeeded,
            } => {
                tracing::info!(operation = %operation, status = ?status, succeeded, "response classified");
            }
        }
    }
}

pub struct NoOpEventSink;

#[async_trait]
impl EventSink for NoOpEventSink {
    async fn emit(&self, _event: Event) {}
}
