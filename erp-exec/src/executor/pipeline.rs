use std::sync::Arc;

use erp_core::State;
use serde_json::Value as JsonValue;
use tracing::Instrument;
use uuid::Uuid;

use crate::error::AdaptorError;
use crate::executor::events::{Event, EventSink, NoOpEventSink};
use crate::executor::operation::BoxedOperation;

/// Folds a list of operations over a state, strictly in order.
pub struct Executor {
    event_sink: Arc<dyn EventSink>,
}

impl Default for Executor {
    fn default() -> Self {
        Self::new(Arc::new(NoOpEventSink))
    }
}

impl Executor {
    pub fn new(event_sink: Arc<dyn EventSink>) -> Self {
        Self { event_sink }
    }

    /// Merge `initial` over the default state shape, then run every operation.
    pub async fn execute(
        &self,
        operations: &[BoxedOperation],
        initial: JsonValue,
    ) -> Result<State, AdaptorError> {
        let state = State::initial(initial)?;
        self.run(operations, state).await
    }

    /// Run every operation starting from `state` as given.
    ///
    /// Operation `i` receives what operation `i - 1` returned. The first failure ends
    /// the run and is returned unchanged; nothing after it runs and nothing is rolled back.
    pub async fn run(
        &self,
        operations: &[BoxedOperation],
        state: State,
    ) -> Result<State, AdaptorError> {
        let run_id = Uuid::new_v4();
        self.event_sink
            .emit(Event::PipelineStarted {
                run_id,
                operations: operations.len(),
            })
            .await;

        let mut state = state;
        for (index, op) in operations.iter().enumerate() {
            let name = op.name().to_string();
            self.event_sink
                .emit(Event::OperationStarted {
                    run_id,
                    index,
                    name: name.clone(),
                })
                .await;

            let span = tracing::info_span!("operation", %run_id, index, name = %name);
            match op.run(state).instrument(span).await {
                Ok(next) => {
                    state = next;
                    self.event_sink
                        .emit(Event::OperationSucceeded {
                            run_id,
                            index,
                            name,
                        })
                        .await;
                }
                Err(e) => {
                    self.event_sink
                        .emit(Event::OperationFailed {
                            run_id,
                            index,
                            name,
                            kind: e.kind(),
                            error: e.to_string(),
                        })
                        .await;
                    self.event_sink
                        .emit(Event::PipelineFinished {
                            run_id,
                            succeeded: false,
                        })
                        .await;
                    return Err(e);
                }
            }
        }

        self.event_sink
            .emit(Event::PipelineFinished {
                run_id,
                succeeded: true,
            })
            .await;
        Ok(state)
    }
}

/// Run `operations` against `initial` with no event sink attached.
pub async fn execute(
    operations: &[BoxedOperation],
    initial: JsonValue,
) -> Result<State, AdaptorError> {
    Executor::default().execute(operations, initial).await
}
