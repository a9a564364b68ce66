use async_trait::async_trait;
use erp_core::{Expr, State};
use serde_json::Value as JsonValue;

use crate::error::AdaptorError;

/// One pipeline step: a transformation from state to the next state.
///
/// Synchronous transformations simply return without awaiting anything; the engine
/// treats both kinds the same.
#[async_trait]
pub trait Operation: Send + Sync {
    fn name(&self) -> &str;

    async fn run(&self, state: State) -> Result<State, AdaptorError>;
}

pub type BoxedOperation = Box<dyn Operation>;

#[async_trait]
impl<O: Operation + ?Sized> Operation for Box<O> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn run(&self, state: State) -> Result<State, AdaptorError> {
        (**self).run(state).await
    }
}

/// A synchronous operation built from a closure.
pub struct AlterState<F> {
    f: F,
}

pub fn alter_state<F>(f: F) -> AlterState<F>
where
    F: Fn(State) -> Result<State, AdaptorError> + Send + Sync,
{
    AlterState { f }
}

#[async_trait]
impl<F> Operation for AlterState<F>
where
    F: Fn(State) -> Result<State, AdaptorError> + Send + Sync,
{
    fn name(&self) -> &str {
        "alter_state"
    }

    async fn run(&self, state: State) -> Result<State, AdaptorError> {
        (self.f)(state)
    }
}

/// Run an operation once per element of an array in state.
///
/// Each iteration sees `data` set to the current element and the state left by the
/// previous iteration. `data` is put back to its original value afterwards.
pub struct Each {
    source: Expr<Vec<JsonValue>>,
    operation: BoxedOperation,
}

pub fn each(source: impl Into<Expr<Vec<JsonValue>>>, operation: BoxedOperation) -> Each {
    Each {
        source: source.into(),
        operation,
    }
}

#[async_trait]
impl Operation for Each {
    fn name(&self) -> &str {
        "each"
    }

    async fn run(&self, state: State) -> Result<State, AdaptorError> {
        let items = self.source.resolve(&state)?;
        let original = state.data.clone();
        let mut state = state;
        for item in items {
            state = self.operation.run(state.with_data(item)).await?;
        }
        Ok(state.with_data(original))
    }
}
