use std::sync::Arc;

use async_trait::async_trait;
use erp_core::types::RpcCall;
use erp_core::{Expr, State};

use crate::config::RpcConfiguration;
use crate::error::AdaptorError;
use crate::executor::Operation;
use crate::rpc::{RpcConnectParams, RpcConnector};

/// Connect with `state.configuration`, issue one call, store the result in `response.body`.
pub struct RpcOperation {
    call: Expr<RpcCall>,
    connector: Arc<dyn RpcConnector>,
}

impl RpcOperation {
    pub fn new(call: impl Into<Expr<RpcCall>>, connector: Arc<dyn RpcConnector>) -> Self {
        Self {
            call: call.into(),
            connector,
        }
    }
}

#[async_trait]
impl Operation for RpcOperation {
    fn name(&self) -> &str {
        "rpc"
    }

    async fn run(&self, state: State) -> Result<State, AdaptorError> {
        let params = RpcConnectParams::from(RpcConfiguration::from_state(&state)?);
        let call = self.call.resolve(&state)?;

        tracing::debug!(connector = self.connector.name(), call = call.name(), "rpc call");
        let connection = self.connector.connect(&params).await?;
        let result = connection.call(&call).await?;
        Ok(state.with_response_body(result))
    }
}
