use std::sync::Arc;

use erp_core::types::{
    CreateParams, DeleteParams, JobDocument, OperationSpec, QueryParams, RpcCall, UpdateParams,
};
use erp_core::{Expr, State};
use serde_json::Value as JsonValue;

use crate::entity::{CreateEntity, DeleteEntity, QueryEntities, UpdateEntity};
use crate::error::AdaptorError;
use crate::executor::{
    each, BoxedOperation, ClientConfig, EventSink, Executor, HttpClient, NoOpEventSink,
    Transport,
};
use crate::rpc::{OdooJsonRpcConnector, RpcConnector, RpcOperation};

/// Entry point for callers: builds operations that share one transport and event sink,
/// and runs them.
///
/// ```no_run
/// # async fn demo() -> Result<(), erp_exec::AdaptorError> {
/// use std::sync::Arc;
/// use erp_core::types::QueryParams;
/// use erp_exec::{Adaptor, ReqwestHttpClient};
///
/// let adaptor = Adaptor::new(Arc::new(ReqwestHttpClient::try_new()?));
/// let ops = vec![adaptor.query(QueryParams::new("contacts"))];
/// let state = adaptor
///     .execute(&ops, serde_json::json!({ "configuration": {
///         "resource": "https://org.example.com",
///         "apiVersion": "9.2",
///         "accessToken": "Bearer ..."
///     }}))
///     .await?;
/// println!("{}", state.to_json());
/// # Ok(()) }
/// ```
#[derive(Clone)]
pub struct Adaptor {
    http: Arc<dyn HttpClient>,
    events: Arc<dyn EventSink>,
    client_config: ClientConfig,
    connector: Option<Arc<dyn RpcConnector>>,
}

impl Adaptor {
    pub fn new(http: Arc<dyn HttpClient>) -> Self {
        Self {
            http,
            events: Arc::new(NoOpEventSink),
            client_config: ClientConfig::default(),
            connector: None,
        }
    }

    pub fn with_event_sink(mut self, events: Arc<dyn EventSink>) -> Self {
        self.events = events;
        self
    }

    pub fn with_client_config(mut self, client_config: ClientConfig) -> Self {
        self.client_config = client_config;
        self
    }

    /// Replace the RPC connector. Without one, RPC operations talk Odoo JSON-RPC.
    pub fn with_connector(mut self, connector: Arc<dyn RpcConnector>) -> Self {
        self.connector = Some(connector);
        self
    }

    pub fn transport(&self) -> Transport {
        Transport::new(Arc::clone(&self.http))
            .with_event_sink(Arc::clone(&self.events))
            .with_config(self.client_config.clone())
    }

    fn connector(&self) -> Arc<dyn RpcConnector> {
        match &self.connector {
            Some(c) => Arc::clone(c),
            None => Arc::new(OdooJsonRpcConnector::new(self.transport())),
        }
    }

    pub fn create_entity(&self, params: CreateParams) -> BoxedOperation {
        Box::new(CreateEntity::new(params, self.transport()))
    }

    pub fn query(&self, params: QueryParams) -> BoxedOperation {
        Box::new(QueryEntities::new(params, self.transport()))
    }

    pub fn update_entity(&self, params: UpdateParams) -> BoxedOperation {
        Box::new(UpdateEntity::new(params, self.transport()))
    }

    pub fn delete_entity(&self, params: DeleteParams) -> BoxedOperation {
        Box::new(DeleteEntity::new(params, self.transport()))
    }

    pub fn rpc(&self, call: impl Into<Expr<RpcCall>>) -> BoxedOperation {
        Box::new(RpcOperation::new(call, self.connector()))
    }

    /// Turn parsed operation specs into runnable operations.
    pub fn compile(&self, specs: &[OperationSpec]) -> Vec<BoxedOperation> {
        specs.iter().map(|spec| self.compile_one(spec)).collect()
    }

    fn compile_one(&self, spec: &OperationSpec) -> BoxedOperation {
        match spec {
            OperationSpec::Create(p) => self.create_entity(p.clone()),
            OperationSpec::Query(p) => self.query(p.clone()),
            OperationSpec::Update(p) => self.update_entity(p.clone()),
            OperationSpec::Delete(p) => self.delete_entity(p.clone()),
            OperationSpec::Rpc(call) => self.rpc(call.clone()),
            OperationSpec::Each(p) => Box::new(each(
                p.data_source.as_str(),
                self.compile_one(&p.operation),
            )),
        }
    }

    fn executor(&self) -> Executor {
        Executor::new(Arc::clone(&self.events))
    }

    pub async fn execute(
        &self,
        operations: &[BoxedOperation],
        initial: JsonValue,
    ) -> Result<State, AdaptorError> {
        self.executor().execute(operations, initial).await
    }

    /// Run a job document. `overrides` is merged key by key over the document's `state`,
    /// and its `configuration` object over the document's configuration.
    pub async fn run_job(
        &self,
        job: &JobDocument,
        overrides: Option<JsonValue>,
    ) -> Result<State, AdaptorError> {
        let initial = merge_state(job.state.clone().unwrap_or(JsonValue::Null), overrides);
        let operations = self.compile(&job.operations);
        self.execute(&operations, initial).await
    }
}

fn merge_state(base: JsonValue, overrides: Option<JsonValue>) -> JsonValue {
    let Some(overrides) = overrides else {
        return base;
    };
    match (base, overrides) {
        (JsonValue::Object(mut base), JsonValue::Object(over)) => {
            for (key, value) in over {
                let merged = match (key.as_str(), base.remove(&key), value) {
                    ("configuration", Some(JsonValue::Object(mut cfg)), JsonValue::Object(o)) => {
                        cfg.extend(o);
                        JsonValue::Object(cfg)
                    }
                    (_, _, value) => value,
                };
                base.insert(key, merged);
            }
            JsonValue::Object(base)
        }
        (JsonValue::Null, over) => over,
        // A non-object base is left for `State::initial` to reject.
        (base, _) => base,
    }
}

#[cfg(test)]
mod tests {
    use super::merge_state;
    use serde_json::json;

    #[test]
    fn configuration_is_merged_key_by_key() {
        let base = json!({ "configuration": { "resource": "https://a", "apiVersion": "9.2" }, "data": 1 });
        let over = json!({ "configuration": { "accessToken": "t" }, "data": 2 });
        assert_eq!(
            merge_state(base, Some(over)),
            json!({
                "configuration": { "resource": "https://a", "apiVersion": "9.2", "accessToken": "t" },
                "data": 2
            })
        );
    }

    #[test]
    fn no_overrides_keeps_base() {
        let base = json!({ "data": [1] });
        assert_eq!(merge_state(base.clone(), None), base);
        assert_eq!(merge_state(json!(null), Some(json!({ "x": 1 }))), json!({ "x": 1 }));
    }
}
