//! OData entity operations: one request, one classified response, one new state.
//!
//! Each operation reads the endpoint from `state.configuration`, resolves its parameters
//! against the same state, sends exactly one request and, on success, returns the input
//! state with `response.body` replaced by the parsed payload.

use async_trait::async_trait;
use erp_core::odata::{EntityRef, EntityRequest};
use erp_core::types::{CreateParams, DeleteParams, QueryParams, UpdateParams};
use erp_core::State;

use crate::config::ODataConfiguration;
use crate::error::AdaptorError;
use crate::executor::{Operation, Transport};

/// `POST {entity}` with a JSON body.
pub struct CreateEntity {
    params: CreateParams,
    transport: Transport,
}

impl CreateEntity {
    pub fn new(params: CreateParams, transport: Transport) -> Self {
        Self { params, transport }
    }
}

#[async_trait]
impl Operation for CreateEntity {
    fn name(&self) -> &str {
        "create"
    }

    async fn run(&self, state: State) -> Result<State, AdaptorError> {
        let config = ODataConfiguration::from_state(&state)?;
        let entity_name = self.params.entity_name.resolve(&state)?;
        let body = self.params.body.resolve(&state)?;

        let req = EntityRequest::create(&config.endpoint(), &entity_name, body);
        let payload = self.transport.send_entity(self.name(), req).await?;
        Ok(state.with_response_body(payload))
    }
}

/// `GET {entity}[({id})][?query]` with a page-size preference.
pub struct QueryEntities {
    params: QueryParams,
    transport: Transport,
}

impl QueryEntities {
    pub fn new(params: QueryParams, transport: Transport) -> Self {
        Self { params, transport }
    }
}

#[async_trait]
impl Operation for QueryEntities {
    fn name(&self) -> &str {
        "query"
    }

    async fn run(&self, state: State) -> Result<State, AdaptorError> {
        let config = ODataConfiguration::from_state(&state)?;
        let entity = EntityRef {
            entity_name: self.params.entity_name.resolve(&state)?,
            entity_id: self
                .params
                .entity_id
                .as_ref()
                .map(|id| id.resolve(&state))
                .transpose()?,
        };
        let query = self
            .params
            .query
            .as_ref()
            .map(|q| q.resolve(&state))
            .transpose()?;

        let req = EntityRequest::query(&config.endpoint(), &entity, query.as_ref());
        let payload = self.transport.send_entity(self.name(), req).await?;
        Ok(state.with_response_body(payload))
    }
}

/// `PATCH {entity}({id})` with a JSON body.
pub struct UpdateEntity {
    params: UpdateParams,
    transport: Transport,
}

impl UpdateEntity {
    pub fn new(params: UpdateParams, transport: Transport) -> Self {
        Self { params, transport }
    }
}

#[async_trait]
impl Operation for UpdateEntity {
    fn name(&self) -> &str {
        "update"
    }

    async fn run(&self, state: State) -> Result<State, AdaptorError> {
        let config = ODataConfiguration::from_state(&state)?;
        let entity_name = self.params.entity_name.resolve(&state)?;
        let entity_id = self.params.entity_id.resolve(&state)?;
        let body = self.params.body.resolve(&state)?;

        let req = EntityRequest::update(&config.endpoint(), &entity_name, &entity_id, body);
        let payload = self.transport.send_entity(self.name(), req).await?;
        Ok(state.with_response_body(payload))
    }
}

/// `DELETE {entity}({id})`.
pub struct DeleteEntity {
    params: DeleteParams,
    transport: Transport,
}

impl DeleteEntity {
    pub fn new(params: DeleteParams, transport: Transport) -> Self {
        Self { params, transport }
    }
}

#[async_trait]
impl Operation for DeleteEntity {
    fn name(&self) -> &str {
        "delete"
    }

    async fn run(&self, state: State) -> Result<State, AdaptorError> {
        let config = ODataConfiguration::from_state(&state)?;
        let entity_name = self.params.entity_name.resolve(&state)?;
        let entity_id = self.params.entity_id.resolve(&state)?;

        let req = EntityRequest::delete(&config.endpoint(), &entity_name, &entity_id);
        let payload = self.transport.send_entity(self.name(), req).await?;
        Ok(state.with_response_body(payload))
    }
}
