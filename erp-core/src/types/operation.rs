use serde::Deserialize;
use serde_json::Value as JsonValue;

use crate::expr::Expr;
use crate::odata::{EntityId, Query};
use crate::types::RpcCall;

/// One step of a [`crate::types::JobDocument`], keyed by operation name.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OperationSpec {
    Create(CreateParams),
    Query(QueryParams),
    Update(UpdateParams),
    Delete(DeleteParams),
    Rpc(Expr<RpcCall>),
    Each(EachParams),
}

impl OperationSpec {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Create(_) => "create",
            Self::Query(_) => "query",
            Self::Update(_) => "update",
            Self::Delete(_) => "delete",
            Self::Rpc(_) => "rpc",
            Self::Each(_) => "each",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateParams {
    pub entity_name: Expr<String>,
    #[serde(default = "empty_object")]
    pub body: Expr<JsonValue>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryParams {
    pub entity_name: Expr<String>,
    #[serde(default)]
    pub entity_id: Option<Expr<EntityId>>,
    #[serde(default)]
    pub query: Option<Expr<Query>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateParams {
    pub entity_name: Expr<String>,
    pub entity_id: Expr<EntityId>,
    #[serde(default = "empty_object")]
    pub body: Expr<JsonValue>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteParams {
    pub entity_name: Expr<String>,
    pub entity_id: Expr<EntityId>,
}

/// Run `operation` once per element of the array `data_source` points at.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EachParams {
    pub data_source: String,
    pub operation: Box<OperationSpec>,
}

fn empty_object<T>() -> Expr<T> {
    Expr::Template(JsonValue::Object(serde_json::Map::new()))
}

impl CreateParams {
    pub fn new(entity_name: impl Into<Expr<String>>, body: impl Into<Expr<JsonValue>>) -> Self {
        Self {
            entity_name: entity_name.into(),
            body: body.into(),
        }
    }
}

impl QueryParams {
    pub fn new(entity_name: impl Into<Expr<String>>) -> Self {
        Self {
            entity_name: entity_name.into(),
            entity_id: None,
            query: None,
        }
    }

    pub fn entity_id(mut self, entity_id: impl Into<Expr<EntityId>>) -> Self {
        self.entity_id = Some(entity_id.into());
        self
    }

    pub fn query(mut self, query: impl Into<Expr<Query>>) -> Self {
        self.query = Some(query.into());
        self
    }
}

impl UpdateParams {
    pub fn new(
        entity_name: impl Into<Expr<String>>,
        entity_id: impl Into<Expr<EntityId>>,
        body: impl Into<Expr<JsonValue>>,
    ) -> Self {
        Self {
            entity_name: entity_name.into(),
            entity_id: entity_id.into(),
            body: body.into(),
        }
    }
}

impl DeleteParams {
    pub fn new(entity_name: impl Into<Expr<String>>, entity_id: impl Into<Expr<EntityId>>) -> Self {
        Self {
            entity_name: entity_name.into(),
            entity_id: entity_id.into(),
        }
    }
}
