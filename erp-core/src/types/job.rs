use serde::Deserialize;
use serde_json::Value as JsonValue;

use crate::types::OperationSpec;

/// A declarative pipeline: an optional initial state and the operations to fold over it.
#[derive(Debug, Clone, Deserialize)]
pub struct JobDocument {
    #[serde(default)]
    pub state: Option<JsonValue>,

    #[serde(default)]
    pub operations: Vec<OperationSpec>,
}
