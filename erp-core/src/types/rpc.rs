use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// A single high-level call against an RPC-style ERP endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RpcCall {
    /// Authenticate only; yields the session user id.
    Login,
    /// Fetch records by id.
    Read {
        model: String,
        ids: Vec<i64>,
        #[serde(default)]
        fields: Vec<String>,
    },
    /// Search with a domain filter and read the matches.
    SearchRead {
        model: String,
        #[serde(default = "empty_domain")]
        domain: JsonValue,
        #[serde(default)]
        fields: Vec<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        limit: Option<u64>,
    },
    /// Any model method with positional and keyword arguments.
    Execute {
        model: String,
        method: String,
        #[serde(default = "empty_domain")]
        args: JsonValue,
        #[serde(default)]
        kwargs: serde_json::Map<String, JsonValue>,
    },
}

impl RpcCall {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Read { .. } => "read",
            Self::SearchRead { .. } => "search_read",
            Self::Execute { .. } => "execute",
        }
    }
}

fn empty_domain() -> JsonValue {
    JsonValue::Array(Vec::new())
}
