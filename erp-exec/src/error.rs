use erp_core::{ExprError, StateError};
use serde_json::Value as JsonValue;

use crate::config::ConfigError;
use crate::executor::http::HttpError;

/// Every way an operation, and therefore a pipeline, can fail.
#[derive(Debug, thiserror::Error)]
pub enum AdaptorError {
    /// The remote host could not be reached or the exchange broke off.
    #[error("transport error: {0}")]
    Transport(#[from] HttpError),
    /// A response arrived with a status outside the accepted set.
    #[error("server responded with {status}")]
    Status { status: u16, body: JsonValue },
    /// Raised by a caller-supplied operation.
    #[error("operation failed: {0}")]
    Upstream(String),
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigError),
    #[error("could not resolve parameters: {0}")]
    Expression(#[from] ExprError),
    #[error("invalid initial state: {0}")]
    State(#[from] StateError),
    #[error("invalid request url {url}: {message}")]
    InvalidUrl { url: String, message: String },
    #[error("rpc error: {0}")]
    Rpc(#[from] RpcError),
}

impl AdaptorError {
    pub fn upstream(message: impl Into<String>) -> Self {
        Self::Upstream(message.into())
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Transport(_) => "transport",
            Self::Status { .. } => "status",
            Self::Upstream(_) => "upstream",
            Self::Configuration(_) => "configuration",
            Self::Expression(_) => "expression",
            Self::State(_) => "state",
            Self::InvalidUrl { .. } => "invalid_url",
            Self::Rpc(_) => "rpc",
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RpcError {
    #[error("authentication rejected for user {username} on database {database}")]
    Authentication { username: String, database: String },
    #[error("remote fault {code}: {message}")]
    Fault { code: i64, message: String },
    #[error("malformed rpc response: {0}")]
    InvalidResponse(String),
}
