//! RPC-style ERP access behind one capability interface.
//!
//! A connector turns connection parameters into a live connection; a connection issues
//! [`RpcCall`]s. Each remote system is one connector implementation.

mod odoo;
mod operation;

use async_trait::async_trait;
use erp_core::types::RpcCall;
use secrecy::SecretString;
use serde_json::Value as JsonValue;

use crate::config::RpcConfiguration;
use crate::error::AdaptorError;

pub use odoo::{OdooConnection, OdooJsonRpcConnector};
pub use operation::RpcOperation;

#[derive(Clone)]
pub struct RpcConnectParams {
    pub host_url: String,
    pub port: Option<u16>,
    pub database: String,
    pub username: String,
    pub password: SecretString,
}

impl std::fmt::Debug for RpcConnectParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RpcConnectParams")
            .field("host_url", &self.host_url)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl From<RpcConfiguration> for RpcConnectParams {
    fn from(c: RpcConfiguration) -> Self {
        Self {
            host_url: c.host_url,
            port: c.port,
            database: c.database,
            username: c.username,
            password: c.password,
        }
    }
}

#[async_trait]
pub trait RpcConnector: Send + Sync {
    fn name(&self) -> &str;

    async fn connect(&self, params: &RpcConnectParams) -> Result<Box<dyn RpcConnection>, AdaptorError>;
}

#[async_trait]
pub trait RpcConnection: Send + Sync {
    async fn call(&self, call: &RpcCall) -> Result<JsonValue, AdaptorError>;
}
