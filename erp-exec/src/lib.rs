#![forbid(unsafe_code)]

//! Runtime for the ERP adaptor: the operation engine, the OData entity operations and the
//! RPC connectors.
//!
//! Request shapes and the state model live in `erp-core`; everything that touches the
//! network is here.

mod adaptor;
pub mod config;
pub mod entity;
pub mod error;
pub mod executor;
pub mod rpc;

pub use crate::adaptor::Adaptor;
pub use crate::config::{ConfigError, ODataConfiguration, RpcConfiguration};
pub use crate::entity::{CreateEntity, DeleteEntity, QueryEntities, UpdateEntity};
pub use crate::error::{AdaptorError, RpcError};
pub use crate::executor::{
    alter_state, each, execute, BoxedOperation, ClientConfig, Event, EventSink, Executor,
    HttpClient, HttpError, Operation, ReqwestHttpClient, Transport,
};
pub use crate::rpc::{OdooJsonRpcConnector, RpcConnectParams, RpcConnection, RpcConnector, RpcOperation};
