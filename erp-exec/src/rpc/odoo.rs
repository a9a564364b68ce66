use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use erp_core::types::RpcCall;
use secrecy::{ExposeSecret, SecretString};
use serde_json::{json, Value as JsonValue};

use crate::error::{AdaptorError, RpcError};
use crate::executor::response::parse_body;
use crate::executor::{HttpRequestParts, Transport};
use crate::rpc::{RpcConnectParams, RpcConnection, RpcConnector};

/// Odoo's external API over JSON-RPC (`POST /jsonrpc`).
///
/// `connect` logs in through the `common` service; calls go through `object.execute_kw`
/// with the returned user id.
pub struct OdooJsonRpcConnector {
    transport: Transport,
}

impl OdooJsonRpcConnector {
    pub fn new(transport: Transport) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl RpcConnector for OdooJsonRpcConnector {
    fn name(&self) -> &str {
        "odoo-jsonrpc"
    }

    async fn connect(
        &self,
        params: &RpcConnectParams,
    ) -> Result<Box<dyn RpcConnection>, AdaptorError> {
        let endpoint = jsonrpc_url(&params.host_url, params.port)?;
        let client = JsonRpcClient {
            transport: self.transport.clone(),
            endpoint,
            next_id: AtomicU64::new(1),
        };

        let uid = client
            .call(
                "common",
                "login",
                json!([
                    params.database,
                    params.username,
                    params.password.expose_secret()
                ]),
            )
            .await?;

        // Odoo answers a rejected login with `false` rather than a fault.
        let uid = uid.as_i64().ok_or_else(|| RpcError::Authentication {
            username: params.username.clone(),
            database: params.database.clone(),
        })?;

        tracing::debug!(database = %params.database, uid, "odoo login succeeded");
        Ok(Box::new(OdooConnection {
            client,
            database: params.database.clone(),
            uid,
            password: params.password.clone(),
        }))
    }
}

pub struct OdooConnection {
    client: JsonRpcClient,
    database: String,
    uid: i64,
    password: SecretString,
}

impl OdooConnection {
    pub fn uid(&self) -> i64 {
        self.uid
    }

    async fn execute_kw(
        &self,
        model: &str,
        method: &str,
        args: JsonValue,
        kwargs: serde_json::Map<String, JsonValue>,
    ) -> Result<JsonValue, AdaptorError> {
        self.client
            .call(
                "object",
                "execute_kw",
                json!([
                    self.database,
                    self.uid,
                    self.password.expose_secret(),
                    model,
                    method,
                    args,
                    kwargs
                ]),
            )
            .await
    }
}

#[async_trait]
impl RpcConnection for OdooConnection {
    async fn call(&self, call: &RpcCall) -> Result<JsonValue, AdaptorError> {
        match call {
            RpcCall::Login => Ok(JsonValue::from(self.uid)),
            RpcCall::Read { model, ids, fields } => {
                let mut kwargs = serde_json::Map::new();
                if !fields.is_empty() {
                    kwargs.insert("fields".to_string(), json!(fields));
                }
                self.execute_kw(model, "read", json!([ids]), kwargs).await
            }
            RpcCall::SearchRead {
                model,
                domain,
                fields,
                limit,
            } => {
                let mut kwargs = serde_json::Map::new();
                if !fields.is_empty() {
                    kwargs.insert("fields".to_string(), json!(fields));
                }
                if let Some(limit) = limit {
                    kwargs.insert("limit".to_string(), json!(limit));
                }
                self.execute_kw(model, "search_read", json!([domain]), kwargs)
                    .await
            }
            RpcCall::Execute {
                model,
                method,
                args,
                kwargs,
            } => {
                let args = match args {
                    JsonValue::Array(_) => args.clone(),
                    other => json!([other]),
                };
                self.execute_kw(model, method, args, kwargs.clone()).await
            }
        }
    }
}

struct JsonRpcClient {
    transport: Transport,
    endpoint: url::Url,
    next_id: AtomicU64,
}

impl JsonRpcClient {
    async fn call(
        &self,
        service: &str,
        method: &str,
        args: JsonValue,
    ) -> Result<JsonValue, AdaptorError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let envelope = json!({
            "jsonrpc": "2.0",
            "method": "call",
            "params": { "service": service, "method": method, "args": args },
            "id": id,
        });

        let mut headers = BTreeMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        let req = HttpRequestParts {
            method: "POST".to_string(),
            url: self.endpoint.clone(),
            headers,
            body: serde_json::to_vec(&envelope).map_err(|e| RpcError::InvalidResponse(e.to_string()))?,
        };

        let resp = self
            .transport
            .send(&format!("rpc.{service}.{method}"), req)
            .await?;
        unwrap_result(parse_body(&resp))
    }
}

fn unwrap_result(body: JsonValue) -> Result<JsonValue, AdaptorError> {
    let JsonValue::Object(mut map) = body else {
        return Err(RpcError::InvalidResponse("expected a JSON-RPC object".to_string()).into());
    };

    if let Some(error) = map.remove("error") {
        let code = error.get("code").and_then(JsonValue::as_i64).unwrap_or(0);
        // Odoo puts the useful text in `data.message`; `message` is usually "Odoo Server Error".
        let message = error
            .pointer("/data/message")
            .or_else(|| error.get("message"))
            .and_then(JsonValue::as_str)
            .unwrap_or("unknown error")
            .to_string();
        return Err(RpcError::Fault { code, message }.into());
    }

    map.remove("result")
        .ok_or_else(|| RpcError::InvalidResponse("missing result".to_string()).into())
}

fn jsonrpc_url(host_url: &str, port: Option<u16>) -> Result<url::Url, AdaptorError> {
    let invalid = |message: String| AdaptorError::InvalidUrl {
        url: host_url.to_string(),
        message,
    };
    let mut url = url::Url::parse(host_url).map_err(|e| invalid(e.to_string()))?;
    if let Some(port) = port {
        if url.port().is_none() {
            url.set_port(Some(port))
                .map_err(|()| invalid("cannot carry a port".to_string()))?;
        }
    }
    let path = format!("{}/jsonrpc", url.path().trim_end_matches('/'));
    url.set_path(&path);
    Ok(url)
}
