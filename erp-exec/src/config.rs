//! Typed views over `state.configuration`.

use std::fmt;

use erp_core::odata::ServiceEndpoint;
use erp_core::State;
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value as JsonValue;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("state.configuration must be an object")]
    NotAnObject,
    #[error("missing configuration key: {0}")]
    Missing(&'static str),
    #[error("configuration key {key} must be {expected}")]
    Invalid {
        key: &'static str,
        expected: &'static str,
    },
}

/// Connection parameters for the OData entity operations.
#[derive(Clone)]
pub struct ODataConfiguration {
    pub resource: String,
    pub api_version: String,
    pub access_token: SecretString,
}

impl ODataConfiguration {
    pub fn from_state(state: &State) -> Result<Self, ConfigError> {
        let map = as_object(&state.configuration)?;
        Ok(Self {
            resource: required_string(map, "resource")?,
            api_version: required_scalar(map, "apiVersion")?,
            access_token: SecretString::from(required_string(map, "accessToken")?),
        })
    }

    pub fn endpoint(&self) -> ServiceEndpoint {
        ServiceEndpoint {
            resource: self.resource.clone(),
            api_version: self.api_version.clone(),
            access_token: self.access_token.expose_secret().to_string(),
        }
    }
}

impl fmt::Debug for ODataConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ODataConfiguration")
            .field("resource", &self.resource)
            .field("api_version", &self.api_version)
            .field("access_token", &"<redacted>")
            .finish()
    }
}

/// Connection parameters for RPC-style ERP endpoints.
#[derive(Clone)]
pub struct RpcConfiguration {
    pub host_url: String,
    pub port: Option<u16>,
    pub database: String,
    pub username: String,
    pub password: SecretString,
}

impl RpcConfiguration {
    pub fn from_state(state: &State) -> Result<Self, ConfigError> {
        let map = as_object(&state.configuration)?;
        let port = match map.get("port") {
            None | Some(JsonValue::Null) => None,
            Some(v) => Some(parse_port(v)?),
        };
        Ok(Self {
            host_url: required_string(map, "hostUrl")?,
            port,
            database: required_string(map, "database")?,
            username: required_string(map, "username")?,
            password: SecretString::from(required_string(map, "password")?),
        })
    }
}

impl fmt::Debug for RpcConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RpcConfiguration")
            .field("host_url", &self.host_url)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

fn as_object(v: &JsonValue) -> Result<&serde_json::Map<String, JsonValue>, ConfigError> {
    v.as_object().ok_or(ConfigError::NotAnObject)
}

fn required_string(
    map: &serde_json::Map<String, JsonValue>,
    key: &'static str,
) -> Result<String, ConfigError> {
    match map.get(key) {
        None | Some(JsonValue::Null) => Err(ConfigError::Missing(key)),
        Some(JsonValue::String(s)) => Ok(s.clone()),
        Some(_) => Err(ConfigError::Invalid {
            key,
            expected: "a string",
        }),
    }
}

/// Strings or numbers; `apiVersion: 9.2` and `apiVersion: "9.2"` are the same.
fn required_scalar(
    map: &serde_json::Map<String, JsonValue>,
    key: &'static str,
) -> Result<String, ConfigError> {
    match map.get(key) {
        None | Some(JsonValue::Null) => Err(ConfigError::Missing(key)),
        Some(JsonValue::String(s)) => Ok(s.clone()),
        Some(JsonValue::Number(n)) => Ok(n.to_string()),
        Some(_) => Err(ConfigError::Invalid {
            key,
            expected: "a string or number",
        }),
    }
}

fn parse_port(v: &JsonValue) -> Result<u16, ConfigError> {
    let invalid = ConfigError::Invalid {
        key: "port",
        expected: "an integer between 0 and 65535",
    };
    match v {
        JsonValue::Number(n) => n
            .as_u64()
            .and_then(|p| u16::try_from(p).ok())
            .ok_or(invalid),
        JsonValue::String(s) => s.trim().parse().map_err(|_| invalid),
        _ => Err(invalid),
    }
}
