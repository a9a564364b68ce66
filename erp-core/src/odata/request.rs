use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;

use super::query::Query;

pub const ODATA_VERSION: &str = "4.0";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Post,
    Get,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Post => "POST",
            Self::Get => "GET",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Record identifier placed verbatim between parentheses.
///
/// Accepts JSON strings and numbers, so `42` and `"42"` address the same record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for EntityId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl<'de> Deserialize<'de> for EntityId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Str(String),
            Num(serde_json::Number),
        }
        match Raw::deserialize(deserializer)? {
            Raw::Str(s) => Ok(Self(s)),
            Raw::Num(n) => Ok(Self(n.to_string())),
        }
    }
}

/// A remote collection, optionally narrowed to one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityRef {
    pub entity_name: String,
    pub entity_id: Option<EntityId>,
}

impl EntityRef {
    pub fn collection(entity_name: impl Into<String>) -> Self {
        Self {
            entity_name: entity_name.into(),
            entity_id: None,
        }
    }

    pub fn record(entity_name: impl Into<String>, entity_id: impl Into<EntityId>) -> Self {
        Self {
            entity_name: entity_name.into(),
            entity_id: Some(entity_id.into()),
        }
    }
}

/// Where entity requests go and how they authenticate.
#[derive(Clone, PartialEq, Eq)]
pub struct ServiceEndpoint {
    pub resource: String,
    pub api_version: String,
    pub access_token: String,
}

impl fmt::Debug for ServiceEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceEndpoint")
            .field("resource", &self.resource)
            .field("api_version", &self.api_version)
            .field("access_token", &"<redacted>")
            .finish()
    }
}

/// `{resource}/api/data/v{api_version}/{entity}` or `.../{entity}({id})`.
pub fn entity_url(resource: &str, api_version: &str, entity: &EntityRef) -> String {
    let base = format!(
        "{}/api/data/v{}/{}",
        resource.trim_end_matches('/'),
        api_version,
        entity.entity_name
    );
    match &entity.entity_id {
        Some(id) => format!("{base}({id})"),
        None => base,
    }
}

/// [`entity_url`] plus the query string of `query`, if it has any clause.
pub fn query_url(
    resource: &str,
    api_version: &str,
    entity: &EntityRef,
    query: Option<&Query>,
) -> String {
    let url = entity_url(resource, api_version, entity);
    match query.and_then(Query::query_string) {
        Some(qs) => format!("{url}?{qs}"),
        None => url,
    }
}

pub fn odata_headers(access_token: &str) -> BTreeMap<String, String> {
    let mut headers = BTreeMap::new();
    headers.insert("OData-MaxVersion".to_string(), ODATA_VERSION.to_string());
    headers.insert("OData-Version".to_string(), ODATA_VERSION.to_string());
    headers.insert("Content-Type".to_string(), "application/json".to_string());
    headers.insert("Authorization".to_string(), access_token.to_string());
    headers
}

pub fn query_headers(access_token: &str, query: Option<&Query>) -> BTreeMap<String, String> {
    let mut headers = odata_headers(access_token);
    let page_size = query.map(Query::page_size).unwrap_or(0);
    headers.insert(
        "Prefer".to_string(),
        format!("odata.maxpagesize={page_size}"),
    );
    headers
}

/// A fully built entity request, ready for a transport.
#[derive(Clone, PartialEq)]
pub struct EntityRequest {
    pub method: Method,
    pub url: String,
    pub headers: BTreeMap<String, String>,
    pub body: Option<JsonValue>,
}

impl EntityRequest {
    pub fn create(endpoint: &ServiceEndpoint, entity_name: &str, body: JsonValue) -> Self {
        let entity = EntityRef::collection(entity_name);
        Self {
            method: Method::Post,
            url: entity_url(&endpoint.resource, &endpoint.api_version, &entity),
            headers: odata_headers(&endpoint.access_token),
            body: Some(body),
        }
    }

    pub fn query(endpoint: &ServiceEndpoint, entity: &EntityRef, query: Option<&Query>) -> Self {
        Self {
            method: Method::Get,
            url: query_url(&endpoint.resource, &endpoint.api_version, entity, query),
            headers: query_headers(&endpoint.access_token, query),
            body: None,
        }
    }

    pub fn update(
        endpoint: &ServiceEndpoint,
        entity_name: &str,
        entity_id: &EntityId,
        body: JsonValue,
    ) -> Self {
        let entity = EntityRef::record(entity_name, entity_id.clone());
        Self {
            method: Method::Patch,
            url: entity_url(&endpoint.resource, &endpoint.api_version, &entity),
            headers: odata_headers(&endpoint.access_token),
            body: Some(body),
        }
    }

    pub fn delete(endpoint: &ServiceEndpoint, entity_name: &str, entity_id: &EntityId) -> Self {
        let entity = EntityRef::record(entity_name, entity_id.clone());
        Self {
            method: Method::Delete,
            url: entity_url(&endpoint.resource, &endpoint.api_version, &entity),
            headers: odata_headers(&endpoint.access_token),
            body: None,
        }
    }
}

impl fmt::Debug for EntityRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let headers: BTreeMap<&str, &str> = self
            .headers
            .iter()
            .map(|(k, v)| {
                if k.eq_ignore_ascii_case("authorization") {
                    (k.as_str(), "<redacted>")
                } else {
                    (k.as_str(), v.as_str())
                }
            })
            .collect();
        f.debug_struct("EntityRequest")
            .field("method", &self.method)
            .field("url", &self.url)
            .field("headers", &headers)
            .field("body", &self.body)
            .finish()
    }
}
