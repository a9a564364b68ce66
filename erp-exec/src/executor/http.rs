use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

#[derive(Debug, Clone)]
pub struct HttpRequestParts {
    pub method: String,
    pub url: url::Url,
    pub headers: BTreeMap<String, String>,
    pub body: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct HttpResponseParts {
    pub status: u16,
    pub headers: BTreeMap<String, String>,
    pub body: Vec<u8>,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum HttpError {
    #[error("timeout")]
    Timeout,
    #[error("connect/dns/tls error: {0}")]
    Network(String),
    #[error("response too large (>{max_bytes} bytes)")]
    ResponseTooLarge { max_bytes: usize },
    #[error("http error: {0}")]
    Other(String),
}

#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn send(
        &self,
        req: HttpRequestParts,
        timeout: Duration,
        max_response_bytes: usize,
    ) -> Result<HttpResponseParts, HttpError>;
}

/// [`HttpClient`] over a shared `reqwest` connection pool.
///
/// The response body is read chunk by chunk and abandoned as soon as it passes the
/// caller's byte limit.
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

impl ReqwestHttpClient {
    pub fn try_new() -> Result<Self, HttpError> {
        reqwest::Client::builder()
            .user_agent(concat!("erp-adaptor/", env!("CARGO_PKG_VERSION")))
            .build()
            .map(Self::with_client)
            .map_err(|e| HttpError::Other(format!("building http client: {e}")))
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn send(
        &self,
        req: HttpRequestParts,
        timeout: Duration,
        max_response_bytes: usize,
    ) -> Result<HttpResponseParts, HttpError> {
        let method = reqwest::Method::from_bytes(req.method.as_bytes())
            .map_err(|_| HttpError::Other(format!("invalid http method {:?}", req.method)))?;
        let mut rb = self
            .client
            .request(method, req.url)
            .headers(header_map(&req.headers)?)
            .timeout(timeout);
        if !req.body.is_empty() {
            rb = rb.body(req.body);
        }

        let mut resp = rb.send().await.map_err(map_reqwest_error)?;
        let too_large = || HttpError::ResponseTooLarge {
            max_bytes: max_response_bytes,
        };
        if resp
            .content_length()
            .is_some_and(|len| len > max_response_bytes as u64)
        {
            return Err(too_large());
        }

        let status = resp.status().as_u16();
        let headers = resp
            .headers()
            .iter()
            .filter_map(|(k, v)| Some((k.to_string(), v.to_str().ok()?.to_string())))
            .collect();

        let mut body = Vec::new();
        while let Some(chunk) = resp.chunk().await.map_err(map_reqwest_error)? {
            if body.len() + chunk.len() > max_response_bytes {
                return Err(too_large());
            }
            body.extend_from_slice(&chunk);
        }

        Ok(HttpResponseParts {
            status,
            headers,
            body,
        })
    }
}

fn header_map(headers: &BTreeMap<String, String>) -> Result<HeaderMap, HttpError> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| HttpError::Other(format!("invalid header name {name:?}")))?;
        // Values can carry credentials; keep them out of the error.
        let value = HeaderValue::from_str(value)
            .map_err(|_| HttpError::Other(format!("invalid value for header {name}")))?;
        map.insert(name, value);
    }
    Ok(map)
}

fn map_reqwest_error(e: reqwest::Error) -> HttpError {
    if e.is_timeout() {
        HttpError::Timeout
    } else if e.is_connect() || e.is_request() {
        HttpError::Network(e.to_string())
    } else if e.is_body() || e.is_decode() {
        HttpError::Other(format!("reading response body: {e}"))
    } else {
        HttpError::Other(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_map_keeps_every_entry() {
        let headers = BTreeMap::from([
            ("Authorization".to_string(), "Bearer t".to_string()),
            ("OData-Version".to_string(), "4.0".to_string()),
        ]);
        let map = header_map(&headers).unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map["odata-version"], "4.0");
    }

    #[test]
    fn invalid_header_value_does_not_echo_the_value() {
        let headers = BTreeMap::from([("Authorization".to_string(), "Bearer\nsecret".to_string())]);
        let err = header_map(&headers).unwrap_err();
        assert!(err.to_string().contains("authorization"));
        assert!(!err.to_string().contains("secret"));
    }
}
