use serde_json::Value as JsonValue;

use crate::error::AdaptorError;
use crate::executor::http::{HttpError, HttpResponseParts};

/// Statuses an entity or RPC exchange counts as success.
pub const ACCEPTED_STATUSES: [u16; 4] = [200, 201, 202, 204];

/// Decide whether a transport outcome succeeded.
///
/// A transport error wins over any response that came with it. Otherwise the response
/// must carry one of [`ACCEPTED_STATUSES`]; any other status becomes
/// [`AdaptorError::Status`].
pub fn classify(
    error: Option<HttpError>,
    response: Option<&HttpResponseParts>,
) -> Result<(), AdaptorError> {
    if let Some(e) = error {
        return Err(AdaptorError::Transport(e));
    }
    match response {
        Some(r) if ACCEPTED_STATUSES.contains(&r.status) => Ok(()),
        Some(r) => Err(AdaptorError::Status {
            status: r.status,
            body: parse_body(r),
        }),
        None => Err(AdaptorError::Transport(HttpError::Other(
            "no response received".to_string(),
        ))),
    }
}

/// [`classify`] for the `Result` an [`crate::executor::HttpClient`] returns.
pub fn classify_outcome(
    outcome: Result<HttpResponseParts, HttpError>,
) -> Result<HttpResponseParts, AdaptorError> {
    match outcome {
        Ok(resp) => {
            classify(None, Some(&resp))?;
            Ok(resp)
        }
        Err(e) => Err(AdaptorError::Transport(e)),
    }
}

/// Response body as JSON: `null` when empty, a string when it is not JSON.
pub fn parse_body(resp: &HttpResponseParts) -> JsonValue {
    if resp.body.iter().all(u8::is_ascii_whitespace) {
        return JsonValue::Null;
    }
    serde_json::from_slice(&resp.body)
        .unwrap_or_else(|_| JsonValue::String(String::from_utf8_lossy(&resp.body).into_owned()))
}
