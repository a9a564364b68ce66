use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::error::StateError;
use crate::expressions::StateRoot;

/// The value threaded through a pipeline.
///
/// Operations never patch a state in place: each one receives a state by value and returns
/// the next one. Top-level fields the adaptor does not know about are kept in `extra`
/// and carried through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct State {
    /// Connection parameters (`resource`, `accessToken`, `apiVersion`, `hostUrl`, ...).
    #[serde(default)]
    pub configuration: JsonValue,

    /// Append-only trail of earlier intermediate values.
    #[serde(default)]
    pub references: Vec<JsonValue>,

    /// Last significant payload; `null` when absent.
    #[serde(default)]
    pub data: JsonValue,

    /// Body of the last transport response. Overwritten, never accumulated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<ResponseBody>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, JsonValue>,
}

/// The `response` member of state. Only `body` is written by operations; other keys a
/// caller puts under `response` are kept.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseBody {
    #[serde(default)]
    pub body: JsonValue,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, JsonValue>,
}

impl State {
    /// Build the initial state for a run.
    ///
    /// The default shape `{ "references": [], "data": null }` sits underneath `caller`;
    /// any field the caller supplies wins. `null` is treated as an empty object.
    pub fn initial(caller: JsonValue) -> Result<Self, StateError> {
        let mut merged = serde_json::Map::new();
        merged.insert("references".to_string(), JsonValue::Array(Vec::new()));
        merged.insert("data".to_string(), JsonValue::Null);

        match caller {
            JsonValue::Null => {}
            JsonValue::Object(map) => merged.extend(map),
            JsonValue::Bool(_) => return Err(StateError::NotAnObject("boolean")),
            JsonValue::Number(_) => return Err(StateError::NotAnObject("number")),
            JsonValue::String(_) => return Err(StateError::NotAnObject("string")),
            JsonValue::Array(_) => return Err(StateError::NotAnObject("array")),
        }

        Ok(serde_json::from_value(JsonValue::Object(merged))?)
    }

    pub fn with_configuration(mut self, configuration: JsonValue) -> Self {
        self.configuration = configuration;
        self
    }

    /// The same state with `response.body` replaced; every other field is untouched.
    pub fn with_response_body(mut self, body: JsonValue) -> Self {
        self.response.get_or_insert_with(ResponseBody::default).body = body;
        self
    }

    pub fn with_data(self, data: JsonValue) -> Self {
        Self { data, ..self }
    }

    /// Append the current `data` to `references` and replace it with `data`.
    pub fn push_data(mut self, data: JsonValue) -> Self {
        let previous = std::mem::replace(&mut self.data, data);
        self.references.push(previous);
        self
    }

    pub fn response_body(&self) -> Option<&JsonValue> {
        self.response.as_ref().map(|r| &r.body)
    }

    pub fn last_reference(&self) -> Option<&JsonValue> {
        self.references.last()
    }

    /// Value an expression rooted at `root` starts from. Absent parts read as `null`.
    pub fn root_value(&self, root: StateRoot) -> Cow<'_, JsonValue> {
        match root {
            StateRoot::Configuration => Cow::Borrowed(&self.configuration),
            StateRoot::Data => Cow::Borrowed(&self.data),
            StateRoot::References => Cow::Owned(JsonValue::Array(self.references.clone())),
            StateRoot::LastReference => match self.last_reference() {
                Some(v) => Cow::Borrowed(v),
                None => Cow::Owned(JsonValue::Null),
            },
            StateRoot::ResponseBody => match self.response_body() {
                Some(v) => Cow::Borrowed(v),
                None => Cow::Owned(JsonValue::Null),
            },
        }
    }

    pub fn to_json(&self) -> JsonValue {
        serde_json::to_value(self).unwrap_or(JsonValue::Null)
    }
}
