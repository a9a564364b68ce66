use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value as JsonValue;

use crate::error::ExprError;
use crate::expressions::expand_value;
use crate::state::State;

type StateFn<T> = Arc<dyn Fn(&State) -> Result<T, ExprError> + Send + Sync>;

/// An operation parameter that is bound late, against the state the operation receives.
///
/// - `Literal` is used as-is.
/// - `Template` is a JSON value whose `$`-expressions are expanded against state and the
///   result decoded into `T`. Deserialized parameters always land here. Only `$` followed
///   by a letter starts an expression, and `$$` is a literal `$`, so a body such as
///   `{"price": "$5.00", "note": "$$data"}` is sent as `$5.00` and `$data`.
/// - `Reference` is an arbitrary function of state.
pub enum Expr<T> {
    Literal(T),
    Template(JsonValue),
    Reference(StateFn<T>),
}

impl<T> Expr<T> {
    pub fn literal(value: T) -> Self {
        Self::Literal(value)
    }

    pub fn template(value: JsonValue) -> Self {
        Self::Template(value)
    }

    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&State) -> T + Send + Sync + 'static,
    {
        Self::Reference(Arc::new(move |s| Ok(f(s))))
    }

    pub fn try_from_fn<F>(f: F) -> Self
    where
        F: Fn(&State) -> Result<T, ExprError> + Send + Sync + 'static,
    {
        Self::Reference(Arc::new(f))
    }

    /// The unexpanded JSON of a `Template`, for static validation.
    pub fn template_value(&self) -> Option<&JsonValue> {
        match self {
            Self::Template(v) => Some(v),
            _ => None,
        }
    }
}

impl<T: Clone + DeserializeOwned> Expr<T> {
    pub fn resolve(&self, state: &State) -> Result<T, ExprError> {
        match self {
            Self::Literal(v) => Ok(v.clone()),
            Self::Template(v) => {
                let expanded = expand_value(v, state)?;
                serde_json::from_value(expanded).map_err(ExprError::Decode)
            }
            Self::Reference(f) => f(state),
        }
    }
}

impl<T: Clone> Clone for Expr<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Literal(v) => Self::Literal(v.clone()),
            Self::Template(v) => Self::Template(v.clone()),
            Self::Reference(f) => Self::Reference(Arc::clone(f)),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Expr<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(v) => f.debug_tuple("Literal").field(v).finish(),
            Self::Template(v) => f.debug_tuple("Template").field(v).finish(),
            Self::Reference(_) => f.write_str("Reference(<fn>)"),
        }
    }
}

impl<'de, T> Deserialize<'de> for Expr<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        JsonValue::deserialize(deserializer).map(Self::Template)
    }
}

impl<T> From<JsonValue> for Expr<T> {
    fn from(value: JsonValue) -> Self {
        Self::Template(value)
    }
}

impl<T> From<&str> for Expr<T> {
    fn from(value: &str) -> Self {
        Self::Template(JsonValue::String(value.to_string()))
    }
}

impl<T> From<String> for Expr<T> {
    fn from(value: String) -> Self {
        Self::Template(JsonValue::String(value))
    }
}

/// Expression string addressing `pointer` inside `data`, e.g. `data_path("/value")`.
pub fn data_path(pointer: &str) -> String {
    format!("$data#{pointer}")
}

/// Late-bound value at `pointer` inside `state.data`.
pub fn data_value<T>(pointer: &str) -> Expr<T> {
    Expr::from(data_path(pointer))
}

/// Late-bound value at `pointer` inside the most recent reference.
pub fn last_reference_value<T>(pointer: &str) -> Expr<T> {
    Expr::from(format!("$lastReference#{pointer}"))
}

/// Late-bound value of any state expression, e.g. `source_value("$response.body#/value")`.
pub fn source_value<T>(expr: &str) -> Expr<T> {
    Expr::from(expr)
}

/// One key of an object assembled with [`fields`].
pub fn field(key: impl Into<String>, value: impl Into<Expr<JsonValue>>) -> (String, Expr<JsonValue>) {
    (key.into(), value.into())
}

/// Build a JSON object whose values are resolved one by one against state.
pub fn fields<I>(entries: I) -> Expr<JsonValue>
where
    I: IntoIterator<Item = (String, Expr<JsonValue>)>,
{
    let entries: Vec<(String, Expr<JsonValue>)> = entries.into_iter().collect();
    Expr::try_from_fn(move |state| {
        let mut out = serde_json::Map::new();
        for (k, v) in &entries {
            out.insert(k.clone(), v.resolve(state)?);
        }
        Ok(JsonValue::Object(out))
    })
}
