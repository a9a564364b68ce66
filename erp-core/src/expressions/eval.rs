use serde_json::Value as JsonValue;

use super::state_expr::StateExpr;
use super::template::{parse_template, Part, StateTemplate};
use crate::error::ExprError;
use crate::state::State;

/// Replace every state expression inside `value` with what it points at in `state`.
///
/// A string that is entirely an expression (`"$data#/id"`) is replaced by the referenced
/// value with its JSON type intact. Strings with embedded `{ $... }` segments are
/// interpolated and stay strings. `$$` is a literal `$`; see [`super::parse_template`].
pub fn expand_value(value: &JsonValue, state: &State) -> Result<JsonValue, ExprError> {
    match value {
        JsonValue::Null | JsonValue::Bool(_) | JsonValue::Number(_) => Ok(value.clone()),
        JsonValue::String(s) => expand_string(s, state),
        JsonValue::Array(arr) => arr
            .iter()
            .map(|v| expand_value(v, state))
            .collect::<Result<Vec<_>, _>>()
            .map(JsonValue::Array),
        JsonValue::Object(map) => {
            let mut out = serde_json::Map::new();
            for (k, v) in map {
                out.insert(k.clone(), expand_value(v, state)?);
            }
            Ok(JsonValue::Object(out))
        }
    }
}

fn expand_string(s: &str, state: &State) -> Result<JsonValue, ExprError> {
    let parts = match parse_template(s)? {
        StateTemplate::Text(text) => return Ok(JsonValue::String(text)),
        StateTemplate::Whole(expr) => return evaluate(&expr, state),
        StateTemplate::Parts(parts) => parts,
    };

    let mut out = String::new();
    for part in &parts {
        match part {
            Part::Text(text) => out.push_str(text),
            Part::Expr(expr) => match evaluate(expr, state)? {
                JsonValue::String(s) => out.push_str(&s),
                JsonValue::Null => {}
                other => out.push_str(&other.to_string()),
            },
        }
    }
    Ok(JsonValue::String(out))
}

/// Look up `expr` in `state`.
///
/// The root itself always resolves (an absent `data` is `null`); a name or pointer that
/// does not exist below it is [`ExprError::Missing`].
pub fn evaluate(expr: &StateExpr, state: &State) -> Result<JsonValue, ExprError> {
    let root = state.root_value(expr.root);
    let mut cur: &JsonValue = &root;
    for name in &expr.names {
        cur = cur
            .get(name.as_str())
            .ok_or_else(|| ExprError::missing(describe(expr)))?;
    }
    if let Some(ptr) = &expr.pointer {
        cur = ptr
            .lookup(cur)
            .ok_or_else(|| ExprError::missing(describe(expr)))?;
    }
    Ok(cur.clone())
}

fn describe(expr: &StateExpr) -> String {
    let mut s = format!("${}", expr.root.as_str());
    for name in &expr.names {
        s.push('.');
        s.push_str(name);
    }
    if let Some(ptr) = &expr.pointer {
        s.push('#');
        s.push_str(&ptr.to_string());
    }
    s
}
