//! Parsing of string values that may reference state.
//!
//! A string is read in one of three ways:
//!
//! - If it starts with `$` followed by a letter (after leading whitespace), the whole
//!   string is one state expression and expands to the referenced JSON value.
//! - Otherwise every `{ $name... }` inside it is an embedded expression whose value is
//!   interpolated as text.
//! - Everything else is plain text.
//!
//! `$$` always stands for a single literal `$`, so `"$$data"` is the text `$data` and
//! `"{ $$x }"` is the text `{ $x }`. A `$` not followed by a letter needs no escape:
//! `"$5.00"` and `"{ $5 }"` are plain text.

use serde_json::Value as JsonValue;

use super::state_expr::{parse_state_expr, StateExpr, StateExprError};

/// A parsed string value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateTemplate {
    /// No expressions. Escapes are already resolved.
    Text(String),
    /// The whole string is one expression; its value keeps its JSON type.
    Whole(StateExpr),
    /// Text interleaved with embedded expressions; always expands to a string.
    Parts(Vec<Part>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Part {
    Text(String),
    Expr(StateExpr),
}

/// True when `s` begins with a state expression rather than a literal `$`.
pub fn starts_with_expression(s: &str) -> bool {
    let mut chars = s.chars();
    chars.next() == Some('$') && chars.next().is_some_and(|c| c.is_ascii_alphabetic())
}

pub fn parse_template(input: &str) -> Result<StateTemplate, TemplateError> {
    if starts_with_expression(input.trim_start()) {
        return Ok(StateTemplate::Whole(parse_state_expr(input)?));
    }

    let mut parts = Vec::new();
    let mut text = String::new();
    let mut rest = input;

    while let Some(idx) = rest.find(['$', '{']) {
        text.push_str(&rest[..idx]);
        let tail = &rest[idx..];

        if let Some(after) = tail.strip_prefix("$$") {
            text.push('$');
            rest = after;
            continue;
        }

        let Some(after) = tail.strip_prefix('{') else {
            // A lone `$` that does not start an expression.
            text.push('$');
            rest = &tail[1..];
            continue;
        };

        let body = after.trim_start();
        if !starts_with_expression(body) {
            text.push('{');
            rest = after;
            continue;
        }

        // Embedded expressions do not nest; the first `}` closes.
        let Some(end) = body.find('}') else {
            return Err(TemplateError::UnclosedExpression {
                offset: input.len() - tail.len(),
            });
        };
        if !text.is_empty() {
            parts.push(Part::Text(std::mem::take(&mut text)));
        }
        parts.push(Part::Expr(parse_state_expr(&body[..end])?));
        rest = &body[end + 1..];
    }
    text.push_str(rest);

    if parts.is_empty() {
        return Ok(StateTemplate::Text(text));
    }
    if !text.is_empty() {
        parts.push(Part::Text(text));
    }
    Ok(StateTemplate::Parts(parts))
}

/// Check every string inside `value` the way expansion will read it.
pub fn validate_value_expressions(value: &JsonValue) -> Result<(), TemplateError> {
    match value {
        JsonValue::String(s) => parse_template(s).map(drop),
        JsonValue::Array(items) => items.iter().try_for_each(validate_value_expressions),
        JsonValue::Object(map) => map.values().try_for_each(validate_value_expressions),
        JsonValue::Null | JsonValue::Bool(_) | JsonValue::Number(_) => Ok(()),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
    #[error("invalid state expression: {0}")]
    InvalidStateExpr(#[from] StateExprError),
    #[error("embedded expression at byte {offset} is missing its closing '}}'")]
    UnclosedExpression { offset: usize },
}
