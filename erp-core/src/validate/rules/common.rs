use serde_json::Value as JsonValue;

use crate::expr::Expr;
use crate::expressions::{parse_state_expr, validate_value_expressions};
use crate::validate::validator::Validator;

pub(crate) fn check_state_expr(v: &mut Validator, expr: &str) {
    if let Err(e) = parse_state_expr(expr) {
        v.report(format!("invalid state expression: {e}"));
    }
}

fn check_value(v: &mut Validator, value: &JsonValue) {
    if let Err(e) = validate_value_expressions(value) {
        v.report(format!("invalid expression inside value: {e}"));
    }
}

/// Templates only; literals and functions of state cannot be checked statically.
pub(crate) fn check_expr<T>(v: &mut Validator, expr: &Expr<T>) {
    if let Some(value) = expr.template_value() {
        check_value(v, value);
    }
}

/// A name such as `entityName` must be a non-empty string or a state expression.
pub(crate) fn check_name(v: &mut Validator, expr: &Expr<String>) {
    match expr.template_value() {
        Some(JsonValue::String(s)) if s.trim().is_empty() => v.report("must not be empty"),
        Some(value @ JsonValue::String(_)) => check_value(v, value),
        Some(_) => v.report("must be a string"),
        None => {}
    }
}

/// An id must be a string, a number or a state expression.
pub(crate) fn check_id<T>(v: &mut Validator, expr: &Expr<T>) {
    match expr.template_value() {
        Some(JsonValue::String(s)) if s.trim().is_empty() => v.report("must not be empty"),
        Some(value @ JsonValue::String(_)) => check_value(v, value),
        Some(JsonValue::Number(_)) | None => {}
        Some(_) => v.report("must be a string or number"),
    }
}
