use serde_json::Value as JsonValue;

use crate::expressions::starts_with_expression;
use crate::types::OperationSpec;
use crate::validate::rules::common::{check_expr, check_id, check_name, check_state_expr};
use crate::validate::validator::Validator;

pub(crate) fn check_operation(v: &mut Validator, op: &OperationSpec) {
    v.field(op.name(), |v| match op {
        OperationSpec::Create(p) => {
            v.field("entityName", |v| check_name(v, &p.entity_name));
            v.field("body", |v| check_expr(v, &p.body));
        }
        OperationSpec::Query(p) => {
            v.field("entityName", |v| check_name(v, &p.entity_name));
            if let Some(id) = &p.entity_id {
                v.field("entityId", |v| check_id(v, id));
            }
            if let Some(query) = &p.query {
                v.field("query", |v| {
                    check_expr(v, query);
                    if let Some(JsonValue::Object(map)) = query.template_value() {
                        check_query_limit(v, map.get("limit"));
                    }
                });
            }
        }
        OperationSpec::Update(p) => {
            v.field("entityName", |v| check_name(v, &p.entity_name));
            v.field("entityId", |v| check_id(v, &p.entity_id));
            v.field("body", |v| check_expr(v, &p.body));
        }
        OperationSpec::Delete(p) => {
            v.field("entityName", |v| check_name(v, &p.entity_name));
            v.field("entityId", |v| check_id(v, &p.entity_id));
        }
        OperationSpec::Rpc(call) => check_expr(v, call),
        OperationSpec::Each(p) => {
            v.field("dataSource", |v| check_state_expr(v, &p.data_source));
            v.field("operation", |v| check_operation(v, &p.operation));
        }
    })
}

fn check_query_limit(v: &mut Validator, limit: Option<&JsonValue>) {
    match limit {
        None | Some(JsonValue::Null) => {}
        Some(JsonValue::Number(n)) if n.is_u64() => {}
        Some(JsonValue::String(s)) if starts_with_expression(s.trim_start()) => {}
        Some(_) => v.field("limit", |v| v.report("must be a non-negative integer")),
    }
}
