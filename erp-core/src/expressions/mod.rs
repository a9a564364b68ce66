mod eval;
mod json_pointer;
mod state_expr;
mod template;

pub use eval::{evaluate, expand_value};
pub use json_pointer::{JsonPointer, JsonPointerError};
pub use state_expr::{parse_state_expr, StateExpr, StateExprError, StateRoot};
pub use template::{
    parse_template, starts_with_expression, validate_value_expressions, Part, StateTemplate,
    TemplateError,
};
