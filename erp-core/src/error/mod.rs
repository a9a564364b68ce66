use thiserror::Error;

use crate::expressions::{JsonPointerError, StateExprError, TemplateError};

#[derive(Debug, Error)]
pub enum ErpError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to parse as JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to parse as YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

#[derive(Debug, Error)]
#[error("job document failed validation ({violations_len} violations)")]
pub struct ValidationError {
    pub violations: Vec<Violation>,
    violations_len: usize,
}

impl ValidationError {
    pub fn new(violations: Vec<Violation>) -> Self {
        let violations_len = violations.len();
        Self {
            violations,
            violations_len,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub path: String,
    pub message: String,
}

impl Violation {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Raised when the caller-supplied initial state cannot be turned into a [`crate::State`].
#[derive(Debug, Error)]
pub enum StateError {
    #[error("initial state must be a JSON object (got {0})")]
    NotAnObject(&'static str),
    #[error("initial state has an invalid shape: {0}")]
    Shape(#[from] serde_json::Error),
}

/// Failure to resolve a late-bound parameter against state.
#[derive(Debug, Error)]
pub enum ExprError {
    #[error("invalid state expression: {0}")]
    Syntax(#[from] StateExprError),
    #[error("invalid template: {0}")]
    Template(TemplateError),
    #[error("invalid json pointer: {0}")]
    Pointer(#[from] JsonPointerError),
    #[error("{expr} did not resolve to a value")]
    Missing { expr: String },
    #[error("resolved value has the wrong shape: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("{0}")]
    Custom(String),
}

impl From<TemplateError> for ExprError {
    fn from(e: TemplateError) -> Self {
        match e {
            TemplateError::InvalidStateExpr(e) => Self::Syntax(e),
            other => Self::Template(other),
        }
    }
}

impl ExprError {
    pub fn missing(expr: impl Into<String>) -> Self {
        Self::Missing { expr: expr.into() }
    }
}
