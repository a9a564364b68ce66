use std::sync::LazyLock;

use regex::Regex;

use super::json_pointer::{JsonPointer, JsonPointerError};

static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9\-_]+$").expect("valid regex"));

/// The part of [`crate::State`] an expression starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateRoot {
    Configuration,
    Data,
    References,
    LastReference,
    ResponseBody,
}

impl StateRoot {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Configuration => "configuration",
            Self::Data => "data",
            Self::References => "references",
            Self::LastReference => "lastReference",
            Self::ResponseBody => "response.body",
        }
    }
}

/// A reference into state such as `$data.contact#/emails/0`.
///
/// Grammar: `$<root>[.<name>...][#<json-pointer>]`, where root is one of
/// `configuration`, `data`, `references`, `lastReference` or `response.body`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateExpr {
    pub root: StateRoot,
    pub names: Vec<String>,
    pub pointer: Option<JsonPointer>,
}

pub fn parse_state_expr(input: &str) -> Result<StateExpr, StateExprError> {
    let s = input.trim();
    let Some(body) = s.strip_prefix('$') else {
        return Err(StateExprError::MissingDollarPrefix);
    };

    let (head, pointer) = split_pointer_suffix(body)?;

    // `response.body` is the only root containing a dot.
    let (root, rest) = if let Some(rest) = head.strip_prefix("response.body") {
        (StateRoot::ResponseBody, rest)
    } else {
        let (name, rest) = match head.find('.') {
            Some(idx) => (&head[..idx], &head[idx..]),
            None => (head, ""),
        };
        let root = match name {
            "configuration" => StateRoot::Configuration,
            "data" => StateRoot::Data,
            "references" => StateRoot::References,
            "lastReference" => StateRoot::LastReference,
            "response" => return Err(StateExprError::InvalidResponseSource(head.to_string())),
            other => return Err(StateExprError::UnknownRoot(other.to_string())),
        };
        (root, rest)
    };

    let names = if rest.is_empty() {
        Vec::new()
    } else {
        let Some(rest) = rest.strip_prefix('.') else {
            return Err(StateExprError::UnknownRoot(head.to_string()));
        };
        parse_names(rest)?
    };

    Ok(StateExpr {
        root,
        names,
        pointer,
    })
}

fn split_pointer_suffix(s: &str) -> Result<(&str, Option<JsonPointer>), StateExprError> {
    if let Some((head, frag)) = s.split_once('#') {
        let ptr = JsonPointer::parse(frag)?;
        Ok((head, Some(ptr)))
    } else {
        Ok((s, None))
    }
}

fn parse_names(rest: &str) -> Result<Vec<String>, StateExprError> {
    let mut names = Vec::new();
    for part in rest.split('.') {
        if part.is_empty() {
            return Err(StateExprError::EmptyName);
        }
        if !NAME_RE.is_match(part) {
            return Err(StateExprError::InvalidName(part.to_string()));
        }
        names.push(part.to_string());
    }
    Ok(names)
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StateExprError {
    #[error("state expression must start with '$'")]
    MissingDollarPrefix,
    #[error("unknown state root: {0}")]
    UnknownRoot(String),
    #[error("only $response.body is addressable (got {0})")]
    InvalidResponseSource(String),
    #[error("name segment must not be empty")]
    EmptyName,
    #[error("invalid name segment: {0}")]
    InvalidName(String),
    #[error("invalid json pointer: {0}")]
    InvalidJsonPointer(#[from] JsonPointerError),
}
