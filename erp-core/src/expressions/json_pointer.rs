use std::fmt;

use serde_json::Value as JsonValue;

/// RFC 6901 pointer, held as its unescaped reference tokens.
///
/// The empty pointer addresses the whole value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JsonPointer {
    tokens: Vec<String>,
}

impl JsonPointer {
    pub fn parse(fragment: &str) -> Result<Self, JsonPointerError> {
        if fragment.is_empty() {
            return Ok(Self::default());
        }
        let Some(body) = fragment.strip_prefix('/') else {
            return Err(JsonPointerError::InvalidPrefix);
        };
        let tokens = body
            .split('/')
            .map(unescape_token)
            .collect::<Result<_, _>>()?;
        Ok(Self { tokens })
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Walk `value` token by token. Array tokens must be canonical indices (`0`, `12`).
    pub fn lookup<'a>(&self, value: &'a JsonValue) -> Option<&'a JsonValue> {
        self.tokens.iter().try_fold(value, |cur, token| match cur {
            JsonValue::Object(map) => map.get(token),
            JsonValue::Array(items) => array_index(token).and_then(|i| items.get(i)),
            _ => None,
        })
    }
}

fn unescape_token(raw: &str) -> Result<String, JsonPointerError> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(ch) = chars.next() {
        if ch != '~' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('0') => out.push('~'),
            Some('1') => out.push('/'),
            _ => return Err(JsonPointerError::InvalidEscape(raw.to_string())),
        }
    }
    Ok(out)
}

fn array_index(token: &str) -> Option<usize> {
    let canonical = token == "0" || (!token.starts_with('0') && !token.is_empty());
    if canonical && token.bytes().all(|b| b.is_ascii_digit()) {
        token.parse().ok()
    } else {
        None
    }
}

impl fmt::Display for JsonPointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for token in &self.tokens {
            write!(f, "/{}", token.replace('~', "~0").replace('/', "~1"))?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum JsonPointerError {
    #[error("json pointer must be empty or start with '/'")]
    InvalidPrefix,
    #[error("invalid escape in json pointer token {0:?} (only ~0 and ~1 are allowed)")]
    InvalidEscape(String),
}
