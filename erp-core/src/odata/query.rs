use serde::{Deserialize, Serialize};

/// Declarative description of an entity query.
///
/// Each clause is optional and emitted only when present (an empty `fields` list or an
/// empty `filter` string count as absent). So `fields: []` sends no `$select` at all and
/// the server returns every column; it is never sent as a bare `$select=`.
///
/// `limit` becomes the `odata.maxpagesize` preference. A missing limit and an explicit
/// `0` both send `odata.maxpagesize=0`; the two cannot be told apart on the wire, so a
/// caller asking for zero rows gets the server's interpretation of `0`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Query {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_by: Option<OrderBy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBy {
    pub field: String,
    #[serde(default)]
    pub direction: SortDirection,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    pub fn order_by(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.order_by = Some(OrderBy {
            field: field.into(),
            direction,
        });
        self
    }

    pub fn filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// `$select`, `$orderby`, `$filter` in that order, joined by `&`; `None` when no clause applies.
    pub fn query_string(&self) -> Option<String> {
        let mut clauses = Vec::with_capacity(3);

        if let Some(fields) = self.fields.as_ref().filter(|f| !f.is_empty()) {
            clauses.push(format!("$select={}", fields.join(",")));
        }
        if let Some(order) = &self.order_by {
            clauses.push(format!(
                "$orderby={} {}",
                order.field,
                order.direction.as_str()
            ));
        }
        if let Some(filter) = self.filter.as_deref().filter(|f| !f.is_empty()) {
            clauses.push(format!("$filter={filter}"));
        }

        if clauses.is_empty() {
            None
        } else {
            Some(clauses.join("&"))
        }
    }

    pub fn page_size(&self) -> u64 {
        self.limit.unwrap_or(0)
    }
}
