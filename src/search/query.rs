//! Index query strings
//!
//! Field values are escaped before they are embedded; ids are combined into
//! `id:a OR id:b` disjunctions.

use tracing::debug;

use super::client::{IndexQueryResult, QueryParams, SearchIndex, SearchResponse};

/// Id that never exists, used when an id set is empty
pub const NEVER_USE_THIS_ID: &str = "NEVER_USE_THIS_ID";

/// Rows requested when the caller does not say otherwise
pub const DEFAULT_ROWS: usize = 25;

/// Backslash-escape query syntax characters in a field value
///
/// `info:fedora/test:sample_pid` becomes `info\:fedora/test\:sample_pid`.
pub fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(
            c,
            ':' | '\\' | '+' | '-' | '!' | '(' | ')' | '{' | '}' | '[' | ']' | '^' | '"' | '~' | '*'
                | '?' | '&' | '|'
        ) || c.is_whitespace()
        {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// `id:<id1> OR id:<id2> ...`; an empty list matches nothing
pub fn construct_query_for_pids<S: AsRef<str>>(pids: &[S]) -> String {
    if pids.is_empty() {
        return format!("id:{}", NEVER_USE_THIS_ID);
    }
    pids.iter()
        .map(|pid| format!("id:{}", escape(pid.as_ref())))
        .collect::<Vec<_>>()
        .join(" OR ")
}

/// `<field>:<escaped value>`
pub fn field_query(field: &str, value: &str) -> String {
    format!("{}:{}", field, escape(value))
}

/// An unexecuted query; filters are ANDed onto the base clause
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    base: String,
    filters: Vec<String>,
    rows: usize,
}

impl SearchQuery {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            filters: Vec::new(),
            rows: DEFAULT_ROWS,
        }
    }

    /// Require an additional clause
    pub fn filter(mut self, clause: impl Into<String>) -> Self {
        self.filters.push(clause.into());
        self
    }

    pub fn rows(mut self, rows: usize) -> Self {
        self.rows = rows;
        self
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn row_limit(&self) -> usize {
        self.rows
    }

    pub fn to_query_string(&self) -> String {
        if self.filters.is_empty() {
            return self.base.clone();
        }
        let mut parts = vec![format!("({})", self.base)];
        parts.extend(self.filters.iter().map(|f| format!("({})", f)));
        parts.join(" AND ")
    }

    pub fn execute(&self, index: &dyn SearchIndex) -> IndexQueryResult<SearchResponse> {
        let q = self.to_query_string();
        debug!(query = %q, rows = self.rows, "Querying search index");
        index.query(&q, &QueryParams { rows: self.rows })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(escape("info:fedora/test:sample_pid"), r"info\:fedora/test\:sample_pid");
        assert_eq!(escape("a b"), r"a\ b");
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn test_pid_disjunction() {
        assert_eq!(construct_query_for_pids(&["test:1", "test:2"]), r"id:test\:1 OR id:test\:2");
        assert_eq!(construct_query_for_pids::<&str>(&[]), "id:NEVER_USE_THIS_ID");
    }

    #[test]
    fn test_query_composition() {
        let query = SearchQuery::new("is_part_of_s:info\\:fedora/test\\:1")
            .filter("has_model_s:info\\:fedora/afmodel\\:Page")
            .rows(10);
        assert_eq!(
            query.to_query_string(),
            "(is_part_of_s:info\\:fedora/test\\:1) AND (has_model_s:info\\:fedora/afmodel\\:Page)"
        );
        assert_eq!(query.row_limit(), 10);
        assert_eq!(SearchQuery::new("id:x").to_query_string(), "id:x");
    }
}
