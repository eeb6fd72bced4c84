//! Search index boundary
//!
//! The index is an external collaborator: callers hand it a query string and
//! a row limit and get back the matching documents or an error, unchanged.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Search index call failures, propagated as-is
#[derive(Error, Debug)]
pub enum IndexQueryError {
    #[error("Index request failed: {0}")]
    Transport(String),

    #[error("Index returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed index response: {0}")]
    Decode(String),

    #[error("Index error: {0}")]
    Backend(String),
}

pub type IndexQueryResult<T> = Result<T, IndexQueryError>;

/// Per-call query parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryParams {
    pub rows: usize,
}

/// Documents returned for one query
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(rename = "numFound")]
    pub num_found: u64,
    #[serde(default)]
    pub docs: Vec<Map<String, Value>>,
}

impl SearchResponse {
    pub fn new(docs: Vec<Map<String, Value>>) -> Self {
        Self {
            num_found: docs.len() as u64,
            docs,
        }
    }

    pub fn hits(&self) -> &[Map<String, Value>] {
        &self.docs
    }

    /// `id` of every document, in response order
    pub fn ids(&self) -> Vec<String> {
        self.docs
            .iter()
            .filter_map(|d| d.get("id").and_then(Value::as_str))
            .map(str::to_string)
            .collect()
    }
}

/// Query execution against a search index
pub trait SearchIndex: Send + Sync {
    fn query(&self, q: &str, params: &QueryParams) -> IndexQueryResult<SearchResponse>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_ids() {
        let response: SearchResponse = serde_json::from_value(serde_json::json!({
            "numFound": 2,
            "docs": [{"id": "test:1"}, {"id": "test:2", "title_tesim": ["x"]}]
        }))
        .unwrap();
        assert_eq!(response.num_found, 2);
        assert_eq!(response.ids(), vec!["test:1", "test:2"]);
    }
}
