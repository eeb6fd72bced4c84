//! Shared helpers for integration tests

#![allow(dead_code)]

use fedora_model::search::{IndexQueryError, IndexQueryResult, QueryParams};
use fedora_model::{ModelConfig, ModelContext, RelationshipRegistry, SearchIndex, SearchResponse};
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

/// Search index returning canned responses per exact query string
#[derive(Default)]
pub struct StubIndex {
    responses: Mutex<HashMap<String, SearchResponse>>,
    calls: Mutex<Vec<(String, usize)>>,
    failing: bool,
}

impl StubIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index whose every query fails
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn respond(&self, query: &str, docs: Vec<Map<String, Value>>) {
        self.responses
            .lock()
            .unwrap()
            .insert(query.to_string(), SearchResponse::new(docs));
    }

    /// (query, rows) of every call so far
    pub fn calls(&self) -> Vec<(String, usize)> {
        self.calls.lock().unwrap().clone()
    }
}

impl SearchIndex for StubIndex {
    fn query(&self, q: &str, params: &QueryParams) -> IndexQueryResult<SearchResponse> {
        self.calls.lock().unwrap().push((q.to_string(), params.rows));
        if self.failing {
            return Err(IndexQueryError::Backend("index unavailable".to_string()));
        }
        Ok(self
            .responses
            .lock()
            .unwrap()
            .get(q)
            .cloned()
            .unwrap_or_default())
    }
}

/// Index document with an id and content models
pub fn doc(id: &str, models: &[&str]) -> Map<String, Value> {
    let value = json!({ "id": id, "has_model_s": models });
    value.as_object().cloned().unwrap()
}

pub fn context(registry: RelationshipRegistry, index: Arc<StubIndex>, config: ModelConfig) -> ModelContext {
    ModelContext::new(Arc::new(registry), index, Arc::new(config))
}
