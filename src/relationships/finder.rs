//! Finder options and results

use serde_json::{Map, Value};

use crate::search::SearchResponse;

/// Shape of a finder result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseFormat {
    /// Objects materialized from index documents
    #[default]
    Objects,
    /// Identifiers only
    IdArray,
    /// The index response, untouched
    Solr,
}

/// Per-call finder options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FinderOptions {
    pub response_format: ResponseFormat,
    /// Row limit for index queries; the configured default when unset
    pub rows: Option<usize>,
}

impl FinderOptions {
    pub fn ids() -> Self {
        Self {
            response_format: ResponseFormat::IdArray,
            rows: None,
        }
    }

    pub fn solr() -> Self {
        Self {
            response_format: ResponseFormat::Solr,
            rows: None,
        }
    }

    pub fn rows(mut self, rows: usize) -> Self {
        self.rows = Some(rows);
        self
    }

    pub fn with_format(self, response_format: ResponseFormat) -> Self {
        Self {
            response_format,
            ..self
        }
    }
}

/// An entity as seen through its index document
#[derive(Debug, Clone, PartialEq)]
pub struct IndexedObject {
    pub pid: String,
    /// `has_model_s` values
    pub models: Vec<String>,
    pub document: Map<String, Value>,
}

impl IndexedObject {
    /// Build from a document; documents without an `id` are skipped
    pub fn from_document(document: &Map<String, Value>) -> Option<Self> {
        let pid = document.get("id")?.as_str()?.to_string();
        let models = match document.get("has_model_s") {
            Some(Value::String(s)) => vec![s.clone()],
            Some(Value::Array(values)) => values
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect(),
            _ => Vec::new(),
        };
        Some(Self {
            pid,
            models,
            document: document.clone(),
        })
    }

    pub fn has_model(&self, model_uri: &str) -> bool {
        self.models.iter().any(|m| m == model_uri)
    }
}

/// Result of a finder call
#[derive(Debug, Clone, PartialEq)]
pub enum FinderResponse {
    Objects(Vec<IndexedObject>),
    Ids(Vec<String>),
    Raw(SearchResponse),
    /// Separate raw responses of a bidirectional relationship
    RawSplit {
        outbound: SearchResponse,
        inbound: SearchResponse,
    },
}

impl FinderResponse {
    /// Identifiers in result order, whatever the format
    pub fn ids(&self) -> Vec<String> {
        match self {
            FinderResponse::Objects(objects) => objects.iter().map(|o| o.pid.clone()).collect(),
            FinderResponse::Ids(ids) => ids.clone(),
            FinderResponse::Raw(response) => response.ids(),
            FinderResponse::RawSplit { outbound, inbound } => {
                let mut ids = outbound.ids();
                ids.extend(inbound.ids());
                ids
            }
        }
    }

    /// Results of `self` followed by those of `other`
    pub fn chain(self, other: FinderResponse) -> FinderResponse {
        match (self, other) {
            (FinderResponse::Objects(mut first), FinderResponse::Objects(second)) => {
                first.extend(second);
                FinderResponse::Objects(first)
            }
            (first, second) => {
                let mut ids = first.ids();
                ids.extend(second.ids());
                FinderResponse::Ids(ids)
            }
        }
    }

    pub fn into_objects(self) -> Option<Vec<IndexedObject>> {
        match self {
            FinderResponse::Objects(objects) => Some(objects),
            _ => None,
        }
    }

    pub fn as_raw(&self) -> Option<&SearchResponse> {
        match self {
            FinderResponse::Raw(response) => Some(response),
            _ => None,
        }
    }
}
