//! Search index integration
//!
//! Field naming, document projection, query construction and the index
//! client boundary.

pub mod client;
pub mod document;
pub mod field_name;
pub mod projector;
pub mod query;
pub mod solr;

pub use client::{IndexQueryError, IndexQueryResult, QueryParams, SearchIndex, SearchResponse};
pub use document::{FieldValue, IndexDocument};
pub use field_name::{relationship_field, solr_name, FieldDescriptor};
pub use projector::SearchIndexProjector;
pub use query::{construct_query_for_pids, escape, field_query, SearchQuery, DEFAULT_ROWS, NEVER_USE_THIS_ID};
pub use solr::SolrClient;
