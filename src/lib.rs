//! Fedora Model
//!
//! A modeling layer for objects kept in a Fedora-style repository: typed,
//! directed relationships between objects and RDF-backed datastream
//! properties, resolved from the object's own statements or from a search
//! index, and projected into flat, type-suffixed index documents.
//!
//! # Modules
//!
//! - `rdf`: terms, triples, an ordered triple store, N-Triples/Turtle
//! - `datastream`: declared properties over a datastream's statements
//! - `relationships`: relationship registry, finders, typed wrappers
//! - `search`: field naming, projection, query strings, Solr client
//! - `object`: digital objects tying the above together
//! - `config` / `context`: YAML configuration and injected collaborators
//!
//! ## Example Usage
//!
//! ```rust
//! use fedora_model::datastream::{DatastreamType, PropertyDefinition, RdfDatastream, UsageTag};
//! use fedora_model::rdf::vocab::dc;
//! use std::sync::Arc;
//!
//! let kind = DatastreamType::new("DescMetadata").property(
//!     PropertyDefinition::new("title", dc::TITLE)
//!         .unwrap()
//!         .index(|i| i.usage([UsageTag::Sortable, UsageTag::StoredSearchable])),
//! );
//! let mut ds = RdfDatastream::new(Arc::new(kind), Some("test:1"), "descMetadata");
//!
//! ds.property("title").unwrap().set(["Title of work"]).unwrap();
//! assert_eq!(
//!     String::from_utf8(ds.serialize().unwrap()).unwrap(),
//!     "<info:fedora/test:1> <http://purl.org/dc/terms/title> \"Title of work\" .\n"
//! );
//!
//! let doc = ds.to_solr(Default::default()).unwrap();
//! assert!(doc.contains("desc_metadata__title_ssi"));
//! ```

pub mod config;
pub mod context;
pub mod datastream;
pub mod error;
pub mod object;
pub mod rdf;
pub mod relationships;
pub mod search;

pub use config::{ConfigError, ModelConfig, RawCombination};
pub use context::ModelContext;
pub use datastream::{
    BoundValueProxy, DatastreamType, PropertyDefinition, PropertyValue, RdfDatastream, UsageTag,
    ValueType,
};
pub use error::{ModelError, ModelResult};
pub use object::DigitalObject;
pub use relationships::{
    FinderOptions, FinderResponse, RelationshipOptions, RelationshipRegistry, ResponseFormat,
    SemanticNode,
};
pub use search::{IndexDocument, SearchIndex, SearchIndexProjector, SearchResponse};
