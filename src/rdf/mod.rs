//! RDF (Resource Description Framework) primitives
//!
//! This module provides the statement-level building blocks the modeling
//! layer is written against:
//! - RDF terms and triples (subject-predicate-object)
//! - an insertion-ordered triple store
//! - N-Triples and Turtle parsing/serialization
//! - namespace prefixes and short predicate names
//!
//! # Example
//!
//! ```rust
//! use fedora_model::rdf::{Literal, NamedNode, RdfPredicate, Triple, TripleStore};
//!
//! let mut store = TripleStore::new();
//!
//! let subject = NamedNode::new("info:fedora/test:1").unwrap();
//! let predicate = RdfPredicate::new("http://purl.org/dc/terms/title").unwrap();
//! let object = Literal::new_simple_literal("Title of work");
//!
//! store.insert(Triple::new(subject.clone().into(), predicate.clone(), object.into()));
//!
//! assert_eq!(store.objects(&subject.into(), &predicate).len(), 1);
//! ```

pub mod namespace;
pub mod serialization;
mod store;
pub mod types;
pub mod vocab;

pub use types::{
    BlankNode, Literal, NamedNode, RdfError, RdfObject, RdfPredicate, RdfResult, RdfSubject,
    Triple, TriplePattern,
};

pub use store::TripleStore;

pub use namespace::{Namespace, NamespaceManager, PredicateMappings, PrefixError, PrefixResult};

pub use serialization::{
    ParseError, ParseResult, RdfFormat, RdfParser, RdfSerializer, SerializeError,
    SerializeResult,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rdf_module_exports() {
        let _store: TripleStore = TripleStore::new();
        let _ns_mgr = NamespaceManager::new();
        let _mappings = PredicateMappings::default();
    }
}
