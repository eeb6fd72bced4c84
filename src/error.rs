//! Crate-level error type
//!
//! Each module keeps its own error enum; `ModelError` is what entity-level
//! operations return and wraps them all.

use thiserror::Error;

use crate::datastream::CoercionError;
use crate::rdf::{ParseError, RdfError, SerializeError};
use crate::relationships::DeclarationError;
use crate::search::IndexQueryError;

/// Errors raised by property, relationship and projection operations
#[derive(Error, Debug)]
pub enum ModelError {
    /// No identifier and no custom subject rule
    #[error("Cannot resolve an RDF subject for {0}: no identifier assigned")]
    UnboundSubject(String),

    /// Access to a property that was never declared
    #[error("No such attribute `{name}` on {container}")]
    UndeclaredProperty { container: String, name: String },

    /// Access to a relationship that was never declared
    #[error("Unknown relationship: {0}")]
    UnknownRelationship(String),

    /// Mutation requested on an inbound relationship
    #[error("Relationship `{0}` is inbound and cannot be modified from this side")]
    ReadOnlyRelationship(String),

    /// Predicate name without a mapping
    #[error("Unknown predicate: {0}")]
    UnknownPredicate(String),

    /// Two datastreams on one object would share field names
    #[error("Datastream `{incoming}` uses prefix `{prefix}` already taken by `{existing}`")]
    PrefixCollision {
        prefix: String,
        existing: String,
        incoming: String,
    },

    #[error(transparent)]
    ValueCoercion(#[from] CoercionError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Serialize(#[from] SerializeError),

    #[error(transparent)]
    IndexQuery(#[from] IndexQueryError),

    #[error(transparent)]
    Declaration(#[from] DeclarationError),

    #[error(transparent)]
    InvalidTerm(#[from] RdfError),
}

pub type ModelResult<T> = Result<T, ModelError>;

impl ModelError {
    /// True for errors caused by calling code rather than by data or I/O
    pub fn is_programming_error(&self) -> bool {
        matches!(
            self,
            ModelError::UndeclaredProperty { .. }
                | ModelError::UnknownRelationship(_)
                | ModelError::ReadOnlyRelationship(_)
                | ModelError::Declaration(_)
        )
    }
}
