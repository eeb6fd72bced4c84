//! Relationship declaration and resolution
//!
//! - `descriptor`: declared relationships and their options
//! - `registry`: per-entity-type descriptor and operations table
//! - `finder`: finder options and results
//! - `node`: resolution of relationships for one entity
//! - `macros`: compile-time typed finder wrappers

pub mod descriptor;
pub mod finder;
mod macros;
pub mod node;
pub mod registry;

pub use descriptor::{BidirectionalPair, Direction, RelationshipDescriptor, RelationshipOptions};
pub use finder::{FinderOptions, FinderResponse, IndexedObject, ResponseFormat};
pub use node::{SemanticNode, RELS_EXT};
pub use registry::{
    DeclarationError, DeclarationResult, FinderKind, Operation, RelationshipRegistry,
    ResolvedRelationship,
};
