//! Relationship descriptors

use serde::Serialize;
use std::fmt;

/// Which side of the relationship holds the predicate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Direction {
    /// Stored on this entity
    Outbound,
    /// Stored on the related entity, pointing back here
    Inbound,
}

impl Direction {
    /// Registry key: `self` for outbound, `inbound` for inbound
    pub fn key(&self) -> &'static str {
        match self {
            Direction::Outbound => "self",
            Direction::Inbound => "inbound",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Options accepted when declaring a relationship
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelationshipOptions {
    pub inbound: bool,
    /// Related entities must have this content model
    pub element_type: Option<String>,
    pub singular: bool,
    /// Predicate the related entity uses to point back
    pub inverse: Option<String>,
}

impl RelationshipOptions {
    pub fn outbound() -> Self {
        Self::default()
    }

    pub fn inbound() -> Self {
        Self {
            inbound: true,
            ..Self::default()
        }
    }

    pub fn element_type(mut self, model: impl Into<String>) -> Self {
        self.element_type = Some(model.into());
        self
    }

    pub fn singular(mut self) -> Self {
        self.singular = true;
        self
    }

    pub fn inverse(mut self, predicate: impl Into<String>) -> Self {
        self.inverse = Some(predicate.into());
        self
    }

    pub fn direction(&self) -> Direction {
        if self.inbound {
            Direction::Inbound
        } else {
            Direction::Outbound
        }
    }
}

/// A declared relationship
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelationshipDescriptor {
    pub name: String,
    /// Short predicate name, also the stem of the index field
    pub predicate: String,
    pub predicate_uri: String,
    pub direction: Direction,
    pub element_type: Option<String>,
    pub singular: bool,
    pub inverse: Option<String>,
}

impl RelationshipDescriptor {
    pub fn is_inbound(&self) -> bool {
        self.direction == Direction::Inbound
    }
}

/// A bidirectional relationship and its two halves
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BidirectionalPair {
    pub name: String,
    /// `<name>_outbound`
    pub outbound: String,
    /// `<name>_inbound`
    pub inbound: String,
}
