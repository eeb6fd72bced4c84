//! Per-entity-type relationship table
//!
//! Declarations go into one of two maps keyed by direction (`self` for
//! outbound, `inbound`). Each declaration also installs its finder
//! operations into an operations table, so callers can ask whether an entity
//! type supports `parts_ids` or `parts_append` without any reflection.

use indexmap::map::Entry;
use indexmap::IndexMap;
use thiserror::Error;
use tracing::debug;

use super::descriptor::{BidirectionalPair, Direction, RelationshipDescriptor, RelationshipOptions};
use crate::error::{ModelError, ModelResult};
use crate::rdf::PredicateMappings;

/// Declaration-time failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeclarationError {
    #[error("Relationship name must not be empty")]
    EmptyName,

    #[error("No predicate mapping for `{0}`")]
    UnknownPredicate(String),

    #[error("Operation `{operation}` of `{incoming}` is already installed by `{existing}`")]
    OperationCollision {
        operation: String,
        existing: String,
        incoming: String,
    },
}

pub type DeclarationResult<T> = Result<T, DeclarationError>;

/// Kind of a synthesized finder operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FinderKind {
    /// `name`
    Find,
    /// `name_ids`
    Ids,
    /// `name_query`
    Query,
    /// `name_from_solr`
    FromSolr,
    /// `name_append`, outbound only
    Append,
    /// `name_remove`, outbound only
    Remove,
}

impl FinderKind {
    pub fn suffix(&self) -> &'static str {
        match self {
            FinderKind::Find => "",
            FinderKind::Ids => "_ids",
            FinderKind::Query => "_query",
            FinderKind::FromSolr => "_from_solr",
            FinderKind::Append => "_append",
            FinderKind::Remove => "_remove",
        }
    }

    pub fn operation_name(&self, relationship: &str) -> String {
        format!("{}{}", relationship, self.suffix())
    }

    const READ: [FinderKind; 4] = [FinderKind::Find, FinderKind::Ids, FinderKind::Query, FinderKind::FromSolr];
    const WRITE: [FinderKind; 2] = [FinderKind::Append, FinderKind::Remove];
}

/// Entry of the operations table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    pub relationship: String,
    pub kind: FinderKind,
}

/// What a relationship name resolves to
#[derive(Debug, Clone, Copy)]
pub enum ResolvedRelationship<'a> {
    Single(&'a RelationshipDescriptor),
    Bidirectional {
        pair: &'a BidirectionalPair,
        outbound: &'a RelationshipDescriptor,
        inbound: &'a RelationshipDescriptor,
    },
}

/// Relationship declarations of one entity type
#[derive(Debug, Clone)]
pub struct RelationshipRegistry {
    model: String,
    outbound: IndexMap<String, RelationshipDescriptor>,
    inbound: IndexMap<String, RelationshipDescriptor>,
    bidirectional: IndexMap<String, BidirectionalPair>,
    operations: IndexMap<String, Operation>,
    mappings: PredicateMappings,
}

impl RelationshipRegistry {
    /// Empty registry for the entity type `model`
    pub fn new(model: impl Into<String>, mappings: PredicateMappings) -> Self {
        Self {
            model: model.into(),
            outbound: IndexMap::new(),
            inbound: IndexMap::new(),
            bidirectional: IndexMap::new(),
            operations: IndexMap::new(),
            mappings,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn mappings(&self) -> &PredicateMappings {
        &self.mappings
    }

    /// Add a short predicate name before declaring relationships with it
    pub fn register_predicate(&mut self, name: &str, iri: &str) {
        self.mappings.insert(name, iri);
    }

    /// Declare a relationship. Redeclaring a name in the same direction
    /// replaces the earlier descriptor.
    pub fn has_relationship(
        &mut self,
        name: &str,
        predicate: &str,
        options: RelationshipOptions,
    ) -> DeclarationResult<&RelationshipDescriptor> {
        let descriptor = self.build_descriptor(name, predicate, &options)?;
        let kinds: &[FinderKind] = match descriptor.direction {
            Direction::Outbound => &[
                FinderKind::Find,
                FinderKind::Ids,
                FinderKind::Query,
                FinderKind::FromSolr,
                FinderKind::Append,
                FinderKind::Remove,
            ],
            Direction::Inbound => &FinderKind::READ,
        };
        self.check_operations(name, kinds)?;
        self.install_operations(name, kinds);

        debug!(
            model = %self.model,
            relationship = name,
            predicate = %descriptor.predicate,
            direction = %descriptor.direction,
            "Declared relationship"
        );
        let table = match descriptor.direction {
            Direction::Outbound => &mut self.outbound,
            Direction::Inbound => &mut self.inbound,
        };
        Ok(match table.entry(descriptor.name.clone()) {
            Entry::Occupied(mut entry) => {
                entry.insert(descriptor);
                entry.into_mut()
            }
            Entry::Vacant(entry) => entry.insert(descriptor),
        })
    }

    pub fn create_outbound_relationship_finders(
        &mut self,
        name: &str,
        predicate: &str,
        options: RelationshipOptions,
    ) -> DeclarationResult<&RelationshipDescriptor> {
        self.has_relationship(name, predicate, RelationshipOptions { inbound: false, ..options })
    }

    pub fn create_inbound_relationship_finders(
        &mut self,
        name: &str,
        predicate: &str,
        options: RelationshipOptions,
    ) -> DeclarationResult<&RelationshipDescriptor> {
        self.has_relationship(name, predicate, RelationshipOptions { inbound: true, ..options })
    }

    /// Declare `<name>_outbound` and `<name>_inbound` plus a combined `name`
    /// whose results list the outbound side first.
    pub fn create_bidirectional_relationship_finders(
        &mut self,
        name: &str,
        outbound_predicate: &str,
        inbound_predicate: &str,
        options: RelationshipOptions,
    ) -> DeclarationResult<&BidirectionalPair> {
        if name.is_empty() {
            return Err(DeclarationError::EmptyName);
        }
        let kinds = [FinderKind::READ.as_slice(), FinderKind::WRITE.as_slice()].concat();
        self.check_operations(name, &kinds)?;

        let outbound_name = format!("{}_outbound", name);
        let inbound_name = format!("{}_inbound", name);
        let outbound_options = RelationshipOptions {
            inbound: false,
            inverse: Some(inbound_predicate.to_string()),
            ..options.clone()
        };
        let inbound_options = RelationshipOptions {
            inbound: true,
            inverse: Some(outbound_predicate.to_string()),
            ..options
        };
        self.has_relationship(&outbound_name, outbound_predicate, outbound_options)?;
        self.has_relationship(&inbound_name, inbound_predicate, inbound_options)?;
        self.install_operations(name, &kinds);

        debug!(model = %self.model, relationship = name, "Declared bidirectional relationship");
        let pair = BidirectionalPair {
            name: name.to_string(),
            outbound: outbound_name,
            inbound: inbound_name,
        };
        Ok(match self.bidirectional.entry(name.to_string()) {
            Entry::Occupied(mut entry) => {
                entry.insert(pair);
                entry.into_mut()
            }
            Entry::Vacant(entry) => entry.insert(pair),
        })
    }

    pub fn has_bidirectional_relationship(
        &mut self,
        name: &str,
        outbound_predicate: &str,
        inbound_predicate: &str,
        options: RelationshipOptions,
    ) -> DeclarationResult<&BidirectionalPair> {
        self.create_bidirectional_relationship_finders(name, outbound_predicate, inbound_predicate, options)
    }

    fn build_descriptor(
        &self,
        name: &str,
        predicate: &str,
        options: &RelationshipOptions,
    ) -> DeclarationResult<RelationshipDescriptor> {
        if name.is_empty() {
            return Err(DeclarationError::EmptyName);
        }
        let (short, uri) = self
            .mappings
            .resolve(predicate)
            .ok_or_else(|| DeclarationError::UnknownPredicate(predicate.to_string()))?;
        if let Some(inverse) = &options.inverse {
            if self.mappings.resolve(inverse).is_none() {
                return Err(DeclarationError::UnknownPredicate(inverse.clone()));
            }
        }
        Ok(RelationshipDescriptor {
            name: name.to_string(),
            predicate: short.to_string(),
            predicate_uri: uri.to_string(),
            direction: options.direction(),
            element_type: options.element_type.clone(),
            singular: options.singular,
            inverse: options.inverse.clone(),
        })
    }

    fn check_operations(&self, relationship: &str, kinds: &[FinderKind]) -> DeclarationResult<()> {
        for kind in kinds {
            let operation = kind.operation_name(relationship);
            if let Some(existing) = self.operations.get(&operation) {
                if existing.relationship != relationship {
                    return Err(DeclarationError::OperationCollision {
                        operation,
                        existing: existing.relationship.clone(),
                        incoming: relationship.to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    fn install_operations(&mut self, relationship: &str, kinds: &[FinderKind]) {
        for kind in kinds {
            self.operations.insert(
                kind.operation_name(relationship),
                Operation {
                    relationship: relationship.to_string(),
                    kind: *kind,
                },
            );
        }
    }

    /// Descriptor by name; outbound wins when both directions use the name
    pub fn lookup(&self, name: &str) -> ModelResult<&RelationshipDescriptor> {
        self.outbound
            .get(name)
            .or_else(|| self.inbound.get(name))
            .ok_or_else(|| ModelError::UnknownRelationship(name.to_string()))
    }

    /// Descriptor or bidirectional pair for a name
    pub fn resolve(&self, name: &str) -> ModelResult<ResolvedRelationship<'_>> {
        if let Ok(descriptor) = self.lookup(name) {
            return Ok(ResolvedRelationship::Single(descriptor));
        }
        let pair = self
            .bidirectional
            .get(name)
            .ok_or_else(|| ModelError::UnknownRelationship(name.to_string()))?;
        Ok(ResolvedRelationship::Bidirectional {
            pair,
            outbound: self.lookup(&pair.outbound)?,
            inbound: self.lookup(&pair.inbound)?,
        })
    }

    pub fn bidirectional(&self, name: &str) -> Option<&BidirectionalPair> {
        self.bidirectional.get(name)
    }

    /// Operation installed under `operation`, e.g. `parts_ids`
    pub fn operation(&self, operation: &str) -> Option<&Operation> {
        self.operations.get(operation)
    }

    pub fn responds_to(&self, operation: &str) -> bool {
        self.operations.contains_key(operation)
    }

    pub fn operations(&self) -> impl Iterator<Item = (&String, &Operation)> {
        self.operations.iter()
    }

    /// Outbound names followed by inbound names
    pub fn relationship_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.outbound.keys().cloned().collect();
        for name in self.inbound.keys() {
            if !names.contains(name) {
                names.push(name.clone());
            }
        }
        names
    }

    /// Descriptor tables keyed `self` and `inbound`
    pub fn relationships_desc(&self) -> IndexMap<&'static str, &IndexMap<String, RelationshipDescriptor>> {
        let mut desc = IndexMap::new();
        desc.insert(Direction::Outbound.key(), &self.outbound);
        desc.insert(Direction::Inbound.key(), &self.inbound);
        desc
    }

    pub fn outbound_descriptors(&self) -> impl Iterator<Item = &RelationshipDescriptor> {
        self.outbound.values()
    }

    pub fn inbound_descriptors(&self) -> impl Iterator<Item = &RelationshipDescriptor> {
        self.inbound.values()
    }

    /// Short name and IRI for a predicate given either way
    pub fn resolve_predicate(&self, name_or_iri: &str) -> ModelResult<(&str, &str)> {
        self.mappings
            .resolve(name_or_iri)
            .ok_or_else(|| ModelError::UnknownPredicate(name_or_iri.to_string()))
    }
}
