//! Relationship resolution for one entity
//!
//! A `SemanticNode` owns the entity's outbound relationship statements
//! (RELS-EXT) and resolves declared relationships either from those
//! statements or through the search index.

use indexmap::IndexMap;
use tracing::debug;

use super::descriptor::{Direction, RelationshipDescriptor};
use super::finder::{FinderOptions, FinderResponse, IndexedObject, ResponseFormat};
use super::registry::ResolvedRelationship;
use crate::config::RawCombination;
use crate::context::ModelContext;
use crate::error::{ModelError, ModelResult};
use crate::rdf::{
    NamedNode, RdfFormat, RdfObject, RdfParser, RdfPredicate, RdfSerializer, RdfSubject, Triple,
    TriplePattern, TripleStore,
};
use crate::search::{
    construct_query_for_pids, field_query, relationship_field, SearchQuery, SearchResponse,
};

/// Datastream id of the relationship statements
pub const RELS_EXT: &str = "RELS-EXT";

/// An entity's relationship graph plus the context needed to resolve it
#[derive(Debug, Clone)]
pub struct SemanticNode {
    pid: Option<String>,
    context: ModelContext,
    rels_ext: TripleStore,
}

impl SemanticNode {
    pub fn new(context: ModelContext, pid: Option<&str>) -> Self {
        Self {
            pid: pid.map(str::to_string),
            context,
            rels_ext: TripleStore::new(),
        }
    }

    pub fn pid(&self) -> Option<&str> {
        self.pid.as_deref()
    }

    /// Assign an identifier to a node that has no statements yet
    pub fn assign_pid(&mut self, pid: &str) {
        self.pid = Some(pid.to_string());
    }

    pub fn context(&self) -> &ModelContext {
        &self.context
    }

    /// `info:fedora/<pid>`
    pub fn internal_uri(&self) -> ModelResult<String> {
        match &self.pid {
            Some(pid) => Ok(self.uri_for(pid)),
            None => Err(ModelError::UnboundSubject(RELS_EXT.to_string())),
        }
    }

    fn uri_for(&self, pid: &str) -> String {
        format!("{}{}", self.context.config().subject_namespace, pid)
    }

    fn subject(&self) -> ModelResult<RdfSubject> {
        Ok(NamedNode::new(&self.internal_uri()?)?.into())
    }

    fn predicate(&self, name_or_iri: &str) -> ModelResult<RdfPredicate> {
        match self.context.registry().mappings().resolve(name_or_iri) {
            Some((_, iri)) => Ok(RdfPredicate::new(iri)?),
            None if name_or_iri.contains("://") || name_or_iri.starts_with("info:") => {
                Ok(RdfPredicate::new(name_or_iri)?)
            }
            None => Err(ModelError::UnknownPredicate(name_or_iri.to_string())),
        }
    }

    /// Targets may be given as a pid or as a full URI
    fn target(&self, target: &str) -> ModelResult<RdfObject> {
        let namespace = &self.context.config().subject_namespace;
        let uri = if target.starts_with(namespace.as_str()) || target.contains("://") {
            target.to_string()
        } else {
            self.uri_for(target)
        };
        Ok(NamedNode::new(&uri)?.into())
    }

    /// Add an outbound statement; an identical statement is not repeated
    pub fn add_relationship(&mut self, predicate: &str, target: &str) -> ModelResult<()> {
        let triple = Triple::new(self.subject()?, self.predicate(predicate)?, self.target(target)?);
        if !self.rels_ext.contains(&triple) {
            debug!(subject = %triple.subject, predicate = %triple.predicate, object = %triple.object, "Adding relationship");
            self.rels_ext.insert(triple);
        }
        Ok(())
    }

    /// Point `predicate` at another node
    pub fn add_relationship_to(&mut self, predicate: &str, other: &SemanticNode) -> ModelResult<()> {
        let uri = other.internal_uri()?;
        self.add_relationship(predicate, &uri)
    }

    pub fn remove_relationship(&mut self, predicate: &str, target: &str) -> ModelResult<bool> {
        let triple = Triple::new(self.subject()?, self.predicate(predicate)?, self.target(target)?);
        Ok(self.rels_ext.remove_first(&triple))
    }

    /// Target URIs of one predicate, in statement order
    pub fn relationships(&self, predicate: &str) -> ModelResult<Vec<String>> {
        let subject = self.subject()?;
        let predicate = self.predicate(predicate)?;
        Ok(self
            .rels_ext
            .objects(&subject, &predicate)
            .into_iter()
            .map(RdfObject::lexical)
            .collect())
    }

    /// Target pids of one predicate: URIs with the subject namespace removed
    pub fn ids_for_outbound(&self, predicate: &str) -> ModelResult<Vec<String>> {
        let namespace = &self.context.config().subject_namespace;
        Ok(self
            .relationships(predicate)?
            .into_iter()
            .map(|uri| match uri.strip_prefix(namespace.as_str()) {
                Some(pid) => pid.to_string(),
                None => uri,
            })
            .collect())
    }

    pub fn rels_ext(&self) -> &TripleStore {
        &self.rels_ext
    }

    /// Replace the relationship statements with parsed N-Triples content
    pub fn load_rels_ext(&mut self, content: &[u8]) -> ModelResult<()> {
        let triples = RdfParser::parse_bytes(content, RdfFormat::NTriples)?;
        let subject = self.subject()?;
        let pattern = TriplePattern::new(Some(subject), None, None);
        let total = triples.len();
        let kept: Vec<Triple> = triples.into_iter().filter(|t| pattern.matches(t)).collect();
        if kept.len() < total {
            debug!(dropped = total - kept.len(), "Dropped relationship statements about other subjects");
        }
        self.rels_ext = TripleStore::from_triples(kept);
        Ok(())
    }

    pub fn rels_ext_content(&self) -> ModelResult<String> {
        Ok(RdfSerializer::serialize(self.rels_ext.as_slice(), RdfFormat::NTriples)?)
    }

    /// Outbound targets keyed by short predicate name, for indexing
    pub fn relationships_for_index(&self) -> IndexMap<String, Vec<String>> {
        let mappings = self.context.registry().mappings();
        let mut by_predicate: IndexMap<String, Vec<String>> = IndexMap::new();
        for triple in self.rels_ext.iter() {
            let key = mappings
                .name(triple.predicate.as_str())
                .unwrap_or(triple.predicate.as_str());
            by_predicate
                .entry(key.to_string())
                .or_default()
                .push(triple.object.lexical());
        }
        by_predicate
    }

    /// Resolve a declared relationship
    pub fn find(&self, name: &str, options: FinderOptions) -> ModelResult<FinderResponse> {
        debug!(relationship = name, format = ?options.response_format, rows = ?options.rows, "Resolving relationship");
        match self.context.registry().resolve(name)? {
            ResolvedRelationship::Single(descriptor) => self.resolve(descriptor, options),
            ResolvedRelationship::Bidirectional {
                outbound, inbound, ..
            } => self.find_bidirectional(outbound, inbound, options),
        }
    }

    /// Resolve one descriptor
    pub fn resolve(&self, descriptor: &RelationshipDescriptor, options: FinderOptions) -> ModelResult<FinderResponse> {
        match descriptor.direction {
            Direction::Outbound => self.find_outbound(descriptor, options),
            Direction::Inbound => self.find_inbound(descriptor, options),
        }
    }

    /// `<name>_ids`
    pub fn find_ids(&self, name: &str, options: FinderOptions) -> ModelResult<Vec<String>> {
        Ok(self
            .find(name, options.with_format(ResponseFormat::IdArray))?
            .ids())
    }

    /// `<name>_from_solr`: objects straight from index documents
    pub fn find_from_solr(&self, name: &str, options: FinderOptions) -> ModelResult<Vec<IndexedObject>> {
        Ok(self
            .find(name, options.with_format(ResponseFormat::Objects))?
            .into_objects()
            .unwrap_or_default())
    }

    /// `<name>_query`: the unexecuted query behind a relationship
    pub fn relationship_query(&self, name: &str) -> ModelResult<SearchQuery> {
        match self.context.registry().resolve(name)? {
            ResolvedRelationship::Single(descriptor) => match descriptor.direction {
                Direction::Outbound => {
                    let ids = self.ids_for_outbound(&descriptor.predicate_uri)?;
                    Ok(self.outbound_query(descriptor, &ids))
                }
                Direction::Inbound => self.inbound_query(descriptor),
            },
            ResolvedRelationship::Bidirectional {
                outbound, inbound, ..
            } => self.bidirectional_query(outbound, inbound),
        }
    }

    /// `<name>_append`
    pub fn append(&mut self, name: &str, target: &str) -> ModelResult<()> {
        let predicate = self.writable_predicate(name)?;
        self.add_relationship(&predicate, target)
    }

    /// `<name>_remove`
    pub fn remove(&mut self, name: &str, target: &str) -> ModelResult<bool> {
        let predicate = self.writable_predicate(name)?;
        self.remove_relationship(&predicate, target)
    }

    fn writable_predicate(&self, name: &str) -> ModelResult<String> {
        match self.context.registry().resolve(name)? {
            ResolvedRelationship::Single(descriptor) if descriptor.is_inbound() => {
                Err(ModelError::ReadOnlyRelationship(name.to_string()))
            }
            ResolvedRelationship::Single(descriptor) => Ok(descriptor.predicate_uri.clone()),
            ResolvedRelationship::Bidirectional { outbound, .. } => Ok(outbound.predicate_uri.clone()),
        }
    }

    pub fn relationship_names(&self) -> Vec<String> {
        self.context.registry().relationship_names()
    }

    /// `self`: outbound name -> target URIs; `inbound`: names with no targets
    pub fn relationships_by_name(&self) -> ModelResult<IndexMap<&'static str, IndexMap<String, Vec<String>>>> {
        let registry = self.context.registry();
        let mut outbound = IndexMap::new();
        for descriptor in registry.outbound_descriptors() {
            outbound.insert(descriptor.name.clone(), self.relationships(&descriptor.predicate_uri)?);
        }
        let inbound: IndexMap<String, Vec<String>> = registry
            .inbound_descriptors()
            .map(|d| (d.name.clone(), Vec::new()))
            .collect();

        let mut by_name = IndexMap::new();
        by_name.insert(Direction::Outbound.key(), outbound);
        by_name.insert(Direction::Inbound.key(), inbound);
        Ok(by_name)
    }

    /// Like `relationships_by_name`, with inbound targets fetched from the index
    pub fn relationships_by_name_with_index(
        &self,
    ) -> ModelResult<IndexMap<&'static str, IndexMap<String, Vec<String>>>> {
        let mut by_name = self.relationships_by_name()?;
        let mut inbound = IndexMap::new();
        for descriptor in self.context.registry().inbound_descriptors() {
            let ids = self.resolve(descriptor, FinderOptions::ids())?.ids();
            inbound.insert(
                descriptor.name.clone(),
                ids.iter().map(|id| self.uri_for(id)).collect(),
            );
        }
        by_name.insert(Direction::Inbound.key(), inbound);
        Ok(by_name)
    }

    fn default_rows(&self) -> usize {
        self.context.config().default_rows
    }

    fn element_filter(&self, descriptor: &RelationshipDescriptor) -> Option<String> {
        descriptor.element_type.as_ref().map(|model| {
            field_query(&relationship_field("has_model"), &self.context.config().model_uri(model))
        })
    }

    fn with_element_filter(&self, query: SearchQuery, descriptor: &RelationshipDescriptor) -> SearchQuery {
        match self.element_filter(descriptor) {
            Some(filter) => query.filter(filter),
            None => query,
        }
    }

    fn outbound_query(&self, descriptor: &RelationshipDescriptor, ids: &[String]) -> SearchQuery {
        let query = SearchQuery::new(construct_query_for_pids(ids)).rows(self.default_rows());
        self.with_element_filter(query, descriptor)
    }

    fn inbound_clause(&self, descriptor: &RelationshipDescriptor) -> ModelResult<String> {
        Ok(field_query(
            &relationship_field(&descriptor.predicate),
            &self.internal_uri()?,
        ))
    }

    fn inbound_query(&self, descriptor: &RelationshipDescriptor) -> ModelResult<SearchQuery> {
        let query = SearchQuery::new(self.inbound_clause(descriptor)?).rows(self.default_rows());
        Ok(self.with_element_filter(query, descriptor))
    }

    fn bidirectional_query(
        &self,
        outbound: &RelationshipDescriptor,
        inbound: &RelationshipDescriptor,
    ) -> ModelResult<SearchQuery> {
        let ids = self.ids_for_outbound(&outbound.predicate_uri)?;
        let clause = format!(
            "{} OR ({})",
            construct_query_for_pids(&ids),
            self.inbound_clause(inbound)?
        );
        let query = SearchQuery::new(clause).rows(self.default_rows());
        Ok(self.with_element_filter(query, outbound))
    }

    fn find_outbound(&self, descriptor: &RelationshipDescriptor, options: FinderOptions) -> ModelResult<FinderResponse> {
        let ids = self.ids_for_outbound(&descriptor.predicate_uri)?;
        match options.response_format {
            ResponseFormat::IdArray if descriptor.element_type.is_none() => return Ok(FinderResponse::Ids(ids)),
            ResponseFormat::IdArray if ids.is_empty() => return Ok(FinderResponse::Ids(Vec::new())),
            ResponseFormat::Objects if ids.is_empty() => return Ok(FinderResponse::Objects(Vec::new())),
            _ => {}
        }
        let rows = options
            .rows
            .unwrap_or_else(|| ids.len().max(self.default_rows()));
        let response = self
            .outbound_query(descriptor, &ids)
            .rows(rows)
            .execute(self.context.index())?;
        Ok(self.shape(descriptor, response, options.response_format))
    }

    fn find_inbound(&self, descriptor: &RelationshipDescriptor, options: FinderOptions) -> ModelResult<FinderResponse> {
        let rows = options.rows.unwrap_or_else(|| self.default_rows());
        let response = self
            .inbound_query(descriptor)?
            .rows(rows)
            .execute(self.context.index())?;
        Ok(self.shape(descriptor, response, options.response_format))
    }

    fn find_bidirectional(
        &self,
        outbound: &RelationshipDescriptor,
        inbound: &RelationshipDescriptor,
        options: FinderOptions,
    ) -> ModelResult<FinderResponse> {
        if options.response_format != ResponseFormat::Solr {
            let outbound_results = self.find_outbound(outbound, options)?;
            let inbound_results = self.find_inbound(inbound, options)?;
            return Ok(outbound_results.chain(inbound_results));
        }

        let rows = options.rows.unwrap_or_else(|| self.default_rows());
        match self.context.config().bidirectional_raw {
            RawCombination::Disjunctive => {
                let response = self
                    .bidirectional_query(outbound, inbound)?
                    .rows(rows)
                    .execute(self.context.index())?;
                Ok(FinderResponse::Raw(response))
            }
            RawCombination::Separate => {
                let ids = self.ids_for_outbound(&outbound.predicate_uri)?;
                let outbound_response = self
                    .outbound_query(outbound, &ids)
                    .rows(rows)
                    .execute(self.context.index())?;
                let inbound_response = self
                    .inbound_query(inbound)?
                    .rows(rows)
                    .execute(self.context.index())?;
                Ok(FinderResponse::RawSplit {
                    outbound: outbound_response,
                    inbound: inbound_response,
                })
            }
        }
    }

    fn shape(&self, descriptor: &RelationshipDescriptor, response: SearchResponse, format: ResponseFormat) -> FinderResponse {
        match format {
            ResponseFormat::Solr => FinderResponse::Raw(response),
            ResponseFormat::IdArray if descriptor.element_type.is_none() => FinderResponse::Ids(response.ids()),
            ResponseFormat::IdArray => FinderResponse::Ids(
                self.materialize(descriptor, &response)
                    .into_iter()
                    .map(|o| o.pid)
                    .collect(),
            ),
            ResponseFormat::Objects => FinderResponse::Objects(self.materialize(descriptor, &response)),
        }
    }

    /// Objects from response documents, restricted to the element type
    fn materialize(&self, descriptor: &RelationshipDescriptor, response: &SearchResponse) -> Vec<IndexedObject> {
        let model_uri = descriptor
            .element_type
            .as_ref()
            .map(|model| self.context.config().model_uri(model));
        response
            .hits()
            .iter()
            .filter_map(IndexedObject::from_document)
            .filter(|o| model_uri.as_ref().map_or(true, |uri| o.has_model(uri)))
            .collect()
    }
}

impl AsRef<SemanticNode> for SemanticNode {
    fn as_ref(&self) -> &SemanticNode {
        self
    }
}

impl AsMut<SemanticNode> for SemanticNode {
    fn as_mut(&mut self) -> &mut SemanticNode {
        self
    }
}
