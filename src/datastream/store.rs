//! RDF-backed datastreams
//!
//! A `DatastreamType` is declared once (properties, subject rule, format) and
//! shared by every `RdfDatastream` instance through an `Arc`. Instances own
//! their statements; property proxies borrow them.

use indexmap::IndexMap;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

use super::prefix::NamePrefixer;
use super::property::{PropertyDefinition, UsageTag};
use super::proxy::BoundValueProxy;
use super::subject::{SubjectBinder, SubjectContext, SubjectRule, DEFAULT_SUBJECT_NAMESPACE};
use super::value::{PropertyValue, ResourceRef, ValueType};
use crate::error::{ModelError, ModelResult};
use crate::rdf::{RdfFormat, RdfParser, RdfSerializer, RdfSubject, TripleStore};
use crate::search::{field_name, IndexDocument, SearchIndexProjector};

/// Control group reported for managed RDF datastreams
pub const MANAGED_CONTROL_GROUP: &str = "M";

/// Declared shape of a family of RDF datastreams
#[derive(Clone)]
pub struct DatastreamType {
    name: String,
    properties: IndexMap<String, PropertyDefinition>,
    subject_rule: Option<SubjectRule>,
    format: RdfFormat,
}

impl DatastreamType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: IndexMap::new(),
            subject_rule: None,
            format: RdfFormat::NTriples,
        }
    }

    /// Declare a property; redeclaring a name replaces the earlier definition
    pub fn property(mut self, definition: PropertyDefinition) -> Self {
        self.properties
            .insert(definition.name().to_string(), definition);
        self
    }

    /// Install a custom subject rule, evaluated lazily per instance
    pub fn subject_rule<F>(mut self, rule: F) -> Self
    where
        F: Fn(&SubjectContext<'_>) -> String + Send + Sync + 'static,
    {
        self.subject_rule = Some(Arc::new(rule));
        self
    }

    pub fn format(mut self, format: RdfFormat) -> Self {
        self.format = format;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn definition(&self, name: &str) -> Option<&PropertyDefinition> {
        self.properties.get(name)
    }

    /// Definitions in declaration order
    pub fn definitions(&self) -> impl Iterator<Item = &PropertyDefinition> {
        self.properties.values()
    }

    pub fn rdf_format(&self) -> RdfFormat {
        self.format
    }
}

impl std::fmt::Debug for DatastreamType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatastreamType")
            .field("name", &self.name)
            .field("properties", &self.properties.keys().collect::<Vec<_>>())
            .field("custom_subject", &self.subject_rule.is_some())
            .field("format", &self.format)
            .finish()
    }
}

/// Index view of one property as reported by `fields()`
#[derive(Debug, Clone, PartialEq)]
pub struct FieldInfo {
    pub values: Vec<PropertyValue>,
    pub value_type: ValueType,
    pub usage: Vec<UsageTag>,
}

/// One RDF datastream of one object
#[derive(Debug, Clone)]
pub struct RdfDatastream {
    dsid: String,
    pid: Option<String>,
    kind: Arc<DatastreamType>,
    binder: SubjectBinder,
    graph: TripleStore,
    prefixer: NamePrefixer,
    changed: bool,
}

impl RdfDatastream {
    /// New, empty datastream using the default subject namespace
    pub fn new(kind: Arc<DatastreamType>, pid: Option<&str>, dsid: &str) -> Self {
        Self::with_subject_namespace(kind, pid, dsid, DEFAULT_SUBJECT_NAMESPACE)
    }

    pub fn with_subject_namespace(
        kind: Arc<DatastreamType>,
        pid: Option<&str>,
        dsid: &str,
        namespace: &str,
    ) -> Self {
        let binder = SubjectBinder::new(namespace, kind.subject_rule.clone());
        Self {
            dsid: dsid.to_string(),
            pid: pid.map(str::to_string),
            kind,
            binder,
            graph: TripleStore::new(),
            prefixer: NamePrefixer::new(dsid),
            changed: false,
        }
    }

    pub fn dsid(&self) -> &str {
        &self.dsid
    }

    pub fn pid(&self) -> Option<&str> {
        self.pid.as_deref()
    }

    pub fn datastream_type(&self) -> &DatastreamType {
        &self.kind
    }

    /// Assign the repository identifier and rebind the subject
    pub fn assign_pid(&mut self, pid: &str) {
        self.pid = Some(pid.to_string());
        self.binder.rebind();
    }

    /// Resolved subject of this datastream's statements
    pub fn rdf_subject(&self) -> ModelResult<&RdfSubject> {
        self.binder.resolve(self.pid.as_deref(), &self.dsid)
    }

    pub fn graph(&self) -> &TripleStore {
        &self.graph
    }

    /// Replace the statements with the parsed content.
    ///
    /// Only statements about the subject are kept, plus statements about
    /// resources that a nested property of the subject points at. A parse
    /// error leaves the current statements untouched.
    pub fn load(&mut self, content: &[u8]) -> ModelResult<()> {
        let triples = RdfParser::parse_bytes(content, self.kind.format)?;
        let subject = self.binder.resolve(self.pid.as_deref(), &self.dsid)?.clone();

        let nested_predicates: HashSet<&str> = self
            .kind
            .definitions()
            .filter(|d| d.has_nested())
            .map(|d| d.predicate().as_str())
            .collect();
        let nested_subjects: HashSet<RdfSubject> = triples
            .iter()
            .filter(|t| t.subject == subject && nested_predicates.contains(t.predicate.as_str()))
            .filter_map(|t| t.object.as_subject())
            .collect();

        let total = triples.len();
        let kept: Vec<_> = triples
            .into_iter()
            .filter(|t| t.subject == subject || nested_subjects.contains(&t.subject))
            .collect();
        if kept.len() < total {
            debug!(
                dsid = %self.dsid,
                dropped = total - kept.len(),
                "Dropped statements about other subjects"
            );
        }
        debug!(dsid = %self.dsid, statements = kept.len(), "Loaded datastream");

        self.graph = TripleStore::from_triples(kept);
        self.changed = false;
        Ok(())
    }

    /// Serialize every statement in store order and clear the changed flag
    pub fn serialize(&mut self) -> ModelResult<Vec<u8>> {
        let content = RdfSerializer::serialize(self.graph.as_slice(), self.kind.format)?;
        debug!(dsid = %self.dsid, statements = self.graph.len(), "Serialized datastream");
        self.changed = false;
        Ok(content.into_bytes())
    }

    fn definition(&self, name: &str) -> ModelResult<&PropertyDefinition> {
        self.kind
            .definition(name)
            .ok_or_else(|| ModelError::UndeclaredProperty {
                container: self.dsid.clone(),
                name: name.to_string(),
            })
    }

    /// Live proxy for a declared property
    pub fn property(&mut self, name: &str) -> ModelResult<BoundValueProxy<'_>> {
        let definition = self
            .kind
            .definition(name)
            .ok_or_else(|| ModelError::UndeclaredProperty {
                container: self.dsid.clone(),
                name: name.to_string(),
            })?;
        let subject = self
            .binder
            .resolve(self.pid.as_deref(), &self.dsid)?
            .clone();
        Ok(BoundValueProxy::new(
            &mut self.graph,
            subject,
            definition,
            &mut self.changed,
        ))
    }

    /// Proxy for a property of a resource that `name` points at
    pub fn nested_property(
        &mut self,
        name: &str,
        resource: &ResourceRef,
        nested: &str,
    ) -> ModelResult<BoundValueProxy<'_>> {
        let parent = self
            .kind
            .definition(name)
            .ok_or_else(|| ModelError::UndeclaredProperty {
                container: self.dsid.clone(),
                name: name.to_string(),
            })?;
        let definition =
            parent
                .nested_definition(nested)
                .ok_or_else(|| ModelError::UndeclaredProperty {
                    container: format!("{}.{}", self.dsid, name),
                    name: nested.to_string(),
                })?;
        Ok(BoundValueProxy::new(
            &mut self.graph,
            resource.as_subject().clone(),
            definition,
            &mut self.changed,
        ))
    }

    /// Coerced values of a property without taking a mutable borrow
    pub fn values(&self, name: &str) -> ModelResult<Vec<PropertyValue>> {
        let definition = self.definition(name)?;
        let subject = self.rdf_subject()?;
        self.graph
            .objects(subject, definition.predicate())
            .into_iter()
            .map(|o| PropertyValue::from_object(o, definition.value_type()).map_err(Into::into))
            .collect()
    }

    /// Values with uncoercible literals kept as raw text
    pub fn values_lenient(&self, name: &str) -> ModelResult<Vec<PropertyValue>> {
        let definition = self.definition(name)?;
        let subject = self.rdf_subject()?;
        Ok(self
            .graph
            .objects(subject, definition.predicate())
            .into_iter()
            .map(|o| {
                PropertyValue::from_object(o, definition.value_type()).unwrap_or_else(|e| {
                    tracing::warn!(dsid = %self.dsid, property = name, error = %e, "Keeping uncoerced value");
                    PropertyValue::raw(o)
                })
            })
            .collect())
    }

    pub fn prefixer(&self) -> &NamePrefixer {
        &self.prefixer
    }

    /// Field-name prefix for a local name, e.g. `desc_metadata__title`
    pub fn apply_prefix(&self, local_name: &str) -> String {
        self.prefixer.apply(local_name)
    }

    /// Stored-searchable field name of a declared property
    pub fn primary_solr_name(&self, name: &str) -> ModelResult<String> {
        let definition = self.definition(name)?;
        Ok(field_name::solr_name(
            &self.apply_prefix(name),
            UsageTag::StoredSearchable,
            definition.index_type(),
        ))
    }

    /// Properties with index directives, in declaration order
    pub fn fields(&self) -> ModelResult<IndexMap<String, FieldInfo>> {
        let mut fields = IndexMap::new();
        for definition in self.kind.definitions() {
            if let Some(directive) = definition.index_directive() {
                fields.insert(
                    definition.name().to_string(),
                    FieldInfo {
                        values: self.values(definition.name())?,
                        value_type: definition.index_type(),
                        usage: directive.usage.clone(),
                    },
                );
            }
        }
        Ok(fields)
    }

    /// Project this datastream into `doc` and hand it back
    pub fn to_solr(&self, doc: IndexDocument) -> ModelResult<IndexDocument> {
        SearchIndexProjector::project_into(self, &IndexMap::new(), doc)
    }

    pub fn mime_type(&self) -> &'static str {
        self.kind.format.mime_type()
    }

    pub fn control_group(&self) -> &'static str {
        MANAGED_CONTROL_GROUP
    }

    /// True once a write went through since the last load or serialize
    pub fn changed(&self) -> bool {
        self.changed
    }
}
