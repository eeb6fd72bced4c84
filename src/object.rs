//! Digital objects: a relationship graph plus named RDF datastreams

use indexmap::map::Entry;
use indexmap::IndexMap;
use std::sync::Arc;
use tracing::debug;

use crate::context::ModelContext;
use crate::datastream::{DatastreamType, RdfDatastream};
use crate::error::{ModelError, ModelResult};
use crate::rdf::vocab::fedora::HAS_MODEL;
use crate::relationships::SemanticNode;
use crate::search::{IndexDocument, SearchIndexProjector};

/// One repository object
#[derive(Debug, Clone)]
pub struct DigitalObject {
    node: SemanticNode,
    datastreams: IndexMap<String, RdfDatastream>,
}

impl DigitalObject {
    /// New object of the context's model; a known pid also records `has_model`
    pub fn new(context: ModelContext, pid: Option<&str>) -> ModelResult<Self> {
        let mut object = Self {
            node: SemanticNode::new(context, None),
            datastreams: IndexMap::new(),
        };
        if let Some(pid) = pid {
            object.assign_pid(pid)?;
        }
        Ok(object)
    }

    pub fn pid(&self) -> Option<&str> {
        self.node.pid()
    }

    /// Content model URI, e.g. `info:fedora/afmodel:Book`
    pub fn model_uri(&self) -> String {
        let context = self.node.context();
        context.config().model_uri(context.registry().model())
    }

    /// Give the object its identifier and rebind every datastream subject
    pub fn assign_pid(&mut self, pid: &str) -> ModelResult<()> {
        self.node.assign_pid(pid);
        for datastream in self.datastreams.values_mut() {
            datastream.assign_pid(pid);
        }
        let model = self.model_uri();
        self.node.add_relationship(HAS_MODEL, &model)
    }

    pub fn node(&self) -> &SemanticNode {
        &self.node
    }

    pub fn node_mut(&mut self) -> &mut SemanticNode {
        &mut self.node
    }

    /// Attach an RDF datastream. Replacing a dsid is allowed; a different
    /// dsid whose field prefix is already taken is not.
    pub fn add_datastream(&mut self, kind: Arc<DatastreamType>, dsid: &str) -> ModelResult<&mut RdfDatastream> {
        let datastream = RdfDatastream::with_subject_namespace(
            kind,
            self.node.pid(),
            dsid,
            &self.node.context().config().subject_namespace,
        );
        let prefix = datastream.prefixer().prefix();
        if let Some(existing) = self
            .datastreams
            .values()
            .find(|ds| ds.dsid() != dsid && ds.prefixer().prefix() == prefix)
        {
            return Err(ModelError::PrefixCollision {
                prefix: prefix.to_string(),
                existing: existing.dsid().to_string(),
                incoming: dsid.to_string(),
            });
        }

        debug!(pid = ?self.node.pid(), dsid, kind = datastream.datastream_type().name(), "Attached datastream");
        Ok(match self.datastreams.entry(dsid.to_string()) {
            Entry::Occupied(mut entry) => {
                entry.insert(datastream);
                entry.into_mut()
            }
            Entry::Vacant(entry) => entry.insert(datastream),
        })
    }

    pub fn datastream(&self, dsid: &str) -> Option<&RdfDatastream> {
        self.datastreams.get(dsid)
    }

    pub fn datastream_mut(&mut self, dsid: &str) -> Option<&mut RdfDatastream> {
        self.datastreams.get_mut(dsid)
    }

    pub fn datastreams(&self) -> impl Iterator<Item = &RdfDatastream> {
        self.datastreams.values()
    }

    /// Full index document: `id`, relationship fields, then every datastream
    pub fn to_solr(&self) -> ModelResult<IndexDocument> {
        let pid = self
            .pid()
            .ok_or_else(|| ModelError::UnboundSubject(self.model_uri()))?;
        let mut doc = IndexDocument::new();
        doc.insert("id", pid);
        SearchIndexProjector::project_relationships(&self.node.relationships_for_index(), &mut doc);
        for datastream in self.datastreams.values() {
            doc = datastream.to_solr(doc)?;
        }
        Ok(doc)
    }
}

impl AsRef<SemanticNode> for DigitalObject {
    fn as_ref(&self) -> &SemanticNode {
        &self.node
    }
}

impl AsMut<SemanticNode> for DigitalObject {
    fn as_mut(&mut self) -> &mut SemanticNode {
        &mut self.node
    }
}
