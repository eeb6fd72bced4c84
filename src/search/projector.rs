//! Projection of datastream properties and relationships into index fields

use indexmap::IndexMap;
use tracing::debug;

use super::document::{FieldValue, IndexDocument};
use super::field_name::{relationship_field, solr_name, FieldDescriptor};
use crate::datastream::{PropertyValue, RdfDatastream, UsageTag, ValueType};
use crate::error::ModelResult;

/// Builds flat index documents from an object's datastreams.
///
/// Every property with values gets a plain stored-searchable field. Each
/// usage tag of its directive adds one more field; `sortable` holds the
/// first value only, the others hold the full ordered sequence.
pub struct SearchIndexProjector;

impl SearchIndexProjector {
    pub fn project(
        datastream: &RdfDatastream,
        relationship_ids: &IndexMap<String, Vec<String>>,
    ) -> ModelResult<IndexDocument> {
        Self::project_into(datastream, relationship_ids, IndexDocument::new())
    }

    /// Add the projected fields to an existing document
    pub fn project_into(
        datastream: &RdfDatastream,
        relationship_ids: &IndexMap<String, Vec<String>>,
        mut doc: IndexDocument,
    ) -> ModelResult<IndexDocument> {
        let before = doc.len();
        for definition in datastream.datastream_type().definitions() {
            let values = datastream.values(definition.name())?;
            if values.is_empty() {
                continue;
            }
            let prefixed = datastream.apply_prefix(definition.name());
            let value_type = definition.index_type();

            let (name, value) = project_field(&prefixed, UsageTag::StoredSearchable, value_type, &values);
            doc.insert(name, value);

            if let Some(directive) = definition.index_directive() {
                for usage in &directive.usage {
                    let (name, value) = project_field(&prefixed, *usage, value_type, &values);
                    doc.insert(name, value);
                }
            }
        }

        Self::project_relationships(relationship_ids, &mut doc);
        debug!(
            dsid = datastream.dsid(),
            fields = doc.len() - before,
            "Projected datastream"
        );
        Ok(doc)
    }

    /// One multi-valued `<key>_s` field per relationship
    pub fn project_relationships(relationship_ids: &IndexMap<String, Vec<String>>, doc: &mut IndexDocument) {
        for (key, ids) in relationship_ids {
            doc.extend_multi(relationship_field(key), ids.iter().cloned());
        }
    }
}

fn project_field(
    prefixed: &str,
    usage: UsageTag,
    value_type: ValueType,
    values: &[PropertyValue],
) -> (String, FieldValue) {
    let descriptor = FieldDescriptor::for_usage(usage, value_type);
    let render = |v: &PropertyValue| match descriptor.value_type {
        ValueType::Date => v.to_index_string(),
        _ => v.to_string(),
    };
    let name = solr_name(prefixed, usage, value_type);
    let value = if usage.is_single_valued() {
        FieldValue::Single(values.first().map(render).unwrap_or_default())
    } else {
        FieldValue::Multi(values.iter().map(render).collect())
    };
    (name, value)
}
