//! Live multi-valued view over one (subject, predicate) pair

use std::fmt;
use tracing::warn;

use super::property::PropertyDefinition;
use super::value::{PropertyValue, ResourceRef};
use crate::error::ModelResult;
use crate::rdf::{RdfObject, RdfSubject, Triple, TripleStore};

/// Ordered values of one property, read from and written straight back to
/// the owning datastream's statements.
///
/// Nothing is cached: every read goes to the store, every write replaces or
/// edits the backing statements before returning.
pub struct BoundValueProxy<'a> {
    graph: &'a mut TripleStore,
    subject: RdfSubject,
    definition: &'a PropertyDefinition,
    changed: &'a mut bool,
}

impl<'a> BoundValueProxy<'a> {
    pub(crate) fn new(
        graph: &'a mut TripleStore,
        subject: RdfSubject,
        definition: &'a PropertyDefinition,
        changed: &'a mut bool,
    ) -> Self {
        Self {
            graph,
            subject,
            definition,
            changed,
        }
    }

    pub fn definition(&self) -> &PropertyDefinition {
        self.definition
    }

    pub fn subject(&self) -> &RdfSubject {
        &self.subject
    }

    fn objects(&self) -> Vec<&RdfObject> {
        self.graph.objects(&self.subject, self.definition.predicate())
    }

    pub fn len(&self) -> usize {
        self.objects().len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects().is_empty()
    }

    /// All values, coerced to the declared type
    pub fn values(&self) -> ModelResult<Vec<PropertyValue>> {
        let value_type = self.definition.value_type();
        self.objects()
            .into_iter()
            .map(|o| PropertyValue::from_object(o, value_type).map_err(Into::into))
            .collect()
    }

    /// All values; ones that fail coercion come back as their raw text
    pub fn values_lenient(&self) -> Vec<PropertyValue> {
        let value_type = self.definition.value_type();
        self.objects()
            .into_iter()
            .map(|o| {
                PropertyValue::from_object(o, value_type).unwrap_or_else(|e| {
                    warn!(property = self.definition.name(), error = %e, "Keeping uncoerced value");
                    PropertyValue::raw(o)
                })
            })
            .collect()
    }

    pub fn get(&self, index: usize) -> ModelResult<Option<PropertyValue>> {
        match self.objects().get(index) {
            Some(o) => Ok(Some(PropertyValue::from_object(o, self.definition.value_type())?)),
            None => Ok(None),
        }
    }

    pub fn first(&self) -> ModelResult<Option<PropertyValue>> {
        self.get(0)
    }

    pub fn contains(&self, value: &PropertyValue) -> bool {
        self.position(value).is_some()
    }

    /// Values joined by `separator`
    pub fn join(&self, separator: &str) -> ModelResult<String> {
        Ok(self
            .values()?
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(separator))
    }

    /// Values that point at other resources
    pub fn resources(&self) -> Vec<ResourceRef> {
        self.objects()
            .into_iter()
            .filter_map(|o| o.as_subject().map(ResourceRef::from))
            .collect()
    }

    pub fn iter(&self) -> ModelResult<std::vec::IntoIter<PropertyValue>> {
        Ok(self.values()?.into_iter())
    }

    /// Replace every value, keeping the given order
    pub fn set<V: Into<PropertyValue>>(&mut self, values: impl IntoIterator<Item = V>) -> ModelResult<()> {
        let value_type = self.definition.value_type();
        let objects = values
            .into_iter()
            .map(|v| v.into().to_object(value_type))
            .collect::<Result<Vec<_>, _>>()?;
        self.graph
            .replace(&self.subject, self.definition.predicate(), objects);
        *self.changed = true;
        Ok(())
    }

    /// Add one value after the existing ones
    pub fn append(&mut self, value: impl Into<PropertyValue>) -> ModelResult<()> {
        let object = value.into().to_object(self.definition.value_type())?;
        self.graph.insert(Triple::new(
            self.subject.clone(),
            self.definition.predicate().clone(),
            object,
        ));
        *self.changed = true;
        Ok(())
    }

    /// Remove the first statement holding `value`; absent values are ignored
    pub fn delete(&mut self, value: impl Into<PropertyValue>) -> bool {
        let value = value.into();
        match self.position(&value) {
            Some(n) => {
                let removed = self
                    .graph
                    .remove_nth(&self.subject, self.definition.predicate(), n);
                *self.changed |= removed;
                removed
            }
            None => false,
        }
    }

    fn position(&self, value: &PropertyValue) -> Option<usize> {
        let value_type = self.definition.value_type();
        let target = value.to_object(value_type).ok();
        self.objects().into_iter().position(|o| {
            target.as_ref() == Some(o)
                || PropertyValue::from_object(o, value_type).ok().as_ref() == Some(value)
        })
    }
}

impl fmt::Display for BoundValueProxy<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let values: Vec<String> = self
            .values_lenient()
            .iter()
            .map(|v| format!("{:?}", v.to_string()))
            .collect();
        write!(f, "[{}]", values.join(", "))
    }
}

impl fmt::Debug for BoundValueProxy<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundValueProxy")
            .field("subject", &self.subject.identifier())
            .field("property", &self.definition.name())
            .field("len", &self.len())
            .finish()
    }
}
