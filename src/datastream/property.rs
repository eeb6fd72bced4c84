//! Property declarations
//!
//! A `PropertyDefinition` binds a name to a predicate and optionally carries
//! an index directive and a value type. Definitions are built once per
//! datastream type and never change afterwards.

use serde::{Deserialize, Serialize};

use super::value::ValueType;
use crate::rdf::{NamespaceManager, RdfPredicate, RdfResult};

/// How a property is used in the search index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UsageTag {
    StoredSearchable,
    Searchable,
    Facetable,
    Sortable,
    Displayable,
    Symbol,
    Dateable,
}

impl UsageTag {
    pub fn name(&self) -> &'static str {
        match self {
            UsageTag::StoredSearchable => "stored_searchable",
            UsageTag::Searchable => "searchable",
            UsageTag::Facetable => "facetable",
            UsageTag::Sortable => "sortable",
            UsageTag::Displayable => "displayable",
            UsageTag::Symbol => "symbol",
            UsageTag::Dateable => "dateable",
        }
    }

    /// Single-valued fields take only the first value
    pub fn is_single_valued(&self) -> bool {
        matches!(self, UsageTag::Sortable)
    }
}

/// Usage tags plus the value type used to pick field suffixes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexDirective {
    pub usage: Vec<UsageTag>,
    #[serde(rename = "type")]
    pub value_type: ValueType,
}

impl Default for IndexDirective {
    fn default() -> Self {
        Self {
            usage: Vec::new(),
            value_type: ValueType::String,
        }
    }
}

impl IndexDirective {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add usage tags, ignoring repeats
    pub fn usage(mut self, tags: impl IntoIterator<Item = UsageTag>) -> Self {
        for tag in tags {
            if !self.usage.contains(&tag) {
                self.usage.push(tag);
            }
        }
        self
    }

    pub fn value_type(mut self, value_type: ValueType) -> Self {
        self.value_type = value_type;
        self
    }
}

/// A declared property of a datastream type
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDefinition {
    name: String,
    predicate: RdfPredicate,
    index: Option<IndexDirective>,
    value_type: Option<ValueType>,
    nested: Vec<PropertyDefinition>,
}

impl PropertyDefinition {
    /// Declare `name` bound to the predicate IRI
    ///
    /// Compact forms over the default prefixes (`dc:title`, `foaf:based_near`)
    /// are expanded first.
    pub fn new(name: impl Into<String>, predicate: &str) -> RdfResult<Self> {
        let predicate = NamespaceManager::shared().resolve(predicate);
        Ok(Self {
            name: name.into(),
            predicate: RdfPredicate::new(&predicate)?,
            index: None,
            value_type: None,
            nested: Vec::new(),
        })
    }

    /// Configure the index directive
    ///
    /// ```rust
    /// use fedora_model::datastream::{PropertyDefinition, UsageTag, ValueType};
    ///
    /// let created = PropertyDefinition::new("created", "http://purl.org/dc/terms/created")
    ///     .unwrap()
    ///     .index(|i| i.usage([UsageTag::Sortable, UsageTag::Displayable]).value_type(ValueType::Date));
    /// assert_eq!(created.value_type(), Some(ValueType::Date));
    /// ```
    ///
    /// A date-typed directive also coerces values on read unless
    /// `coerce_as` says otherwise.
    pub fn index(mut self, configure: impl FnOnce(IndexDirective) -> IndexDirective) -> Self {
        let directive = configure(self.index.take().unwrap_or_default());
        if self.value_type.is_none() && directive.value_type != ValueType::String {
            self.value_type = Some(directive.value_type);
        }
        self.index = Some(directive);
        self
    }

    /// Coerce literals to `value_type` on read and write
    pub fn coerce_as(mut self, value_type: ValueType) -> Self {
        self.value_type = Some(value_type);
        self
    }

    /// Declare a property of the resources this property points at
    pub fn nested(mut self, definition: PropertyDefinition) -> Self {
        self.nested.push(definition);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn predicate(&self) -> &RdfPredicate {
        &self.predicate
    }

    pub fn index_directive(&self) -> Option<&IndexDirective> {
        self.index.as_ref()
    }

    pub fn value_type(&self) -> Option<ValueType> {
        self.value_type
    }

    /// Type used for field suffixes
    pub fn index_type(&self) -> ValueType {
        self.index
            .as_ref()
            .map(|i| i.value_type)
            .or(self.value_type)
            .unwrap_or(ValueType::String)
    }

    pub fn nested_definitions(&self) -> &[PropertyDefinition] {
        &self.nested
    }

    pub fn nested_definition(&self, name: &str) -> Option<&PropertyDefinition> {
        self.nested.iter().find(|d| d.name == name)
    }

    pub fn has_nested(&self) -> bool {
        !self.nested.is_empty()
    }
}
