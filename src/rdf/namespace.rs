//! RDF namespace, prefix and predicate-name management
//!
//! `NamespaceManager` handles compact IRI notation. `PredicateMappings`
//! resolves the short relationship predicate names used by models
//! (`is_part_of`, `has_model`) to full IRIs and back.

use indexmap::IndexMap;
use std::collections::HashMap;
use std::sync::OnceLock;
use thiserror::Error;

use super::vocab;

/// Prefix errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PrefixError {
    /// Unknown prefix
    #[error("Unknown prefix: {0}")]
    UnknownPrefix(String),

    /// Invalid IRI
    #[error("Invalid IRI: {0}")]
    InvalidIri(String),
}

pub type PrefixResult<T> = Result<T, PrefixError>;

/// One `prefix: <iri>` binding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace {
    pub prefix: String,
    pub iri: String,
}

impl Namespace {
    pub fn new(prefix: impl Into<String>, iri: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            iri: iri.into(),
        }
    }
}

/// Prefix table seeded with the vocabularies repository metadata uses
#[derive(Debug, Clone)]
pub struct NamespaceManager {
    prefixes: HashMap<String, String>,
}

impl NamespaceManager {
    /// Create a new namespace manager with common prefixes
    pub fn new() -> Self {
        let mut mgr = Self {
            prefixes: HashMap::new(),
        };

        mgr.add_prefix("rdf", "http://www.w3.org/1999/02/22-rdf-syntax-ns#");
        mgr.add_prefix("rdfs", "http://www.w3.org/2000/01/rdf-schema#");
        mgr.add_prefix("xsd", "http://www.w3.org/2001/XMLSchema#");
        mgr.add_prefix("foaf", "http://xmlns.com/foaf/0.1/");
        mgr.add_prefix("dc", "http://purl.org/dc/terms/");
        mgr.add_prefix("dc11", "http://purl.org/dc/elements/1.1/");
        mgr.add_prefix("fedora-model", vocab::fedora::MODEL_NS);
        mgr.add_prefix("fedora-relations", vocab::fedora::RELATIONS_NS);
        mgr.add_prefix("fcrepo4", vocab::fcrepo4::NS);

        mgr
    }

    /// Process-wide table of the default prefixes
    pub fn shared() -> &'static NamespaceManager {
        static SHARED: OnceLock<NamespaceManager> = OnceLock::new();
        SHARED.get_or_init(NamespaceManager::new)
    }

    /// Add a prefix
    pub fn add_prefix(&mut self, prefix: impl Into<String>, iri: impl Into<String>) {
        self.prefixes.insert(prefix.into(), iri.into());
    }

    /// Get IRI for a prefix
    pub fn get_iri(&self, prefix: &str) -> PrefixResult<&str> {
        self.prefixes
            .get(prefix)
            .map(|s| s.as_str())
            .ok_or_else(|| PrefixError::UnknownPrefix(prefix.to_string()))
    }

    /// Expand a compact IRI (prefix:local) to full IRI
    pub fn expand(&self, compact_iri: &str) -> PrefixResult<String> {
        match compact_iri.split_once(':') {
            Some((prefix, local)) => {
                let iri = self.get_iri(prefix)?;
                Ok(format!("{}{}", iri, local))
            }
            None => Err(PrefixError::InvalidIri(compact_iri.to_string())),
        }
    }

    /// Expand `iri` when it starts with a registered prefix, otherwise return it unchanged
    ///
    /// Absolute IRIs such as `info:fedora/...` pass through because `info`
    /// is not a registered prefix.
    pub fn resolve(&self, iri: &str) -> String {
        match iri.split_once(':') {
            Some((prefix, local)) if !local.starts_with("//") => match self.prefixes.get(prefix) {
                Some(ns) => format!("{}{}", ns, local),
                None => iri.to_string(),
            },
            _ => iri.to_string(),
        }
    }

    /// Compact an IRI using the longest matching namespace
    pub fn compact(&self, iri: &str) -> Option<String> {
        self.prefixes
            .iter()
            .filter(|(_, ns)| iri.starts_with(ns.as_str()))
            .max_by_key(|(_, ns)| ns.len())
            .map(|(prefix, ns)| format!("{}:{}", prefix, &iri[ns.len()..]))
    }

    /// Get all registered prefixes
    pub fn prefixes(&self) -> Vec<Namespace> {
        self.prefixes
            .iter()
            .map(|(prefix, iri)| Namespace::new(prefix.clone(), iri.clone()))
            .collect()
    }
}

impl Default for NamespaceManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Short predicate name ↔ full IRI table
///
/// Short names double as search-index field stems, so `is_part_of`
/// is queried as `is_part_of_s`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredicateMappings {
    by_name: IndexMap<String, String>,
    by_iri: HashMap<String, String>,
}

impl PredicateMappings {
    /// Empty table
    pub fn empty() -> Self {
        Self {
            by_name: IndexMap::new(),
            by_iri: HashMap::new(),
        }
    }

    /// Fedora relations-external and model predicates
    pub fn fedora() -> Self {
        let mut mappings = Self::empty();
        for local in vocab::fedora::RELATIONS {
            mappings.insert(&underscore_local(local), &format!("{}{}", vocab::fedora::RELATIONS_NS, local));
        }
        mappings.insert("has_model", vocab::fedora::HAS_MODEL);
        mappings
    }

    /// Register `name` as shorthand for `iri`; a later mapping for the same
    /// name replaces the earlier one
    pub fn insert(&mut self, name: &str, iri: &str) {
        if let Some(previous) = self.by_name.insert(name.to_string(), iri.to_string()) {
            self.by_iri.remove(&previous);
        }
        self.by_iri.insert(iri.to_string(), name.to_string());
    }

    /// Register every `short: local` pair of a namespace
    pub fn insert_namespace<'a>(&mut self, namespace: &str, entries: impl IntoIterator<Item = (&'a String, &'a String)>) {
        for (name, local) in entries {
            self.insert(name, &format!("{}{}", namespace, local));
        }
    }

    /// Full IRI for a short name
    pub fn iri(&self, name: &str) -> Option<&str> {
        self.by_name.get(name).map(|s| s.as_str())
    }

    /// Short name for a full IRI
    pub fn name(&self, iri: &str) -> Option<&str> {
        self.by_iri.get(iri).map(|s| s.as_str())
    }

    /// Accepts either a short name or a mapped IRI; returns (short name, IRI)
    pub fn resolve(&self, name_or_iri: &str) -> Option<(&str, &str)> {
        if let Some((name, iri)) = self.by_name.get_key_value(name_or_iri) {
            return Some((name.as_str(), iri.as_str()));
        }
        self.by_iri
            .get_key_value(name_or_iri)
            .map(|(iri, name)| (name.as_str(), iri.as_str()))
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

impl Default for PredicateMappings {
    fn default() -> Self {
        Self::fedora()
    }
}

/// `isPartOf` → `is_part_of`
fn underscore_local(local: &str) -> String {
    let mut out = String::with_capacity(local.len() + 4);
    for (i, c) in local.chars().enumerate() {
        if c.is_ascii_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}
