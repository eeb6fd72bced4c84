//! Model configuration
//!
//! Loaded from YAML; every field has a default so an empty document is a
//! valid configuration.
//!
//! ```yaml
//! subject_namespace: "info:fedora/"
//! model_namespace: afmodel
//! default_rows: 25
//! bidirectional_raw: disjunctive
//! solr:
//!   url: http://localhost:8983/solr/development
//! predicate_mappings:
//!   "http://projecthydra.org/ns/relations#":
//!     is_governed_by: isGovernedBy
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::datastream::DEFAULT_SUBJECT_NAMESPACE;
use crate::rdf::PredicateMappings;
use crate::search::DEFAULT_ROWS;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// How the raw response of a bidirectional relationship is fetched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RawCombination {
    /// One query: outbound ids OR inbound predicate
    #[default]
    Disjunctive,
    /// One query per side, returned separately
    Separate,
}

/// Search index connection settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolrConfig {
    pub url: String,
    pub timeout_secs: u64,
}

impl Default for SolrConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:8983/solr/development".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Settings shared by every entity of an application
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Prefix of default subjects and internal URIs
    pub subject_namespace: String,

    /// Namespace of content-model identifiers (`info:fedora/afmodel:Book`)
    pub model_namespace: String,

    /// Row limit for index-backed finders
    pub default_rows: usize,

    pub bidirectional_raw: RawCombination,

    pub solr: SolrConfig,

    /// Extra short predicate names: namespace IRI -> short name -> local name
    pub predicate_mappings: IndexMap<String, IndexMap<String, String>>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            subject_namespace: DEFAULT_SUBJECT_NAMESPACE.to_string(),
            model_namespace: "afmodel".to_string(),
            default_rows: DEFAULT_ROWS,
            bidirectional_raw: RawCombination::default(),
            solr: SolrConfig::default(),
            predicate_mappings: IndexMap::new(),
        }
    }
}

impl ModelConfig {
    /// Load configuration from a YAML file, then apply `SOLR_URL` if set
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::from_yaml_str(&content)?;
        if let Ok(url) = std::env::var("SOLR_URL") {
            config.solr.url = url;
        }
        Ok(config)
    }

    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        let config: ModelConfig = if content.trim().is_empty() {
            ModelConfig::default()
        } else {
            serde_yaml::from_str(content)?
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.default_rows == 0 {
            return Err(ConfigError::Invalid("default_rows must be positive".to_string()));
        }
        if self.subject_namespace.is_empty() {
            return Err(ConfigError::Invalid("subject_namespace is empty".to_string()));
        }
        if self.model_namespace.is_empty() {
            return Err(ConfigError::Invalid("model_namespace is empty".to_string()));
        }
        Ok(())
    }

    /// URI identifying a content model, e.g. `info:fedora/afmodel:Page`
    pub fn model_uri(&self, model: &str) -> String {
        format!("{}{}:{}", self.subject_namespace, self.model_namespace, model)
    }

    /// Built-in Fedora relation names plus the configured ones
    pub fn predicate_mappings(&self) -> PredicateMappings {
        let mut mappings = PredicateMappings::fedora();
        for (namespace, entries) in &self.predicate_mappings {
            mappings.insert_namespace(namespace, entries);
        }
        mappings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ModelConfig::from_yaml_str("").unwrap();
        assert_eq!(config.default_rows, 25);
        assert_eq!(config.subject_namespace, "info:fedora/");
        assert_eq!(config.bidirectional_raw, RawCombination::Disjunctive);
        assert_eq!(config.model_uri("Page"), "info:fedora/afmodel:Page");
    }

    #[test]
    fn test_partial_yaml() {
        let config = ModelConfig::from_yaml_str(
            "default_rows: 10\nbidirectional_raw: separate\nsolr:\n  url: http://solr:8983/solr/test\n",
        )
        .unwrap();
        assert_eq!(config.default_rows, 10);
        assert_eq!(config.bidirectional_raw, RawCombination::Separate);
        assert_eq!(config.solr.url, "http://solr:8983/solr/test");
        assert_eq!(config.solr.timeout_secs, 30);
        assert_eq!(config.model_namespace, "afmodel");
    }

    #[test]
    fn test_invalid_rows() {
        assert!(matches!(
            ModelConfig::from_yaml_str("default_rows: 0"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            ModelConfig::from_yaml_str("default_rows: [1"),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_extra_predicate_mappings() {
        let config = ModelConfig::from_yaml_str(
            "predicate_mappings:\n  \"http://projecthydra.org/ns/relations#\":\n    is_governed_by: isGovernedBy\n",
        )
        .unwrap();
        let mappings = config.predicate_mappings();
        assert_eq!(
            mappings.iri("is_governed_by"),
            Some("http://projecthydra.org/ns/relations#isGovernedBy")
        );
        assert!(mappings.iri("is_part_of").is_some());
    }
}
