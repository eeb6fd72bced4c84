//! Shared collaborators injected into entity instances

use std::sync::Arc;
use std::time::Duration;

use crate::config::ModelConfig;
use crate::error::ModelResult;
use crate::relationships::RelationshipRegistry;
use crate::search::{SearchIndex, SolrClient};

/// Registry, search index and configuration of one entity type.
///
/// Built once after every relationship is declared; cloning only bumps
/// reference counts.
#[derive(Clone)]
pub struct ModelContext {
    registry: Arc<RelationshipRegistry>,
    index: Arc<dyn SearchIndex>,
    config: Arc<ModelConfig>,
}

impl ModelContext {
    pub fn new(
        registry: Arc<RelationshipRegistry>,
        index: Arc<dyn SearchIndex>,
        config: Arc<ModelConfig>,
    ) -> Self {
        Self {
            registry,
            index,
            config,
        }
    }

    /// Context backed by the Solr core named in the configuration
    pub fn with_solr(registry: RelationshipRegistry, config: ModelConfig) -> ModelResult<Self> {
        let client = SolrClient::new(&config.solr.url, Duration::from_secs(config.solr.timeout_secs))?;
        Ok(Self::new(Arc::new(registry), Arc::new(client), Arc::new(config)))
    }

    pub fn registry(&self) -> &RelationshipRegistry {
        &self.registry
    }

    pub fn index(&self) -> &dyn SearchIndex {
        self.index.as_ref()
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }
}

impl std::fmt::Debug for ModelContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelContext")
            .field("model", &self.registry.model())
            .field("config", &self.config)
            .finish()
    }
}
