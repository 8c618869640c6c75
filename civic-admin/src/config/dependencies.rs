//! Dependency initialization and wiring for the civic admin binary.

use std::sync::Arc;

use tracing::{info, warn};

use crate::config::AppConfig;
use crate::AppError;
use civic_admin_query::{DataCache, Page, ResolverConfig, ServiceRegistry};
use civic_admin_repository::{DocumentStore, MemoryDocumentStore};

/// Container for all initialized dependencies.
pub struct Dependencies {
    pub config: AppConfig,
    /// Cache shared by every listing, backed by the service registry.
    pub cache: Arc<DataCache>,
}

impl Dependencies {
    /// Initialize all dependencies from environment variables.
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(AppError)` - If the configuration is invalid or the fixture
    ///   cannot be loaded
    pub async fn new() -> Result<Self, AppError> {
        Self::from_config(AppConfig::from_env()?).await
    }

    /// Initialize dependencies from an already parsed configuration.
    pub async fn from_config(config: AppConfig) -> Result<Self, AppError> {
        info!(
            entity = %config.entity,
            city = %config.city_key,
            items_per_page = config.listing.items_per_page,
            "Initializing dependencies"
        );

        let store: Arc<dyn DocumentStore> = match &config.fixture_path {
            Some(path) => Arc::new(MemoryDocumentStore::from_fixture_file(path).await?),
            None => {
                warn!("CIVIC_ADMIN_FIXTURE_PATH not set, starting with an empty store");
                Arc::new(MemoryDocumentStore::new())
            }
        };

        let registry = ServiceRegistry::with_all(store, ResolverConfig::default());
        info!(kinds = registry.kinds().len(), "Service registry ready");

        let cache = Arc::new(DataCache::with_listing_config(registry, config.listing));

        Ok(Self { config, cache })
    }

    /// Build the configured listing page.
    ///
    /// With a `delete_id` the record is deleted first and the page that
    /// remains valid afterwards is returned.
    pub async fn listing(&self) -> Result<Page, AppError> {
        let config = &self.config;
        let page = self
            .cache
            .list(config.entity, &config.city_key, &config.request)
            .await?;
        let Some(id) = &config.delete_id else {
            return Ok(page);
        };

        let next = self
            .cache
            .delete_from_page(config.entity, id, &config.city_key, &page)
            .await?;
        info!(id = %id, page = next, "Deleted record");

        let request = config.request.clone().with_page(next);
        Ok(self
            .cache
            .list(config.entity, &config.city_key, &request)
            .await?)
    }
}
