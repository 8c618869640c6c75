//! Process-wide cache of fetched listings, keyed by `entity:city`.
//!
//! Entries live until they are invalidated, refreshed or edited by a delete.
//! There is no TTL and no size bound; concurrent misses for the same key
//! each fetch, and the last write wins. A delete that lands while a fetch
//! for the same key is running is replayed onto that fetch's result.

mod key;

pub use key::CacheKey;

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info, instrument};

use crate::config::ListingConfig;
use crate::errors::QueryError;
use crate::listing::{clamp_page_after_delete, ListingRequest, Page};
use crate::service::{EntityService, ServiceRegistry};
use civic_admin_shared::{EntityKind, EntityRecord};

#[derive(Default)]
struct CacheState {
    entries: HashMap<CacheKey, Arc<Vec<EntityRecord>>>,
    /// Fetches currently running per key.
    in_flight: HashMap<CacheKey, usize>,
    /// Ids deleted while a fetch for the key was running.
    tombstones: HashMap<CacheKey, HashSet<String>>,
}

impl CacheState {
    fn begin_fetch(&mut self, key: &CacheKey) {
        *self.in_flight.entry(key.clone()).or_default() += 1;
    }

    /// Close one fetch and return the ids it must not bring back.
    fn end_fetch(&mut self, key: &CacheKey) -> HashSet<String> {
        let remaining = match self.in_flight.get_mut(key) {
            Some(count) => {
                *count = count.saturating_sub(1);
                *count
            }
            None => 0,
        };
        if remaining == 0 {
            self.in_flight.remove(key);
            self.tombstones.remove(key).unwrap_or_default()
        } else {
            self.tombstones.get(key).cloned().unwrap_or_default()
        }
    }

    fn remove_record(&mut self, key: &CacheKey, id: &str) {
        if let Some(records) = self.entries.get_mut(key) {
            let before = records.len();
            // Readers holding the old Arc keep their snapshot.
            Arc::make_mut(records).retain(|record| record.id != id);
            debug!(key = %key, removed = before - records.len(), "Updated cached listing");
        }
        if self.in_flight.contains_key(key) {
            self.tombstones
                .entry(key.clone())
                .or_default()
                .insert(id.to_string());
        }
    }
}

/// Cached city listings shared by every page of the back-office.
pub struct DataCache {
    registry: ServiceRegistry,
    state: RwLock<CacheState>,
    listing: ListingConfig,
}

impl DataCache {
    /// Create an empty cache over `registry`.
    pub fn new(registry: ServiceRegistry) -> Self {
        Self::with_listing_config(registry, ListingConfig::default())
    }

    pub fn with_listing_config(registry: ServiceRegistry, listing: ListingConfig) -> Self {
        Self {
            registry,
            state: RwLock::new(CacheState::default()),
            listing,
        }
    }

    pub fn registry(&self) -> &ServiceRegistry {
        &self.registry
    }

    pub fn listing_config(&self) -> &ListingConfig {
        &self.listing
    }

    /// Records of `kind` in a city, from cache when present.
    ///
    /// A miss fetches through the kind's service and caches the result.
    /// The lock is not held while fetching.
    ///
    /// # Returns
    ///
    /// * `Ok(Arc<Vec<EntityRecord>>)` - The city's records, newest first
    /// * `Err(QueryError)` - If the kind has no service or the fetch fails;
    ///   nothing is cached in that case
    #[instrument(skip(self), fields(entity = %kind))]
    pub async fn get_data(
        &self,
        kind: EntityKind,
        city_key: &str,
    ) -> Result<Arc<Vec<EntityRecord>>, QueryError> {
        let service = self.registry.service(kind)?;
        let key = CacheKey::new(kind, city_key);

        let cached = self.state.read().await.entries.get(&key).cloned();
        if let Some(records) = cached {
            debug!(key = %key, "Cache hit");
            return Ok(records);
        }

        debug!(key = %key, "Cache miss");
        self.fetch_into_cache(service, key).await
    }

    /// [`get_data`](Self::get_data) for an entity type given by name.
    pub async fn get_data_by_name(
        &self,
        entity: &str,
        city_key: &str,
    ) -> Result<Arc<Vec<EntityRecord>>, QueryError> {
        let kind = self.registry.service_by_name(entity)?.kind();
        self.get_data(kind, city_key).await
    }

    /// Delete a record and drop it from the cached listing.
    ///
    /// The cached entry is only edited when one exists; a delete never
    /// creates an entry. When the store delete fails the cache is left
    /// untouched.
    #[instrument(skip(self), fields(entity = %kind))]
    pub async fn delete_item(
        &self,
        kind: EntityKind,
        id: &str,
        city_key: &str,
    ) -> Result<(), QueryError> {
        let service = self.registry.service(kind)?;
        service.delete_by_id(id).await?;

        let key = CacheKey::new(kind, city_key);
        self.state.write().await.remove_record(&key, id);
        Ok(())
    }

    /// [`delete_item`](Self::delete_item) for an entity type given by name.
    pub async fn delete_item_by_name(
        &self,
        entity: &str,
        id: &str,
        city_key: &str,
    ) -> Result<(), QueryError> {
        let kind = self.registry.service_by_name(entity)?.kind();
        self.delete_item(kind, id, city_key).await
    }

    /// Delete a record shown on `page` and return the page to show next.
    ///
    /// The current page is kept unless the delete emptied it, in which case
    /// the last remaining page is returned.
    pub async fn delete_from_page(
        &self,
        kind: EntityKind,
        id: &str,
        city_key: &str,
        page: &Page,
    ) -> Result<usize, QueryError> {
        self.delete_item(kind, id, city_key).await?;
        Ok(clamp_page_after_delete(
            page.current_page,
            page.total_items.saturating_sub(1),
            self.listing.items_per_page,
        ))
    }

    /// Drop the cached entry and fetch it again.
    ///
    /// The entry stays cleared if the fetch fails.
    #[instrument(skip(self), fields(entity = %kind))]
    pub async fn refresh_data(
        &self,
        kind: EntityKind,
        city_key: &str,
    ) -> Result<Arc<Vec<EntityRecord>>, QueryError> {
        let service = self.registry.service(kind)?;
        let key = CacheKey::new(kind, city_key);
        self.state.write().await.entries.remove(&key);

        let records = self.fetch_into_cache(service, key.clone()).await?;
        info!(key = %key, count = records.len(), "Refreshed cached listing");
        Ok(records)
    }

    async fn fetch_into_cache(
        &self,
        service: &EntityService,
        key: CacheKey,
    ) -> Result<Arc<Vec<EntityRecord>>, QueryError> {
        self.state.write().await.begin_fetch(&key);
        let fetched = service.fetch_by_city(&key.city_key).await;

        let mut state = self.state.write().await;
        let deleted = state.end_fetch(&key);
        let mut records = fetched?;
        if !deleted.is_empty() {
            records.retain(|record| !deleted.contains(&record.id));
            debug!(key = %key, deleted = deleted.len(), "Dropped records deleted during fetch");
        }

        let records = Arc::new(records);
        state.entries.insert(key, records.clone());
        Ok(records)
    }

    /// Build one listing page from the (possibly cached) city records.
    pub async fn list(
        &self,
        kind: EntityKind,
        city_key: &str,
        request: &ListingRequest,
    ) -> Result<Page, QueryError> {
        let records = self.get_data(kind, city_key).await?;
        let descriptor = self.registry.service(kind)?.descriptor();
        Ok(request.run(descriptor, &records, &self.listing))
    }

    /// Evict one entry. Returns whether it was cached.
    pub async fn invalidate(&self, kind: EntityKind, city_key: &str) -> bool {
        let removed = self
            .state
            .write()
            .await
            .entries
            .remove(&CacheKey::new(kind, city_key))
            .is_some();
        if removed {
            debug!(entity = %kind, city = %city_key, "Invalidated cached listing");
        }
        removed
    }

    /// Keys currently cached, sorted.
    pub async fn cached_keys(&self) -> Vec<CacheKey> {
        let mut keys: Vec<CacheKey> = self.state.read().await.entries.keys().cloned().collect();
        keys.sort();
        keys
    }
}
