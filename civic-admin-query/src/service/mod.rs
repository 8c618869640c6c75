//! Entity query service.
//!
//! One service type serves every entity kind; the differences come from the
//! kind's [`EntityDescriptor`].

mod registry;

pub use registry::ServiceRegistry;

use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, info, instrument, warn};

use crate::config::ResolverConfig;
use crate::descriptor::EntityDescriptor;
use crate::errors::QueryError;
use crate::resolver::CategoryResolver;
use crate::search::search_records;
use civic_admin_repository::{DocumentStore, StoreError};
use civic_admin_shared::{EntityKind, EntityRecord};

/// Fetches and deletes records of one entity kind.
pub struct EntityService {
    descriptor: &'static EntityDescriptor,
    store: Arc<dyn DocumentStore>,
    resolver: CategoryResolver,
}

impl EntityService {
    /// Create a service for `kind` with default category resolution.
    pub fn new(kind: EntityKind, store: Arc<dyn DocumentStore>) -> Self {
        Self::with_config(kind, store, ResolverConfig::default())
    }

    /// Create a service for `kind` with custom category resolution settings.
    pub fn with_config(
        kind: EntityKind,
        store: Arc<dyn DocumentStore>,
        resolver_config: ResolverConfig,
    ) -> Self {
        let descriptor = EntityDescriptor::for_kind(kind);
        let resolver = CategoryResolver::with_config(
            store.clone(),
            descriptor.category_collection,
            resolver_config,
        );
        Self {
            descriptor,
            store,
            resolver,
        }
    }

    pub fn kind(&self) -> EntityKind {
        self.descriptor.kind
    }

    pub fn descriptor(&self) -> &'static EntityDescriptor {
        self.descriptor
    }

    /// Fetch every visible record of this kind in a city, newest first.
    ///
    /// Hidden drafts are dropped, each record gets its `category_name`
    /// resolved, and records are stably sorted by `created_at` descending
    /// (records without a timestamp sort last).
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<EntityRecord>)` - The city's records
    /// * `Err(QueryError::Fetch)` - If the store query fails; nothing is
    ///   returned partially. A malformed document is skipped, not fatal.
    #[instrument(skip(self), fields(entity = %self.kind()))]
    pub async fn fetch_by_city(&self, city_key: &str) -> Result<Vec<EntityRecord>, QueryError> {
        let kind = self.kind();
        let documents = self
            .store
            .query_eq(self.descriptor.collection, self.descriptor.partition_key, city_key)
            .await
            .map_err(|e| QueryError::fetch(kind, e))?;

        let mut records = Vec::with_capacity(documents.len());
        for document in &documents {
            let record: EntityRecord = match document.decode() {
                Ok(record) => record,
                Err(e) => {
                    warn!(id = %document.id, error = %e, "Skipping undecodable document");
                    continue;
                }
            };
            if self.is_hidden(&record) {
                debug!(id = %record.id, "Skipping hidden draft");
                continue;
            }
            records.push(record);
        }

        // Lookups are independent reads; join_all keeps record order.
        let names = join_all(
            records
                .iter()
                .map(|record| self.resolver.resolve(record.category_id.as_ref())),
        )
        .await;
        for (record, name) in records.iter_mut().zip(names) {
            record.category_name = Some(name);
        }

        records.sort_by(|a, b| b.created_or_epoch().cmp(&a.created_or_epoch()));

        info!(
            city = %city_key,
            fetched = documents.len(),
            count = records.len(),
            "Fetched records"
        );
        Ok(records)
    }

    /// Permanently delete a record. The cache is the caller's concern.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the record was deleted (or didn't exist)
    /// * `Err(QueryError::Delete)` - If the id is empty or the store fails
    #[instrument(skip(self), fields(entity = %self.kind()))]
    pub async fn delete_by_id(&self, id: &str) -> Result<(), QueryError> {
        if id.trim().is_empty() {
            return Err(QueryError::delete(
                self.kind(),
                id,
                StoreError::delete("id is required"),
            ));
        }

        self.store
            .delete(self.descriptor.collection, id)
            .await
            .map_err(|e| QueryError::delete(self.kind(), id, e))?;

        info!(id = %id, "Deleted record");
        Ok(())
    }

    /// Search records of this kind. See [`search_records`].
    pub fn search(&self, records: &[EntityRecord], query: &str) -> Vec<EntityRecord> {
        search_records(self.descriptor, records, query)
    }

    fn is_hidden(&self, record: &EntityRecord) -> bool {
        self.descriptor.excluded_status.is_some()
            && record.status.as_deref() == self.descriptor.excluded_status
    }
}
