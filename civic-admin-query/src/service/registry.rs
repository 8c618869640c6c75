//! Static registry mapping entity kinds to their services.

use std::collections::HashMap;
use std::sync::Arc;

use crate::config::ResolverConfig;
use crate::errors::QueryError;
use crate::service::EntityService;
use civic_admin_repository::DocumentStore;
use civic_admin_shared::EntityKind;

/// Dispatches to the service for an entity kind.
///
/// Built once at startup; lookups never load anything at runtime.
#[derive(Default, Clone)]
pub struct ServiceRegistry {
    services: HashMap<EntityKind, Arc<EntityService>>,
}

impl ServiceRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry serving every entity kind from one store.
    pub fn with_all(store: Arc<dyn DocumentStore>, resolver_config: ResolverConfig) -> Self {
        EntityKind::ALL
            .into_iter()
            .fold(Self::new(), |registry, kind| {
                registry.register(EntityService::with_config(
                    kind,
                    store.clone(),
                    resolver_config.clone(),
                ))
            })
    }

    /// Add (or replace) the service for its kind.
    pub fn register(mut self, service: EntityService) -> Self {
        self.services.insert(service.kind(), Arc::new(service));
        self
    }

    /// The service for `kind`.
    ///
    /// # Returns
    ///
    /// * `Ok(&Arc<EntityService>)` - The registered service
    /// * `Err(QueryError::UnknownEntity)` - If no service is registered for `kind`
    pub fn service(&self, kind: EntityKind) -> Result<&Arc<EntityService>, QueryError> {
        self.services
            .get(&kind)
            .ok_or_else(|| QueryError::unknown_entity(kind.as_str()))
    }

    /// The service for an entity type given by name, e.g. `"petitions"`.
    pub fn service_by_name(&self, name: &str) -> Result<&Arc<EntityService>, QueryError> {
        let kind: EntityKind = name.parse()?;
        self.service(kind)
    }

    /// Registered kinds, in navigation order.
    pub fn kinds(&self) -> Vec<EntityKind> {
        let mut kinds: Vec<EntityKind> = self.services.keys().copied().collect();
        kinds.sort();
        kinds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use civic_admin_repository::MemoryDocumentStore;

    fn store() -> Arc<dyn DocumentStore> {
        Arc::new(MemoryDocumentStore::new())
    }

    #[test]
    fn test_with_all_registers_every_kind() {
        let registry = ServiceRegistry::with_all(store(), ResolverConfig::default());
        assert_eq!(registry.kinds(), EntityKind::ALL.to_vec());
        for kind in EntityKind::ALL {
            assert_eq!(registry.service(kind).unwrap().kind(), kind);
        }
    }

    #[test]
    fn test_dispatch_by_name() {
        let registry = ServiceRegistry::with_all(store(), ResolverConfig::default());
        assert_eq!(
            registry.service_by_name("requests").unwrap().kind(),
            EntityKind::Requests
        );
        assert_eq!(
            registry.service_by_name("complaints").err(),
            Some(QueryError::UnknownEntity("complaints".to_string()))
        );
    }

    #[test]
    fn test_unregistered_kind() {
        let registry = ServiceRegistry::new().register(EntityService::new(EntityKind::News, store()));
        assert!(registry.service(EntityKind::News).is_ok());
        assert!(matches!(
            registry.service(EntityKind::Events),
            Err(QueryError::UnknownEntity(name)) if name == "events"
        ));
    }
}
