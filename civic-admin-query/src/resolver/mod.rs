//! Category name resolution.
//!
//! Resolution never fails: absent, dangling or malformed references and
//! lookup errors all degrade to a fallback label, so one bad record cannot
//! block a whole listing.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::ResolverConfig;
use civic_admin_repository::{DocumentStore, StoreError, StoredDocument};
use civic_admin_shared::{Category, CategoryRef};

/// Normalize a category reference to a bare category id.
///
/// This is the one normalization used both to resolve names and to filter by
/// category, so a reference and the bare id of the same category always
/// compare equal.
pub fn normalize_category_id(category: Option<&CategoryRef>) -> Option<&str> {
    category.and_then(CategoryRef::normalized_id)
}

/// Resolves category references for one entity kind.
#[derive(Clone)]
pub struct CategoryResolver {
    store: Arc<dyn DocumentStore>,
    collection: &'static str,
    config: ResolverConfig,
}

impl CategoryResolver {
    /// Create a resolver looking up bare ids in `collection`.
    pub fn new(store: Arc<dyn DocumentStore>, collection: &'static str) -> Self {
        Self::with_config(store, collection, ResolverConfig::default())
    }

    /// Create a resolver with custom locale and fallback labels.
    pub fn with_config(
        store: Arc<dyn DocumentStore>,
        collection: &'static str,
        config: ResolverConfig,
    ) -> Self {
        Self {
            store,
            collection,
            config,
        }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolve a category reference to its display name.
    pub async fn resolve(&self, category: Option<&CategoryRef>) -> String {
        let lookup = match category {
            None => return self.config.uncategorized_label.clone(),
            Some(CategoryRef::Reference(reference)) => self.store.get_ref(reference).await,
            Some(CategoryRef::Id(raw)) => {
                let Some(id) = normalize_category_id(category) else {
                    return self.config.uncategorized_label.clone();
                };
                if id != raw {
                    debug!(raw = %raw, id = %id, "Stripped path prefix from category id");
                }
                self.store.get(self.collection, id).await
            }
            Some(CategoryRef::Invalid(value)) => {
                warn!(value = %value, "Category reference has an unsupported type");
                return self.config.uncategorized_label.clone();
            }
        };

        self.name_from_lookup(lookup)
    }

    fn name_from_lookup(&self, lookup: Result<Option<StoredDocument>, StoreError>) -> String {
        let document = match lookup {
            Ok(Some(document)) => document,
            Ok(None) => {
                debug!(collection = self.collection, "Category does not exist");
                return self.config.uncategorized_label.clone();
            }
            Err(e) => {
                warn!(error = %e, collection = self.collection, "Failed to fetch category");
                return self.config.uncategorized_label.clone();
            }
        };

        match document.decode::<Category>() {
            Ok(category) => category
                .display_name(self.config.locale)
                .map_or_else(|| self.config.unnamed_label.clone(), str::to_string),
            // The category exists, so a bad document only means it has no usable name.
            Err(e) => {
                warn!(error = %e, "Failed to decode category");
                self.config.unnamed_label.clone()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FlakyStore;
    use civic_admin_repository::MemoryDocumentStore;
    use civic_admin_shared::DocumentRef;
    use serde_json::json;

    fn store() -> Arc<MemoryDocumentStore> {
        Arc::new(
            MemoryDocumentStore::from_fixture(json!({
                "petitions_categories": [
                    {"id": "eco", "name": {"ru": "Экология", "kz": "Экология", "en": "Ecology"}},
                    {"id": "roads", "name": {"en": "Roads"}},
                    {"id": "plain", "name": "Транспорт"},
                    {"id": "broken", "name": 12},
                    {"id": "mixed", "name": {"ru": 5, "en": "Mixed"}}
                ],
                "news_categories": [
                    {"id": "city", "name": {"ru": "Город"}}
                ]
            }))
            .unwrap(),
        )
    }

    fn resolver() -> CategoryResolver {
        CategoryResolver::new(store(), "petitions_categories")
    }

    #[tokio::test]
    async fn test_absent_reference() {
        assert_eq!(resolver().resolve(None).await, "Uncategorized");
        assert_eq!(
            resolver().resolve(Some(&CategoryRef::Id(String::new()))).await,
            "Uncategorized"
        );
    }

    #[tokio::test]
    async fn test_bare_and_prefixed_ids() {
        let resolver = resolver();
        assert_eq!(
            resolver.resolve(Some(&CategoryRef::Id("eco".into()))).await,
            "Экология"
        );
        assert_eq!(
            resolver
                .resolve(Some(&CategoryRef::Id("petitions_categories/eco".into())))
                .await,
            "Экология"
        );
        assert_eq!(
            resolver.resolve(Some(&CategoryRef::Id("missing".into()))).await,
            "Uncategorized"
        );
    }

    #[tokio::test]
    async fn test_reference_is_followed_to_its_own_collection() {
        let resolver = resolver();
        let reference = CategoryRef::Reference(DocumentRef::new("news_categories", "city"));
        assert_eq!(resolver.resolve(Some(&reference)).await, "Город");

        let dangling = CategoryRef::Reference(DocumentRef::new("news_categories", "gone"));
        assert_eq!(resolver.resolve(Some(&dangling)).await, "Uncategorized");
    }

    #[tokio::test]
    async fn test_unnamed_and_plain_names() {
        let resolver = resolver();
        assert_eq!(
            resolver.resolve(Some(&CategoryRef::Id("roads".into()))).await,
            "Unnamed"
        );
        assert_eq!(
            resolver.resolve(Some(&CategoryRef::Id("plain".into()))).await,
            "Транспорт"
        );
        assert_eq!(
            resolver.resolve(Some(&CategoryRef::Id("broken".into()))).await,
            "Unnamed"
        );
        assert_eq!(
            resolver.resolve(Some(&CategoryRef::Id("mixed".into()))).await,
            "Unnamed"
        );
    }

    #[tokio::test]
    async fn test_invalid_type() {
        let invalid = CategoryRef::Invalid(json!(["eco"]));
        assert_eq!(resolver().resolve(Some(&invalid)).await, "Uncategorized");
    }

    #[tokio::test]
    async fn test_lookup_errors_degrade() {
        let store = store();
        store.fail_reads(true);
        let resolver = CategoryResolver::new(store, "petitions_categories");
        assert_eq!(
            resolver.resolve(Some(&CategoryRef::Id("eco".into()))).await,
            "Uncategorized"
        );

        let flaky = CategoryResolver::new(Arc::new(FlakyStore), "petitions_categories");
        assert_eq!(
            flaky.resolve(Some(&CategoryRef::Id("eco".into()))).await,
            "Uncategorized"
        );
        let orphan = CategoryRef::Reference(DocumentRef {
            path: "eco".to_string(),
            id: None,
        });
        assert_eq!(flaky.resolve(Some(&orphan)).await, "Uncategorized");
    }

    #[tokio::test]
    async fn test_custom_labels_and_locale() {
        let mut config = ResolverConfig::with_labels("Без категории", "Без названия");
        config.locale = civic_admin_shared::Locale::En;
        let resolver = CategoryResolver::with_config(store(), "petitions_categories", config);

        assert_eq!(
            resolver.resolve(Some(&CategoryRef::Id("roads".into()))).await,
            "Roads"
        );
        assert_eq!(resolver.resolve(None).await, "Без категории");
        assert_eq!(
            resolver
                .resolve(Some(&CategoryRef::Reference(DocumentRef::new(
                    "news_categories",
                    "city"
                ))))
                .await,
            "Без названия"
        );
    }

    #[test]
    fn test_normalize_equivalence() {
        let reference = CategoryRef::Reference(DocumentRef::new("petitions_categories", "eco"));
        let bare = CategoryRef::Id("eco".into());
        let prefixed = CategoryRef::Id("petitions_categories/eco".into());

        assert_eq!(normalize_category_id(Some(&reference)), Some("eco"));
        assert_eq!(normalize_category_id(Some(&bare)), Some("eco"));
        assert_eq!(normalize_category_id(Some(&prefixed)), Some("eco"));
        assert_eq!(normalize_category_id(None), None);
    }
}
