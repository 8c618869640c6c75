//! In-memory `DocumentStore` implementation.

use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use super::fixtures::parse_fixture;
use crate::errors::StoreError;
use crate::interfaces::{DocumentStore, StoredDocument};
use civic_admin_shared::value_at;

/// Number of operations the store has served.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreStats {
    pub queries: usize,
    pub reads: usize,
    pub deletes: usize,
}

#[derive(Debug, Default)]
struct Faults {
    queries: AtomicBool,
    reads: AtomicBool,
    deletes: AtomicBool,
}

#[derive(Debug, Default)]
struct Counters {
    queries: AtomicUsize,
    reads: AtomicUsize,
    deletes: AtomicUsize,
}

/// A document store that keeps every collection in memory.
///
/// Documents keep their insertion order, so query results come back in the
/// order they were written, the way a real store returns a stable order.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    collections: RwLock<HashMap<String, Vec<StoredDocument>>>,
    faults: Faults,
    counters: Counters,
}

impl MemoryDocumentStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded from fixture JSON.
    pub fn from_fixture(fixture: Value) -> Result<Self, StoreError> {
        let collections = parse_fixture(fixture)?;
        Ok(Self {
            collections: RwLock::new(collections),
            ..Self::default()
        })
    }

    /// Create a store seeded from a fixture file on disk.
    pub async fn from_fixture_file(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| StoreError::fixture(format!("{}: {}", path.display(), e)))?;
        let fixture: Value = serde_json::from_str(&raw)
            .map_err(|e| StoreError::fixture(format!("{}: {}", path.display(), e)))?;

        let store = Self::from_fixture(fixture)?;
        info!(
            path = %path.display(),
            collections = store.collections.read().await.len(),
            "Loaded document fixture"
        );
        Ok(store)
    }

    /// Add a document with a generated id and return the id.
    pub async fn insert(&self, collection: &str, data: Value) -> Result<String, StoreError> {
        let id = Uuid::new_v4().to_string();
        self.insert_with_id(collection, &id, data).await?;
        Ok(id)
    }

    /// Write a document under a known id, replacing any existing document.
    pub async fn insert_with_id(
        &self,
        collection: &str,
        id: &str,
        data: Value,
    ) -> Result<(), StoreError> {
        let Value::Object(data) = data else {
            return Err(StoreError::decode(format!(
                "document {}/{} must be an object",
                collection, id
            )));
        };

        let mut collections = self.collections.write().await;
        let documents = collections.entry(collection.to_string()).or_default();
        match documents.iter_mut().find(|doc| doc.id == id) {
            Some(existing) => existing.data = data,
            None => documents.push(StoredDocument::new(id, data)),
        }
        Ok(())
    }

    /// Number of documents currently in `collection`.
    pub async fn len(&self, collection: &str) -> usize {
        self.collections
            .read()
            .await
            .get(collection)
            .map_or(0, Vec::len)
    }

    /// Make every subsequent query fail (or succeed again).
    pub fn fail_queries(&self, fail: bool) {
        self.faults.queries.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent point read fail (or succeed again).
    pub fn fail_reads(&self, fail: bool) {
        self.faults.reads.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent delete fail (or succeed again).
    pub fn fail_deletes(&self, fail: bool) {
        self.faults.deletes.store(fail, Ordering::SeqCst);
    }

    /// Operation counts since creation.
    pub fn stats(&self) -> StoreStats {
        StoreStats {
            queries: self.counters.queries.load(Ordering::SeqCst),
            reads: self.counters.reads.load(Ordering::SeqCst),
            deletes: self.counters.deletes.load(Ordering::SeqCst),
        }
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    #[instrument(skip(self))]
    async fn query_eq(
        &self,
        collection: &str,
        field_path: &str,
        value: &str,
    ) -> Result<Vec<StoredDocument>, StoreError> {
        self.counters.queries.fetch_add(1, Ordering::SeqCst);
        if self.faults.queries.load(Ordering::SeqCst) {
            return Err(StoreError::query(format!("query on {} rejected", collection)));
        }

        let collections = self.collections.read().await;
        let matches: Vec<StoredDocument> = collections
            .get(collection)
            .map(|documents| {
                documents
                    .iter()
                    .filter(|doc| {
                        value_at(&doc.data, field_path).and_then(Value::as_str) == Some(value)
                    })
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        debug!(count = matches.len(), "Query matched documents");
        Ok(matches)
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<StoredDocument>, StoreError> {
        self.counters.reads.fetch_add(1, Ordering::SeqCst);
        if self.faults.reads.load(Ordering::SeqCst) {
            return Err(StoreError::read(format!("read of {}/{} rejected", collection, id)));
        }

        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|documents| documents.iter().find(|doc| doc.id == id))
            .cloned())
    }

    #[instrument(skip(self))]
    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        self.counters.deletes.fetch_add(1, Ordering::SeqCst);
        if self.faults.deletes.load(Ordering::SeqCst) {
            return Err(StoreError::delete(format!(
                "delete of {}/{} rejected",
                collection, id
            )));
        }

        let mut collections = self.collections.write().await;
        if let Some(documents) = collections.get_mut(collection) {
            documents.retain(|doc| doc.id != id);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use civic_admin_shared::DocumentRef;
    use serde_json::json;

    fn seeded() -> MemoryDocumentStore {
        MemoryDocumentStore::from_fixture(json!({
            "petitions": [
                {"id": "p1", "cityKey": "almaty", "status": "Published"},
                {"id": "p2", "cityKey": "astana", "status": "Published"},
                {"id": "p3", "cityKey": "almaty", "status": "Draft"}
            ],
            "requests": [
                {"id": "r1", "address": {"cityKey": "almaty"}},
                {"id": "r2", "address": {"cityKey": "astana"}},
                {"id": "r3", "cityKey": "almaty"}
            ],
            "petitions_categories": [
                {"id": "c1", "name": {"ru": "Экология"}}
            ]
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_query_top_level_key_keeps_order() {
        let store = seeded();
        let docs = store.query_eq("petitions", "cityKey", "almaty").await.unwrap();
        let ids: Vec<_> = docs.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["p1", "p3"]);
    }

    #[tokio::test]
    async fn test_query_nested_key() {
        let store = seeded();
        let docs = store
            .query_eq("requests", "address.cityKey", "almaty")
            .await
            .unwrap();
        let ids: Vec<_> = docs.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["r1"]);
    }

    #[tokio::test]
    async fn test_query_unknown_collection_is_empty() {
        let store = seeded();
        assert!(store.query_eq("news", "cityKey", "almaty").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_and_get_ref() {
        let store = seeded();
        assert!(store.get("petitions_categories", "c1").await.unwrap().is_some());
        assert!(store.get("petitions_categories", "missing").await.unwrap().is_none());

        let reference = DocumentRef::new("petitions_categories", "c1");
        let doc = store.get_ref(&reference).await.unwrap().unwrap();
        assert_eq!(doc.id, "c1");

        let orphan = DocumentRef {
            path: "c1".to_string(),
            id: None,
        };
        assert!(matches!(
            store.get_ref(&orphan).await,
            Err(StoreError::InvalidReference(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_is_permanent_and_idempotent() {
        let store = seeded();
        store.delete("petitions", "p1").await.unwrap();
        store.delete("petitions", "p1").await.unwrap();
        store.delete("unknown", "x").await.unwrap();

        assert_eq!(store.len("petitions").await, 2);
        assert!(store.get("petitions", "p1").await.unwrap().is_none());
        assert_eq!(store.stats().deletes, 3);
    }

    #[tokio::test]
    async fn test_insert_assigns_ids_and_replaces() {
        let store = MemoryDocumentStore::new();
        let id = store
            .insert("news", json!({"cityKey": "almaty"}))
            .await
            .unwrap();
        assert!(Uuid::parse_str(&id).is_ok());

        store
            .insert_with_id("news", &id, json!({"cityKey": "astana"}))
            .await
            .unwrap();
        assert_eq!(store.len("news").await, 1);
        assert_eq!(
            store.query_eq("news", "cityKey", "astana").await.unwrap().len(),
            1
        );

        assert!(store.insert("news", json!("scalar")).await.is_err());
    }

    #[tokio::test]
    async fn test_fault_injection() {
        let store = seeded();

        store.fail_queries(true);
        assert!(matches!(
            store.query_eq("petitions", "cityKey", "almaty").await,
            Err(StoreError::QueryError(_))
        ));
        store.fail_queries(false);
        assert!(store.query_eq("petitions", "cityKey", "almaty").await.is_ok());

        store.fail_reads(true);
        assert!(store.get("petitions_categories", "c1").await.is_err());

        store.fail_deletes(true);
        assert!(store.delete("petitions", "p1").await.is_err());
        assert_eq!(store.len("petitions").await, 3);

        assert_eq!(
            store.stats(),
            StoreStats {
                queries: 2,
                reads: 1,
                deletes: 1
            }
        );
    }

    #[tokio::test]
    async fn test_from_fixture_file_missing() {
        let result = MemoryDocumentStore::from_fixture_file("/nonexistent/fixture.json").await;
        assert!(matches!(result, Err(StoreError::FixtureError(_))));
    }
}
