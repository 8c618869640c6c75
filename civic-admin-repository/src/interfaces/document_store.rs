//! Document store trait definition.
//!
//! This module defines the abstract interface for document database
//! operations, allowing for different backend implementations (a hosted
//! document database, the in-memory store, test mocks).

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::errors::StoreError;
use civic_admin_shared::DocumentRef;

/// A document as returned by the store: its id plus its raw fields.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    /// The document id, assigned by the store on creation.
    pub id: String,
    /// The document's fields, without the id.
    pub data: Map<String, Value>,
}

impl StoredDocument {
    /// Create a document from an id and its fields.
    pub fn new(id: impl Into<String>, data: Map<String, Value>) -> Self {
        Self {
            id: id.into(),
            data,
        }
    }

    /// Decode the document into a typed value, exposing the id as an `id` field.
    ///
    /// # Returns
    ///
    /// * `Ok(T)` - The decoded value
    /// * `Err(StoreError::DecodeError)` - If the fields do not match `T`
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, StoreError> {
        let mut fields = self.data.clone();
        fields.insert("id".to_string(), Value::String(self.id.clone()));
        serde_json::from_value(Value::Object(fields))
            .map_err(|e| StoreError::decode(format!("document {}: {}", self.id, e)))
    }
}

/// Abstract interface for document database operations.
///
/// This trait defines the operations the query layer needs from the document
/// database: partition-key equality queries, point reads and point deletes.
/// Implementations can be swapped for different backends, enabling easy
/// testing with mock implementations.
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync` to allow use across async tasks.
///
/// # Error Handling
///
/// All methods return `Result<T, StoreError>` for consistent error handling.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch every document in `collection` whose field at `field_path` equals `value`.
    ///
    /// # Arguments
    ///
    /// * `collection` - The collection to query (e.g. `petitions`)
    /// * `field_path` - Dotted path of the compared field (e.g. `address.cityKey`)
    /// * `value` - The string the field must equal
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<StoredDocument>)` - Matching documents, in store order
    /// * `Err(StoreError)` - If the query fails
    async fn query_eq(
        &self,
        collection: &str,
        field_path: &str,
        value: &str,
    ) -> Result<Vec<StoredDocument>, StoreError>;

    /// Read a single document by id.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(StoredDocument))` - If the document exists
    /// * `Ok(None)` - If it does not
    /// * `Err(StoreError)` - If the read fails
    async fn get(&self, collection: &str, id: &str) -> Result<Option<StoredDocument>, StoreError>;

    /// Permanently delete a document.
    ///
    /// Deleting a document that does not exist is not an error.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the document was deleted (or didn't exist)
    /// * `Err(StoreError)` - If the deletion fails
    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError>;

    /// Follow a document reference.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(StoredDocument))` - If the referenced document exists
    /// * `Ok(None)` - If it does not
    /// * `Err(StoreError::InvalidReference)` - If the path names no collection
    async fn get_ref(&self, reference: &DocumentRef) -> Result<Option<StoredDocument>, StoreError> {
        let collection = reference
            .collection()
            .ok_or_else(|| StoreError::invalid_reference(&reference.path))?;
        self.get(collection, reference.id()).await
    }
}
