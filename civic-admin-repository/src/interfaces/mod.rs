//! Interface definitions for the document store.
//!
//! This module defines the abstract `DocumentStore` trait that allows for
//! dependency injection and swappable database backends.

mod document_store;

pub use document_store::{DocumentStore, StoredDocument};
