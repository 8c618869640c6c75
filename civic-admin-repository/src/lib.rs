//! # Civic Admin Repository
//!
//! This crate provides the document store abstraction the query layer reads
//! from and deletes through. It includes the error types, the `DocumentStore`
//! trait, and an in-memory implementation used for fixtures and tests.

pub mod errors;
pub mod interfaces;
pub mod memory;

pub use errors::StoreError;
pub use interfaces::{DocumentStore, StoredDocument};
pub use memory::MemoryDocumentStore;
