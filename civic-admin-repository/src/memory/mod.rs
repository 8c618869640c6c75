//! In-memory document store.
//!
//! Keeps collections in insertion order, assigns UUID ids, and can be seeded
//! from a JSON fixture. Used by the demo binary and by tests, which can also
//! inject failures per operation.

mod fixtures;
mod store;

pub use fixtures::parse_fixture;
pub use store::{MemoryDocumentStore, StoreStats};
