//! # Civic Admin Query
//!
//! This crate provides the data-access layer the back-office pages consume.
//!
//! ## Architecture
//!
//! 1. **Resolver**: turns polymorphic category references into display names
//! 2. **Service**: one descriptor-parametrized service per entity kind that
//!    fetches a city's records and deletes by id
//! 3. **Search / Filter / Listing**: in-memory search, filter, sort and
//!    pagination over a fetched result set
//! 4. **Cache**: a process-wide `entity:city` cache with explicit invalidation

pub mod cache;
pub mod config;
pub mod descriptor;
pub mod errors;
pub mod filter;
pub mod listing;
pub mod resolver;
pub mod search;
pub mod service;

#[cfg(test)]
pub(crate) mod test_support;

pub use cache::{CacheKey, DataCache};
pub use config::{ListingConfig, ResolverConfig};
pub use descriptor::EntityDescriptor;
pub use errors::QueryError;
pub use filter::{filter_records, filter_records_in, FilterCriteria};
pub use listing::{ListingRequest, Page, SortOrder};
pub use resolver::{normalize_category_id, CategoryResolver};
pub use search::search_records;
pub use service::{EntityService, ServiceRegistry};
