//! Error types for the query layer.

use thiserror::Error;

use civic_admin_repository::StoreError;
use civic_admin_shared::{EntityKind, ParseEntityKindError};

/// Errors surfaced by the query layer to its callers.
///
/// Category resolution never produces one of these: it degrades to a
/// fallback name instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QueryError {
    /// Fetching a city's records failed. Nothing was returned or cached.
    #[error("Fetch error for {entity}: {source}")]
    Fetch {
        entity: EntityKind,
        #[source]
        source: StoreError,
    },

    /// Deleting a record failed. The cache was left untouched.
    #[error("Delete error for {entity}/{id}: {source}")]
    Delete {
        entity: EntityKind,
        id: String,
        #[source]
        source: StoreError,
    },

    /// The entity type is not one the registry serves.
    #[error("Unknown entity type: {0}")]
    UnknownEntity(String),

    /// A filter parameter could not be parsed.
    #[error("Invalid criteria: {0}")]
    InvalidCriteria(String),
}

impl QueryError {
    /// Create a fetch error.
    pub fn fetch(entity: EntityKind, source: StoreError) -> Self {
        Self::Fetch { entity, source }
    }

    /// Create a delete error.
    pub fn delete(entity: EntityKind, id: impl Into<String>, source: StoreError) -> Self {
        Self::Delete {
            entity,
            id: id.into(),
            source,
        }
    }

    /// Create an unknown entity error.
    pub fn unknown_entity(name: impl Into<String>) -> Self {
        Self::UnknownEntity(name.into())
    }

    /// Create an invalid criteria error.
    pub fn invalid_criteria(msg: impl Into<String>) -> Self {
        Self::InvalidCriteria(msg.into())
    }
}

impl From<ParseEntityKindError> for QueryError {
    fn from(err: ParseEntityKindError) -> Self {
        Self::UnknownEntity(err.0)
    }
}
