//! Document store error types.
//!
//! This module defines the error types that can occur while talking to the
//! document database.

use thiserror::Error;

/// Errors that can occur during document store operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Failed to reach the document store.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// A partition query failed.
    #[error("Query error: {0}")]
    QueryError(String),

    /// A point read failed.
    #[error("Read error: {0}")]
    ReadError(String),

    /// A point delete failed.
    #[error("Delete error: {0}")]
    DeleteError(String),

    /// A stored document could not be decoded into the requested type.
    #[error("Decode error: {0}")]
    DecodeError(String),

    /// A document reference does not point into a collection.
    #[error("Invalid reference: {0}")]
    InvalidReference(String),

    /// Fixture data could not be loaded.
    #[error("Fixture error: {0}")]
    FixtureError(String),
}

impl StoreError {
    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }

    /// Create a query error.
    pub fn query(msg: impl Into<String>) -> Self {
        Self::QueryError(msg.into())
    }

    /// Create a read error.
    pub fn read(msg: impl Into<String>) -> Self {
        Self::ReadError(msg.into())
    }

    /// Create a delete error.
    pub fn delete(msg: impl Into<String>) -> Self {
        Self::DeleteError(msg.into())
    }

    /// Create a decode error.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::DecodeError(msg.into())
    }

    /// Create an invalid reference error.
    pub fn invalid_reference(path: &str) -> Self {
        Self::InvalidReference(format!("path={}", path))
    }

    /// Create a fixture error.
    pub fn fixture(msg: impl Into<String>) -> Self {
        Self::FixtureError(msg.into())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::DecodeError(err.to_string())
    }
}
