//! # Civic Admin
//!
//! Entry point and configuration for the civic admin data-access layer.
//!
//! The binary wires a document store, the entity service registry and the
//! shared cache together from environment variables, then prints one
//! listing page as JSON, optionally after deleting one record from it.

pub mod config;

pub use config::{AppConfig, Dependencies};

use thiserror::Error;

/// Errors that can occur during startup or while serving a listing.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Query layer error.
    #[error("Query error: {0}")]
    QueryError(#[from] civic_admin_query::QueryError),

    /// Document store error.
    #[error("Store error: {0}")]
    StoreError(#[from] civic_admin_repository::StoreError),

    /// Output serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl AppError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}
