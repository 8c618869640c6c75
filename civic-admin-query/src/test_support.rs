//! Shared fixtures for query layer tests.

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::json;

use civic_admin_repository::{DocumentStore, StoreError, StoredDocument};
use civic_admin_shared::{CategoryRef, EntityRecord};

/// A store whose every operation fails.
pub struct FlakyStore;

#[async_trait]
impl DocumentStore for FlakyStore {
    async fn query_eq(
        &self,
        collection: &str,
        _field_path: &str,
        _value: &str,
    ) -> Result<Vec<StoredDocument>, StoreError> {
        Err(StoreError::connection(format!("{} unreachable", collection)))
    }

    async fn get(&self, collection: &str, _id: &str) -> Result<Option<StoredDocument>, StoreError> {
        Err(StoreError::connection(format!("{} unreachable", collection)))
    }

    async fn delete(&self, collection: &str, _id: &str) -> Result<(), StoreError> {
        Err(StoreError::connection(format!("{} unreachable", collection)))
    }
}

/// UTC timestamp on a given day of March 2024.
pub fn march(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, day, hour, 0, 0).unwrap()
}

/// A petition with a Russian title and the given status.
pub fn petition(id: &str, title_ru: &str, status: &str) -> EntityRecord {
    EntityRecord::new(id)
        .with_city("almaty")
        .with_status(status)
        .with_field(
            "title",
            json!({"ru": title_ru, "kz": "Өтініш", "en": "Petition"}),
        )
}

/// Attach a bare category id.
pub fn in_category(record: EntityRecord, id: &str) -> EntityRecord {
    record.with_category(CategoryRef::Id(id.to_string()))
}
