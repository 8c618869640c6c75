use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use civic_admin_shared::EntityRecord;

/// Listing order by creation time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Newest,
    Oldest,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Newest => "newest",
            SortOrder::Oldest => "oldest",
        }
    }

    /// Parse a query-string value. Anything unrecognized is `Newest`.
    pub fn parse_lenient(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "newest" => Ok(SortOrder::Newest),
            "oldest" => Ok(SortOrder::Oldest),
            other => Err(format!("Unknown sort order: {}", other)),
        }
    }
}

/// Stable sort by creation time. Missing timestamps count as the epoch.
pub fn sort_records(records: &mut [EntityRecord], order: SortOrder) {
    match order {
        SortOrder::Newest => {
            records.sort_by(|a, b| b.created_or_epoch().cmp(&a.created_or_epoch()))
        }
        SortOrder::Oldest => records.sort_by_key(EntityRecord::created_or_epoch),
    }
}
