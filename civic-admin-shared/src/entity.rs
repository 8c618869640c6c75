//! The closed set of entity kinds managed by the back-office.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Returned when a string does not name one of the managed entity kinds.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown entity type: {0}")]
pub struct ParseEntityKindError(pub String);

/// One of the five record types staff manage per city.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    News,
    Events,
    Surveys,
    Petitions,
    Requests,
}

impl EntityKind {
    /// Every entity kind, in navigation order.
    pub const ALL: [EntityKind; 5] = [
        EntityKind::News,
        EntityKind::Events,
        EntityKind::Surveys,
        EntityKind::Petitions,
        EntityKind::Requests,
    ];

    /// The canonical lowercase name, which is also the collection name.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::News => "news",
            EntityKind::Events => "events",
            EntityKind::Surveys => "surveys",
            EntityKind::Petitions => "petitions",
            EntityKind::Requests => "requests",
        }
    }

    /// Name of the document collection holding records of this kind.
    pub fn collection(&self) -> &'static str {
        self.as_str()
    }

    /// Name of the collection holding this kind's categories.
    pub fn category_collection(&self) -> &'static str {
        match self {
            EntityKind::News => "news_categories",
            EntityKind::Events => "events_categories",
            EntityKind::Surveys => "surveys_categories",
            EntityKind::Petitions => "petitions_categories",
            EntityKind::Requests => "requests_categories",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = ParseEntityKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EntityKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s.trim())
            .ok_or_else(|| ParseEntityKindError(s.to_string()))
    }
}
