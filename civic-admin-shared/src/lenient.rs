//! Tolerant field decoders.
//!
//! Store documents are loosely typed. A common field with an unexpected type
//! decodes to its empty value instead of rejecting the whole record.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// A string field; any other type is `None`.
pub fn string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(Value::String(value)) => Some(value),
        _ => None,
    })
}

/// A list of strings; non-string items are dropped, a non-array is empty.
pub fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(value) => Some(value),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}
