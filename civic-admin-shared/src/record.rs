//! Entity records and localized text.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::category::CategoryRef;
use crate::{lenient, timestamp};

/// The three locales every localized field may carry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Ru,
    Kz,
    En,
}

impl Locale {
    pub const ALL: [Locale; 3] = [Locale::Ru, Locale::Kz, Locale::En];

    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::Ru => "ru",
            Locale::Kz => "kz",
            Locale::En => "en",
        }
    }
}

/// A text field stored once per locale.
///
/// Complete records carry all three variants; drafts may carry any subset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedText {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ru: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kz: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub en: Option<String>,
}

impl LocalizedText {
    pub fn new(ru: impl Into<String>, kz: impl Into<String>, en: impl Into<String>) -> Self {
        Self {
            ru: Some(ru.into()),
            kz: Some(kz.into()),
            en: Some(en.into()),
        }
    }

    pub fn get(&self, locale: Locale) -> Option<&str> {
        match locale {
            Locale::Ru => self.ru.as_deref(),
            Locale::Kz => self.kz.as_deref(),
            Locale::En => self.en.as_deref(),
        }
    }

    /// Whether every locale has a value.
    pub fn is_complete(&self) -> bool {
        Locale::ALL.iter().all(|locale| self.get(*locale).is_some())
    }
}

/// Look up a dotted path (`address.cityKey`) inside a JSON object.
pub fn value_at<'a>(fields: &'a Map<String, Value>, path: &str) -> Option<&'a Value> {
    let mut segments = path.split('.');
    let mut current = fields.get(segments.next()?)?;
    for segment in segments {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

/// The searchable strings held by a field value.
///
/// A plain string yields itself; a localized object yields its `ru`, `kz`
/// and `en` variants that are strings. Other shapes yield nothing.
pub fn text_variants(value: &Value) -> Vec<&str> {
    match value {
        Value::String(text) => vec![text.as_str()],
        Value::Object(map) => Locale::ALL
            .iter()
            .filter_map(|locale| map.get(locale.as_str()).and_then(Value::as_str))
            .collect(),
        _ => Vec::new(),
    }
}

/// A record of any entity kind, as fetched for one city.
///
/// Fields shared by every kind are typed; entity-specific fields (`title`,
/// `problem`, `address`, `mediaFiles`, ...) are kept verbatim in `fields`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityRecord {
    #[serde(default)]
    pub id: String,
    /// Top-level partition key. Requests keep theirs at `address.cityKey`.
    #[serde(
        default,
        deserialize_with = "lenient::string",
        skip_serializing_if = "Option::is_none"
    )]
    pub city_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryRef>,
    #[serde(
        default,
        deserialize_with = "lenient::string",
        skip_serializing_if = "Option::is_none"
    )]
    pub status: Option<String>,
    #[serde(default, with = "timestamp", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, with = "timestamp", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(
        default,
        deserialize_with = "lenient::string_list",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub tags: Vec<String>,
    /// Resolved at fetch time, never written back to the store.
    #[serde(
        default,
        deserialize_with = "lenient::string",
        skip_serializing_if = "Option::is_none"
    )]
    pub category_name: Option<String>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl EntityRecord {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            city_key: None,
            category_id: None,
            status: None,
            created_at: None,
            updated_at: None,
            tags: Vec::new(),
            category_name: None,
            fields: Map::new(),
        }
    }

    /// Creation time, with a missing timestamp treated as the epoch.
    pub fn created_or_epoch(&self) -> DateTime<Utc> {
        self.created_at.unwrap_or(DateTime::UNIX_EPOCH)
    }

    /// Entity-specific field at a dotted path.
    pub fn field(&self, path: &str) -> Option<&Value> {
        value_at(&self.fields, path)
    }

    /// Entity-specific field decoded as localized text.
    pub fn localized(&self, path: &str) -> Option<LocalizedText> {
        self.field(path)
            .and_then(|value| serde_json::from_value(value.clone()).ok())
    }

    /// The record's city, wherever its kind keeps it.
    pub fn city(&self) -> Option<&str> {
        self.city_key
            .as_deref()
            .or_else(|| self.field("address.cityKey").and_then(Value::as_str))
    }

    pub fn with_city(mut self, city_key: impl Into<String>) -> Self {
        self.city_key = Some(city_key.into());
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn with_category(mut self, category: CategoryRef) -> Self {
        self.category_id = Some(category);
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    pub fn with_field(mut self, name: impl Into<String>, value: Value) -> Self {
        self.fields.insert(name.into(), value);
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_deserialize_petition() {
        let record: EntityRecord = serde_json::from_value(json!({
            "id": "p1",
            "cityKey": "almaty",
            "title": {"ru": "Петиция о парке", "kz": "Саябақ", "en": "Park petition"},
            "problem": {"ru": "Нет деревьев"},
            "categoryId": "petitions_categories/c1",
            "status": "Published",
            "createdAt": {"seconds": 1_700_000_000, "nanoseconds": 0},
            "totalSignatures": 120,
            "targetSignatures": 500
        }))
        .unwrap();

        assert_eq!(record.id, "p1");
        assert_eq!(record.city(), Some("almaty"));
        assert_eq!(record.status.as_deref(), Some("Published"));
        assert_eq!(record.created_at.unwrap().timestamp(), 1_700_000_000);
        assert!(record.localized("title").unwrap().is_complete());
        assert_eq!(
            record.localized("problem").unwrap().get(Locale::Ru),
            Some("Нет деревьев")
        );
        assert_eq!(record.field("totalSignatures"), Some(&json!(120)));
        assert!(record.category_name.is_none());
    }

    #[test]
    fn test_request_city_is_nested() {
        let record: EntityRecord = serde_json::from_value(json!({
            "id": "r1",
            "address": {"cityKey": "astana", "formattedAddress": "пр. Мангилик Ел, 55"},
            "mediaFiles": [{"url": "https://cdn/x.jpg", "name": "x.jpg", "type": "image/jpeg", "size": 2048}]
        }))
        .unwrap();

        assert!(record.city_key.is_none());
        assert_eq!(record.city(), Some("astana"));
        assert_eq!(
            record.field("address.formattedAddress").and_then(Value::as_str),
            Some("пр. Мангилик Ел, 55")
        );
    }

    #[test]
    fn test_missing_and_malformed_timestamps() {
        let record: EntityRecord =
            serde_json::from_value(json!({"id": "n1", "createdAt": "not a date"})).unwrap();
        assert!(record.created_at.is_none());
        assert_eq!(record.created_or_epoch(), Utc.timestamp_opt(0, 0).unwrap());
    }

    #[test]
    fn test_wrong_typed_common_fields_do_not_reject_record() {
        let record: EntityRecord = serde_json::from_value(json!({
            "id": "p2",
            "cityKey": 5,
            "status": 3,
            "tags": "x",
            "categoryName": {"ru": "Экология"},
            "title": {"ru": "Петиция"}
        }))
        .unwrap();

        assert_eq!(record.id, "p2");
        assert!(record.city_key.is_none());
        assert!(record.status.is_none());
        assert!(record.tags.is_empty());
        assert!(record.category_name.is_none());
        assert!(record.localized("title").is_some());
    }

    #[test]
    fn test_text_variants() {
        assert_eq!(text_variants(&json!("plain")), vec!["plain"]);
        assert_eq!(
            text_variants(&json!({"en": "c", "ru": "a", "kz": "b", "de": "x"})),
            vec!["a", "b", "c"]
        );
        assert!(text_variants(&json!(3)).is_empty());
    }

    #[test]
    fn test_serialize_keeps_extra_fields() {
        let record = EntityRecord::new("e1")
            .with_city("shymkent")
            .with_status("published")
            .with_field("location", json!({"name": {"ru": "Площадь"}}));
        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(value["cityKey"], json!("shymkent"));
        assert_eq!(value["location"]["name"]["ru"], json!("Площадь"));
        assert!(value.get("createdAt").is_none());
    }
}
