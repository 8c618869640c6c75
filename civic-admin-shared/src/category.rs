//! Category records and the polymorphic category reference stored on entities.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::record::{Locale, LocalizedText};

/// Strip a stored path prefix, keeping everything after the last `/`.
///
/// `"news_categories/abc"` becomes `"abc"`; a bare id is returned unchanged.
pub fn strip_path_prefix(raw: &str) -> &str {
    raw.rsplit_once('/').map_or(raw, |(_, id)| id)
}

/// A direct reference to another document, as stored by the document database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRef {
    /// Full document path, e.g. `petitions_categories/abc`.
    pub path: String,
    /// Document id, when the store includes it alongside the path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl DocumentRef {
    /// Build a reference to `id` inside `collection`.
    pub fn new(collection: &str, id: &str) -> Self {
        Self {
            path: format!("{}/{}", collection, id),
            id: Some(id.to_string()),
        }
    }

    /// The referenced document id: the explicit id, or the last path segment.
    pub fn id(&self) -> &str {
        match self.id.as_deref() {
            Some(id) if !id.is_empty() => id,
            _ => strip_path_prefix(&self.path),
        }
    }

    /// The collection path the referenced document lives in, if the path has one.
    pub fn collection(&self) -> Option<&str> {
        self.path
            .trim_end_matches('/')
            .rsplit_once('/')
            .map(|(collection, _)| collection)
            .filter(|collection| !collection.is_empty())
    }
}

/// The `categoryId` field of an entity record.
///
/// Stored data carries one of three shapes: a document reference, a bare id,
/// or an id with a leftover path prefix. Any other JSON value is kept as
/// `Invalid` so a single malformed record never fails a whole fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CategoryRef {
    Reference(DocumentRef),
    Id(String),
    Invalid(Value),
}

impl CategoryRef {
    /// Normalize to a bare category id.
    ///
    /// References yield their document id, strings have any path prefix
    /// stripped. Empty strings and invalid shapes have no id.
    pub fn normalized_id(&self) -> Option<&str> {
        let id = match self {
            CategoryRef::Reference(reference) => reference.id(),
            CategoryRef::Id(raw) => strip_path_prefix(raw),
            CategoryRef::Invalid(_) => return None,
        };
        (!id.is_empty()).then_some(id)
    }
}

/// The `name` field of a category: normally localized, occasionally a plain string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CategoryName {
    Localized(LocalizedText),
    Plain(String),
}

impl CategoryName {
    /// Read a raw `name` value. Locale entries that are not strings are
    /// ignored; any shape other than an object or a string is no name.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(name) => Some(CategoryName::Plain(name.clone())),
            Value::Object(map) => {
                let text = |locale: Locale| {
                    map.get(locale.as_str())
                        .and_then(Value::as_str)
                        .map(str::to_string)
                };
                Some(CategoryName::Localized(LocalizedText {
                    ru: text(Locale::Ru),
                    kz: text(Locale::Kz),
                    en: text(Locale::En),
                }))
            }
            _ => None,
        }
    }
}

fn lenient_name<'de, D>(deserializer: D) -> Result<Option<CategoryName>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(CategoryName::from_value))
}

/// A category document from one of the `{entity}_categories` collections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(default)]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_name")]
    pub name: Option<CategoryName>,
}

impl Category {
    /// The category's display name in `locale`, if it has a non-empty one.
    pub fn display_name(&self, locale: Locale) -> Option<&str> {
        let name = match self.name.as_ref()? {
            CategoryName::Localized(text) => text.get(locale)?,
            CategoryName::Plain(name) => name.as_str(),
        };
        (!name.trim().is_empty()).then_some(name)
    }
}
