//! JSON fixture loading.
//!
//! A fixture maps collection names to arrays of documents:
//!
//! ```json
//! {
//!   "news": [{"id": "n1", "cityKey": "almaty", "status": "published"}],
//!   "news_categories": [{"id": "c1", "name": {"ru": "Город"}}]
//! }
//! ```
//!
//! Documents without an `id` get a generated one.

use std::collections::HashMap;

use serde_json::Value;
use uuid::Uuid;

use crate::errors::StoreError;
use crate::interfaces::StoredDocument;

/// Parse fixture JSON into per-collection document lists.
pub fn parse_fixture(fixture: Value) -> Result<HashMap<String, Vec<StoredDocument>>, StoreError> {
    let Value::Object(collections) = fixture else {
        return Err(StoreError::fixture("fixture root must be an object"));
    };

    let mut parsed = HashMap::with_capacity(collections.len());
    for (collection, documents) in collections {
        let Value::Array(documents) = documents else {
            return Err(StoreError::fixture(format!(
                "collection {} must be an array",
                collection
            )));
        };

        let mut stored = Vec::with_capacity(documents.len());
        for (index, document) in documents.into_iter().enumerate() {
            let Value::Object(mut data) = document else {
                return Err(StoreError::fixture(format!(
                    "{}[{}] must be an object",
                    collection, index
                )));
            };
            let id = match data.remove("id") {
                Some(Value::String(id)) if !id.is_empty() => id,
                Some(Value::String(_)) | None => Uuid::new_v4().to_string(),
                Some(other) => {
                    return Err(StoreError::fixture(format!(
                        "{}[{}] has a non-string id: {}",
                        collection, index, other
                    )))
                }
            };
            stored.push(StoredDocument::new(id, data));
        }
        parsed.insert(collection, stored);
    }

    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_fixture() {
        let parsed = parse_fixture(json!({
            "news": [
                {"id": "n1", "cityKey": "almaty"},
                {"cityKey": "astana"}
            ],
            "news_categories": []
        }))
        .unwrap();

        let news = &parsed["news"];
        assert_eq!(news.len(), 2);
        assert_eq!(news[0].id, "n1");
        assert!(!news[0].data.contains_key("id"));
        assert!(Uuid::parse_str(&news[1].id).is_ok());
        assert!(parsed["news_categories"].is_empty());
    }

    #[test]
    fn test_parse_fixture_rejects_bad_shapes() {
        assert!(matches!(
            parse_fixture(json!([])),
            Err(StoreError::FixtureError(_))
        ));
        assert!(matches!(
            parse_fixture(json!({"news": {"id": "n1"}})),
            Err(StoreError::FixtureError(_))
        ));
        assert!(matches!(
            parse_fixture(json!({"news": ["n1"]})),
            Err(StoreError::FixtureError(_))
        ));
        assert!(matches!(
            parse_fixture(json!({"news": [{"id": 7}]})),
            Err(StoreError::FixtureError(_))
        ));
    }
}
