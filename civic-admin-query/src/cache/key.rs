use std::fmt;

use civic_admin_shared::EntityKind;

/// Cache key: one entity kind in one city.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey {
    pub kind: EntityKind,
    pub city_key: String,
}

impl CacheKey {
    pub fn new(kind: EntityKind, city_key: impl Into<String>) -> Self {
        Self {
            kind,
            city_key: city_key.into(),
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.city_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            CacheKey::new(EntityKind::Requests, "almaty").to_string(),
            "requests:almaty"
        );
    }

    #[test]
    fn test_keys_differ_by_city_and_kind() {
        let a = CacheKey::new(EntityKind::News, "almaty");
        assert_ne!(a, CacheKey::new(EntityKind::News, "astana"));
        assert_ne!(a, CacheKey::new(EntityKind::Events, "almaty"));
        assert_eq!(a, CacheKey::new(EntityKind::News, "almaty".to_string()));
    }
}
