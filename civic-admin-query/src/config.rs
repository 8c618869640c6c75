//! Configuration types for the query layer.

use civic_admin_shared::Locale;

/// Label used when a record has no resolvable category.
pub const DEFAULT_UNCATEGORIZED_LABEL: &str = "Uncategorized";

/// Label used when a category exists but has no name in the resolver's locale.
pub const DEFAULT_UNNAMED_LABEL: &str = "Unnamed";

/// Configuration for category name resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Locale whose category name is shown.
    pub locale: Locale,
    /// Fallback when the reference is absent, dangling or malformed.
    pub uncategorized_label: String,
    /// Fallback when the category has no name in `locale`.
    pub unnamed_label: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            locale: Locale::Ru,
            uncategorized_label: DEFAULT_UNCATEGORIZED_LABEL.to_string(),
            unnamed_label: DEFAULT_UNNAMED_LABEL.to_string(),
        }
    }
}

impl ResolverConfig {
    /// Create a config with custom fallback labels (e.g. localized for the UI).
    pub fn with_labels(uncategorized: impl Into<String>, unnamed: impl Into<String>) -> Self {
        Self {
            uncategorized_label: uncategorized.into(),
            unnamed_label: unnamed.into(),
            ..Self::default()
        }
    }
}

/// Configuration for paginated listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListingConfig {
    /// Records shown per page. Always at least 1.
    pub items_per_page: usize,
    /// Maximum number of page links shown around the current page.
    pub max_visible_pages: usize,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            items_per_page: 5,
            max_visible_pages: 5,
        }
    }
}

impl ListingConfig {
    /// Create a config with a custom page size.
    pub fn with_items_per_page(items_per_page: usize) -> Self {
        Self {
            items_per_page: items_per_page.max(1),
            ..Self::default()
        }
    }

    /// Set the number of visible page links.
    pub fn max_visible_pages(mut self, max_visible_pages: usize) -> Self {
        self.max_visible_pages = max_visible_pages.max(1);
        self
    }
}
