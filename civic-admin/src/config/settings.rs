//! Settings read from the environment.

use std::env;
use std::path::PathBuf;

use crate::AppError;
use civic_admin_query::{FilterCriteria, ListingConfig, ListingRequest, SortOrder};
use civic_admin_shared::{find_city, EntityKind};

/// Default entity listed by the binary.
const DEFAULT_ENTITY: &str = "news";

/// Default city partition.
const DEFAULT_CITY: &str = "almaty";

/// Everything the binary needs to build one listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// JSON fixture to seed the in-memory store with. Empty store when unset.
    pub fixture_path: Option<PathBuf>,
    pub listing: ListingConfig,
    pub entity: EntityKind,
    pub city_key: String,
    pub request: ListingRequest,
    /// Record to delete from the requested page before printing it.
    pub delete_id: Option<String>,
}

fn parse_count(name: &str, raw: Option<String>, default: usize) -> Result<usize, AppError> {
    let Some(raw) = raw.filter(|raw| !raw.trim().is_empty()) else {
        return Ok(default);
    };
    match raw.trim().parse::<usize>() {
        Ok(0) => Err(AppError::config(format!("{} must be at least 1", name))),
        Ok(value) => Ok(value),
        Err(e) => Err(AppError::config(format!("{} {:?}: {}", name, raw, e))),
    }
}

impl AppConfig {
    /// Read settings from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `CIVIC_ADMIN_FIXTURE_PATH`: JSON fixture for the in-memory store
    /// - `CIVIC_ADMIN_ITEMS_PER_PAGE`: Records per page (default: 5)
    /// - `CIVIC_ADMIN_MAX_VISIBLE_PAGES`: Page links shown (default: 5)
    /// - `CIVIC_ADMIN_ENTITY`: Entity type to list (default: news)
    /// - `CIVIC_ADMIN_CITY`: City key (default: almaty)
    /// - `CIVIC_ADMIN_SEARCH`: Search query
    /// - `CIVIC_ADMIN_STATUS`: Status filter, `all` for none
    /// - `CIVIC_ADMIN_CATEGORY`: Category id filter, `all` for none
    /// - `CIVIC_ADMIN_DATE_FROM` / `CIVIC_ADMIN_DATE_TO`: `YYYY-MM-DD` bounds
    /// - `CIVIC_ADMIN_SORT`: `newest` (default) or `oldest`
    /// - `CIVIC_ADMIN_PAGE`: 1-based page (default: 1)
    /// - `CIVIC_ADMIN_DELETE_ID`: Record to delete from that page
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Read settings through `lookup`, which maps a variable name to its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = ListingConfig::default();
        let listing = ListingConfig::with_items_per_page(parse_count(
            "CIVIC_ADMIN_ITEMS_PER_PAGE",
            lookup("CIVIC_ADMIN_ITEMS_PER_PAGE"),
            defaults.items_per_page,
        )?)
        .max_visible_pages(parse_count(
            "CIVIC_ADMIN_MAX_VISIBLE_PAGES",
            lookup("CIVIC_ADMIN_MAX_VISIBLE_PAGES"),
            defaults.max_visible_pages,
        )?);

        let entity: EntityKind = lookup("CIVIC_ADMIN_ENTITY")
            .unwrap_or_else(|| DEFAULT_ENTITY.to_string())
            .parse()
            .map_err(|e| AppError::config(format!("CIVIC_ADMIN_ENTITY: {}", e)))?;

        let city_key = lookup("CIVIC_ADMIN_CITY").unwrap_or_else(|| DEFAULT_CITY.to_string());
        if find_city(&city_key).is_none() {
            return Err(AppError::config(format!("Unknown city: {}", city_key)));
        }

        let status = lookup("CIVIC_ADMIN_STATUS");
        let category = lookup("CIVIC_ADMIN_CATEGORY");
        let date_from = lookup("CIVIC_ADMIN_DATE_FROM");
        let date_to = lookup("CIVIC_ADMIN_DATE_TO");
        let criteria = FilterCriteria::from_params(
            status.as_deref(),
            category.as_deref(),
            date_from.as_deref(),
            date_to.as_deref(),
        )?;

        let request = ListingRequest::new()
            .with_search(lookup("CIVIC_ADMIN_SEARCH").unwrap_or_default())
            .with_criteria(criteria)
            .with_sort_order(SortOrder::parse_lenient(
                &lookup("CIVIC_ADMIN_SORT").unwrap_or_default(),
            ))
            .with_page(parse_count("CIVIC_ADMIN_PAGE", lookup("CIVIC_ADMIN_PAGE"), 1)?);

        Ok(Self {
            fixture_path: lookup("CIVIC_ADMIN_FIXTURE_PATH")
                .filter(|path| !path.trim().is_empty())
                .map(PathBuf::from),
            listing,
            entity,
            city_key,
            request,
            delete_id: lookup("CIVIC_ADMIN_DELETE_ID").filter(|id| !id.trim().is_empty()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use civic_admin_query::QueryError;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<AppConfig, AppError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]).unwrap();
        assert_eq!(config.entity, EntityKind::News);
        assert_eq!(config.city_key, "almaty");
        assert_eq!(config.listing, ListingConfig::default());
        assert_eq!(config.request, ListingRequest::new());
        assert!(config.fixture_path.is_none());
        assert!(config.delete_id.is_none());
    }

    #[test]
    fn test_full_configuration() {
        let config = config(&[
            ("CIVIC_ADMIN_FIXTURE_PATH", "fixtures/demo.json"),
            ("CIVIC_ADMIN_ITEMS_PER_PAGE", "10"),
            ("CIVIC_ADMIN_MAX_VISIBLE_PAGES", "7"),
            ("CIVIC_ADMIN_ENTITY", "petitions"),
            ("CIVIC_ADMIN_CITY", "astana"),
            ("CIVIC_ADMIN_SEARCH", "парк"),
            ("CIVIC_ADMIN_STATUS", "Published"),
            ("CIVIC_ADMIN_CATEGORY", "all"),
            ("CIVIC_ADMIN_DATE_FROM", "2024-03-01"),
            ("CIVIC_ADMIN_SORT", "oldest"),
            ("CIVIC_ADMIN_PAGE", "2"),
            ("CIVIC_ADMIN_DELETE_ID", "p7"),
        ])
        .unwrap();

        assert_eq!(config.fixture_path, Some(PathBuf::from("fixtures/demo.json")));
        assert_eq!(config.listing.items_per_page, 10);
        assert_eq!(config.listing.max_visible_pages, 7);
        assert_eq!(config.entity, EntityKind::Petitions);
        assert_eq!(config.city_key, "astana");
        assert_eq!(config.request.search, "парк");
        assert_eq!(config.request.criteria.status.as_deref(), Some("Published"));
        assert!(config.request.criteria.date_from.is_some());
        assert_eq!(config.request.sort_order, SortOrder::Oldest);
        assert_eq!(config.request.page, 2);
        assert_eq!(config.delete_id.as_deref(), Some("p7"));
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            config(&[("CIVIC_ADMIN_ENTITY", "complaints")]),
            Err(AppError::ConfigError(msg)) if msg.contains("complaints")
        ));
        assert!(matches!(
            config(&[("CIVIC_ADMIN_CITY", "moscow")]),
            Err(AppError::ConfigError(_))
        ));
        assert!(matches!(
            config(&[("CIVIC_ADMIN_ITEMS_PER_PAGE", "0")]),
            Err(AppError::ConfigError(_))
        ));
        assert!(matches!(
            config(&[("CIVIC_ADMIN_PAGE", "two")]),
            Err(AppError::ConfigError(_))
        ));
        assert!(matches!(
            config(&[("CIVIC_ADMIN_DATE_TO", "2024-13-01")]),
            Err(AppError::QueryError(QueryError::InvalidCriteria(_)))
        ));
    }

    #[test]
    fn test_unknown_sort_falls_back_to_newest() {
        let config = config(&[("CIVIC_ADMIN_SORT", "popular")]).unwrap();
        assert_eq!(config.request.sort_order, SortOrder::Newest);
    }
}
