//! Listing pipeline: search, filter, sort, paginate.

mod pagination;
mod sort;

pub use pagination::{clamp_page_after_delete, page_window, paginate, total_pages, Page};
pub use sort::{sort_records, SortOrder};

use chrono::{Local, TimeZone};

use crate::config::ListingConfig;
use crate::descriptor::EntityDescriptor;
use crate::filter::{filter_records_in, FilterCriteria};
use crate::search::search_records;
use civic_admin_shared::EntityRecord;

/// What a listing page asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingRequest {
    pub search: String,
    pub criteria: FilterCriteria,
    pub sort_order: SortOrder,
    /// 1-based; clamped when the listing is built.
    pub page: usize,
}

impl Default for ListingRequest {
    fn default() -> Self {
        Self {
            search: String::new(),
            criteria: FilterCriteria::default(),
            sort_order: SortOrder::default(),
            page: 1,
        }
    }
}

impl ListingRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_criteria(mut self, criteria: FilterCriteria) -> Self {
        self.criteria = criteria;
        self
    }

    pub fn with_sort_order(mut self, sort_order: SortOrder) -> Self {
        self.sort_order = sort_order;
        self
    }

    pub fn with_page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }

    /// Whether anything narrows or reorders the listing. Used to tell "no
    /// records" apart from "no records match".
    pub fn is_refined(&self) -> bool {
        !self.search.trim().is_empty()
            || !self.criteria.is_empty()
            || self.sort_order != SortOrder::default()
    }

    /// Build the requested page, with dates in the local time zone.
    pub fn run(
        &self,
        descriptor: &EntityDescriptor,
        records: &[EntityRecord],
        config: &ListingConfig,
    ) -> Page {
        self.run_in(descriptor, records, config, &Local)
    }

    /// Build the requested page, with dates in `tz`.
    pub fn run_in<Tz: TimeZone>(
        &self,
        descriptor: &EntityDescriptor,
        records: &[EntityRecord],
        config: &ListingConfig,
        tz: &Tz,
    ) -> Page {
        let found = search_records(descriptor, records, &self.search);
        let mut matching = filter_records_in(&found, &self.criteria, tz);
        sort_records(&mut matching, self.sort_order);
        paginate(
            matching,
            self.page,
            config.items_per_page,
            config.max_visible_pages,
        )
    }
}
