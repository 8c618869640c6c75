use serde::Serialize;

use civic_admin_shared::EntityRecord;

/// One page of a listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub items: Vec<EntityRecord>,
    /// Number of records across all pages.
    pub total_items: usize,
    /// 1-based, always within `1..=total_pages`.
    pub current_page: usize,
    /// At least 1, even for an empty listing.
    pub total_pages: usize,
    /// Page links to show, ascending.
    pub page_numbers: Vec<usize>,
}

impl Page {
    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Number of pages needed for `total_items`; never less than 1.
pub fn total_pages(total_items: usize, per_page: usize) -> usize {
    total_items.div_ceil(per_page.max(1)).max(1)
}

/// Cut one page out of `records`.
///
/// `page` is 1-based and clamped into range, so page 0 is the first page and
/// a page past the end is the last one.
pub fn paginate(
    records: Vec<EntityRecord>,
    page: usize,
    per_page: usize,
    max_visible_pages: usize,
) -> Page {
    let per_page = per_page.max(1);
    let total_items = records.len();
    let total_pages = total_pages(total_items, per_page);
    let current_page = page.clamp(1, total_pages);

    let items = records
        .into_iter()
        .skip((current_page - 1) * per_page)
        .take(per_page)
        .collect();

    Page {
        items,
        total_items,
        current_page,
        total_pages,
        page_numbers: page_window(current_page, total_pages, max_visible_pages),
    }
}

/// Page numbers to show around `current_page`.
///
/// At most `max_visible` numbers, centred on the current page and shifted
/// to stay within `1..=total_pages` near either end.
pub fn page_window(current_page: usize, total_pages: usize, max_visible: usize) -> Vec<usize> {
    let max_visible = max_visible.max(1);
    if total_pages <= max_visible {
        return (1..=total_pages).collect();
    }

    let half = max_visible / 2;
    let mut start = current_page.saturating_sub(half).max(1);
    let mut end = (current_page + half).min(total_pages);

    if end - start + 1 < max_visible {
        if start == 1 {
            end = (start + max_visible - 1).min(total_pages);
        } else {
            start = (end + 1).saturating_sub(max_visible).max(1);
        }
    }
    // Even widths overshoot by one when centred.
    if end - start + 1 > max_visible {
        end = start + max_visible - 1;
    }

    (start..=end).collect()
}

/// The page to show after one record was deleted from a listing of
/// `remaining_items` (the count after deletion).
pub fn clamp_page_after_delete(current_page: usize, remaining_items: usize, per_page: usize) -> usize {
    current_page.clamp(1, total_pages(remaining_items, per_page))
}
