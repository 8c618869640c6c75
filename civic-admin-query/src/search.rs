//! In-memory search over a fetched result set.
//!
//! Matching is a case-insensitive substring test, OR-ed across the entity's
//! searchable fields. Matches keep their input order; there is no ranking.

use civic_admin_shared::{text_variants, EntityRecord};

use crate::descriptor::EntityDescriptor;

/// Search records of the kind described by `descriptor`.
///
/// An empty or whitespace-only query returns the records unchanged.
/// Otherwise a record matches when the trimmed, lowercased query occurs in:
///
/// - any locale variant of one of the descriptor's localized fields,
/// - one of its plain text fields,
/// - the resolved category name,
/// - any tag,
///
/// or when one of the record's status labels contains the query. The status
/// check runs the other way around (label contains query, not field contains
/// query), so `"опублик"` matches published records but `"опубликовано!"`
/// does not.
pub fn search_records(
    descriptor: &EntityDescriptor,
    records: &[EntityRecord],
    query: &str,
) -> Vec<EntityRecord> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return records.to_vec();
    }

    records
        .iter()
        .filter(|record| matches(descriptor, record, &needle))
        .cloned()
        .collect()
}

fn contains(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

fn matches(descriptor: &EntityDescriptor, record: &EntityRecord, needle: &str) -> bool {
    let field_match = descriptor
        .localized_fields
        .iter()
        .chain(descriptor.text_fields)
        .filter_map(|path| record.field(path))
        .any(|value| {
            text_variants(value)
                .into_iter()
                .any(|text| contains(text, needle))
        });
    if field_match {
        return true;
    }

    if record
        .category_name
        .as_deref()
        .is_some_and(|name| contains(name, needle))
    {
        return true;
    }

    if record.tags.iter().any(|tag| contains(tag, needle)) {
        return true;
    }

    record.status.as_deref().is_some_and(|status| {
        descriptor
            .labels_for(status)
            .iter()
            .any(|label| label.contains(needle))
    })
}
