//! Per-entity descriptors.
//!
//! Everything that differs between news, events, surveys, petitions and
//! requests lives here, so fetching, searching and filtering are written once.

use civic_admin_shared::status::{self, editorial};
use civic_admin_shared::EntityKind;

/// Static description of one entity kind.
#[derive(Debug, PartialEq, Eq)]
pub struct EntityDescriptor {
    pub kind: EntityKind,
    /// Collection holding the records.
    pub collection: &'static str,
    /// Collection holding the categories bare ids are looked up in.
    pub category_collection: &'static str,
    /// Dotted path of the city partition key.
    pub partition_key: &'static str,
    /// Localized fields whose `ru`/`kz`/`en` variants are searched.
    pub localized_fields: &'static [&'static str],
    /// Plain string fields that are searched.
    pub text_fields: &'static [&'static str],
    /// Status dropped at fetch time, for kinds with a hidden draft state.
    pub excluded_status: Option<&'static str>,
    /// Search labels per status value.
    pub status_labels: &'static [(&'static str, &'static [&'static str])],
}

const EDITORIAL_LABELS: &[(&str, &[&str])] = &[
    (editorial::PUBLISHED, &["опубликовано"]),
    (editorial::DRAFT, &["черновик", "драфт"]),
];

const WORKFLOW_LABELS: &[(&str, &[&str])] = &[
    (status::PUBLISHED, &["опубликовано"]),
    (status::IN_PROGRESS, &["в процессе", "in progress"]),
    (status::REJECTED, &["отклонено", "rejected"]),
    (status::COMPLETED, &["завершено", "completed"]),
];

// Requests are never published, so they carry no label for it.
const REQUEST_LABELS: &[(&str, &[&str])] = &[
    (status::IN_PROGRESS, &["в процессе", "in progress"]),
    (status::REJECTED, &["отклонено", "rejected"]),
    (status::COMPLETED, &["завершено", "completed"]),
];

static NEWS: EntityDescriptor = EntityDescriptor {
    kind: EntityKind::News,
    collection: "news",
    category_collection: "news_categories",
    partition_key: "cityKey",
    localized_fields: &["title", "description", "content"],
    text_fields: &[],
    excluded_status: None,
    status_labels: EDITORIAL_LABELS,
};

static EVENTS: EntityDescriptor = EntityDescriptor {
    kind: EntityKind::Events,
    collection: "events",
    category_collection: "events_categories",
    partition_key: "cityKey",
    localized_fields: &["title", "description", "location.name", "location.address"],
    text_fields: &[],
    excluded_status: None,
    status_labels: EDITORIAL_LABELS,
};

static SURVEYS: EntityDescriptor = EntityDescriptor {
    kind: EntityKind::Surveys,
    collection: "surveys",
    category_collection: "surveys_categories",
    partition_key: "cityKey",
    localized_fields: &["title", "description"],
    text_fields: &[],
    excluded_status: Some(status::DRAFT),
    status_labels: WORKFLOW_LABELS,
};

static PETITIONS: EntityDescriptor = EntityDescriptor {
    kind: EntityKind::Petitions,
    collection: "petitions",
    category_collection: "petitions_categories",
    partition_key: "cityKey",
    localized_fields: &["title", "description", "problem", "solution"],
    text_fields: &[],
    excluded_status: Some(status::DRAFT),
    status_labels: WORKFLOW_LABELS,
};

static REQUESTS: EntityDescriptor = EntityDescriptor {
    kind: EntityKind::Requests,
    collection: "requests",
    category_collection: "requests_categories",
    partition_key: "address.cityKey",
    localized_fields: &["title", "description", "rejectionReason"],
    text_fields: &["address.formattedAddress"],
    excluded_status: None,
    status_labels: REQUEST_LABELS,
};

impl EntityDescriptor {
    /// The descriptor for `kind`.
    pub fn for_kind(kind: EntityKind) -> &'static EntityDescriptor {
        match kind {
            EntityKind::News => &NEWS,
            EntityKind::Events => &EVENTS,
            EntityKind::Surveys => &SURVEYS,
            EntityKind::Petitions => &PETITIONS,
            EntityKind::Requests => &REQUESTS,
        }
    }

    /// Whether fetches hide a draft status for this kind.
    pub fn supports_draft(&self) -> bool {
        self.excluded_status.is_some()
    }

    /// Search labels for a status value; empty when the status has none.
    pub fn labels_for(&self, status: &str) -> &'static [&'static str] {
        self.status_labels
            .iter()
            .find(|(value, _)| *value == status)
            .map(|(_, labels)| *labels)
            .unwrap_or(&[])
    }
}
