//! Status values stored on entity records.
//!
//! News and events use a lowercase editorial pair; surveys, petitions and
//! requests share a workflow vocabulary.

/// Workflow statuses used by surveys, petitions and requests.
pub const IN_PROGRESS: &str = "In progress";
pub const PUBLISHED: &str = "Published";
pub const REJECTED: &str = "Rejected";
pub const COMPLETED: &str = "Completed";
/// Not yet public. Surveys and petitions never show these in listings.
pub const DRAFT: &str = "Draft";

/// Editorial statuses used by news and events.
pub mod editorial {
    pub const DRAFT: &str = "draft";
    pub const PUBLISHED: &str = "published";
}
