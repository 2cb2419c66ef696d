use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

pub use crate::entity::entry::EntryStatus;

/// A user's application to a project, keyed by (project_id, user_id).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entry {
    pub project_id: Uuid,
    pub user_id: Uuid,
    pub status: EntryStatus,
    /// Set once when the entry is first created; never reset by transitions.
    pub entry_date: OffsetDateTime,
}

/// Optional filters for entry listings; an omitted field means no constraint.
#[derive(Debug, Clone, Copy, Default)]
pub struct EntryFilter {
    pub status: Option<EntryStatus>,
    pub user_id: Option<Uuid>,
    pub project_id: Option<Uuid>,
}
