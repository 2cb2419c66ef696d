use sea_orm::DatabaseConnection;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{Entry, EntryFilter, EntryStatus, UserRole};
use crate::repositories::{EntryRepository, ProjectRepository};
use crate::services::policy;

/// Entry lifecycle service.
///
/// Owns every legal status change and the one-row-per-(project, user)
/// invariant. Status moves along these edges only:
///
///   (absent) --apply--> PENDING --withdraw--> WITHDRAWN --re-apply--> PENDING
///   PENDING --admin review--> APPROVED | REJECTED   (both terminal)
///
/// Creation and reactivation go through `apply_or_reactivate`; every other
/// status change goes through `transition`, which validates the edge and the
/// caller's role.
pub struct EntryService;

impl EntryService {
    /// Apply to a project, creating the entry in PENDING, or reactivate a
    /// withdrawn one. Applying while already PENDING is a no-op.
    ///
    /// Fails with NotFound when the project does not exist and with
    /// InvalidTransition when the entry has already been approved or
    /// rejected. `entry_date` defaults to now and is written only on first
    /// creation; reactivation keeps the original date.
    pub async fn apply_or_reactivate(
        db: &DatabaseConnection,
        project_id: Uuid,
        user_id: Uuid,
        entry_date: Option<OffsetDateTime>,
    ) -> AppResult<Entry> {
        if !ProjectRepository::exists(db, project_id).await? {
            return Err(AppError::NotFound("Project".to_string()));
        }

        let entry_date = entry_date.unwrap_or_else(OffsetDateTime::now_utc);

        match EntryRepository::upsert_pending(db, project_id, user_id, entry_date).await {
            Ok(entry) => Ok(entry),
            // The upsert refuses to touch a row in a terminal status; a lost
            // first-application race never lands here because the loser's
            // conflict branch still matches PENDING.
            Err(AppError::Conflict(_)) => {
                let status = EntryRepository::find(db, project_id, user_id)
                    .await?
                    .map(|entry| entry.status)
                    .ok_or_else(|| AppError::NotFound("Entry".to_string()))?;

                Err(AppError::InvalidTransition(format!(
                    "cannot re-apply: entry is already {}",
                    status
                )))
            }
            Err(e) => Err(e),
        }
    }

    /// Move an existing entry to `requested`, validating the state table and
    /// the caller's role. Only the status is written; entry_date is kept.
    pub async fn transition(
        db: &DatabaseConnection,
        project_id: Uuid,
        user_id: Uuid,
        requested: EntryStatus,
        caller_role: UserRole,
    ) -> AppResult<Entry> {
        let entry = EntryRepository::find(db, project_id, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Entry".to_string()))?;

        if !policy::can_set_status(caller_role, requested) {
            return Err(AppError::InvalidTransition(format!(
                "{} may not set status {}",
                caller_role, requested
            )));
        }

        if !Self::is_allowed(entry.status, requested) {
            return Err(AppError::InvalidTransition(format!(
                "{} -> {} is not a legal transition",
                entry.status, requested
            )));
        }

        EntryRepository::update_status(db, project_id, user_id, requested).await
    }

    /// Look up an entry; absence is a valid, expected result
    pub async fn find(
        db: &DatabaseConnection,
        project_id: Uuid,
        user_id: Uuid,
    ) -> AppResult<Option<Entry>> {
        EntryRepository::find(db, project_id, user_id).await
    }

    /// All entries matching the filter, ordered by entry_date descending
    pub async fn list(db: &DatabaseConnection, filter: EntryFilter) -> AppResult<Vec<Entry>> {
        EntryRepository::list(db, filter).await
    }

    /// Administrative removal, outside the state machine. NotFound if absent.
    pub async fn delete(
        db: &DatabaseConnection,
        project_id: Uuid,
        user_id: Uuid,
    ) -> AppResult<()> {
        EntryRepository::delete(db, project_id, user_id).await
    }

    /// The transition table. APPROVED and REJECTED admit nothing further.
    fn is_allowed(from: EntryStatus, to: EntryStatus) -> bool {
        matches!(
            (from, to),
            (EntryStatus::Pending, EntryStatus::Withdrawn)
                | (EntryStatus::Pending, EntryStatus::Approved)
                | (EntryStatus::Pending, EntryStatus::Rejected)
                | (EntryStatus::Withdrawn, EntryStatus::Pending)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [EntryStatus; 4] = [
        EntryStatus::Pending,
        EntryStatus::Approved,
        EntryStatus::Rejected,
        EntryStatus::Withdrawn,
    ];

    #[test]
    fn pending_admits_review_and_withdrawal() {
        assert!(EntryService::is_allowed(
            EntryStatus::Pending,
            EntryStatus::Withdrawn
        ));
        assert!(EntryService::is_allowed(
            EntryStatus::Pending,
            EntryStatus::Approved
        ));
        assert!(EntryService::is_allowed(
            EntryStatus::Pending,
            EntryStatus::Rejected
        ));
        assert!(!EntryService::is_allowed(
            EntryStatus::Pending,
            EntryStatus::Pending
        ));
    }

    #[test]
    fn withdrawn_only_reactivates() {
        assert!(EntryService::is_allowed(
            EntryStatus::Withdrawn,
            EntryStatus::Pending
        ));
        assert!(!EntryService::is_allowed(
            EntryStatus::Withdrawn,
            EntryStatus::Approved
        ));
        assert!(!EntryService::is_allowed(
            EntryStatus::Withdrawn,
            EntryStatus::Rejected
        ));
        assert!(!EntryService::is_allowed(
            EntryStatus::Withdrawn,
            EntryStatus::Withdrawn
        ));
    }

    #[test]
    fn terminal_statuses_admit_nothing() {
        for from in [EntryStatus::Approved, EntryStatus::Rejected] {
            for to in ALL {
                assert!(
                    !EntryService::is_allowed(from, to),
                    "{} -> {} should be rejected",
                    from,
                    to
                );
            }
        }
    }
}
