use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    sea_query::{Expr, OnConflict},
};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::entity::entry::{self, ActiveModel, Column, Entity as EntryEntity, EntryStatus};
use crate::error::{AppError, AppResult};
use crate::models::{Entry, EntryFilter};

/// Entry store keyed by the composite (project_id, user_id) primary key.
///
/// All writes to a pair funnel through this type; the composite key is what
/// serializes concurrent writers, not application-level locking.
pub struct EntryRepository;

impl EntryRepository {
    /// Create the entry as PENDING, or flip an existing PENDING/WITHDRAWN row
    /// back to PENDING, in one atomic statement.
    ///
    /// `entry_date` is only written on first creation; the conflict branch
    /// updates status alone. When the existing row is in a terminal status
    /// the statement touches nothing and surfaces `Conflict` for the caller
    /// to translate.
    pub async fn upsert_pending(
        db: &DatabaseConnection,
        project_id: Uuid,
        user_id: Uuid,
        entry_date: OffsetDateTime,
    ) -> AppResult<Entry> {
        let model = ActiveModel {
            project_id: Set(project_id),
            user_id: Set(user_id),
            status: Set(EntryStatus::Pending),
            entry_date: Set(entry_date),
        };

        let result = EntryEntity::insert(model)
            .on_conflict(
                OnConflict::columns([Column::ProjectId, Column::UserId])
                    .update_column(Column::Status)
                    .action_and_where(
                        Expr::col((EntryEntity, Column::Status))
                            .is_in([EntryStatus::Pending, EntryStatus::Withdrawn]),
                    )
                    .to_owned(),
            )
            .exec_with_returning(db)
            .await?;

        Ok(result.into())
    }

    /// Look up the entry for a pair; absence is a valid result, not an error
    pub async fn find(
        db: &DatabaseConnection,
        project_id: Uuid,
        user_id: Uuid,
    ) -> AppResult<Option<Entry>> {
        let model = EntryEntity::find_by_id((project_id, user_id)).one(db).await?;
        Ok(model.map(|m| m.into()))
    }

    /// All entries matching the filter, most recent first
    pub async fn list(db: &DatabaseConnection, filter: EntryFilter) -> AppResult<Vec<Entry>> {
        let mut query = EntryEntity::find();

        if let Some(status) = filter.status {
            query = query.filter(Column::Status.eq(status));
        }
        if let Some(user_id) = filter.user_id {
            query = query.filter(Column::UserId.eq(user_id));
        }
        if let Some(project_id) = filter.project_id {
            query = query.filter(Column::ProjectId.eq(project_id));
        }

        let models = query.order_by_desc(Column::EntryDate).all(db).await?;
        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    /// Update status only; entry_date is never touched after creation
    pub async fn update_status(
        db: &DatabaseConnection,
        project_id: Uuid,
        user_id: Uuid,
        status: EntryStatus,
    ) -> AppResult<Entry> {
        let model = EntryEntity::find_by_id((project_id, user_id))
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Entry".to_string()))?;

        let mut active: ActiveModel = model.into();
        active.status = Set(status);

        let result = active.update(db).await?;
        Ok(result.into())
    }

    /// Remove the row if present; administrative cleanup outside the state machine
    pub async fn delete(
        db: &DatabaseConnection,
        project_id: Uuid,
        user_id: Uuid,
    ) -> AppResult<()> {
        let result = EntryEntity::delete_by_id((project_id, user_id)).exec(db).await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound("Entry".to_string()));
        }

        Ok(())
    }
}

// Conversion from SeaORM model to our domain model
impl From<entry::Model> for Entry {
    fn from(m: entry::Model) -> Self {
        Self {
            project_id: m.project_id,
            user_id: m.user_id,
            status: m.status,
            entry_date: m.entry_date,
        }
    }
}
