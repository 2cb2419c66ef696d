use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    sea_query::OnConflict,
};
use uuid::Uuid;

use crate::entity::skill::{self, ActiveModel, Column, Entity as SkillEntity};
use crate::error::{AppError, AppResult};
use crate::models::Skill;

/// Read-mostly skill catalog. Skills are seeded ahead of time and referenced
/// by name when attached to a project.
pub struct SkillRepository;

impl SkillRepository {
    /// List all catalog skills ordered by name
    pub async fn list(db: &DatabaseConnection) -> AppResult<Vec<Skill>> {
        let models = SkillEntity::find()
            .order_by_asc(Column::Name)
            .all(db)
            .await?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    /// Find a skill by its unique name
    pub async fn find_by_name(db: &DatabaseConnection, name: &str) -> AppResult<Option<Skill>> {
        let model = SkillEntity::find()
            .filter(Column::Name.eq(name))
            .one(db)
            .await?;

        Ok(model.map(|m| m.into()))
    }

    /// Resolve catalog names to skill ids, failing if any name is unknown.
    pub async fn resolve_names(db: &DatabaseConnection, names: &[String]) -> AppResult<Vec<Uuid>> {
        if names.is_empty() {
            return Ok(Vec::new());
        }

        let models = SkillEntity::find()
            .filter(Column::Name.is_in(names.iter().cloned()))
            .all(db)
            .await?;

        for name in names {
            if !models.iter().any(|m| &m.name == name) {
                return Err(AppError::NotFound(format!("Skill \"{}\"", name)));
            }
        }

        // Preserve the requested order, dropping duplicate names
        let mut ids = Vec::with_capacity(names.len());
        for name in names {
            let id = models
                .iter()
                .find(|m| &m.name == name)
                .map(|m| m.id)
                .ok_or_else(|| AppError::NotFound(format!("Skill \"{}\"", name)))?;
            if !ids.contains(&id) {
                ids.push(id);
            }
        }

        Ok(ids)
    }

    /// Insert a skill if absent, returning the catalog row either way.
    /// Used by the seed tool; the API surface is read-only.
    pub async fn get_or_create(db: &DatabaseConnection, name: &str) -> AppResult<Skill> {
        let model = ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
        };

        SkillEntity::insert(model)
            .on_conflict(OnConflict::column(Column::Name).do_nothing().to_owned())
            .do_nothing()
            .exec(db)
            .await?;

        Self::find_by_name(db, name)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Skill \"{}\"", name)))
    }
}

// Conversion from SeaORM model to our domain model
impl From<skill::Model> for Skill {
    fn from(m: skill::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
        }
    }
}
