use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entity::project::{self, ActiveModel, Column, Entity as ProjectEntity};
use crate::entity::project_skill::{
    ActiveModel as ProjectSkillActiveModel, Column as ProjectSkillColumn,
    Entity as ProjectSkillEntity,
};
use crate::entity::skill::Entity as SkillEntity;
use crate::error::{AppError, AppResult};
use crate::models::{CreateProject, Project, Skill, UpdateProject};
use crate::repositories::{Repository, SkillRepository};

/// Project repository for database operations
pub struct ProjectRepository;

#[async_trait]
impl Repository<Project> for ProjectRepository {
    async fn find_by_id(db: &DatabaseConnection, id: Uuid) -> AppResult<Project> {
        let model = ProjectEntity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Project".to_string()))?;

        let skills = Self::skills_of(db, &model).await?;
        Ok(Project::from_model(model, skills))
    }

    async fn delete(db: &DatabaseConnection, id: Uuid) -> AppResult<()> {
        // Entries and skill links go with the project (ON DELETE CASCADE)
        let result = ProjectEntity::delete_by_id(id).exec(db).await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound("Project".to_string()));
        }

        Ok(())
    }

    async fn list(db: &DatabaseConnection, limit: u64, offset: u64) -> AppResult<Vec<Project>> {
        let models = ProjectEntity::find()
            .order_by_desc(Column::CreatedAt)
            .paginate(db, limit)
            .fetch_page(offset / limit)
            .await?;

        let mut projects = Vec::with_capacity(models.len());
        for model in models {
            let skills = Self::skills_of(db, &model).await?;
            projects.push(Project::from_model(model, skills));
        }

        Ok(projects)
    }

    async fn count(db: &DatabaseConnection) -> AppResult<u64> {
        let count = ProjectEntity::find().count(db).await?;
        Ok(count)
    }
}

impl ProjectRepository {
    /// Existence check consumed by the entry lifecycle service
    pub async fn exists(db: &DatabaseConnection, id: Uuid) -> AppResult<bool> {
        let count = ProjectEntity::find_by_id(id).count(db).await?;
        Ok(count > 0)
    }

    /// Create a new project and link its skills (referenced by catalog name)
    pub async fn create(
        db: &DatabaseConnection,
        creator_id: Uuid,
        input: &CreateProject,
    ) -> AppResult<Project> {
        let skill_ids = SkillRepository::resolve_names(db, &input.skill_names).await?;

        let model = ActiveModel {
            id: Set(Uuid::new_v4()),
            creator_id: Set(creator_id),
            title: Set(input.title.clone()),
            description: Set(input.description.clone()),
            price: Set(input.price),
            deadline: Set(input.deadline),
            created_at: Set(time::OffsetDateTime::now_utc()),
            updated_at: Set(time::OffsetDateTime::now_utc()),
        };

        let result = model.insert(db).await?;

        if !skill_ids.is_empty() {
            let links = skill_ids.into_iter().map(|skill_id| ProjectSkillActiveModel {
                project_id: Set(result.id),
                skill_id: Set(skill_id),
            });
            ProjectSkillEntity::insert_many(links).exec(db).await?;
        }

        Self::find_by_id(db, result.id).await
    }

    /// Update project fields; a present skill_names replaces the whole skill set
    pub async fn update(
        db: &DatabaseConnection,
        id: Uuid,
        input: &UpdateProject,
    ) -> AppResult<Project> {
        let model = ProjectEntity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Project".to_string()))?;

        let mut active: ActiveModel = model.into();

        if let Some(title) = &input.title {
            active.title = Set(title.clone());
        }
        if let Some(description) = &input.description {
            active.description = Set(Some(description.clone()));
        }
        if let Some(price) = input.price {
            active.price = Set(Some(price));
        }
        if let Some(deadline) = input.deadline {
            active.deadline = Set(Some(deadline));
        }
        active.updated_at = Set(time::OffsetDateTime::now_utc());

        let result = active.update(db).await?;

        if let Some(skill_names) = &input.skill_names {
            Self::update_project_skills(db, result.id, skill_names).await?;
        }

        Self::find_by_id(db, result.id).await
    }

    /// Skills currently attached to a project, ordered by name
    pub async fn get_project_skills(db: &DatabaseConnection, id: Uuid) -> AppResult<Vec<Skill>> {
        let model = ProjectEntity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Project".to_string()))?;

        Self::skills_of(db, &model).await
    }

    /// Replace a project's skill set with exactly the named set.
    ///
    /// Membership is reconciled as two bulk operations: insert the names not
    /// yet linked, remove the links no longer requested.
    pub async fn update_project_skills(
        db: &DatabaseConnection,
        id: Uuid,
        skill_names: &[String],
    ) -> AppResult<Vec<Skill>> {
        if !Self::exists(db, id).await? {
            return Err(AppError::NotFound("Project".to_string()));
        }

        let requested = SkillRepository::resolve_names(db, skill_names).await?;

        let current: Vec<Uuid> = ProjectSkillEntity::find()
            .filter(ProjectSkillColumn::ProjectId.eq(id))
            .all(db)
            .await?
            .into_iter()
            .map(|link| link.skill_id)
            .collect();

        let to_add: Vec<Uuid> = requested
            .iter()
            .copied()
            .filter(|skill_id| !current.contains(skill_id))
            .collect();

        let to_remove: Vec<Uuid> = current
            .iter()
            .copied()
            .filter(|skill_id| !requested.contains(skill_id))
            .collect();

        if !to_add.is_empty() {
            let links = to_add.into_iter().map(|skill_id| ProjectSkillActiveModel {
                project_id: Set(id),
                skill_id: Set(skill_id),
            });
            ProjectSkillEntity::insert_many(links).exec(db).await?;
        }

        if !to_remove.is_empty() {
            ProjectSkillEntity::delete_many()
                .filter(ProjectSkillColumn::ProjectId.eq(id))
                .filter(ProjectSkillColumn::SkillId.is_in(to_remove))
                .exec(db)
                .await?;
        }

        Self::get_project_skills(db, id).await
    }

    async fn skills_of(db: &DatabaseConnection, model: &project::Model) -> AppResult<Vec<Skill>> {
        let mut skills: Vec<Skill> = model
            .find_related(SkillEntity)
            .all(db)
            .await?
            .into_iter()
            .map(|m| m.into())
            .collect();

        skills.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(skills)
    }
}

impl Project {
    fn from_model(m: project::Model, skills: Vec<Skill>) -> Self {
        Self {
            id: m.id,
            creator_id: m.creator_id,
            title: m.title,
            description: m.description,
            price: m.price,
            deadline: m.deadline,
            created_at: m.created_at,
            updated_at: m.updated_at,
            skills,
        }
    }
}
