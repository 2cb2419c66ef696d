use axum::{
    extract::{Path, Query, State},
    Json,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::handlers::skill::SkillResponse;
use crate::handlers::PaginationParams;
use crate::middlewares::AuthUser;
use crate::models::{CreateProject, Project, UpdateProject};
use crate::repositories::{ProjectRepository, Repository};
use crate::state::AppState;

// ============ Request/Response DTOs ============

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateProjectRequest {
    pub title: String,
    pub description: Option<String>,
    #[schema(value_type = Option<f64>)]
    pub price: Option<Decimal>,
    #[schema(value_type = Option<String>)]
    pub deadline: Option<OffsetDateTime>,
    /// Catalog skill names required by the project
    #[serde(default)]
    pub skill_names: Vec<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateProjectRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    #[schema(value_type = Option<f64>)]
    pub price: Option<Decimal>,
    #[schema(value_type = Option<String>)]
    pub deadline: Option<OffsetDateTime>,
    /// When present, replaces the project's skill set with exactly this set
    pub skill_names: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateProjectSkillsRequest {
    pub skill_names: Vec<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProjectResponse {
    pub id: Uuid,
    pub creator_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    #[schema(value_type = Option<f64>)]
    pub price: Option<Decimal>,
    #[schema(value_type = Option<String>)]
    pub deadline: Option<OffsetDateTime>,
    #[schema(value_type = String)]
    pub created_at: OffsetDateTime,
    #[schema(value_type = String)]
    pub updated_at: OffsetDateTime,
    pub skills: Vec<SkillResponse>,
}

impl From<Project> for ProjectResponse {
    fn from(p: Project) -> Self {
        Self {
            id: p.id,
            creator_id: p.creator_id,
            title: p.title,
            description: p.description,
            price: p.price,
            deadline: p.deadline,
            created_at: p.created_at,
            updated_at: p.updated_at,
            skills: p.skills.into_iter().map(|s| s.into()).collect(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProjectListResponse {
    pub data: Vec<ProjectResponse>,
    pub total: u64,
    pub limit: u64,
    pub offset: u64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProjectSkillsResponse {
    pub project_id: Uuid,
    pub skills: Vec<SkillResponse>,
}

// ============ Handlers ============

/// Post a new project (admin only)
#[utoipa::path(
    post,
    path = "/api/projects",
    request_body = CreateProjectRequest,
    responses(
        (status = 200, description = "Project created successfully", body = ProjectResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Unknown skill name"),
        (status = 400, description = "Validation error")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Projects"
)]
pub async fn create_project(
    user: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<CreateProjectRequest>,
) -> AppResult<Json<ProjectResponse>> {
    user.require_admin()?;

    if payload.title.is_empty() {
        return Err(AppError::Validation("Title is required".to_string()));
    }

    let create_project = CreateProject {
        title: payload.title,
        description: payload.description,
        price: payload.price,
        deadline: payload.deadline,
        skill_names: payload.skill_names,
    };

    let project = ProjectRepository::create(&state.db, user.id, &create_project).await?;
    Ok(Json(project.into()))
}

/// List all projects, newest first
#[utoipa::path(
    get,
    path = "/api/projects",
    params(PaginationParams),
    responses(
        (status = 200, description = "List of projects", body = ProjectListResponse),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Projects"
)]
pub async fn list_projects(
    _user: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<ProjectListResponse>> {
    let limit = params.limit.unwrap_or(20).min(100).max(1) as u64;
    let offset = params.offset.unwrap_or(0).max(0) as u64;

    let projects = ProjectRepository::list(&state.db, limit, offset).await?;
    let total = ProjectRepository::count(&state.db).await?;

    Ok(Json(ProjectListResponse {
        data: projects.into_iter().map(|p| p.into()).collect(),
        total,
        limit,
        offset,
    }))
}

/// Get a project by ID
#[utoipa::path(
    get,
    path = "/api/projects/{id}",
    params(
        ("id" = Uuid, Path, description = "Project ID")
    ),
    responses(
        (status = 200, description = "Project details", body = ProjectResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Project not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Projects"
)]
pub async fn get_project(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ProjectResponse>> {
    let project = ProjectRepository::find_by_id(&state.db, id).await?;
    Ok(Json(project.into()))
}

/// Update a project (admin only)
#[utoipa::path(
    put,
    path = "/api/projects/{id}",
    params(
        ("id" = Uuid, Path, description = "Project ID")
    ),
    request_body = UpdateProjectRequest,
    responses(
        (status = 200, description = "Project updated successfully", body = ProjectResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Project or skill not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Projects"
)]
pub async fn update_project(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateProjectRequest>,
) -> AppResult<Json<ProjectResponse>> {
    user.require_admin()?;

    let update_project = UpdateProject {
        title: payload.title,
        description: payload.description,
        price: payload.price,
        deadline: payload.deadline,
        skill_names: payload.skill_names,
    };

    let project = ProjectRepository::update(&state.db, id, &update_project).await?;
    Ok(Json(project.into()))
}

/// Delete a project (admin only); cascades to entries and skill links
#[utoipa::path(
    delete,
    path = "/api/projects/{id}",
    params(
        ("id" = Uuid, Path, description = "Project ID")
    ),
    responses(
        (status = 200, description = "Project deleted successfully"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Project not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Projects"
)]
pub async fn delete_project(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<()> {
    user.require_admin()?;

    ProjectRepository::delete(&state.db, id).await?;
    Ok(())
}

/// Get the skills attached to a project
#[utoipa::path(
    get,
    path = "/api/projects/{id}/skills",
    params(
        ("id" = Uuid, Path, description = "Project ID")
    ),
    responses(
        (status = 200, description = "Project skills", body = ProjectSkillsResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Project not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Projects"
)]
pub async fn get_project_skills(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ProjectSkillsResponse>> {
    let skills = ProjectRepository::get_project_skills(&state.db, id).await?;
    Ok(Json(ProjectSkillsResponse {
        project_id: id,
        skills: skills.into_iter().map(|s| s.into()).collect(),
    }))
}

/// Replace a project's skill set (admin only)
#[utoipa::path(
    put,
    path = "/api/projects/{id}/skills",
    params(
        ("id" = Uuid, Path, description = "Project ID")
    ),
    request_body = UpdateProjectSkillsRequest,
    responses(
        (status = 200, description = "Skill set replaced", body = ProjectSkillsResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Project or skill not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Projects"
)]
pub async fn update_project_skills(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateProjectSkillsRequest>,
) -> AppResult<Json<ProjectSkillsResponse>> {
    user.require_admin()?;

    let skills =
        ProjectRepository::update_project_skills(&state.db, id, &payload.skill_names).await?;
    Ok(Json(ProjectSkillsResponse {
        project_id: id,
        skills: skills.into_iter().map(|s| s.into()).collect(),
    }))
}
