use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::middlewares::AuthUser;
use crate::models::Skill;
use crate::repositories::SkillRepository;
use crate::state::AppState;

// ============ Response DTOs ============

#[derive(Debug, Serialize, ToSchema)]
pub struct SkillResponse {
    pub id: Uuid,
    pub name: String,
}

impl From<Skill> for SkillResponse {
    fn from(s: Skill) -> Self {
        Self {
            id: s.id,
            name: s.name,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SkillListResponse {
    pub data: Vec<SkillResponse>,
    pub total: u64,
}

// ============ Handlers ============

/// List the skill catalog, ordered by name
#[utoipa::path(
    get,
    path = "/api/skills",
    responses(
        (status = 200, description = "Skill catalog", body = SkillListResponse),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Skills"
)]
pub async fn list_skills(
    _user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<SkillListResponse>> {
    let skills = SkillRepository::list(&state.db).await?;
    let total = skills.len() as u64;

    Ok(Json(SkillListResponse {
        data: skills.into_iter().map(|s| s.into()).collect(),
        total,
    }))
}

/// Find a skill by its unique name
#[utoipa::path(
    get,
    path = "/api/skills/{name}",
    params(
        ("name" = String, Path, description = "Skill name")
    ),
    responses(
        (status = 200, description = "Skill details", body = SkillResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Skill not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Skills"
)]
pub async fn get_skill(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<Json<SkillResponse>> {
    let skill = SkillRepository::find_by_name(&state.db, &name)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Skill \"{}\"", name)))?;

    Ok(Json(skill.into()))
}
