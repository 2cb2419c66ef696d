use axum::{
    extract::{Query, State},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::AppResult;
use crate::handlers::PaginationParams;
use crate::middlewares::AuthUser;
use crate::models::UserResponse;
use crate::repositories::{Repository, UserRepository};
use crate::state::AppState;

// ============ Response DTOs ============

#[derive(Debug, Serialize, ToSchema)]
pub struct UserListResponse {
    pub data: Vec<UserResponse>,
    pub total: u64,
    pub limit: u64,
    pub offset: u64,
}

// ============ Handlers ============

/// List all users (admin only)
///
/// Backs the entry review screens, which need applicant names.
#[utoipa::path(
    get,
    path = "/api/users",
    params(PaginationParams),
    responses(
        (status = 200, description = "List of users", body = UserListResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Users"
)]
pub async fn list_users(
    user: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<UserListResponse>> {
    user.require_admin()?;

    let limit = params.limit.unwrap_or(20).min(100).max(1) as u64;
    let offset = params.offset.unwrap_or(0).max(0) as u64;

    let users = UserRepository::list(&state.db, limit, offset).await?;
    let total = UserRepository::count(&state.db).await?;

    Ok(Json(UserListResponse {
        data: users.into_iter().map(|u| u.into()).collect(),
        total,
        limit,
        offset,
    }))
}
