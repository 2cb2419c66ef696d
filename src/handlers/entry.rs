use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::middlewares::AuthUser;
use crate::models::{Entry, EntryFilter, EntryStatus};
use crate::services::EntryService;
use crate::state::AppState;

// ============ Request/Response DTOs ============

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateEntryRequest {
    /// Defaults to PENDING; any other value is rejected here and must go
    /// through the status update endpoint.
    pub status: Option<EntryStatus>,
    #[schema(value_type = Option<String>)]
    pub entry_date: Option<OffsetDateTime>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateEntryRequest {
    pub status: EntryStatus,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct EntryListParams {
    pub status: Option<EntryStatus>,
    pub project_id: Option<Uuid>,
    pub user_id: Option<Uuid>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EntryResponse {
    pub project_id: Uuid,
    pub user_id: Uuid,
    pub status: EntryStatus,
    #[schema(value_type = String)]
    pub entry_date: OffsetDateTime,
}

impl From<Entry> for EntryResponse {
    fn from(e: Entry) -> Self {
        Self {
            project_id: e.project_id,
            user_id: e.user_id,
            status: e.status,
            entry_date: e.entry_date,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EntryListResponse {
    pub data: Vec<EntryResponse>,
    pub total: u64,
}

// ============ Handlers ============

/// Apply to a project as the current user
///
/// Creates the entry in PENDING, or reactivates it when previously
/// withdrawn. Re-applying while PENDING is a no-op; an approved or rejected
/// entry can no longer be re-applied to.
#[utoipa::path(
    post,
    path = "/api/projects/{project_id}/entries",
    params(
        ("project_id" = Uuid, Path, description = "Project ID")
    ),
    request_body = CreateEntryRequest,
    responses(
        (status = 200, description = "Entry created or reactivated", body = EntryResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Project not found"),
        (status = 409, description = "Entry already approved or rejected")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Entries"
)]
pub async fn create_entry(
    user: AuthUser,
    State(state): State<AppState>,
    Path(project_id): Path<Uuid>,
    Json(payload): Json<CreateEntryRequest>,
) -> AppResult<Json<EntryResponse>> {
    // Applying only ever yields PENDING; status overwrites go through the
    // validated update endpoint.
    if let Some(status) = payload.status {
        if status != EntryStatus::Pending {
            return Err(AppError::InvalidTransition(format!(
                "an application cannot be created as {}; update the entry status instead",
                status
            )));
        }
    }

    let entry =
        EntryService::apply_or_reactivate(&state.db, project_id, user.id, payload.entry_date)
            .await?;
    Ok(Json(entry.into()))
}

/// List entries, most recent first
///
/// Regular users see their own entries; admins may combine any filters.
#[utoipa::path(
    get,
    path = "/api/entries",
    params(EntryListParams),
    responses(
        (status = 200, description = "Matching entries", body = EntryListResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Filtering on another user requires admin")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Entries"
)]
pub async fn list_entries(
    user: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<EntryListParams>,
) -> AppResult<Json<EntryListResponse>> {
    let user_filter = if user.is_admin() {
        params.user_id
    } else {
        match params.user_id {
            Some(id) if id != user.id => return Err(AppError::Forbidden),
            _ => Some(user.id),
        }
    };

    let filter = EntryFilter {
        status: params.status,
        user_id: user_filter,
        project_id: params.project_id,
    };

    let entries = EntryService::list(&state.db, filter).await?;
    let total = entries.len() as u64;

    Ok(Json(EntryListResponse {
        data: entries.into_iter().map(|e| e.into()).collect(),
        total,
    }))
}

/// List all entries for a project (admin only)
#[utoipa::path(
    get,
    path = "/api/projects/{project_id}/entries",
    params(
        ("project_id" = Uuid, Path, description = "Project ID")
    ),
    responses(
        (status = 200, description = "Entries for the project", body = EntryListResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Entries"
)]
pub async fn list_project_entries(
    user: AuthUser,
    State(state): State<AppState>,
    Path(project_id): Path<Uuid>,
) -> AppResult<Json<EntryListResponse>> {
    user.require_admin()?;

    let filter = EntryFilter {
        project_id: Some(project_id),
        ..Default::default()
    };

    let entries = EntryService::list(&state.db, filter).await?;
    let total = entries.len() as u64;

    Ok(Json(EntryListResponse {
        data: entries.into_iter().map(|e| e.into()).collect(),
        total,
    }))
}

/// Get the entry for a (project, user) pair
///
/// Absence is a valid result: the body is JSON null, not a 404.
#[utoipa::path(
    get,
    path = "/api/projects/{project_id}/entries/{user_id}",
    params(
        ("project_id" = Uuid, Path, description = "Project ID"),
        ("user_id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Entry, or null when the user has not applied", body = Option<EntryResponse>),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Entries"
)]
pub async fn find_entry(
    _user: AuthUser,
    State(state): State<AppState>,
    Path((project_id, user_id)): Path<(Uuid, Uuid)>,
) -> AppResult<Json<Option<EntryResponse>>> {
    let entry = EntryService::find(&state.db, project_id, user_id).await?;
    Ok(Json(entry.map(|e| e.into())))
}

/// Update an entry's status
///
/// Users may withdraw or reactivate their own entry; admins may also
/// approve or reject a pending one. Approved and rejected entries admit no
/// further changes.
#[utoipa::path(
    put,
    path = "/api/projects/{project_id}/entries/{user_id}",
    params(
        ("project_id" = Uuid, Path, description = "Project ID"),
        ("user_id" = Uuid, Path, description = "User ID")
    ),
    request_body = UpdateEntryRequest,
    responses(
        (status = 200, description = "Entry updated", body = EntryResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Users may only update their own entry"),
        (status = 404, description = "Entry not found"),
        (status = 409, description = "Transition not allowed")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Entries"
)]
pub async fn update_entry(
    user: AuthUser,
    State(state): State<AppState>,
    Path((project_id, user_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<UpdateEntryRequest>,
) -> AppResult<Json<EntryResponse>> {
    if !user.is_admin() && user_id != user.id {
        return Err(AppError::Forbidden);
    }

    let entry =
        EntryService::transition(&state.db, project_id, user_id, payload.status, user.role).await?;
    Ok(Json(entry.into()))
}

/// Delete an entry (admin only)
///
/// Administrative cleanup that bypasses the state machine entirely.
#[utoipa::path(
    delete,
    path = "/api/projects/{project_id}/entries/{user_id}",
    params(
        ("project_id" = Uuid, Path, description = "Project ID"),
        ("user_id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Entry deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Entry not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Entries"
)]
pub async fn delete_entry(
    user: AuthUser,
    State(state): State<AppState>,
    Path((project_id, user_id)): Path<(Uuid, Uuid)>,
) -> AppResult<()> {
    user.require_admin()?;

    EntryService::delete(&state.db, project_id, user_id).await?;
    Ok(())
}
