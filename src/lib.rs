// Library crate for workmatch
// Exports modules for use by the server and seed binaries and tests

pub mod config;
pub mod entity;
pub mod error;
pub mod handlers;
pub mod middlewares;
pub mod models;
pub mod repositories;
pub mod services;
pub mod state;

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};

use crate::handlers::{
    create_entry, create_project, delete_entry, delete_project, find_entry, get_project,
    get_project_skills, get_skill, list_entries, list_project_entries, list_projects, list_skills,
    list_users, login, me, register, update_entry, update_me, update_project,
    update_project_skills,
};
use crate::middlewares::auth_middleware;
use crate::state::AppState;

/// Build the application router with the given state
pub fn build_router(state: AppState) -> Router {
    // Protected routes (require authentication)
    let protected_routes = Router::new()
        // Auth & User routes
        .route("/api/auth/me", get(me))
        .route("/api/users/me", put(update_me))
        .route("/api/users", get(list_users))
        // Project routes
        .route("/api/projects", get(list_projects))
        .route("/api/projects", post(create_project))
        .route("/api/projects/{id}", get(get_project))
        .route("/api/projects/{id}", put(update_project))
        .route("/api/projects/{id}", delete(delete_project))
        .route("/api/projects/{id}/skills", get(get_project_skills))
        .route("/api/projects/{id}/skills", put(update_project_skills))
        // Skill catalog routes (read only)
        .route("/api/skills", get(list_skills))
        .route("/api/skills/{name}", get(get_skill))
        // Entry routes (nested under projects)
        .route("/api/projects/{project_id}/entries", post(create_entry))
        .route(
            "/api/projects/{project_id}/entries",
            get(list_project_entries),
        )
        .route(
            "/api/projects/{project_id}/entries/{user_id}",
            get(find_entry),
        )
        .route(
            "/api/projects/{project_id}/entries/{user_id}",
            put(update_entry),
        )
        .route(
            "/api/projects/{project_id}/entries/{user_id}",
            delete(delete_entry),
        )
        // Entry routes (direct access)
        .route("/api/entries", get(list_entries))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/", get(|| async { "Hello, Workmatch!" }))
        // Public auth routes
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        // Protected routes
        .merge(protected_routes)
        .with_state(state)
}
