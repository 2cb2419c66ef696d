pub mod auth;
pub mod common;
pub mod entry;
pub mod project;
pub mod skill;
pub mod user;

pub use auth::{
    login, me, register, update_me, AuthResponse, LoginRequest, RegisterRequest, UpdateUserRequest,
};
pub use common::PaginationParams;
pub use entry::{
    create_entry, delete_entry, find_entry, list_entries, list_project_entries, update_entry,
    CreateEntryRequest, EntryListResponse, EntryResponse, UpdateEntryRequest,
};
pub use project::{
    create_project, delete_project, get_project, get_project_skills, list_projects, update_project,
    update_project_skills, CreateProjectRequest, ProjectListResponse, ProjectResponse,
    ProjectSkillsResponse, UpdateProjectRequest, UpdateProjectSkillsRequest,
};
pub use skill::{get_skill, list_skills, SkillListResponse, SkillResponse};
pub use user::{list_users, UserListResponse};
