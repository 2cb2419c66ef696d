use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use workmatch::config::Config;
use workmatch::handlers::{
    AuthResponse, CreateEntryRequest, CreateProjectRequest, EntryListResponse, EntryResponse,
    LoginRequest, ProjectListResponse, ProjectResponse, ProjectSkillsResponse, RegisterRequest,
    SkillListResponse, SkillResponse, UpdateEntryRequest, UpdateProjectRequest,
    UpdateProjectSkillsRequest, UpdateUserRequest, UserListResponse,
};
use workmatch::models::{EntryStatus, UserResponse, UserRole};
use workmatch::state::AppState;
use workmatch::{build_router, handlers};

/// Security scheme for Bearer token
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::me,
        handlers::auth::update_me,
        handlers::user::list_users,
        handlers::project::create_project,
        handlers::project::list_projects,
        handlers::project::get_project,
        handlers::project::update_project,
        handlers::project::delete_project,
        handlers::project::get_project_skills,
        handlers::project::update_project_skills,
        handlers::skill::list_skills,
        handlers::skill::get_skill,
        handlers::entry::create_entry,
        handlers::entry::list_entries,
        handlers::entry::list_project_entries,
        handlers::entry::find_entry,
        handlers::entry::update_entry,
        handlers::entry::delete_entry,
    ),
    components(schemas(
        RegisterRequest,
        LoginRequest,
        AuthResponse,
        UserResponse,
        UpdateUserRequest,
        UserListResponse,
        CreateProjectRequest,
        ProjectListResponse,
        ProjectResponse,
        ProjectSkillsResponse,
        UpdateProjectRequest,
        UpdateProjectSkillsRequest,
        SkillListResponse,
        SkillResponse,
        CreateEntryRequest,
        EntryListResponse,
        EntryResponse,
        UpdateEntryRequest,
        EntryStatus,
        UserRole,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Authentication endpoints"),
        (name = "Users", description = "User management endpoints"),
        (name = "Projects", description = "Project catalog endpoints"),
        (name = "Skills", description = "Skill catalog endpoints (read only)"),
        (name = "Entries", description = "Entry lifecycle endpoints")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Load configuration
    let config = Config::from_env().expect("Failed to load configuration");
    let addr = config.server_addr();

    // Initialize application state (connects to the database, runs migrations)
    tracing::info!("Connecting to database...");
    let state = AppState::new(config)
        .await
        .expect("Failed to initialize application state");
    tracing::info!("Database connection established");

    // Build the main application router
    let app = build_router(state)
        // Add Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();

    tracing::info!("Server started on http://{}", addr);
    tracing::info!("Swagger UI: http://{}/swagger-ui/", addr);
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<std::net::SocketAddr>(),
    )
    .await
    .unwrap();
}
