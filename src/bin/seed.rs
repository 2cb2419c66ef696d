use anyhow::Context;
use rust_decimal::Decimal;
use uuid::Uuid;

use workmatch::config::Config;
use workmatch::models::{CreateProject, CreateUser, EntryStatus, User, UserRole};
use workmatch::repositories::{
    EntryRepository, ProjectRepository, SkillRepository, UserRepository,
};
use workmatch::services::AuthService;
use workmatch::state::AppState;

const SKILLS: &[&str] = &[
    "React",
    "TypeScript",
    "Node.js",
    "Flutter",
    "Dart",
    "PHP",
    "Laravel",
    "Java",
    "Rust",
];

/// Seed the database with a sample catalog: two admins, two users, the skill
/// catalog, a handful of projects and entries in assorted statuses.
/// Users and skills are upserted by their unique keys, so re-running is safe.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env().context("failed to load configuration")?;
    let state = AppState::new(config)
        .await
        .context("failed to connect to database")?;
    let db = &state.db;

    tracing::info!("Seeding database...");

    let admin1 = get_or_create_user(&state, "admin1@example.com", "Admin One", UserRole::Admin)
        .await?;
    let admin2 = get_or_create_user(&state, "admin2@example.com", "Admin Two", UserRole::Admin)
        .await?;
    let user1 = get_or_create_user(&state, "user1@example.com", "User One", UserRole::User).await?;
    let user2 = get_or_create_user(&state, "user2@example.com", "User Two", UserRole::User).await?;

    for name in SKILLS {
        SkillRepository::get_or_create(db, name).await?;
    }
    tracing::info!("Skill catalog seeded ({} skills)", SKILLS.len());

    let web_app = ProjectRepository::create(
        db,
        admin1.id,
        &CreateProject {
            title: "Web application development".to_string(),
            description: Some("Build a customer portal with React".to_string()),
            price: Some(Decimal::new(500_000, 0)),
            deadline: None,
            skill_names: vec!["React".to_string(), "TypeScript".to_string()],
        },
    )
    .await?;

    let mobile_app = ProjectRepository::create(
        db,
        admin1.id,
        &CreateProject {
            title: "Mobile app development".to_string(),
            description: Some("iOS/Android app built with Flutter".to_string()),
            price: Some(Decimal::new(800_000, 0)),
            deadline: None,
            skill_names: vec!["Flutter".to_string(), "Dart".to_string()],
        },
    )
    .await?;

    let php_system = ProjectRepository::create(
        db,
        admin2.id,
        &CreateProject {
            title: "PHP system development".to_string(),
            description: Some("Back-office system on Laravel".to_string()),
            price: Some(Decimal::new(600_000, 0)),
            deadline: None,
            skill_names: vec!["PHP".to_string(), "Laravel".to_string()],
        },
    )
    .await?;

    let java_app = ProjectRepository::create(
        db,
        admin2.id,
        &CreateProject {
            title: "Java business application".to_string(),
            description: None,
            price: Some(Decimal::new(700_000, 0)),
            deadline: None,
            skill_names: vec!["Java".to_string()],
        },
    )
    .await?;

    tracing::info!("Projects seeded");

    seed_entry(db, web_app.id, user1.id, EntryStatus::Pending).await?;
    seed_entry(db, mobile_app.id, user1.id, EntryStatus::Approved).await?;
    seed_entry(db, php_system.id, user2.id, EntryStatus::Rejected).await?;
    seed_entry(db, java_app.id, user2.id, EntryStatus::Withdrawn).await?;

    tracing::info!("Seeding completed");
    Ok(())
}

async fn get_or_create_user(
    state: &AppState,
    email: &str,
    name: &str,
    role: UserRole,
) -> anyhow::Result<User> {
    if UserRepository::email_exists(&state.db, email).await? {
        return Ok(UserRepository::find_by_email(&state.db, email).await?);
    }

    let password_hash = AuthService::hash_password("ChangeMe123!")?;
    let input = CreateUser {
        email: email.to_string(),
        password: "ChangeMe123!".to_string(),
        name: name.to_string(),
    };

    let user = UserRepository::create(&state.db, &input, &password_hash, role).await?;
    tracing::info!(email = %user.email, role = %user.role, "user created");
    Ok(user)
}

async fn seed_entry(
    db: &sea_orm::DatabaseConnection,
    project_id: Uuid,
    user_id: Uuid,
    status: EntryStatus,
) -> anyhow::Result<()> {
    EntryRepository::upsert_pending(db, project_id, user_id, time::OffsetDateTime::now_utc())
        .await?;
    if status != EntryStatus::Pending {
        EntryRepository::update_status(db, project_id, user_id, status).await?;
    }
    Ok(())
}
