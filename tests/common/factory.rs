use time::OffsetDateTime;
use uuid::Uuid;

use workmatch::models::{CreateProject, CreateUser, Entry, EntryStatus, Project, Skill, UserRole};
use workmatch::repositories::{
    EntryRepository, ProjectRepository, SkillRepository, UserRepository,
};
use workmatch::services::AuthService;
use workmatch::state::AppState;

/// Authentication info for tests
#[allow(dead_code)]
pub struct TestAuth {
    pub user_id: Uuid,
    pub email: String,
    pub token: String,
}

impl TestAuth {
    /// Get the Authorization header value
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

/// Factory for creating test data
pub struct Factory<'a> {
    state: &'a AppState,
}

#[allow(dead_code)]
impl<'a> Factory<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Create a regular test user and return auth info
    pub async fn create_user(&self) -> TestAuth {
        self.create_user_with_role(UserRole::User).await
    }

    /// Create a test admin and return auth info
    pub async fn create_admin(&self) -> TestAuth {
        self.create_user_with_role(UserRole::Admin).await
    }

    async fn create_user_with_role(&self, role: UserRole) -> TestAuth {
        let unique_id = Uuid::new_v4();
        let email = format!("test-{}@example.com", unique_id);
        let password = "TestPassword123!";

        let input = CreateUser {
            email: email.clone(),
            password: password.to_string(),
            name: format!("Test User {}", unique_id),
        };

        let password_hash = AuthService::hash_password(password).unwrap();
        let user = UserRepository::create(&self.state.db, &input, &password_hash, role)
            .await
            .unwrap();

        let token =
            AuthService::generate_token(user.id, &email, user.role, &self.state.config).unwrap();

        TestAuth {
            user_id: user.id,
            email,
            token,
        }
    }

    /// Create a catalog skill with a unique name
    pub async fn create_skill(&self) -> Skill {
        let name = format!("skill-{}", Uuid::new_v4());
        SkillRepository::get_or_create(&self.state.db, &name)
            .await
            .unwrap()
    }

    /// Create a catalog skill with a specific name
    pub async fn create_skill_with_name(&self, name: &str) -> Skill {
        SkillRepository::get_or_create(&self.state.db, name)
            .await
            .unwrap()
    }

    /// Create a test project without skills
    pub async fn create_project(&self, creator_id: Uuid) -> Project {
        let input = CreateProject {
            title: format!("Test Project {}", Uuid::new_v4()),
            description: Some("Test project description".to_string()),
            price: None,
            deadline: None,
            skill_names: vec![],
        };

        ProjectRepository::create(&self.state.db, creator_id, &input)
            .await
            .unwrap()
    }

    /// Create a test project with the given catalog skill names
    pub async fn create_project_with_skills(
        &self,
        creator_id: Uuid,
        skill_names: &[&str],
    ) -> Project {
        let input = CreateProject {
            title: format!("Test Project {}", Uuid::new_v4()),
            description: None,
            price: None,
            deadline: None,
            skill_names: skill_names.iter().map(|s| s.to_string()).collect(),
        };

        ProjectRepository::create(&self.state.db, creator_id, &input)
            .await
            .unwrap()
    }

    /// Create a PENDING entry with an explicit entry date
    pub async fn create_entry_at(
        &self,
        project_id: Uuid,
        user_id: Uuid,
        entry_date: OffsetDateTime,
    ) -> Entry {
        EntryRepository::upsert_pending(&self.state.db, project_id, user_id, entry_date)
            .await
            .unwrap()
    }

    /// Create an entry and move it to the given status directly
    pub async fn create_entry_with_status(
        &self,
        project_id: Uuid,
        user_id: Uuid,
        status: EntryStatus,
    ) -> Entry {
        let entry = EntryRepository::upsert_pending(
            &self.state.db,
            project_id,
            user_id,
            OffsetDateTime::now_utc(),
        )
        .await
        .unwrap();

        if status == EntryStatus::Pending {
            entry
        } else {
            EntryRepository::update_status(&self.state.db, project_id, user_id, status)
                .await
                .unwrap()
        }
    }
}
