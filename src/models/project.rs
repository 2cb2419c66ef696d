use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::models::Skill;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: Uuid,
    pub creator_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub deadline: Option<OffsetDateTime>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
    /// Catalog skills currently attached to this project.
    pub skills: Vec<Skill>,
}

#[derive(Debug, Deserialize)]
pub struct CreateProject {
    pub title: String,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub deadline: Option<OffsetDateTime>,
    /// Skills are referenced by catalog name, not by id.
    pub skill_names: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProject {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub deadline: Option<OffsetDateTime>,
    /// When present, the project's skill set is replaced with exactly this set.
    pub skill_names: Option<Vec<String>>,
}
