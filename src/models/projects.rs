use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Project (job posting) status stored as a lowercase string in the database.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, DeriveActiveEnum,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    #[sea_orm(string_value = "open")]
    Open,
    #[sea_orm(string_value = "in_progress")]
    InProgress,
    #[sea_orm(string_value = "completed")]
    Completed,
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

/// SeaORM entity for the `projects` table.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "projects")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub client_id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    #[sea_orm(column_type = "Double", nullable)]
    pub budget_min: Option<f64>,
    #[sea_orm(column_type = "Double", nullable)]
    pub budget_max: Option<f64>,
    pub deadline: Option<Date>,
    pub required_skills: Option<Vec<String>>,
    pub category_id: Option<Uuid>,
    pub status: ProjectStatus,
    pub selected_freelancer_id: Option<Uuid>,
    pub created_at: DateTimeUtc,
    pub updated_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::profiles::Entity",
        from = "Column::ClientId",
        to = "super::profiles::Column::Id"
    )]
    Client,
    #[sea_orm(has_many = "super::applications::Entity")]
    Applications,
    #[sea_orm(has_many = "super::milestones::Entity")]
    Milestones,
}

impl Related<super::profiles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Client.def()
    }
}

impl Related<super::applications::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Applications.def()
    }
}

impl Related<super::milestones::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Milestones.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// The client who posted the project or the freelancer working on it.
    pub fn is_party(&self, user_id: Uuid) -> bool {
        self.client_id == user_id || self.selected_freelancer_id == Some(user_id)
    }
}

// ── DTOs ──

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProject {
    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"))]
    pub title: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    #[validate(range(min = 0.0, message = "Budget cannot be negative"))]
    pub budget_min: Option<f64>,
    #[validate(range(min = 0.0, message = "Budget cannot be negative"))]
    pub budget_max: Option<f64>,
    pub deadline: Option<Date>,
    pub required_skills: Option<Vec<String>>,
    pub category_id: Option<Uuid>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateProject {
    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "Description cannot be empty"))]
    pub description: Option<String>,
    #[validate(range(min = 0.0, message = "Budget cannot be negative"))]
    pub budget_min: Option<f64>,
    #[validate(range(min = 0.0, message = "Budget cannot be negative"))]
    pub budget_max: Option<f64>,
    pub deadline: Option<Date>,
    pub required_skills: Option<Vec<String>>,
    pub category_id: Option<Uuid>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProjectStatus {
    pub status: ProjectStatus,
}

/// Query parameters for `GET /api/projects`.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectFilters {
    pub status: Option<ProjectStatus>,
    pub client_id: Option<Uuid>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

impl ProjectFilters {
    pub fn pagination(&self) -> super::PaginationQuery {
        super::PaginationQuery {
            page: self.page,
            limit: self.limit,
        }
    }
}
