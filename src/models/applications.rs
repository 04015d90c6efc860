use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Application (proposal) status stored as a lowercase string in the database.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, DeriveActiveEnum,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "accepted")]
    Accepted,
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

/// SeaORM entity for the `applications` table.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "applications")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub project_id: Uuid,
    pub freelancer_id: Uuid,
    #[sea_orm(column_type = "Text", nullable)]
    pub cover_letter: Option<String>,
    #[sea_orm(column_type = "Double", nullable)]
    pub proposed_rate: Option<f64>,
    pub estimated_duration: Option<String>,
    pub status: ApplicationStatus,
    pub created_at: DateTimeUtc,
    pub updated_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::projects::Entity",
        from = "Column::ProjectId",
        to = "super::projects::Column::Id"
    )]
    Project,
    #[sea_orm(
        belongs_to = "super::profiles::Entity",
        from = "Column::FreelancerId",
        to = "super::profiles::Column::Id"
    )]
    Freelancer,
}

impl Related<super::projects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Project.def()
    }
}

impl Related<super::profiles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Freelancer.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

/// Body of `POST /api/applications`. The freelancer comes from the JWT.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateApplication {
    pub project_id: Uuid,
    pub cover_letter: Option<String>,
    #[validate(range(min = 0.0, message = "Proposed rate cannot be negative"))]
    pub proposed_rate: Option<f64>,
    pub estimated_duration: Option<String>,
}

/// Editable while the application is still pending.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateApplication {
    pub cover_letter: Option<String>,
    #[validate(range(min = 0.0, message = "Proposed rate cannot be negative"))]
    pub proposed_rate: Option<f64>,
    pub estimated_duration: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationFilters {
    pub project_id: Option<Uuid>,
    pub freelancer_id: Option<Uuid>,
}

/// Result of accepting an application: both rows as they were committed.
#[derive(Debug, Clone, Serialize)]
pub struct AcceptedApplication {
    pub application: Model,
    pub project: super::projects::Model,
}
