use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, DeriveActiveEnum,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "snake_case")]
pub enum DisputeStatus {
    #[sea_orm(string_value = "open")]
    Open,
    #[sea_orm(string_value = "in_review")]
    InReview,
    #[sea_orm(string_value = "resolved")]
    Resolved,
    #[sea_orm(string_value = "closed")]
    Closed,
}

/// SeaORM entity for the `dispute_resolutions` table.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "dispute_resolutions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub project_id: Uuid,
    pub initiated_by: Uuid,
    pub dispute_type: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub status: DisputeStatus,
    #[sea_orm(column_type = "Text", nullable)]
    pub resolution_notes: Option<String>,
    pub resolved_by: Option<Uuid>,
    pub resolved_at: Option<DateTimeUtc>,
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
}

impl Related<super::projects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Project.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateDispute {
    #[validate(length(min = 1, message = "Dispute type is required"))]
    pub dispute_type: String,
    #[validate(length(min = 1, message = "Please describe the dispute"))]
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateDisputeStatus {
    pub status: DisputeStatus,
    pub resolution_notes: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DisputeView {
    #[serde(flatten)]
    pub dispute: Model,
    pub initiated_by_name: Option<String>,
    pub resolved_by_name: Option<String>,
}
