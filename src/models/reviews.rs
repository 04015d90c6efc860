use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// SeaORM entity for the `reviews` table. Reviews are never edited once written.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reviews")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub project_id: Uuid,
    pub reviewer_id: Uuid,
    pub reviewee_id: Uuid,
    pub rating: i16,
    pub title: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub comment: Option<String>,
    pub is_public: bool,
    pub created_at: DateTimeUtc,
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
        from = "Column::RevieweeId",
        to = "super::profiles::Column::Id"
    )]
    Reviewee,
}

impl Related<super::projects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Project.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

/// Body of `POST /api/reviews`. The reviewer comes from the JWT.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateReview {
    pub project_id: Uuid,
    pub reviewee_id: Uuid,
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: i16,
    pub title: Option<String>,
    #[validate(length(min = 1, message = "Please write a review comment"))]
    pub comment: String,
    pub is_public: Option<bool>,
}

/// A public review joined with the reviewer's name and the project title.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewView {
    #[serde(flatten)]
    pub review: Model,
    pub reviewer_name: Option<String>,
    pub reviewer_avatar_url: Option<String>,
    pub project_title: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReviewOverview {
    pub reviews: Vec<ReviewView>,
    pub summary: crate::domain::reviews::RatingSummary,
}
