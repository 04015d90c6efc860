use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// SeaORM entity for the `user_preferences` table (one row per user).
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user_preferences")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub user_id: Uuid,
    pub preferred_project_types: Option<Vec<String>>,
    #[sea_orm(column_type = "Double", nullable)]
    pub preferred_budget_range_min: Option<f64>,
    #[sea_orm(column_type = "Double", nullable)]
    pub preferred_budget_range_max: Option<f64>,
    pub preferred_project_duration: Option<String>,
    pub notification_settings: Json,
    pub ai_matching_enabled: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Budget bounds for project matching. A zero bound counts as unset.
    pub fn budget_window(&self) -> (Option<f64>, Option<f64>) {
        let positive = |v: Option<f64>| v.filter(|v| *v > 0.0);
        (
            positive(self.preferred_budget_range_min),
            positive(self.preferred_budget_range_max),
        )
    }
}

/// Body of `PUT /api/preferences`; absent fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdatePreferences {
    pub preferred_project_types: Option<Vec<String>>,
    #[validate(range(min = 0.0, message = "Budget cannot be negative"))]
    pub preferred_budget_range_min: Option<f64>,
    #[validate(range(min = 0.0, message = "Budget cannot be negative"))]
    pub preferred_budget_range_max: Option<f64>,
    pub preferred_project_duration: Option<String>,
    pub notification_settings: Option<Json>,
    pub ai_matching_enabled: Option<bool>,
}
