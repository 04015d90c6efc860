use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// SeaORM entity for the `time_tracking` table.
///
/// A row with `end_time = NULL` is a running timer; at most one may exist per
/// (project, freelancer).
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "time_tracking")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub project_id: Uuid,
    pub freelancer_id: Uuid,
    pub start_time: DateTimeUtc,
    pub end_time: Option<DateTimeUtc>,
    pub duration_minutes: Option<i32>,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub is_billable: bool,
    #[sea_orm(column_type = "Double", nullable)]
    pub hourly_rate: Option<f64>,
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

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn is_running(&self) -> bool {
        self.end_time.is_none()
    }
}

// ── DTOs ──

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct StartTimer {
    #[validate(
        length(min = 1, message = "Please enter a description for this time entry"),
        custom(function = "not_blank", message = "Please enter a description for this time entry")
    )]
    pub description: String,
    pub is_billable: Option<bool>,
}

fn not_blank(value: &str) -> Result<(), validator::ValidationError> {
    if value.trim().is_empty() {
        return Err(validator::ValidationError::new("blank"));
    }
    Ok(())
}

/// A time entry with its display fields filled in.
#[derive(Debug, Clone, Serialize)]
pub struct TimeEntryView {
    #[serde(flatten)]
    pub entry: Model,
    pub freelancer_name: Option<String>,
    /// Seconds since `start_time` for a running entry.
    pub elapsed_seconds: Option<i64>,
    /// `HH:MM:SS` for a running entry, `"{h}h {m}m"` for a closed one.
    pub display: String,
    pub earnings: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TimeSheet {
    pub entries: Vec<TimeEntryView>,
    pub active_entry_id: Option<Uuid>,
    pub total_minutes: i64,
    pub total_duration: String,
    pub total_earnings: String,
}
