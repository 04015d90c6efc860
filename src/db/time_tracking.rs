use chrono::{DateTime, Utc};
use sea_orm::*;
use uuid::Uuid;

use crate::domain::time;
use crate::models::time_tracking;

/// Open a new running entry starting now.
pub async fn start_entry<C: ConnectionTrait>(
    db: &C,
    project_id: Uuid,
    freelancer_id: Uuid,
    description: String,
    is_billable: bool,
    hourly_rate: Option<f64>,
) -> Result<time_tracking::Model, DbErr> {
    let now = Utc::now();
    let entry = time_tracking::ActiveModel {
        id: Set(Uuid::new_v4()),
        project_id: Set(project_id),
        freelancer_id: Set(freelancer_id),
        start_time: Set(now),
        end_time: Set(None),
        duration_minutes: Set(None),
        description: Set(Some(description)),
        is_billable: Set(is_billable),
        hourly_rate: Set(hourly_rate),
        created_at: Set(now),
        updated_at: Set(None),
    };

    entry.insert(db).await
}

/// The running entry for this freelancer on this project, if any.
pub async fn find_running<C: ConnectionTrait>(
    db: &C,
    project_id: Uuid,
    freelancer_id: Uuid,
) -> Result<Option<time_tracking::Model>, DbErr> {
    time_tracking::Entity::find()
        .filter(time_tracking::Column::ProjectId.eq(project_id))
        .filter(time_tracking::Column::FreelancerId.eq(freelancer_id))
        .filter(time_tracking::Column::EndTime.is_null())
        .one(db)
        .await
}

pub async fn get_entry_by_id<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
) -> Result<Option<time_tracking::Model>, DbErr> {
    time_tracking::Entity::find_by_id(id).one(db).await
}

/// Close a running entry at `end`, storing the whole minutes elapsed.
pub async fn stop_entry<C: ConnectionTrait>(
    db: &C,
    entry: time_tracking::Model,
    end: DateTime<Utc>,
) -> Result<time_tracking::Model, DbErr> {
    let minutes = time::duration_minutes(entry.start_time, end);

    let mut active: time_tracking::ActiveModel = entry.into();
    active.end_time = Set(Some(end));
    active.duration_minutes = Set(Some(minutes));
    active.updated_at = Set(Some(end));

    active.update(db).await
}

/// Entries for a project, most recent start first.
pub async fn list_for_project<C: ConnectionTrait>(
    db: &C,
    project_id: Uuid,
) -> Result<Vec<time_tracking::Model>, DbErr> {
    time_tracking::Entity::find()
        .filter(time_tracking::Column::ProjectId.eq(project_id))
        .order_by_desc(time_tracking::Column::StartTime)
        .all(db)
        .await
}
