use chrono::Utc;
use sea_orm::*;
use uuid::Uuid;

use crate::models::disputes::{self, CreateDispute, DisputeStatus};

pub async fn insert_dispute<C: ConnectionTrait>(
    db: &C,
    project_id: Uuid,
    initiated_by: Uuid,
    input: CreateDispute,
) -> Result<disputes::Model, DbErr> {
    let new_dispute = disputes::ActiveModel {
        id: Set(Uuid::new_v4()),
        project_id: Set(project_id),
        initiated_by: Set(initiated_by),
        dispute_type: Set(input.dispute_type),
        description: Set(input.description),
        status: Set(DisputeStatus::Open),
        resolution_notes: Set(None),
        resolved_by: Set(None),
        resolved_at: Set(None),
        created_at: Set(Utc::now()),
        updated_at: Set(None),
    };

    new_dispute.insert(db).await
}

pub async fn list_for_project<C: ConnectionTrait>(
    db: &C,
    project_id: Uuid,
) -> Result<Vec<disputes::Model>, DbErr> {
    disputes::Entity::find()
        .filter(disputes::Column::ProjectId.eq(project_id))
        .order_by_desc(disputes::Column::CreatedAt)
        .all(db)
        .await
}

pub async fn get_dispute_by_id<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
) -> Result<Option<disputes::Model>, DbErr> {
    disputes::Entity::find_by_id(id).one(db).await
}

/// Move a dispute to `status`. `settled_by` is recorded, with the time, when
/// the dispute leaves the active queue.
pub async fn set_status<C: ConnectionTrait>(
    db: &C,
    dispute: disputes::Model,
    status: DisputeStatus,
    resolution_notes: Option<String>,
    settled_by: Option<Uuid>,
) -> Result<disputes::Model, DbErr> {
    let now = Utc::now();
    let mut active: disputes::ActiveModel = dispute.into();
    active.status = Set(status);
    if let Some(notes) = resolution_notes {
        active.resolution_notes = Set(Some(notes));
    }
    if let Some(user_id) = settled_by {
        active.resolved_by = Set(Some(user_id));
        active.resolved_at = Set(Some(now));
    }
    active.updated_at = Set(Some(now));

    active.update(db).await
}
