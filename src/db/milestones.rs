use chrono::Utc;
use sea_orm::*;
use uuid::Uuid;

use crate::domain::milestones::completion_stamp;
use crate::models::milestones::{self, CreateMilestone, MilestoneStatus, UpdateMilestone};

pub async fn insert_milestone<C: ConnectionTrait>(
    db: &C,
    project_id: Uuid,
    input: CreateMilestone,
) -> Result<milestones::Model, DbErr> {
    let new_milestone = milestones::ActiveModel {
        id: Set(Uuid::new_v4()),
        project_id: Set(project_id),
        title: Set(input.title),
        description: Set(input.description),
        amount: Set(input.amount),
        due_date: Set(input.due_date),
        status: Set(MilestoneStatus::Pending),
        completed_at: Set(None),
        created_at: Set(Utc::now()),
        updated_at: Set(None),
    };

    new_milestone.insert(db).await
}

/// Milestones of a project in creation order.
pub async fn list_for_project<C: ConnectionTrait>(
    db: &C,
    project_id: Uuid,
) -> Result<Vec<milestones::Model>, DbErr> {
    milestones::Entity::find()
        .filter(milestones::Column::ProjectId.eq(project_id))
        .order_by_asc(milestones::Column::CreatedAt)
        .all(db)
        .await
}

pub async fn get_milestone_by_id<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
) -> Result<Option<milestones::Model>, DbErr> {
    milestones::Entity::find_by_id(id).one(db).await
}

/// Apply an update. The status must already have been checked by the caller;
/// `completed_at` follows the status so it is set exactly when completed.
pub async fn update_milestone<C: ConnectionTrait>(
    db: &C,
    milestone: milestones::Model,
    input: UpdateMilestone,
) -> Result<milestones::Model, DbErr> {
    let previous = milestone.status;
    let mut active: milestones::ActiveModel = milestone.into();

    if let Some(title) = input.title {
        active.title = Set(title);
    }
    if let Some(description) = input.description {
        active.description = Set(Some(description));
    }
    if let Some(amount) = input.amount {
        active.amount = Set(Some(amount));
    }
    if let Some(due_date) = input.due_date {
        active.due_date = Set(Some(due_date));
    }
    if let Some(status) = input.status {
        if status != previous {
            active.status = Set(status);
            active.completed_at = Set(completion_stamp(status, Utc::now()));
        }
    }
    active.updated_at = Set(Some(Utc::now()));

    active.update(db).await
}
