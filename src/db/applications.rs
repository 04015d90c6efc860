use chrono::{DateTime, Utc};
use sea_orm::*;
use uuid::Uuid;

use crate::models::applications::{
    self, ApplicationFilters, ApplicationStatus, CreateApplication, UpdateApplication,
};

/// Insert a new application (defaults to Pending status).
pub async fn insert_application<C: ConnectionTrait>(
    db: &C,
    input: CreateApplication,
    freelancer_id: Uuid,
) -> Result<applications::Model, DbErr> {
    let new_application = applications::ActiveModel {
        id: Set(Uuid::new_v4()),
        project_id: Set(input.project_id),
        freelancer_id: Set(freelancer_id),
        cover_letter: Set(input.cover_letter),
        proposed_rate: Set(input.proposed_rate),
        estimated_duration: Set(input.estimated_duration),
        status: Set(ApplicationStatus::Pending),
        created_at: Set(Utc::now()),
        updated_at: Set(None),
    };

    new_application.insert(db).await
}

/// List applications newest first, filtered by project and/or freelancer.
pub async fn list_applications<C: ConnectionTrait>(
    db: &C,
    filters: &ApplicationFilters,
) -> Result<Vec<applications::Model>, DbErr> {
    let mut query = applications::Entity::find();

    if let Some(project_id) = filters.project_id {
        query = query.filter(applications::Column::ProjectId.eq(project_id));
    }
    if let Some(freelancer_id) = filters.freelancer_id {
        query = query.filter(applications::Column::FreelancerId.eq(freelancer_id));
    }

    query
        .order_by_desc(applications::Column::CreatedAt)
        .all(db)
        .await
}

pub async fn get_application_by_id<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
) -> Result<Option<applications::Model>, DbErr> {
    applications::Entity::find_by_id(id).one(db).await
}

/// Whether the freelancer already applied to the project.
pub async fn application_exists<C: ConnectionTrait>(
    db: &C,
    project_id: Uuid,
    freelancer_id: Uuid,
) -> Result<bool, DbErr> {
    let count = applications::Entity::find()
        .filter(applications::Column::ProjectId.eq(project_id))
        .filter(applications::Column::FreelancerId.eq(freelancer_id))
        .count(db)
        .await?;
    Ok(count > 0)
}

pub async fn update_application<C: ConnectionTrait>(
    db: &C,
    application: applications::Model,
    input: UpdateApplication,
) -> Result<applications::Model, DbErr> {
    let mut active: applications::ActiveModel = application.into();

    if let Some(cover_letter) = input.cover_letter {
        active.cover_letter = Set(Some(cover_letter));
    }
    if let Some(proposed_rate) = input.proposed_rate {
        active.proposed_rate = Set(Some(proposed_rate));
    }
    if let Some(estimated_duration) = input.estimated_duration {
        active.estimated_duration = Set(Some(estimated_duration));
    }
    active.updated_at = Set(Some(Utc::now()));

    active.update(db).await
}

pub async fn set_status<C: ConnectionTrait>(
    db: &C,
    application: applications::Model,
    status: ApplicationStatus,
) -> Result<applications::Model, DbErr> {
    let mut active: applications::ActiveModel = application.into();
    active.status = Set(status);
    active.updated_at = Set(Some(Utc::now()));

    active.update(db).await
}

/// Applications a freelancer submitted since `since`, for the free-tier quota.
pub async fn count_created_since<C: ConnectionTrait>(
    db: &C,
    freelancer_id: Uuid,
    since: DateTime<Utc>,
) -> Result<u64, DbErr> {
    applications::Entity::find()
        .filter(applications::Column::FreelancerId.eq(freelancer_id))
        .filter(applications::Column::CreatedAt.gte(since))
        .count(db)
        .await
}

pub async fn delete_application<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
) -> Result<DeleteResult, DbErr> {
    applications::Entity::delete_by_id(id).exec(db).await
}
