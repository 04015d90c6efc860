use sea_orm::*;
use uuid::Uuid;

use crate::models::freelancer_profiles::{self, UpdateFreelancerProfile};

/// Empty extension row created alongside a new freelancer profile.
pub async fn insert_default<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
) -> Result<freelancer_profiles::Model, DbErr> {
    freelancer_profiles::ActiveModel {
        id: Set(id),
        skills: Set(None),
        hourly_rate: Set(None),
        experience_level: Set(None),
        portfolio_url: Set(None),
        availability_status: Set(Some("available".to_string())),
        total_earnings: Set(Some(0.0)),
        completed_projects: Set(Some(0)),
        rating: Set(None),
        created_at: Set(chrono::Utc::now()),
        updated_at: Set(None),
    }
    .insert(db)
    .await
}

pub async fn get_by_id<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
) -> Result<Option<freelancer_profiles::Model>, DbErr> {
    freelancer_profiles::Entity::find_by_id(id).one(db).await
}

/// Update the freelancer extension, creating it when it is missing.
pub async fn upsert<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
    input: UpdateFreelancerProfile,
) -> Result<freelancer_profiles::Model, DbErr> {
    let existing = match get_by_id(db, id).await? {
        Some(row) => row,
        None => insert_default(db, id).await?,
    };

    let mut active: freelancer_profiles::ActiveModel = existing.into();

    if let Some(skills) = input.skills {
        active.skills = Set(Some(skills));
    }
    if let Some(hourly_rate) = input.hourly_rate {
        active.hourly_rate = Set(Some(hourly_rate));
    }
    if let Some(experience_level) = input.experience_level {
        active.experience_level = Set(Some(experience_level));
    }
    if let Some(portfolio_url) = input.portfolio_url {
        active.portfolio_url = Set(Some(portfolio_url));
    }
    if let Some(availability_status) = input.availability_status {
        active.availability_status = Set(Some(availability_status));
    }
    active.updated_at = Set(Some(chrono::Utc::now()));

    active.update(db).await
}

/// Bump earnings and completed-project counters when a project closes.
pub async fn record_completion<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
    earned: f64,
) -> Result<Option<freelancer_profiles::Model>, DbErr> {
    let Some(row) = get_by_id(db, id).await? else {
        return Ok(None);
    };

    let total_earnings = row.total_earnings.unwrap_or(0.0) + earned;
    let completed = row.completed_projects.unwrap_or(0) + 1;

    let mut active: freelancer_profiles::ActiveModel = row.into();
    active.total_earnings = Set(Some(total_earnings));
    active.completed_projects = Set(Some(completed));
    active.updated_at = Set(Some(chrono::Utc::now()));

    active.update(db).await.map(Some)
}

/// Store a recomputed average rating.
pub async fn set_rating<C: ConnectionTrait>(db: &C, id: Uuid, rating: f64) -> Result<(), DbErr> {
    if let Some(row) = get_by_id(db, id).await? {
        let mut active: freelancer_profiles::ActiveModel = row.into();
        active.rating = Set(Some(rating));
        active.update(db).await?;
    }
    Ok(())
}
