use sea_orm::*;
use uuid::Uuid;

use crate::models::client_profiles::{self, UpdateClientProfile};

pub async fn insert_default<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
) -> Result<client_profiles::Model, DbErr> {
    client_profiles::ActiveModel {
        id: Set(id),
        company_name: Set(None),
        company_size: Set(None),
        industry: Set(None),
        total_spent: Set(Some(0.0)),
        active_projects: Set(Some(0)),
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
) -> Result<Option<client_profiles::Model>, DbErr> {
    client_profiles::Entity::find_by_id(id).one(db).await
}

pub async fn upsert<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
    input: UpdateClientProfile,
) -> Result<client_profiles::Model, DbErr> {
    let existing = match get_by_id(db, id).await? {
        Some(row) => row,
        None => insert_default(db, id).await?,
    };

    let mut active: client_profiles::ActiveModel = existing.into();

    if let Some(company_name) = input.company_name {
        active.company_name = Set(Some(company_name));
    }
    if let Some(company_size) = input.company_size {
        active.company_size = Set(Some(company_size));
    }
    if let Some(industry) = input.industry {
        active.industry = Set(Some(industry));
    }
    active.updated_at = Set(Some(chrono::Utc::now()));

    active.update(db).await
}

/// Adjust the client's running project counter by `delta`, never below zero.
pub async fn adjust_active_projects<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
    delta: i32,
) -> Result<(), DbErr> {
    if let Some(row) = get_by_id(db, id).await? {
        let next = Ord::max(row.active_projects.unwrap_or(0) + delta, 0);
        let mut active: client_profiles::ActiveModel = row.into();
        active.active_projects = Set(Some(next));
        active.updated_at = Set(Some(chrono::Utc::now()));
        active.update(db).await?;
    }
    Ok(())
}

pub async fn set_rating<C: ConnectionTrait>(db: &C, id: Uuid, rating: f64) -> Result<(), DbErr> {
    if let Some(row) = get_by_id(db, id).await? {
        let mut active: client_profiles::ActiveModel = row.into();
        active.rating = Set(Some(rating));
        active.update(db).await?;
    }
    Ok(())
}
