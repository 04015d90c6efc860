use std::collections::HashMap;

use sea_orm::*;
use uuid::Uuid;

use crate::models::client_profiles;
use crate::models::freelancer_profiles;
use crate::models::profiles::{self, CreateProfileFromAuth, UpdateProfile, UserType};
use crate::models::subscriptions::SubscriptionTier;

/// Look up the profile for a Supabase auth user, creating it (and its
/// role-specific extension row) on first sight.
pub async fn find_or_create_from_auth<C: ConnectionTrait>(
    db: &C,
    input: CreateProfileFromAuth,
) -> Result<profiles::Model, DbErr> {
    if let Some(existing) = profiles::Entity::find_by_id(input.id).one(db).await? {
        return Ok(existing);
    }

    let now = chrono::Utc::now();
    let profile = profiles::ActiveModel {
        id: Set(input.id),
        user_type: Set(input.user_type),
        full_name: Set(input.full_name),
        email: Set(input.email),
        avatar_url: Set(input.avatar_url),
        bio: Set(None),
        location: Set(None),
        website: Set(None),
        phone: Set(None),
        subscription_tier: Set(SubscriptionTier::Free),
        created_at: Set(now),
        updated_at: Set(None),
    }
    .insert(db)
    .await?;

    match profile.user_type {
        UserType::Freelancer => {
            super::freelancer_profiles::insert_default(db, profile.id).await?;
        }
        UserType::Client => {
            super::client_profiles::insert_default(db, profile.id).await?;
        }
    }

    tracing::info!(user_id = %profile.id, user_type = ?profile.user_type, "created profile");
    Ok(profile)
}

pub async fn get_profile_by_id<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
) -> Result<Option<profiles::Model>, DbErr> {
    profiles::Entity::find_by_id(id).one(db).await
}

/// Fetch a profile together with whichever extension row it has.
pub async fn get_profile_bundle<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
) -> Result<Option<profiles::ProfileBundle>, DbErr> {
    let Some(profile) = get_profile_by_id(db, id).await? else {
        return Ok(None);
    };

    let (freelancer, client) = match profile.user_type {
        UserType::Freelancer => (
            freelancer_profiles::Entity::find_by_id(id).one(db).await?,
            None,
        ),
        UserType::Client => (None, client_profiles::Entity::find_by_id(id).one(db).await?),
    };

    Ok(Some(profiles::ProfileBundle {
        profile,
        freelancer,
        client,
    }))
}

/// Profiles for a set of ids keyed by id, used to decorate joined views.
pub async fn profiles_by_ids<C: ConnectionTrait>(
    db: &C,
    ids: Vec<Uuid>,
) -> Result<HashMap<Uuid, profiles::Model>, DbErr> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows = profiles::Entity::find()
        .filter(profiles::Column::Id.is_in(ids))
        .all(db)
        .await?;

    Ok(rows.into_iter().map(|p| (p.id, p)).collect())
}

pub async fn update_profile<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
    input: UpdateProfile,
) -> Result<profiles::Model, DbErr> {
    let profile = profiles::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Profile not found".to_string()))?;

    let mut active: profiles::ActiveModel = profile.into();

    if let Some(full_name) = input.full_name {
        active.full_name = Set(full_name);
    }
    if let Some(avatar_url) = input.avatar_url {
        active.avatar_url = Set(Some(avatar_url));
    }
    if let Some(bio) = input.bio {
        active.bio = Set(Some(bio));
    }
    if let Some(location) = input.location {
        active.location = Set(Some(location));
    }
    if let Some(website) = input.website {
        active.website = Set(Some(website));
    }
    if let Some(phone) = input.phone {
        active.phone = Set(Some(phone));
    }
    active.updated_at = Set(Some(chrono::Utc::now()));

    active.update(db).await
}

pub async fn set_subscription_tier<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
    tier: SubscriptionTier,
) -> Result<profiles::Model, DbErr> {
    let profile = profiles::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Profile not found".to_string()))?;

    let mut active: profiles::ActiveModel = profile.into();
    active.subscription_tier = Set(tier);
    active.updated_at = Set(Some(chrono::Utc::now()));

    active.update(db).await
}

pub async fn delete_profile<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<DeleteResult, DbErr> {
    profiles::Entity::delete_by_id(id).exec(db).await
}
