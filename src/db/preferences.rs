use sea_orm::*;
use uuid::Uuid;

use crate::models::preferences::{self, UpdatePreferences};

pub async fn get_for_user<C: ConnectionTrait>(
    db: &C,
    user_id: Uuid,
) -> Result<Option<preferences::Model>, DbErr> {
    preferences::Entity::find()
        .filter(preferences::Column::UserId.eq(user_id))
        .one(db)
        .await
}

/// Insert or update the caller's preferences row (one per user).
pub async fn upsert<C: ConnectionTrait>(
    db: &C,
    user_id: Uuid,
    input: UpdatePreferences,
) -> Result<preferences::Model, DbErr> {
    let now = chrono::Utc::now();

    let existing = get_for_user(db, user_id).await?;
    let is_new = existing.is_none();

    let mut active: preferences::ActiveModel = match existing {
        Some(row) => {
            let mut active: preferences::ActiveModel = row.into();
            active.updated_at = Set(Some(now));
            active
        }
        None => preferences::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            preferred_project_types: Set(None),
            preferred_budget_range_min: Set(None),
            preferred_budget_range_max: Set(None),
            preferred_project_duration: Set(None),
            notification_settings: Set(serde_json::json!({})),
            ai_matching_enabled: Set(true),
            created_at: Set(now),
            updated_at: Set(None),
        },
    };

    if let Some(types) = input.preferred_project_types {
        active.preferred_project_types = Set(Some(types));
    }
    if let Some(min) = input.preferred_budget_range_min {
        active.preferred_budget_range_min = Set(Some(min));
    }
    if let Some(max) = input.preferred_budget_range_max {
        active.preferred_budget_range_max = Set(Some(max));
    }
    if let Some(duration) = input.preferred_project_duration {
        active.preferred_project_duration = Set(Some(duration));
    }
    if let Some(settings) = input.notification_settings {
        active.notification_settings = Set(settings);
    }
    if let Some(enabled) = input.ai_matching_enabled {
        active.ai_matching_enabled = Set(enabled);
    }

    if is_new {
        active.insert(db).await
    } else {
        active.update(db).await
    }
}
