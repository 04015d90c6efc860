use sea_orm::*;
use uuid::Uuid;

use crate::models::saved_projects::{self, SaveProject};

pub async fn insert_saved_project<C: ConnectionTrait>(
    db: &C,
    user_id: Uuid,
    input: SaveProject,
) -> Result<saved_projects::Model, DbErr> {
    let row = saved_projects::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user_id),
        project_id: Set(input.project_id),
        notes: Set(input.notes),
        created_at: Set(chrono::Utc::now()),
    };

    row.insert(db).await
}

pub async fn find_saved<C: ConnectionTrait>(
    db: &C,
    user_id: Uuid,
    project_id: Uuid,
) -> Result<Option<saved_projects::Model>, DbErr> {
    saved_projects::Entity::find()
        .filter(saved_projects::Column::UserId.eq(user_id))
        .filter(saved_projects::Column::ProjectId.eq(project_id))
        .one(db)
        .await
}

/// A user's bookmarks, newest first.
pub async fn list_for_user<C: ConnectionTrait>(
    db: &C,
    user_id: Uuid,
) -> Result<Vec<saved_projects::Model>, DbErr> {
    saved_projects::Entity::find()
        .filter(saved_projects::Column::UserId.eq(user_id))
        .order_by_desc(saved_projects::Column::CreatedAt)
        .all(db)
        .await
}

pub async fn delete_saved<C: ConnectionTrait>(
    db: &C,
    user_id: Uuid,
    project_id: Uuid,
) -> Result<DeleteResult, DbErr> {
    saved_projects::Entity::delete_many()
        .filter(saved_projects::Column::UserId.eq(user_id))
        .filter(saved_projects::Column::ProjectId.eq(project_id))
        .exec(db)
        .await
}
