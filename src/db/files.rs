use sea_orm::*;
use uuid::Uuid;

use crate::models::files::{self, NewAttachment};

pub async fn insert_attachment<C: ConnectionTrait>(
    db: &C,
    input: NewAttachment,
) -> Result<files::Model, DbErr> {
    let row = files::ActiveModel {
        id: Set(Uuid::new_v4()),
        uploader_id: Set(input.uploader_id),
        project_id: Set(Some(input.project_id)),
        message_id: Set(None),
        file_name: Set(input.file_name),
        file_size: Set(Some(input.file_size)),
        file_type: Set(input.file_type),
        file_url: Set(input.file_url),
        is_public: Set(false),
        created_at: Set(chrono::Utc::now()),
    };

    row.insert(db).await
}

pub async fn list_for_project<C: ConnectionTrait>(
    db: &C,
    project_id: Uuid,
) -> Result<Vec<files::Model>, DbErr> {
    files::Entity::find()
        .filter(files::Column::ProjectId.eq(project_id))
        .order_by_desc(files::Column::CreatedAt)
        .all(db)
        .await
}
