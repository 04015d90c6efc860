use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::authorization::verify_project_party;
use crate::db::files as file_db;
use crate::db::profiles as profile_db;
use crate::error::AppError;
use crate::models::files::{self, AttachmentView, NewAttachment};
use crate::models::profiles;
use crate::supabase::StorageClient;
use crate::supabase::storage::{attachment_path, content_type_for};

/// Largest attachment accepted, in bytes.
pub const MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

/// Upload to storage, then record the attachment with its public URL.
pub async fn upload(
    db: &DatabaseConnection,
    storage: &StorageClient,
    user: &profiles::Model,
    access_token: &str,
    project_id: Uuid,
    file_name: &str,
    bytes: Vec<u8>,
) -> Result<files::Model, AppError> {
    let file_name = file_name.trim();
    if file_name.is_empty() {
        return Err(AppError::Validation("A file name is required".to_string()));
    }
    if bytes.is_empty() {
        return Err(AppError::Validation("The uploaded file is empty".to_string()));
    }
    if bytes.len() > MAX_FILE_SIZE {
        return Err(AppError::Validation(
            "Files must be 10 MB or smaller".to_string(),
        ));
    }
    verify_project_party(db, project_id, user.id).await?;

    let path = attachment_path(project_id, file_name);
    let content_type = content_type_for(file_name);
    let size = bytes.len() as i64;

    storage.upload(access_token, &path, content_type, bytes).await?;

    let attachment = file_db::insert_attachment(
        db,
        NewAttachment {
            uploader_id: user.id,
            project_id,
            file_name: file_name.to_string(),
            file_size: size,
            file_type: Some(content_type.to_string()),
            file_url: storage.public_url(&path),
        },
    )
    .await?;

    tracing::info!(file_id = %attachment.id, bucket = storage.bucket(), "file attached");
    Ok(attachment)
}

pub async fn list(
    db: &DatabaseConnection,
    user: &profiles::Model,
    project_id: Uuid,
) -> Result<Vec<AttachmentView>, AppError> {
    verify_project_party(db, project_id, user.id).await?;
    let rows = file_db::list_for_project(db, project_id).await?;

    let ids: Vec<Uuid> = rows.iter().map(|f| f.uploader_id).collect();
    let names = profile_db::profiles_by_ids(db, ids).await?;

    Ok(rows
        .into_iter()
        .map(|attachment| AttachmentView {
            uploader_name: names.get(&attachment.uploader_id).map(|p| p.full_name.clone()),
            attachment,
        })
        .collect())
}
