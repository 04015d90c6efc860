use actix_web::{HttpResponse, web};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use uuid::Uuid;

use crate::auth::middleware::AuthenticatedUser;
use crate::error::AppError;
use crate::models::files::UploadQuery;
use crate::services::files;
use crate::state::AppState;

/// GET /api/projects/{id}/files
pub async fn get_files(
    user: AuthenticatedUser,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let rows = files::list(&state.db, &user.0, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(rows))
}

/// POST /api/projects/{id}/files?file_name=report.pdf
///
/// The request body is the raw file content.
pub async fn upload_file(
    user: AuthenticatedUser,
    credentials: BearerAuth,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    query: web::Query<UploadQuery>,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    let storage = state.storage.as_ref().ok_or(AppError::NotConfigured)?;

    let attachment = files::upload(
        &state.db,
        storage,
        &user.0,
        credentials.token(),
        path.into_inner(),
        &query.file_name,
        body.to_vec(),
    )
    .await?;

    Ok(HttpResponse::Created().json(attachment))
}
