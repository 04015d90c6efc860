use actix_web::{HttpResponse, web};
use uuid::Uuid;

use crate::auth::middleware::AuthenticatedUser;
use crate::error::AppError;
use crate::models::disputes::{CreateDispute, UpdateDisputeStatus};
use crate::services::disputes;
use crate::state::AppState;

/// GET /api/projects/{id}/disputes
pub async fn get_disputes(
    user: AuthenticatedUser,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let rows = disputes::list(&state.db, &user.0, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(rows))
}

/// POST /api/projects/{id}/disputes
pub async fn create_dispute(
    user: AuthenticatedUser,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<CreateDispute>,
) -> Result<HttpResponse, AppError> {
    let dispute =
        disputes::open(&state.db, &user.0, path.into_inner(), body.into_inner()).await?;
    Ok(HttpResponse::Created().json(dispute))
}

/// PUT /api/disputes/{id}/status
pub async fn update_dispute_status(
    user: AuthenticatedUser,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateDisputeStatus>,
) -> Result<HttpResponse, AppError> {
    let dispute =
        disputes::update_status(&state.db, &user.0, path.into_inner(), body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(dispute))
}
