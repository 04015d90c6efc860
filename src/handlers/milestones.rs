use actix_web::{HttpResponse, web};
use uuid::Uuid;

use crate::auth::middleware::AuthenticatedUser;
use crate::error::AppError;
use crate::models::milestones::{CreateMilestone, UpdateMilestone};
use crate::services::milestones;
use crate::state::AppState;

/// GET /api/projects/{id}/milestones
///
/// Milestones in creation order with progress and amount totals.
pub async fn get_milestones(
    user: AuthenticatedUser,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let overview = milestones::overview(&state.db, &user.0, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(overview))
}

/// POST /api/projects/{id}/milestones
pub async fn create_milestone(
    user: AuthenticatedUser,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<CreateMilestone>,
) -> Result<HttpResponse, AppError> {
    let milestone =
        milestones::create(&state.db, &user.0, path.into_inner(), body.into_inner()).await?;
    Ok(HttpResponse::Created().json(milestone))
}

/// PUT /api/milestones/{id}
pub async fn update_milestone(
    user: AuthenticatedUser,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateMilestone>,
) -> Result<HttpResponse, AppError> {
    let milestone =
        milestones::update(&state.db, &user.0, path.into_inner(), body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(milestone))
}
