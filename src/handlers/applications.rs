use actix_web::{HttpResponse, web};
use uuid::Uuid;

use crate::auth::middleware::AuthenticatedUser;
use crate::error::AppError;
use crate::models::applications::{ApplicationFilters, CreateApplication, UpdateApplication};
use crate::services::applications;
use crate::state::AppState;

/// GET /api/applications
///
/// With `project_id` of a project the caller owns, every application on it;
/// otherwise the caller's own applications.
pub async fn get_applications(
    user: AuthenticatedUser,
    state: web::Data<AppState>,
    query: web::Query<ApplicationFilters>,
) -> Result<HttpResponse, AppError> {
    let rows = applications::list(&state.db, &user.0, query.into_inner()).await?;
    Ok(HttpResponse::Ok().json(rows))
}

/// POST /api/applications
pub async fn create_application(
    user: AuthenticatedUser,
    state: web::Data<AppState>,
    body: web::Json<CreateApplication>,
) -> Result<HttpResponse, AppError> {
    let application = applications::submit(&state.db, &user.0, body.into_inner()).await?;
    Ok(HttpResponse::Created().json(application))
}

/// GET /api/applications/{id}
pub async fn get_application(
    user: AuthenticatedUser,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let application = applications::get(&state.db, &user.0, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(application))
}

/// PUT /api/applications/{id}
pub async fn update_application(
    user: AuthenticatedUser,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateApplication>,
) -> Result<HttpResponse, AppError> {
    let application =
        applications::update(&state.db, &user.0, path.into_inner(), body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(application))
}

/// DELETE /api/applications/{id}
///
/// Withdraws a pending application.
pub async fn delete_application(
    user: AuthenticatedUser,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    applications::withdraw(&state.db, &user.0, path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// POST /api/applications/{id}/accept
pub async fn accept_application(
    user: AuthenticatedUser,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let accepted = applications::accept(&state.db, &user.0, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(accepted))
}

/// POST /api/applications/{id}/reject
pub async fn reject_application(
    user: AuthenticatedUser,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let application = applications::reject(&state.db, &user.0, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(application))
}
