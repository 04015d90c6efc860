use actix_web::{HttpResponse, Responder, web};
use uuid::Uuid;

use crate::auth::middleware::AuthenticatedUser;
use crate::db::projects as project_db;
use crate::error::AppError;
use crate::models::projects::{CreateProject, ProjectFilters, UpdateProject, UpdateProjectStatus};
use crate::services::projects;
use crate::state::AppState;

/// GET /api/projects
///
/// Newest first. Filters: `status`, `client_id`, plus `page` / `limit`.
pub async fn get_projects(
    _user: AuthenticatedUser,
    state: web::Data<AppState>,
    query: web::Query<ProjectFilters>,
) -> impl Responder {
    match project_db::list_projects(&state.db, &query).await {
        Ok(projects) => HttpResponse::Ok().json(projects),
        Err(e) => HttpResponse::from_error(AppError::from(e)),
    }
}

/// POST /api/projects
///
/// Clients only. Free-tier clients are limited to five posts per month.
pub async fn create_project(
    user: AuthenticatedUser,
    state: web::Data<AppState>,
    body: web::Json<CreateProject>,
) -> Result<HttpResponse, AppError> {
    let project = projects::create_project(&state.db, &user.0, body.into_inner()).await?;
    Ok(HttpResponse::Created().json(project))
}

/// GET /api/projects/{id}
pub async fn get_project(
    _user: AuthenticatedUser,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let project = projects::get_project(&state.db, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(project))
}

/// PUT /api/projects/{id}
pub async fn update_project(
    user: AuthenticatedUser,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateProject>,
) -> Result<HttpResponse, AppError> {
    let project =
        projects::update_project(&state.db, &user.0, path.into_inner(), body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(project))
}

/// PUT /api/projects/{id}/status
///
/// `in_progress` is reached only by accepting an application.
pub async fn update_status(
    user: AuthenticatedUser,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateProjectStatus>,
) -> Result<HttpResponse, AppError> {
    let project =
        projects::update_status(&state.db, &user.0, path.into_inner(), body.status).await?;
    Ok(HttpResponse::Ok().json(project))
}

/// DELETE /api/projects/{id}
pub async fn delete_project(
    user: AuthenticatedUser,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    projects::delete_project(&state.db, &user.0, path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
