use actix_web::{HttpResponse, Responder, web};
use uuid::Uuid;

use crate::auth::authorization::load_project;
use crate::auth::middleware::AuthenticatedUser;
use crate::db::projects as project_db;
use crate::db::saved_projects as saved_db;
use crate::error::AppError;
use crate::models::saved_projects::{SaveProject, SavedProjectView};
use crate::state::AppState;

/// GET /api/saved-projects
///
/// The caller's bookmarks, newest first, each with its project.
pub async fn get_saved_projects(
    user: AuthenticatedUser,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let saved = saved_db::list_for_user(&state.db, user.id()).await?;

    let ids = saved.iter().map(|s| s.project_id).collect();
    let projects = project_db::get_projects_by_ids(&state.db, ids).await?;

    let views: Vec<SavedProjectView> = saved
        .into_iter()
        .map(|s| SavedProjectView {
            project: projects.iter().find(|p| p.id == s.project_id).cloned(),
            saved: s,
        })
        .collect();

    Ok(HttpResponse::Ok().json(views))
}

/// POST /api/saved-projects
pub async fn save_project(
    user: AuthenticatedUser,
    state: web::Data<AppState>,
    body: web::Json<SaveProject>,
) -> Result<HttpResponse, AppError> {
    let input = body.into_inner();
    load_project(&state.db, input.project_id).await?;

    if saved_db::find_saved(&state.db, user.id(), input.project_id)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict(
            "You have already saved this project".to_string(),
        ));
    }

    let saved = saved_db::insert_saved_project(&state.db, user.id(), input).await?;
    Ok(HttpResponse::Created().json(saved))
}

/// DELETE /api/saved-projects/{project_id}
pub async fn unsave_project(
    user: AuthenticatedUser,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let project_id = path.into_inner();
    match saved_db::delete_saved(&state.db, user.id(), project_id).await {
        Ok(result) if result.rows_affected > 0 => HttpResponse::NoContent().finish(),
        Ok(_) => HttpResponse::NotFound().json(serde_json::json!({
            "error": format!("Project {project_id} is not in your saved list"),
        })),
        Err(e) => HttpResponse::from_error(AppError::from(e)),
    }
}
