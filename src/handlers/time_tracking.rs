use actix_web::{HttpResponse, web};
use uuid::Uuid;

use crate::auth::middleware::AuthenticatedUser;
use crate::error::AppError;
use crate::models::time_tracking::StartTimer;
use crate::services::time_tracking;
use crate::state::AppState;

/// GET /api/projects/{id}/time-entries
pub async fn get_time_entries(
    user: AuthenticatedUser,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let sheet = time_tracking::timesheet(&state.db, &user.0, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(sheet))
}

/// POST /api/projects/{id}/time-entries/start
pub async fn start_timer(
    user: AuthenticatedUser,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<StartTimer>,
) -> Result<HttpResponse, AppError> {
    let entry =
        time_tracking::start(&state.db, &user.0, path.into_inner(), body.into_inner()).await?;
    Ok(HttpResponse::Created().json(entry))
}

/// POST /api/time-entries/{id}/stop
pub async fn stop_timer(
    user: AuthenticatedUser,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let entry = time_tracking::stop(&state.db, &user.0, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(entry))
}
