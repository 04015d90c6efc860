use actix_web::{HttpResponse, Responder, web};
use validator::Validate;

use crate::auth::middleware::AuthenticatedUser;
use crate::db::preferences as preference_db;
use crate::error::AppError;
use crate::models::preferences::UpdatePreferences;
use crate::state::AppState;

/// GET /api/preferences
///
/// `null` until the user saves preferences for the first time.
pub async fn get_preferences(user: AuthenticatedUser, state: web::Data<AppState>) -> impl Responder {
    match preference_db::get_for_user(&state.db, user.id()).await {
        Ok(prefs) => HttpResponse::Ok().json(prefs),
        Err(e) => HttpResponse::from_error(AppError::from(e)),
    }
}

/// PUT /api/preferences
pub async fn update_preferences(
    user: AuthenticatedUser,
    state: web::Data<AppState>,
    body: web::Json<UpdatePreferences>,
) -> Result<HttpResponse, AppError> {
    body.validate()?;
    let input = body.into_inner();

    if let (Some(min), Some(max)) = (
        input.preferred_budget_range_min,
        input.preferred_budget_range_max,
    ) {
        if min > max {
            return Err(AppError::Validation(
                "Minimum budget cannot exceed maximum budget".to_string(),
            ));
        }
    }

    let prefs = preference_db::upsert(&state.db, user.id(), input).await?;
    Ok(HttpResponse::Ok().json(prefs))
}
