use actix_web::{HttpResponse, web};

use crate::auth::middleware::AuthenticatedUser;
use crate::error::AppError;
use crate::services::matching::{self, MatchQuery};
use crate::state::AppState;

/// GET /api/matching/projects?limit=10
///
/// Open projects ranked for the calling freelancer. `match_score` is null
/// when the freelancer has no skills or has turned matching off.
pub async fn get_matched_projects(
    user: AuthenticatedUser,
    state: web::Data<AppState>,
    query: web::Query<MatchQuery>,
) -> Result<HttpResponse, AppError> {
    let projects = matching::recommend(&state.db, &user.0, &query).await?;
    Ok(HttpResponse::Ok().json(projects))
}
