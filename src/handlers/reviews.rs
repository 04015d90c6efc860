use actix_web::{HttpResponse, web};
use uuid::Uuid;

use crate::auth::middleware::AuthenticatedUser;
use crate::error::AppError;
use crate::models::reviews::CreateReview;
use crate::services::reviews;
use crate::state::AppState;

/// GET /api/users/{id}/reviews
///
/// Public reviews about the user, newest first, with the rating summary.
pub async fn get_user_reviews(
    _user: AuthenticatedUser,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let overview = reviews::for_user(&state.db, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(overview))
}

/// POST /api/reviews
pub async fn create_review(
    user: AuthenticatedUser,
    state: web::Data<AppState>,
    body: web::Json<CreateReview>,
) -> Result<HttpResponse, AppError> {
    let review = reviews::create(&state.db, &user.0, body.into_inner()).await?;
    Ok(HttpResponse::Created().json(review))
}
