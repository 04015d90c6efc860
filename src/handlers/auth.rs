use actix_web::{HttpResponse, web};
use actix_web_httpauth::extractors::bearer::BearerAuth;

use crate::auth::middleware::AuthenticatedUser;
use crate::cache::keys;
use crate::db::profiles as profile_db;
use crate::error::AppError;
use crate::services::auth::{SignInRequest, SignUpRequest};
use crate::state::AppState;

/// POST /api/auth/sign-up
///
/// Validates locally, then registers with the hosted auth service. The
/// session is absent when email confirmation is required.
pub async fn sign_up(
    state: web::Data<AppState>,
    body: web::Json<SignUpRequest>,
) -> Result<HttpResponse, AppError> {
    let outcome = state.auth.sign_up(body.into_inner()).await?;
    Ok(HttpResponse::Created().json(outcome))
}

/// POST /api/auth/sign-in
pub async fn sign_in(
    state: web::Data<AppState>,
    body: web::Json<SignInRequest>,
) -> Result<HttpResponse, AppError> {
    let session = state.auth.sign_in(body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(session))
}

/// POST /api/auth/sign-out
pub async fn sign_out(
    user: AuthenticatedUser,
    credentials: BearerAuth,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    state.auth.sign_out(credentials.token(), user.id()).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Signed out" })))
}

/// GET /api/auth/session
///
/// The auth service's view of the bearer token's user.
pub async fn session(
    credentials: BearerAuth,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let user = state.auth.current_user(credentials.token()).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "user": user })))
}

/// GET /api/auth/me
pub async fn me(
    user: AuthenticatedUser,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = user.id();
    let bundle = state
        .cache
        .get_or_load(&keys::profile(id), state.config.cache.profile_ttl, || async {
            profile_db::get_profile_bundle(&state.db, id)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Profile {id} not found")))
        })
        .await?;

    Ok(HttpResponse::Ok().json(bundle))
}
