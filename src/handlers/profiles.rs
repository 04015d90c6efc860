use actix_web::{HttpResponse, Responder, web};
use uuid::Uuid;
use validator::Validate;

use crate::auth::authorization::verify_self;
use crate::auth::middleware::AuthenticatedUser;
use crate::cache::keys;
use crate::db::client_profiles as client_db;
use crate::db::freelancer_profiles as freelancer_db;
use crate::db::profiles as profile_db;
use crate::error::AppError;
use crate::models::client_profiles::UpdateClientProfile;
use crate::models::freelancer_profiles::UpdateFreelancerProfile;
use crate::models::profiles::UpdateProfile;
use crate::state::AppState;

/// GET /api/profiles/{id}
pub async fn get_profile(
    _user: AuthenticatedUser,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
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

/// PUT /api/profiles/{id}
pub async fn update_profile(
    user: AuthenticatedUser,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateProfile>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    verify_self(&user.0, id)?;
    body.validate()?;

    let updated = profile_db::update_profile(&state.db, id, body.into_inner()).await?;
    state.cache.evict(&keys::profile(id)).await;

    Ok(HttpResponse::Ok().json(updated))
}

/// DELETE /api/profiles/{id}
pub async fn delete_profile(
    user: AuthenticatedUser,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let id = path.into_inner();
    if let Err(e) = verify_self(&user.0, id) {
        return HttpResponse::from_error(e);
    }

    match profile_db::delete_profile(&state.db, id).await {
        Ok(result) if result.rows_affected > 0 => {
            state.cache.evict(&keys::profile(id)).await;
            HttpResponse::NoContent().finish()
        }
        Ok(_) => HttpResponse::NotFound().json(serde_json::json!({
            "error": format!("Profile {id} not found"),
        })),
        Err(e) => HttpResponse::from_error(AppError::from(e)),
    }
}

/// GET /api/profiles/{id}/freelancer
pub async fn get_freelancer_profile(
    _user: AuthenticatedUser,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let id = path.into_inner();
    match freelancer_db::get_by_id(&state.db, id).await {
        Ok(Some(profile)) => HttpResponse::Ok().json(profile),
        Ok(None) => HttpResponse::NotFound().json(serde_json::json!({
            "error": format!("Freelancer profile {id} not found"),
        })),
        Err(e) => HttpResponse::from_error(AppError::from(e)),
    }
}

/// PUT /api/profiles/{id}/freelancer
pub async fn update_freelancer_profile(
    user: AuthenticatedUser,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateFreelancerProfile>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    verify_self(&user.0, id)?;
    body.validate()?;

    let updated = freelancer_db::upsert(&state.db, id, body.into_inner()).await?;
    state.cache.evict(&keys::profile(id)).await;

    Ok(HttpResponse::Ok().json(updated))
}

/// GET /api/profiles/{id}/client
pub async fn get_client_profile(
    _user: AuthenticatedUser,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let id = path.into_inner();
    match client_db::get_by_id(&state.db, id).await {
        Ok(Some(profile)) => HttpResponse::Ok().json(profile),
        Ok(None) => HttpResponse::NotFound().json(serde_json::json!({
            "error": format!("Client profile {id} not found"),
        })),
        Err(e) => HttpResponse::from_error(AppError::from(e)),
    }
}

/// PUT /api/profiles/{id}/client
pub async fn update_client_profile(
    user: AuthenticatedUser,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateClientProfile>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    verify_self(&user.0, id)?;

    let updated = client_db::upsert(&state.db, id, body.into_inner()).await?;
    state.cache.evict(&keys::profile(id)).await;

    Ok(HttpResponse::Ok().json(updated))
}
