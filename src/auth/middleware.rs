use actix_web::FromRequest;
use actix_web::{HttpRequest, dev::Payload, web};
use std::future::Future;
use std::pin::Pin;

use crate::db::profiles::find_or_create_from_auth;
use crate::error::AppError;
use crate::models::profiles::{self, CreateProfileFromAuth};
use crate::state::AppState;

/// The caller's profile, resolved from a verified `Authorization: Bearer` JWT.
pub struct AuthenticatedUser(pub profiles::Model);

impl AuthenticatedUser {
    pub fn id(&self) -> uuid::Uuid {
        self.0.id
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            let state = req
                .app_data::<web::Data<AppState>>()
                .ok_or_else(|| AppError::Unexpected("AppState not registered".to_string()))?;

            let verifier = state.tokens.as_ref().ok_or(AppError::NotConfigured)?;

            let token = bearer_token(&req)?;

            let claims = verifier
                .verify(token)
                .await
                .map_err(|e| AppError::Unauthorized(format!("Invalid token: {e}")))?;

            let user_id = claims.user_id().map_err(AppError::Unauthorized)?;
            let email = claims
                .user_email()
                .ok_or_else(|| AppError::Unauthorized("No email in token claims".to_string()))?;

            let full_name = claims
                .display_name()
                .unwrap_or_else(|| email.split('@').next().unwrap_or_default().to_string());

            let profile = find_or_create_from_auth(
                &state.db,
                CreateProfileFromAuth {
                    id: user_id,
                    email,
                    full_name,
                    avatar_url: claims.avatar_url(),
                    user_type: claims.user_type(),
                },
            )
            .await?;

            Ok(AuthenticatedUser(profile))
        })
    }
}

fn bearer_token(req: &HttpRequest) -> Result<&str, AppError> {
    let header = req
        .headers()
        .get(actix_web::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Missing Authorization header".to_string()))?;

    header.strip_prefix("Bearer ").ok_or_else(|| {
        AppError::Unauthorized("Authorization header must be: Bearer <token>".to_string())
    })
}
