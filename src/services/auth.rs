use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::auth::session::{SessionEvent, SessionHub};
use crate::error::AppError;
use crate::models::profiles::UserType;

/// User record as returned by the hosted auth service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: serde_json::Value,
    pub email_confirmed_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: Option<i64>,
    pub refresh_token: Option<String>,
    pub user: AuthUser,
}

/// Sent as GoTrue `data`; it comes back as `user_metadata` in every JWT.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignUpMetadata {
    pub full_name: String,
    pub user_type: UserType,
}

/// `session` is absent while the email address awaits confirmation.
#[derive(Debug, Clone, Serialize)]
pub struct SignUpOutcome {
    pub user: Option<AuthUser>,
    pub session: Option<AuthSession>,
}

/// The password-auth operations this API needs from the hosted backend.
#[async_trait]
pub trait AuthGateway: Send + Sync {
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        metadata: &SignUpMetadata,
    ) -> Result<SignUpOutcome, AppError>;

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, AppError>;

    async fn sign_out(&self, access_token: &str) -> Result<(), AppError>;

    async fn get_user(&self, access_token: &str) -> Result<AuthUser, AppError>;
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SignUpRequest {
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters long"))]
    pub password: String,
    #[validate(must_match(other = "password", message = "Passwords do not match"))]
    pub confirm_password: String,
    #[validate(length(min = 1, message = "Please enter your full name"))]
    pub full_name: String,
    pub user_type: UserType,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SignInRequest {
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Please enter your password"))]
    pub password: String,
}

/// Sign-up, sign-in and sign-out, with every change announced on the session hub.
pub struct AuthService {
    gateway: Option<Arc<dyn AuthGateway>>,
    sessions: Arc<SessionHub>,
}

impl AuthService {
    pub fn new(gateway: Option<Arc<dyn AuthGateway>>, sessions: Arc<SessionHub>) -> Self {
        Self { gateway, sessions }
    }

    fn gateway(&self) -> Result<&Arc<dyn AuthGateway>, AppError> {
        self.gateway.as_ref().ok_or(AppError::NotConfigured)
    }

    pub fn is_configured(&self) -> bool {
        self.gateway.is_some()
    }

    /// Local validation runs first; the gateway is never contacted with
    /// mismatched or short passwords.
    pub async fn sign_up(&self, req: SignUpRequest) -> Result<SignUpOutcome, AppError> {
        req.validate()?;
        let gateway = self.gateway()?;

        let metadata = SignUpMetadata {
            full_name: req.full_name.trim().to_string(),
            user_type: req.user_type,
        };
        let outcome = gateway
            .sign_up(req.email.trim(), &req.password, &metadata)
            .await?;

        if let Some(user) = &outcome.user {
            tracing::info!(user_id = %user.id, "user signed up");
            self.sessions
                .publish(SessionEvent::SignedUp { user_id: user.id })
                .await;
        }
        Ok(outcome)
    }

    pub async fn sign_in(&self, req: SignInRequest) -> Result<AuthSession, AppError> {
        req.validate()?;
        let gateway = self.gateway()?;

        let session = gateway.sign_in(req.email.trim(), &req.password).await?;
        self.sessions
            .publish(SessionEvent::SignedIn {
                user_id: session.user.id,
            })
            .await;
        Ok(session)
    }

    pub async fn sign_out(&self, access_token: &str, user_id: Uuid) -> Result<(), AppError> {
        self.gateway()?.sign_out(access_token).await?;
        self.sessions
            .publish(SessionEvent::SignedOut { user_id })
            .await;
        Ok(())
    }

    /// The user behind an access token, as the auth service sees it.
    pub async fn current_user(&self, access_token: &str) -> Result<AuthUser, AppError> {
        self.gateway()?.get_user(access_token).await
    }
}
