//! Sign-up flows through `AuthService` with an in-memory gateway.
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use uuid::Uuid;

use freelancebot_backend::auth::session::{SessionEvent, SessionHub};
use freelancebot_backend::error::AppError;
use freelancebot_backend::models::profiles::UserType;
use freelancebot_backend::services::auth::{
    AuthGateway, AuthService, AuthSession, AuthUser, SignInRequest, SignUpMetadata,
    SignUpOutcome, SignUpRequest,
};

#[derive(Default)]
struct RecordingGateway {
    calls: AtomicUsize,
    user_id: Uuid,
}

fn user(id: Uuid) -> AuthUser {
    AuthUser {
        id,
        email: Some("dana@example.com".to_string()),
        user_metadata: serde_json::json!({ "full_name": "Dana", "user_type": "client" }),
        email_confirmed_at: None,
        created_at: None,
    }
}

#[async_trait]
impl AuthGateway for RecordingGateway {
    async fn sign_up(
        &self,
        _email: &str,
        _password: &str,
        _metadata: &SignUpMetadata,
    ) -> Result<SignUpOutcome, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(SignUpOutcome {
            user: Some(user(self.user_id)),
            session: None,
        })
    }

    async fn sign_in(&self, _email: &str, _password: &str) -> Result<AuthSession, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(AuthSession {
            access_token: "token".to_string(),
            token_type: "bearer".to_string(),
            expires_in: Some(3600),
            refresh_token: None,
            user: user(self.user_id),
        })
    }

    async fn sign_out(&self, _access_token: &str) -> Result<(), AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn get_user(&self, _access_token: &str) -> Result<AuthUser, AppError> {
        Ok(user(self.user_id))
    }
}

fn request(password: &str, confirm: &str) -> SignUpRequest {
    SignUpRequest {
        email: "dana@example.com".to_string(),
        password: password.to_string(),
        confirm_password: confirm.to_string(),
        full_name: "Dana".to_string(),
        user_type: UserType::Client,
    }
}

fn service() -> (AuthService, Arc<RecordingGateway>, Arc<SessionHub>) {
    let gateway = Arc::new(RecordingGateway {
        user_id: Uuid::new_v4(),
        ..Default::default()
    });
    let hub = Arc::new(SessionHub::new());
    let svc = AuthService::new(Some(gateway.clone() as Arc<dyn AuthGateway>), hub.clone());
    (svc, gateway, hub)
}

#[tokio::test]
async fn test_mismatched_passwords_never_reach_the_gateway() {
    let (svc, gateway, _) = service();

    let err = svc.sign_up(request("secret1", "secret2")).await.unwrap_err();

    assert!(matches!(err, AppError::Validation(ref msg) if msg == "Passwords do not match"));
    assert_eq!(gateway.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_short_password_is_rejected_locally() {
    let (svc, gateway, _) = service();

    let err = svc.sign_up(request("abc", "abc")).await.unwrap_err();

    assert!(
        matches!(err, AppError::Validation(ref msg) if msg == "Password must be at least 6 characters long")
    );
    assert_eq!(gateway.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_valid_sign_up_calls_gateway_once_and_announces_it() {
    let (svc, gateway, hub) = service();
    let (_, mut events) = hub.subscribe().await;

    let outcome = svc.sign_up(request("secret1", "secret1")).await.unwrap();

    assert_eq!(gateway.calls.load(Ordering::SeqCst), 1);
    assert!(outcome.session.is_none());
    assert_eq!(
        events.recv().await,
        Some(SessionEvent::SignedUp {
            user_id: gateway.user_id
        })
    );
}

#[tokio::test]
async fn test_sign_in_publishes_signed_in() {
    let (svc, gateway, hub) = service();
    let (_, mut events) = hub.subscribe().await;

    let session = svc
        .sign_in(SignInRequest {
            email: "dana@example.com".to_string(),
            password: "secret1".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(session.user.id, gateway.user_id);
    assert_eq!(
        events.recv().await,
        Some(SessionEvent::SignedIn {
            user_id: gateway.user_id
        })
    );
}

#[tokio::test]
async fn test_unconfigured_gateway_reports_not_configured_after_validation() {
    let svc = AuthService::new(None, Arc::new(SessionHub::new()));
    assert!(!svc.is_configured());

    // Bad input is still reported as a validation problem.
    let err = svc.sign_up(request("secret1", "other")).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let err = svc.sign_up(request("secret1", "secret1")).await.unwrap_err();
    assert!(matches!(err, AppError::NotConfigured));
}
