//! What error responses look like on the wire.
use actix_web::ResponseError;
use actix_web::body::to_bytes;
use actix_web::http::StatusCode;
use sea_orm::DbErr;

use freelancebot_backend::error::{AppError, UNEXPECTED_MESSAGE, friendly_auth_message};

async fn body_of(err: &AppError) -> serde_json::Value {
    let bytes = to_bytes(err.error_response().into_body()).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_database_errors_do_not_leak_driver_detail() {
    let err = AppError::from(DbErr::Custom(
        "relation \"secret_table\" does not exist".to_string(),
    ));

    assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_of(&err).await;
    assert_eq!(body["error"], UNEXPECTED_MESSAGE);
    assert!(!body.to_string().contains("secret_table"));
}

#[tokio::test]
async fn test_unexpected_errors_render_the_static_message() {
    let err = AppError::Unexpected("connection reset by peer".to_string());

    assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_of(&err).await["error"], UNEXPECTED_MESSAGE);
}

#[tokio::test]
async fn test_missing_record_is_not_found() {
    let err = AppError::from(DbErr::RecordNotFound("Project not found".to_string()));

    assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(body_of(&err).await["error"], "Project not found");
}

#[test]
fn test_known_auth_messages_are_reworded() {
    assert_eq!(
        friendly_auth_message("User already registered"),
        "An account with this email already exists. Please sign in instead."
    );
    assert_eq!(
        friendly_auth_message("Invalid login credentials"),
        "Invalid email or password. Please check your credentials and try again."
    );
}

#[test]
fn test_other_auth_messages_are_forwarded_verbatim() {
    assert_eq!(
        friendly_auth_message("Email rate limit exceeded"),
        "Email rate limit exceeded"
    );
}

#[test]
fn test_backend_status_mapping() {
    let bad_request = AppError::Backend {
        status: 422,
        message: "Password should be at least 6 characters".to_string(),
    };
    let upstream = AppError::Backend {
        status: 500,
        message: "upstream failure".to_string(),
    };

    assert_eq!(bad_request.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(upstream.status_code(), StatusCode::BAD_GATEWAY);
}
