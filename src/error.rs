use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

pub const NOT_CONFIGURED_MESSAGE: &str =
    "Authentication service is not configured. Please set SUPABASE_URL and SUPABASE_ANON_KEY.";
pub const UNEXPECTED_MESSAGE: &str = "An unexpected error occurred. Please try again.";

/// Errors surfaced by services and handlers. Every variant renders as
/// `{"error": "<message>"}`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    InvalidTransition(String),

    #[error("{0}")]
    QuotaExceeded(String),

    #[error("{}", NOT_CONFIGURED_MESSAGE)]
    NotConfigured,

    /// An error reported by the hosted auth or storage service.
    #[error("{message}")]
    Backend { status: u16, message: String },

    /// For `Database` and `Unexpected` the detail is logged, never returned
    /// to the caller.
    #[error("{}", UNEXPECTED_MESSAGE)]
    Database(DbErr),

    #[error("{}", UNEXPECTED_MESSAGE)]
    Unexpected(String),
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        if let Some(SqlErr::UniqueConstraintViolation(detail)) = err.sql_err() {
            tracing::debug!("unique constraint violation: {detail}");
            return AppError::Conflict("This record already exists".to_string());
        }
        match err {
            DbErr::RecordNotFound(msg) => AppError::NotFound(msg),
            other => AppError::Database(other),
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Unexpected(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errs: validator::ValidationErrors) -> Self {
        AppError::Validation(first_validation_message(&errs))
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) | AppError::InvalidTransition(_) => StatusCode::CONFLICT,
            AppError::QuotaExceeded(_) => StatusCode::PAYMENT_REQUIRED,
            AppError::NotConfigured => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Backend { status, .. } => match *status {
                400 | 422 => StatusCode::BAD_REQUEST,
                401 | 403 => StatusCode::UNAUTHORIZED,
                429 => StatusCode::TOO_MANY_REQUESTS,
                _ => StatusCode::BAD_GATEWAY,
            },
            AppError::Database(_) | AppError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Unexpected(detail) => tracing::error!("unexpected error: {detail}"),
            AppError::Database(e) => tracing::error!("database error: {e}"),
            AppError::Backend { status, message } => {
                tracing::warn!("backend error ({status}): {message}")
            }
            _ => {}
        }

        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "error": self.to_string(),
        }))
    }
}

/// Replace the two well-known GoTrue messages with friendlier wording and
/// forward everything else verbatim.
pub fn friendly_auth_message(raw: &str) -> String {
    if raw.contains("User already registered") {
        "An account with this email already exists. Please sign in instead.".to_string()
    } else if raw.contains("Invalid login credentials") {
        "Invalid email or password. Please check your credentials and try again.".to_string()
    } else {
        raw.to_string()
    }
}

/// Picks a single human-readable message out of a validator error tree,
/// ordered by field name so the result is deterministic.
pub fn first_validation_message(errs: &validator::ValidationErrors) -> String {
    let mut fields: Vec<_> = errs.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    for (field, errors) in fields {
        if let Some(e) = errors.first() {
            return match &e.message {
                Some(msg) => msg.to_string(),
                None => format!("Invalid value for {field}"),
            };
        }
    }

    "Invalid request".to_string()
}
