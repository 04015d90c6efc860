use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::SupabaseConfig;
use crate::error::{AppError, friendly_auth_message};
use crate::services::auth::{AuthGateway, AuthSession, AuthUser, SignUpMetadata, SignUpOutcome};

/// HTTP client for the Supabase GoTrue endpoints under `/auth/v1`.
#[derive(Clone)]
pub struct GoTrueClient {
    client: reqwest::Client,
    base_url: String,
    anon_key: String,
}

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct SignUpBody<'a> {
    email: &'a str,
    password: &'a str,
    data: &'a SignUpMetadata,
}

/// GoTrue reports errors under several different keys depending on the
/// endpoint and server version.
#[derive(Deserialize, Default)]
struct GoTrueError {
    msg: Option<String>,
    message: Option<String>,
    error_description: Option<String>,
    error: Option<String>,
}

impl GoTrueError {
    fn into_message(self) -> Option<String> {
        self.msg
            .or(self.message)
            .or(self.error_description)
            .or(self.error)
    }
}

impl GoTrueClient {
    pub fn new(config: &SupabaseConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: format!("{}/auth/v1", config.url),
            anon_key: config.anon_key.clone(),
        }
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        self.client
            .request(method, format!("{}{}", self.base_url, path))
            .header("apikey", &self.anon_key)
    }

    /// Turn a non-2xx GoTrue response into `AppError::Backend`.
    async fn backend_error(response: reqwest::Response) -> AppError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let raw = serde_json::from_str::<GoTrueError>(&body)
            .ok()
            .and_then(GoTrueError::into_message)
            .unwrap_or_else(|| format!("Authentication service returned HTTP {status}"));

        AppError::Backend {
            status: status.as_u16(),
            message: friendly_auth_message(&raw),
        }
    }
}

#[async_trait]
impl AuthGateway for GoTrueClient {
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        metadata: &SignUpMetadata,
    ) -> Result<SignUpOutcome, AppError> {
        debug!("GoTrue sign-up for {email}");

        let response = self
            .request(reqwest::Method::POST, "/signup")
            .json(&SignUpBody {
                email,
                password,
                data: metadata,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::backend_error(response).await);
        }

        // With email confirmation enabled GoTrue answers with the bare user;
        // otherwise it returns a full session.
        let body: serde_json::Value = response.json().await?;
        if body.get("access_token").is_some() {
            let session: AuthSession = serde_json::from_value(body)
                .map_err(|e| AppError::Unexpected(format!("Malformed session: {e}")))?;
            Ok(SignUpOutcome {
                user: Some(session.user.clone()),
                session: Some(session),
            })
        } else {
            let user: AuthUser = serde_json::from_value(body)
                .map_err(|e| AppError::Unexpected(format!("Malformed user: {e}")))?;
            Ok(SignUpOutcome {
                user: Some(user),
                session: None,
            })
        }
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, AppError> {
        debug!("GoTrue password sign-in for {email}");

        let response = self
            .request(reqwest::Method::POST, "/token?grant_type=password")
            .json(&Credentials { email, password })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::backend_error(response).await);
        }

        Ok(response.json().await?)
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), AppError> {
        let response = self
            .request(reqwest::Method::POST, "/logout")
            .bearer_auth(access_token)
            .send()
            .await?;

        // An already-expired token still counts as signed out.
        match response.status() {
            s if s.is_success() => Ok(()),
            StatusCode::UNAUTHORIZED | StatusCode::NOT_FOUND => Ok(()),
            _ => Err(Self::backend_error(response).await),
        }
    }

    async fn get_user(&self, access_token: &str) -> Result<AuthUser, AppError> {
        let response = self
            .request(reqwest::Method::GET, "/user")
            .bearer_auth(access_token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::backend_error(response).await);
        }

        Ok(response.json().await?)
    }
}
