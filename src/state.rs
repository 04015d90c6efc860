use std::sync::Arc;

use sea_orm::{DatabaseConnection, DbErr};
use thiserror::Error;

use crate::auth::jwks::TokenVerifier;
use crate::auth::session::{SessionHub, spawn_profile_cache_observer};
use crate::cache::RedisCache;
use crate::config::AppConfig;
use crate::db::create_pool;
use crate::services::auth::{AuthGateway, AuthService};
use crate::supabase::{GoTrueClient, StorageClient};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Failed to connect to database: {0}")]
    Database(#[from] DbErr),
    #[error("Failed to connect to Redis: {0}")]
    Redis(#[from] redis::RedisError),
}

/// Every shared handle the server needs, built once at startup and handed to
/// workers through `web::Data`.
pub struct AppState {
    pub config: AppConfig,
    pub db: DatabaseConnection,
    pub cache: RedisCache,
    /// `None` when Supabase credentials are absent; auth routes then answer 503.
    pub tokens: Option<TokenVerifier>,
    pub auth: AuthService,
    pub storage: Option<StorageClient>,
    pub sessions: Arc<SessionHub>,
}

impl AppState {
    pub async fn init(config: AppConfig) -> Result<Self, StartupError> {
        let db = create_pool(&config.database_url).await?;
        tracing::info!("Connected to database");

        let cache = RedisCache::new(&config.redis_url).await?;
        tracing::info!("Connected to Redis");

        let sessions = Arc::new(SessionHub::new());
        spawn_profile_cache_observer(
            &sessions,
            db.clone(),
            cache.clone(),
            config.cache.profile_ttl,
        )
        .await;

        let (tokens, gateway, storage) = match &config.supabase {
            Some(supabase) => {
                tracing::info!("Supabase project: {}", supabase.project_ref);
                let gateway: Arc<dyn AuthGateway> = Arc::new(GoTrueClient::new(supabase));
                (
                    Some(TokenVerifier::new(supabase)),
                    Some(gateway),
                    Some(StorageClient::new(supabase)),
                )
            }
            None => {
                tracing::warn!("SUPABASE_URL / SUPABASE_ANON_KEY not set; auth is disabled");
                (None, None, None)
            }
        };

        Ok(Self {
            auth: AuthService::new(gateway, sessions.clone()),
            config,
            db,
            cache,
            tokens,
            storage,
            sessions,
        })
    }

    /// Release observers and close the database pool.
    pub async fn shutdown(&self) {
        self.sessions.teardown().await;
        if let Err(e) = self.db.clone().close().await {
            tracing::warn!("error closing database pool: {e}");
        }
    }
}
