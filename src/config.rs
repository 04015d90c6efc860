use std::env;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("Invalid SUPABASE_URL format. Expected: https://PROJECT.supabase.co, got {0}")]
    InvalidSupabaseUrl(String),
}

/// Connection details for the hosted Supabase project.
#[derive(Debug, Clone)]
pub struct SupabaseConfig {
    pub url: String,
    pub project_ref: String,
    pub anon_key: String,
    /// Legacy HS256 signing secret. Newer projects sign with asymmetric keys
    /// published on the JWKS endpoint and leave this unset.
    pub jwt_secret: Option<String>,
    pub storage_bucket: String,
}

impl SupabaseConfig {
    /// Returns `Ok(None)` when the credentials are absent so the server can
    /// still start and report the auth gateway as not configured.
    pub fn from_env() -> Result<Option<Self>, ConfigError> {
        let (url, anon_key) = match (env::var("SUPABASE_URL"), env::var("SUPABASE_ANON_KEY")) {
            (Ok(url), Ok(key)) if !url.is_empty() && !key.is_empty() => (url, key),
            _ => return Ok(None),
        };

        let url = url.trim_end_matches('/').to_string();
        let project_ref = url
            .strip_prefix("https://")
            .and_then(|s| s.strip_suffix(".supabase.co"))
            .ok_or_else(|| ConfigError::InvalidSupabaseUrl(url.clone()))?
            .to_string();

        Ok(Some(Self {
            url,
            project_ref,
            anon_key,
            jwt_secret: env::var("SUPABASE_JWT_SECRET").ok().filter(|s| !s.is_empty()),
            storage_bucket: env::var("STORAGE_BUCKET")
                .unwrap_or_else(|_| "project-files".to_string()),
        }))
    }
}

/// Redis TTLs for cached reads.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    pub profile_ttl: Duration,
    pub catalog_ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            profile_ttl: Duration::from_secs(900), // 15 minutes
            catalog_ttl: Duration::from_secs(3600), // 1 hour
        }
    }
}

impl CacheConfig {
    pub fn from_env() -> Self {
        Self {
            profile_ttl: parse_duration_secs("CACHE_TTL_PROFILES", 900),
            catalog_ttl: parse_duration_secs("CACHE_TTL_CATALOG", 3600),
        }
    }
}

/// Everything the server reads from the environment at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub redis_url: String,
    pub port: u16,
    pub run_migrations: bool,
    pub supabase: Option<SupabaseConfig>,
    pub cache: CacheConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url =
            env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;
        let redis_url = env::var("REDIS_URL").map_err(|_| ConfigError::Missing("REDIS_URL"))?;

        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);

        let run_migrations = env::var("RUN_MIGRATIONS")
            .map(|v| matches!(v.as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Ok(Self {
            database_url,
            redis_url,
            port,
            run_migrations,
            supabase: SupabaseConfig::from_env()?,
            cache: CacheConfig::from_env(),
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

fn parse_duration_secs(env_var: &str, default: u64) -> Duration {
    env::var(env_var)
        .ok()
        .and_then(|v| v.parse().ok())
        .map(Duration::from_secs)
        .unwrap_or_else(|| Duration::from_secs(default))
}
