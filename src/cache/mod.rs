use redis::{Client, RedisError, aio::ConnectionManager};
use serde::{Serialize, de::DeserializeOwned};
use std::future::Future;
use std::time::Duration;

#[derive(Clone)]
pub struct RedisCache {
    connection: ConnectionManager,
}

impl RedisCache {
    pub async fn new(redis_url: &str) -> Result<Self, RedisError> {
        let client = Client::open(redis_url)?;
        let connection = ConnectionManager::new(client).await?;
        Ok(Self { connection })
    }

    /// Get a value from cache
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> redis::RedisResult<Option<T>> {
        let value: Option<String> = redis::cmd("GET")
            .arg(key)
            .query_async(&mut self.connection.clone())
            .await?;

        match value {
            Some(v) => {
                let deserialized = serde_json::from_str(&v).map_err(|e| {
                    RedisError::from((
                        redis::ErrorKind::TypeError,
                        "Deserialization error",
                        e.to_string(),
                    ))
                })?;
                Ok(Some(deserialized))
            }
            None => Ok(None),
        }
    }

    /// Set a value with a TTL.
    pub async fn set<T: Serialize>(
        &self,
        key: &str,
        value: &T,
        ttl: Duration,
    ) -> redis::RedisResult<()> {
        let serialized = serde_json::to_string(value).map_err(|e| {
            RedisError::from((
                redis::ErrorKind::TypeError,
                "Serialization error",
                e.to_string(),
            ))
        })?;

        redis::cmd("SET")
            .arg(key)
            .arg(serialized)
            .arg("EX")
            .arg(ttl.as_secs().max(1))
            .query_async(&mut self.connection.clone())
            .await
    }

    pub async fn delete(&self, key: &str) -> redis::RedisResult<()> {
        redis::cmd("DEL")
            .arg(key)
            .query_async(&mut self.connection.clone())
            .await
    }

    /// Read-through helper. Redis failures are logged and fall back to
    /// `load`, so a cache outage never fails a request.
    pub async fn get_or_load<T, E, F, Fut>(&self, key: &str, ttl: Duration, load: F) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        match self.get::<T>(key).await {
            Ok(Some(hit)) => return Ok(hit),
            Ok(None) => {}
            Err(e) => tracing::warn!("cache read failed for {key}: {e}"),
        }

        let value = load().await?;

        if let Err(e) = self.set(key, &value, ttl).await {
            tracing::warn!("cache write failed for {key}: {e}");
        }
        Ok(value)
    }

    /// Delete a key, logging instead of failing.
    pub async fn evict(&self, key: &str) {
        if let Err(e) = self.delete(key).await {
            tracing::warn!("cache evict failed for {key}: {e}");
        }
    }
}

/// Cache key generators
pub mod keys {
    use uuid::Uuid;

    pub fn profile(id: Uuid) -> String {
        format!("profile:{id}")
    }

    /// `None` caches the unfiltered list.
    pub fn skills(category: Option<&str>) -> String {
        match category {
            Some(c) => format!("catalog:skills:{c}"),
            None => "catalog:skills:all".to_string(),
        }
    }

    pub fn skill_categories() -> String {
        "catalog:skill_categories".to_string()
    }

    pub fn project_categories() -> String {
        "catalog:project_categories".to_string()
    }
}
