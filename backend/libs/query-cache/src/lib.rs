//! Redis-backed query result cache
//!
//! Stores JSON-serialized query results under string keys with a bounded
//! TTL, and supports exact-key and pattern deletes so callers can implement
//! an invalidation contract on top.
//!
//! # Example
//!
//! ```no_run
//! use query_cache::QueryCache;
//! use redis::aio::ConnectionManager;
//!
//! # async fn run(redis: ConnectionManager) -> Result<(), query_cache::CacheError> {
//! let cache = QueryCache::new(redis, 60);
//!
//! cache.put("stories:published", &vec!["a", "b"], None).await?;
//! let hit: Option<Vec<String>> = cache.get("stories:published").await?;
//!
//! // After a mutation, drop the keys it staled.
//! cache.delete("stories:published").await?;
//! cache.delete_pattern("story:*:likes:*").await?;
//! # Ok(())
//! # }
//! ```

use redis::{aio::ConnectionManager, AsyncCommands};
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;
use tracing::debug;

mod error;

pub use error::CacheError;

type Result<T> = std::result::Result<T, CacheError>;

/// Query result cache over a shared Redis connection
#[derive(Clone)]
pub struct QueryCache {
    redis: ConnectionManager,
    default_ttl: Duration,
}

impl QueryCache {
    pub fn new(redis: ConnectionManager, default_ttl_secs: u64) -> Self {
        Self {
            redis,
            default_ttl: Duration::from_secs(default_ttl_secs),
        }
    }

    /// Fetch and deserialize a cached result. `Ok(None)` is a miss.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let mut conn = self.redis.clone();

        match conn.get::<_, Option<String>>(key).await? {
            Some(data) => {
                debug!("Query cache HIT for {}", key);
                Ok(Some(serde_json::from_str::<T>(&data)?))
            }
            None => {
                debug!("Query cache MISS for {}", key);
                Ok(None)
            }
        }
    }

    /// Serialize and store a query result under `key`.
    ///
    /// TTLs get a small random jitter so keys written together do not all
    /// expire in the same instant.
    pub async fn put<T: Serialize>(
        &self,
        key: &str,
        value: &T,
        ttl: Option<Duration>,
    ) -> Result<()> {
        let data = serde_json::to_string(value)?;
        let ttl = jittered(ttl.unwrap_or(self.default_ttl));

        let mut conn = self.redis.clone();
        conn.set_ex::<_, _, ()>(key, data, ttl.as_secs()).await?;

        debug!("Query cache WRITE for {} with TTL {:?}", key, ttl);

        Ok(())
    }

    /// Drop a single cached result.
    pub async fn delete(&self, key: &str) -> Result<()> {
        let mut conn = self.redis.clone();
        conn.del::<_, ()>(key).await?;

        debug!("Query cache INVALIDATE for {}", key);

        Ok(())
    }

    /// Drop every key matching a Redis glob pattern. Returns the number of
    /// keys removed. Uses SCAN rather than KEYS so large keyspaces are not
    /// blocked.
    pub async fn delete_pattern(&self, pattern: &str) -> Result<usize> {
        let mut conn = self.redis.clone();

        let keys: Vec<String> = {
            let mut iter = conn.scan_match::<_, String>(pattern).await?;
            let mut keys = Vec::new();
            while let Some(key) = iter.next_item().await {
                keys.push(key);
            }
            keys
        };

        if keys.is_empty() {
            debug!("Query cache INVALIDATE pattern {} matched nothing", pattern);
            return Ok(0);
        }

        let removed = keys.len();
        let mut conn = self.redis.clone();
        conn.del::<_, ()>(keys).await?;

        debug!(
            "Query cache INVALIDATE pattern {} removed {} keys",
            pattern, removed
        );

        Ok(removed)
    }
}

/// Stretch a TTL by up to 10% so co-written keys expire staggered.
fn jittered(ttl: Duration) -> Duration {
    let jitter = (rand::random::<u32>() % 10) as f64 / 100.0;
    let jitter_secs = (ttl.as_secs_f64() * jitter).round() as u64;
    ttl + Duration::from_secs(jitter_secs)
}
