//! Error types for query cache operations

use thiserror::Error;

/// Query cache errors
#[derive(Error, Debug)]
pub enum CacheError {
    /// Redis connection or operation error
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    /// Payload serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
