/// Cached views and the invalidation contract
///
/// Reads are cached keyed by (operation, parameters); every mutation maps to
/// the exact set of cached views it staled. The Redis mechanism lives in the
/// `query-cache` crate; this module owns the key formats and the mutation →
/// invalidation table, so the contract is inspectable and tested without a
/// cache backend.
use query_cache::QueryCache;
use redis::aio::ConnectionManager;
use serde::{de::DeserializeOwned, Serialize};
use tracing::warn;
use uuid::Uuid;

/// A cacheable read together with its parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryKey {
    /// Public list of published stories
    PublishedStories,
    /// Admin list of every story
    AllStories,
    /// Single story detail
    Story(Uuid),
    /// Comments for one story
    Comments(Uuid),
    /// Like count + has-liked for one story as seen by one session
    LikeState { story_id: Uuid, session_id: String },
}

impl QueryKey {
    pub fn redis_key(&self) -> String {
        match self {
            QueryKey::PublishedStories => "stories:published".to_string(),
            QueryKey::AllStories => "stories:all".to_string(),
            QueryKey::Story(id) => format!("story:{}", id),
            QueryKey::Comments(id) => format!("story:{}:comments", id),
            QueryKey::LikeState {
                story_id,
                session_id,
            } => format!("story:{}:likes:{}", story_id, session_id),
        }
    }
}

/// A single invalidation to apply after a mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invalidation {
    Key(QueryKey),
    /// Redis glob covering a family of keys, e.g. every session's view of
    /// one story's like state
    Pattern(String),
}

/// A successful mutation, as the invalidation table sees it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    LikeToggled(Uuid),
    CommentCreated(Uuid),
    StoryCreated,
    StoryUpdated(Uuid),
    StoryDeleted(Uuid),
}

/// The declared invalidation table: which cached views each mutation stales.
///
/// A like toggle changes the count every session sees, so it invalidates the
/// whole per-session key family for that story, not just the toggling
/// session's entry.
pub fn stale_keys(mutation: Mutation) -> Vec<Invalidation> {
    match mutation {
        Mutation::LikeToggled(story_id) => {
            vec![Invalidation::Pattern(format!("story:{}:likes:*", story_id))]
        }
        Mutation::CommentCreated(story_id) => {
            vec![Invalidation::Key(QueryKey::Comments(story_id))]
        }
        Mutation::StoryCreated => vec![
            Invalidation::Key(QueryKey::PublishedStories),
            Invalidation::Key(QueryKey::AllStories),
        ],
        Mutation::StoryUpdated(story_id) => vec![
            Invalidation::Key(QueryKey::PublishedStories),
            Invalidation::Key(QueryKey::AllStories),
            Invalidation::Key(QueryKey::Story(story_id)),
        ],
        Mutation::StoryDeleted(story_id) => vec![
            Invalidation::Key(QueryKey::PublishedStories),
            Invalidation::Key(QueryKey::AllStories),
            Invalidation::Key(QueryKey::Story(story_id)),
        ],
    }
}

/// Typed cache for the service's query results.
///
/// Cache trouble never fails a request: a read error is a miss and a write
/// or invalidation error is logged, with the bounded TTL limiting how long a
/// stale entry can outlive a failed delete. The store stays the source of
/// truth throughout.
#[derive(Clone)]
pub struct ViewCache {
    cache: QueryCache,
}

impl ViewCache {
    pub fn new(redis: ConnectionManager, ttl_secs: u64) -> Self {
        Self {
            cache: QueryCache::new(redis, ttl_secs),
        }
    }

    pub async fn read<T: DeserializeOwned>(&self, key: &QueryKey) -> Option<T> {
        match self.cache.get(&key.redis_key()).await {
            Ok(hit) => hit,
            Err(e) => {
                warn!("Cache read failed for {}: {}", key.redis_key(), e);
                None
            }
        }
    }

    pub async fn write<T: Serialize>(&self, key: &QueryKey, value: &T) {
        if let Err(e) = self.cache.put(&key.redis_key(), value, None).await {
            warn!("Cache write failed for {}: {}", key.redis_key(), e);
        }
    }

    /// Apply the invalidation table for a completed mutation.
    pub async fn apply(&self, mutation: Mutation) {
        for invalidation in stale_keys(mutation) {
            let result = match &invalidation {
                Invalidation::Key(key) => self.cache.delete(&key.redis_key()).await,
                Invalidation::Pattern(pattern) => {
                    self.cache.delete_pattern(pattern).await.map(|_| ())
                }
            };

            if let Err(e) = result {
                warn!("Cache invalidation failed for {:?}: {}", invalidation, e);
            }
        }
    }
}
