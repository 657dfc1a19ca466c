/// Database access layer and repositories
///
/// The `Store` trait is the typed read/write surface over the three
/// collections (stories, comments, likes). Services depend on it so
/// engagement and catalog logic can be exercised against an in-memory
/// implementation; `PgStore` is the production implementation delegating to
/// the per-collection repository modules.
use crate::error::Result;
use crate::models::{Comment, NewStory, Story, StoryPatch};
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

pub mod comment_repo;
pub mod like_repo;
pub mod story_repo;

/// Typed operations against the story, comment, and like collections.
///
/// Every mutation is atomic at the row set it touches: a call either fully
/// applies or reports an error with no partial effect.
#[async_trait]
pub trait Store: Send + Sync {
    async fn list_published_stories(&self) -> Result<Vec<Story>>;
    async fn list_all_stories(&self) -> Result<Vec<Story>>;
    async fn find_story(&self, id: Uuid) -> Result<Option<Story>>;
    async fn insert_story(&self, new: NewStory) -> Result<Story>;
    /// Applies the patch and refreshes `updated_at`. Returns `None` when the
    /// id does not exist.
    async fn update_story(&self, id: Uuid, patch: StoryPatch) -> Result<Option<Story>>;
    /// Hard delete. Returns whether a row was removed. No cascade: comment
    /// and like rows for the story are left orphaned.
    async fn delete_story(&self, id: Uuid) -> Result<bool>;

    /// Comments for a story, newest first, stable within a result.
    async fn list_comments(&self, story_id: Uuid) -> Result<Vec<Comment>>;
    async fn insert_comment(
        &self,
        story_id: Uuid,
        author_name: &str,
        content: &str,
    ) -> Result<Comment>;

    /// Idempotent insert: returns whether a row was created. Never creates
    /// a second row for the same (story, session) pair.
    async fn insert_like(&self, story_id: Uuid, session_id: &str) -> Result<bool>;
    /// Delete-if-exists: returns whether a row was removed.
    async fn delete_like(&self, story_id: Uuid, session_id: &str) -> Result<bool>;
    async fn count_likes(&self, story_id: Uuid) -> Result<i64>;
    async fn has_liked(&self, story_id: Uuid, session_id: &str) -> Result<bool>;
}

/// PostgreSQL-backed store
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn list_published_stories(&self) -> Result<Vec<Story>> {
        Ok(story_repo::list_published(&self.pool).await?)
    }

    async fn list_all_stories(&self) -> Result<Vec<Story>> {
        Ok(story_repo::list_all(&self.pool).await?)
    }

    async fn find_story(&self, id: Uuid) -> Result<Option<Story>> {
        Ok(story_repo::find_by_id(&self.pool, id).await?)
    }

    async fn insert_story(&self, new: NewStory) -> Result<Story> {
        Ok(story_repo::insert(&self.pool, &new).await?)
    }

    async fn update_story(&self, id: Uuid, patch: StoryPatch) -> Result<Option<Story>> {
        Ok(story_repo::update(&self.pool, id, &patch).await?)
    }

    async fn delete_story(&self, id: Uuid) -> Result<bool> {
        Ok(story_repo::delete(&self.pool, id).await?)
    }

    async fn list_comments(&self, story_id: Uuid) -> Result<Vec<Comment>> {
        Ok(comment_repo::list_by_story(&self.pool, story_id).await?)
    }

    async fn insert_comment(
        &self,
        story_id: Uuid,
        author_name: &str,
        content: &str,
    ) -> Result<Comment> {
        Ok(comment_repo::insert(&self.pool, story_id, author_name, content).await?)
    }

    async fn insert_like(&self, story_id: Uuid, session_id: &str) -> Result<bool> {
        Ok(like_repo::insert(&self.pool, story_id, session_id).await?)
    }

    async fn delete_like(&self, story_id: Uuid, session_id: &str) -> Result<bool> {
        Ok(like_repo::delete(&self.pool, story_id, session_id).await?)
    }

    async fn count_likes(&self, story_id: Uuid) -> Result<i64> {
        Ok(like_repo::count_by_story(&self.pool, story_id).await?)
    }

    async fn has_liked(&self, story_id: Uuid, session_id: &str) -> Result<bool> {
        Ok(like_repo::exists(&self.pool, story_id, session_id).await?)
    }
}
