/// Engagement service - likes and comments on stories
///
/// Likes are scoped to an anonymous session: at most one row per
/// (story, session) pair, enforced by the store's idempotent insert plus
/// the storage-level unique constraint, so a rapid double-submit cannot
/// produce duplicates. Comments are append-only.
use crate::db::Store;
use crate::error::{AppError, Result};
use crate::models::{Comment, LikeState};
use crate::session::SessionContext;
use std::sync::Arc;
use uuid::Uuid;

pub struct EngagementService {
    store: Arc<dyn Store>,
}

impl EngagementService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Record a like for this session. Returns whether a row was created;
    /// liking an already-liked story is a no-op, not an error.
    pub async fn like(&self, story_id: Uuid, session: &SessionContext) -> Result<bool> {
        self.store.insert_like(story_id, &session.id).await
    }

    /// Remove this session's like. Returns whether a row was removed;
    /// un-liking a story that was never liked is a no-op, not an error.
    pub async fn unlike(&self, story_id: Uuid, session: &SessionContext) -> Result<bool> {
        self.store.delete_like(story_id, &session.id).await
    }

    /// Like count across all sessions plus whether this session has liked,
    /// reflecting the rows present at query time.
    pub async fn like_state(
        &self,
        story_id: Uuid,
        session: &SessionContext,
    ) -> Result<LikeState> {
        let count = self.store.count_likes(story_id).await?;
        let has_liked = self.store.has_liked(story_id, &session.id).await?;

        Ok(LikeState { count, has_liked })
    }

    /// Create a comment. Both fields are trimmed before validation and
    /// storage; empty values are rejected before the store is touched.
    pub async fn create_comment(
        &self,
        story_id: Uuid,
        author_name: &str,
        content: &str,
    ) -> Result<Comment> {
        let author_name = author_name.trim();
        let content = content.trim();

        if author_name.is_empty() {
            return Err(AppError::Validation("author_name is required".to_string()));
        }
        if content.is_empty() {
            return Err(AppError::Validation("content is required".to_string()));
        }

        self.store
            .insert_comment(story_id, author_name, content)
            .await
    }

    /// Comments for a story, newest first
    pub async fn list_comments(&self, story_id: Uuid) -> Result<Vec<Comment>> {
        self.store.list_comments(story_id).await
    }
}
