/// Catalog service - story CRUD with publish visibility
///
/// Mutations and the draft-inclusive listing require admin capability and
/// fail closed before touching storage. Reading a single story does not gate
/// on the published flag: list views filter drafts, direct links reach them.
use crate::auth::Caller;
use crate::db::Store;
use crate::error::{AppError, Result};
use crate::models::{NewStory, Story, StoryPatch};
use std::sync::Arc;
use uuid::Uuid;

pub struct CatalogService {
    store: Arc<dyn Store>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    fn require_admin(caller: &Caller) -> Result<()> {
        if caller.is_admin() {
            Ok(())
        } else {
            Err(AppError::Forbidden("admin capability required".to_string()))
        }
    }

    /// Published stories, newest first. Public.
    pub async fn list_published(&self) -> Result<Vec<Story>> {
        self.store.list_published_stories().await
    }

    /// Single story regardless of publish state. Public.
    pub async fn get_story(&self, id: Uuid) -> Result<Option<Story>> {
        self.store.find_story(id).await
    }

    /// Every story including drafts, newest first. Admin only.
    pub async fn list_all(&self, caller: &Caller) -> Result<Vec<Story>> {
        Self::require_admin(caller)?;
        self.store.list_all_stories().await
    }

    /// Create a story. Admin only. Title, content, and author_name must be
    /// non-empty; blank optional fields are stored as absent, not as empty
    /// strings.
    pub async fn create(&self, caller: &Caller, mut new: NewStory) -> Result<Story> {
        Self::require_admin(caller)?;

        if new.title.trim().is_empty() {
            return Err(AppError::Validation("title is required".to_string()));
        }
        if new.content.trim().is_empty() {
            return Err(AppError::Validation("content is required".to_string()));
        }
        if new.author_name.trim().is_empty() {
            return Err(AppError::Validation("author_name is required".to_string()));
        }

        new.excerpt = normalize_optional(new.excerpt);
        new.cover_image = normalize_optional(new.cover_image);

        self.store.insert_story(new).await
    }

    /// Partially update a story. Admin only. Only supplied fields change;
    /// supplying an empty required field is a validation error.
    pub async fn update(&self, caller: &Caller, id: Uuid, patch: StoryPatch) -> Result<Story> {
        Self::require_admin(caller)?;

        if matches!(&patch.title, Some(t) if t.trim().is_empty()) {
            return Err(AppError::Validation("title cannot be empty".to_string()));
        }
        if matches!(&patch.content, Some(c) if c.trim().is_empty()) {
            return Err(AppError::Validation("content cannot be empty".to_string()));
        }
        if matches!(&patch.author_name, Some(a) if a.trim().is_empty()) {
            return Err(AppError::Validation(
                "author_name cannot be empty".to_string(),
            ));
        }

        self.store
            .update_story(id, patch)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("story {}", id)))
    }

    /// Hard delete a story. Admin only. No cascade: engagement rows for the
    /// story are orphaned and never joined back to a visible story.
    pub async fn delete(&self, caller: &Caller, id: Uuid) -> Result<()> {
        Self::require_admin(caller)?;

        if self.store.delete_story(id).await? {
            Ok(())
        } else {
            Err(AppError::NotFound(format!("story {}", id)))
        }
    }
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
