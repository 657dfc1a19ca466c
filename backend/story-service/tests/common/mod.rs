//! In-memory Store for integration tests
//!
//! Mirrors the PostgreSQL store's contract — idempotent like insert,
//! delete-if-exists, newest-first orderings, no cascade on story delete —
//! without requiring a database. Timestamps come from a monotonic tick so
//! ordering assertions are deterministic.

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use story_service::db::Store;
use story_service::error::Result;
use story_service::models::{Comment, NewStory, Story, StoryPatch};
use uuid::Uuid;

pub struct MemoryStore {
    inner: Mutex<Inner>,
}

struct Inner {
    stories: HashMap<Uuid, Story>,
    comments: Vec<Comment>,
    likes: HashSet<(Uuid, String)>,
    clock: i64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                stories: HashMap::new(),
                comments: Vec::new(),
                likes: HashSet::new(),
                clock: 0,
            }),
        }
    }
}

impl Inner {
    fn tick(&mut self) -> DateTime<Utc> {
        self.clock += 1;
        Utc.timestamp_opt(1_750_000_000 + self.clock, 0).unwrap()
    }

    fn stories_sorted(&self, published_only: bool) -> Vec<Story> {
        let mut stories: Vec<Story> = self
            .stories
            .values()
            .filter(|s| !published_only || s.published)
            .cloned()
            .collect();
        stories.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        stories
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn list_published_stories(&self) -> Result<Vec<Story>> {
        Ok(self.inner.lock().unwrap().stories_sorted(true))
    }

    async fn list_all_stories(&self) -> Result<Vec<Story>> {
        Ok(self.inner.lock().unwrap().stories_sorted(false))
    }

    async fn find_story(&self, id: Uuid) -> Result<Option<Story>> {
        Ok(self.inner.lock().unwrap().stories.get(&id).cloned())
    }

    async fn insert_story(&self, new: NewStory) -> Result<Story> {
        let mut inner = self.inner.lock().unwrap();
        let now = inner.tick();
        let story = Story {
            id: Uuid::new_v4(),
            title: new.title,
            content: new.content,
            excerpt: new.excerpt,
            cover_image: new.cover_image,
            author_name: new.author_name,
            published: new.published,
            created_at: now,
            updated_at: now,
        };
        inner.stories.insert(story.id, story.clone());
        Ok(story)
    }

    async fn update_story(&self, id: Uuid, patch: StoryPatch) -> Result<Option<Story>> {
        let mut inner = self.inner.lock().unwrap();
        let now = inner.tick();

        let Some(story) = inner.stories.get_mut(&id) else {
            return Ok(None);
        };

        if let Some(title) = patch.title {
            story.title = title;
        }
        if let Some(content) = patch.content {
            story.content = content;
        }
        if let Some(excerpt) = patch.excerpt {
            story.excerpt = Some(excerpt);
        }
        if let Some(cover_image) = patch.cover_image {
            story.cover_image = Some(cover_image);
        }
        if let Some(author_name) = patch.author_name {
            story.author_name = author_name;
        }
        if let Some(published) = patch.published {
            story.published = published;
        }
        story.updated_at = now;

        Ok(Some(story.clone()))
    }

    async fn delete_story(&self, id: Uuid) -> Result<bool> {
        // No cascade: comment and like rows stay behind, orphaned.
        Ok(self.inner.lock().unwrap().stories.remove(&id).is_some())
    }

    async fn list_comments(&self, story_id: Uuid) -> Result<Vec<Comment>> {
        let inner = self.inner.lock().unwrap();
        let mut comments: Vec<Comment> = inner
            .comments
            .iter()
            .filter(|c| c.story_id == story_id)
            .cloned()
            .collect();
        comments.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(comments)
    }

    async fn insert_comment(
        &self,
        story_id: Uuid,
        author_name: &str,
        content: &str,
    ) -> Result<Comment> {
        let mut inner = self.inner.lock().unwrap();
        let comment = Comment {
            id: Uuid::new_v4(),
            story_id,
            author_name: author_name.to_string(),
            content: content.to_string(),
            created_at: inner.tick(),
        };
        inner.comments.push(comment.clone());
        Ok(comment)
    }

    async fn insert_like(&self, story_id: Uuid, session_id: &str) -> Result<bool> {
        let mut inner = self.inner.lock().unwrap();
        Ok(inner.likes.insert((story_id, session_id.to_string())))
    }

    async fn delete_like(&self, story_id: Uuid, session_id: &str) -> Result<bool> {
        let mut inner = self.inner.lock().unwrap();
        Ok(inner.likes.remove(&(story_id, session_id.to_string())))
    }

    async fn count_likes(&self, story_id: Uuid) -> Result<i64> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.likes.iter().filter(|(s, _)| *s == story_id).count() as i64)
    }

    async fn has_liked(&self, story_id: Uuid, session_id: &str) -> Result<bool> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.likes.contains(&(story_id, session_id.to_string())))
    }
}
