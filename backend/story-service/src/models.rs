/// Data models for story-service
///
/// Rows as stored (`Story`, `Comment`, `Like`), the write shapes the catalog
/// accepts (`NewStory`, `StoryPatch`), and the derived engagement view
/// (`LikeState`).
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A published or draft story
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Story {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub cover_image: Option<String>,
    pub author_name: String,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An anonymous reader comment. Append-only: never mutated, never deleted.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Comment {
    pub id: Uuid,
    pub story_id: Uuid,
    pub author_name: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Fields accepted when creating a story
#[derive(Debug, Clone, Deserialize)]
pub struct NewStory {
    pub title: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub cover_image: Option<String>,
    pub author_name: String,
    #[serde(default = "default_published")]
    pub published: bool,
}

fn default_published() -> bool {
    true
}

/// Partial update for a story. Absent fields are left unchanged; id and
/// created_at are not expressible here and therefore immutable.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StoryPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    pub cover_image: Option<String>,
    pub author_name: Option<String>,
    pub published: Option<bool>,
}

/// Aggregated like view for one story as seen by one session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LikeState {
    pub count: i64,
    pub has_liked: bool,
}

/// Excerpt length used when a story has none stored
const EXCERPT_LEN: usize = 150;

/// Short form of a story's content for list views. Used at read time only
/// when `excerpt` is absent; never persisted.
pub fn derive_excerpt(content: &str) -> String {
    let mut excerpt: String = content.chars().take(EXCERPT_LEN).collect();
    excerpt.push_str("...");
    excerpt
}

/// Split story content into display paragraphs on blank-line boundaries,
/// discarding fragments that are empty after trimming.
pub fn split_paragraphs(content: &str) -> Vec<&str> {
    content
        .split("\n\n")
        .filter(|p| !p.trim().is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_excerpt_truncates() {
        let content = "x".repeat(400);
        let excerpt = derive_excerpt(&content);
        assert_eq!(excerpt.chars().count(), EXCERPT_LEN + 3);
        assert!(excerpt.ends_with("..."));
    }

    #[test]
    fn test_derive_excerpt_short_content() {
        assert_eq!(derive_excerpt("Once upon a time"), "Once upon a time...");
    }

    #[test]
    fn test_derive_excerpt_multibyte() {
        let content = "café ".repeat(50);
        let excerpt = derive_excerpt(&content);
        assert_eq!(excerpt.chars().count(), EXCERPT_LEN + 3);
    }

    #[test]
    fn test_split_paragraphs() {
        assert_eq!(split_paragraphs("Para1\n\nPara2"), vec!["Para1", "Para2"]);
    }

    #[test]
    fn test_split_paragraphs_discards_blank_fragments() {
        assert_eq!(
            split_paragraphs("Para1\n\n\n\n  \n\nPara2\n\n"),
            vec!["Para1", "Para2"]
        );
    }

    #[test]
    fn test_split_paragraphs_single_newline_is_not_a_break() {
        assert_eq!(split_paragraphs("line one\nline two"), vec!["line one\nline two"]);
    }

    #[test]
    fn test_new_story_published_defaults_true() {
        let new: NewStory = serde_json::from_str(
            r#"{"title": "A", "content": "B", "author_name": "C"}"#,
        )
        .unwrap();
        assert!(new.published);
        assert!(new.excerpt.is_none());
        assert!(new.cover_image.is_none());
    }
}
