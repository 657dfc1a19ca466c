//! Integration tests: Engagement Engine
//!
//! Drives like toggling and comment creation through the service layer
//! against the in-memory store.
//!
//! Coverage:
//! - Like/unlike round trip and idempotence
//! - Like uniqueness under concurrent double-submit
//! - Session scoping of the has-liked view
//! - Comment validation, trimming, and newest-first ordering

mod common;

use common::MemoryStore;
use std::sync::Arc;
use story_service::error::AppError;
use story_service::services::EngagementService;
use story_service::session::SessionContext;
use uuid::Uuid;

fn engagement() -> (Arc<MemoryStore>, EngagementService) {
    let store = Arc::new(MemoryStore::new());
    let service = EngagementService::new(store.clone());
    (store, service)
}

#[tokio::test]
async fn like_then_unlike_round_trips() {
    let (_, service) = engagement();
    let story_id = Uuid::new_v4();
    let session = SessionContext::with_id("session-x");

    assert!(service.like(story_id, &session).await.unwrap());

    let state = service.like_state(story_id, &session).await.unwrap();
    assert_eq!(state.count, 1);
    assert!(state.has_liked);

    assert!(service.unlike(story_id, &session).await.unwrap());

    let state = service.like_state(story_id, &session).await.unwrap();
    assert_eq!(state.count, 0);
    assert!(!state.has_liked);
}

#[tokio::test]
async fn unlike_without_like_is_a_noop() {
    let (_, service) = engagement();
    let story_id = Uuid::new_v4();
    let session = SessionContext::with_id("session-x");

    // Delete-if-exists: no row, no error, nothing created.
    assert!(!service.unlike(story_id, &session).await.unwrap());

    let state = service.like_state(story_id, &session).await.unwrap();
    assert_eq!(state.count, 0);
    assert!(!state.has_liked);
}

#[tokio::test]
async fn repeated_likes_keep_a_single_row() {
    let (_, service) = engagement();
    let story_id = Uuid::new_v4();
    let session = SessionContext::with_id("session-x");

    assert!(service.like(story_id, &session).await.unwrap());
    assert!(!service.like(story_id, &session).await.unwrap());
    assert!(!service.like(story_id, &session).await.unwrap());

    let state = service.like_state(story_id, &session).await.unwrap();
    assert_eq!(state.count, 1);
}

#[tokio::test]
async fn concurrent_likes_never_create_duplicates() {
    let (store, _) = engagement();
    let story_id = Uuid::new_v4();

    let mut handles = Vec::new();
    for _ in 0..16 {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            let service = EngagementService::new(store);
            let session = SessionContext::with_id("double-clicker");
            service.like(story_id, &session).await.unwrap();
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let service = EngagementService::new(store);
    let session = SessionContext::with_id("double-clicker");
    let state = service.like_state(story_id, &session).await.unwrap();
    assert_eq!(state.count, 1);
}

#[tokio::test]
async fn like_state_is_scoped_per_session() {
    let (_, service) = engagement();
    let story_id = Uuid::new_v4();
    let session_x = SessionContext::with_id("session-x");
    let session_y = SessionContext::with_id("session-y");

    service.like(story_id, &session_x).await.unwrap();

    let seen_by_x = service.like_state(story_id, &session_x).await.unwrap();
    assert_eq!(seen_by_x.count, 1);
    assert!(seen_by_x.has_liked);

    let seen_by_y = service.like_state(story_id, &session_y).await.unwrap();
    assert_eq!(seen_by_y.count, 1);
    assert!(!seen_by_y.has_liked);
}

#[tokio::test]
async fn likes_on_different_stories_are_independent() {
    let (_, service) = engagement();
    let story_a = Uuid::new_v4();
    let story_b = Uuid::new_v4();
    let session = SessionContext::with_id("session-x");

    service.like(story_a, &session).await.unwrap();

    let state_b = service.like_state(story_b, &session).await.unwrap();
    assert_eq!(state_b.count, 0);
    assert!(!state_b.has_liked);
}

#[tokio::test]
async fn empty_comment_author_is_rejected() {
    let (_, service) = engagement();
    let story_id = Uuid::new_v4();

    let err = service
        .create_comment(story_id, "   ", "A fine story")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    assert!(service.list_comments(story_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn empty_comment_content_is_rejected() {
    let (_, service) = engagement();
    let story_id = Uuid::new_v4();

    let err = service
        .create_comment(story_id, "Ann", "\n\t  ")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    assert!(service.list_comments(story_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn comment_fields_are_trimmed_before_storage() {
    let (_, service) = engagement();
    let story_id = Uuid::new_v4();

    let comment = service
        .create_comment(story_id, "  Ann  ", "  Loved it  ")
        .await
        .unwrap();

    assert_eq!(comment.author_name, "Ann");
    assert_eq!(comment.content, "Loved it");
    assert_eq!(comment.story_id, story_id);
}

#[tokio::test]
async fn comments_are_listed_newest_first() {
    let (_, service) = engagement();
    let story_id = Uuid::new_v4();

    for content in ["first", "second", "third"] {
        service
            .create_comment(story_id, "Ann", content)
            .await
            .unwrap();
    }

    let comments = service.list_comments(story_id).await.unwrap();
    let contents: Vec<&str> = comments.iter().map(|c| c.content.as_str()).collect();
    assert_eq!(contents, vec!["third", "second", "first"]);

    for pair in comments.windows(2) {
        assert!(pair[0].created_at >= pair[1].created_at);
    }
}

#[tokio::test]
async fn comments_are_scoped_to_their_story() {
    let (_, service) = engagement();
    let story_a = Uuid::new_v4();
    let story_b = Uuid::new_v4();

    service.create_comment(story_a, "Ann", "on A").await.unwrap();

    assert_eq!(service.list_comments(story_a).await.unwrap().len(), 1);
    assert!(service.list_comments(story_b).await.unwrap().is_empty());
}
