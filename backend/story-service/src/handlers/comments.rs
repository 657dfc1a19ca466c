/// Comment handlers - HTTP endpoints for comment operations
use crate::cache::{Mutation, QueryKey};
use crate::error::Result;
use crate::handlers::AppState;
use crate::models::Comment;
use crate::services::EngagementService;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use uuid::Uuid;

/// Request body for creating a comment
#[derive(Deserialize)]
pub struct CreateCommentRequest {
    pub author_name: String,
    pub content: String,
}

/// Get comments for a story, newest first
pub async fn list_comments(
    state: web::Data<AppState>,
    story_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let key = QueryKey::Comments(*story_id);

    if let Some(comments) = state.cache.read::<Vec<Comment>>(&key).await {
        return Ok(HttpResponse::Ok().json(comments));
    }

    let engagement = EngagementService::new(state.store.clone());
    let comments = engagement.list_comments(*story_id).await?;
    state.cache.write(&key, &comments).await;

    Ok(HttpResponse::Ok().json(comments))
}

/// Create a comment. Open to any caller; no authentication required.
pub async fn create_comment(
    state: web::Data<AppState>,
    story_id: web::Path<Uuid>,
    req: web::Json<CreateCommentRequest>,
) -> Result<HttpResponse> {
    let engagement = EngagementService::new(state.store.clone());
    let comment = engagement
        .create_comment(*story_id, &req.author_name, &req.content)
        .await?;

    state.cache.apply(Mutation::CommentCreated(*story_id)).await;

    Ok(HttpResponse::Created().json(comment))
}
