/// Like handlers - anonymous, session-scoped like toggling
use crate::cache::{Mutation, QueryKey};
use crate::error::Result;
use crate::handlers::AppState;
use crate::models::LikeState;
use crate::services::EngagementService;
use crate::session::SessionContext;
use actix_web::{web, HttpResponse, HttpResponseBuilder};
use uuid::Uuid;

fn respond_with_session(
    mut builder: HttpResponseBuilder,
    session: &SessionContext,
    body: &LikeState,
) -> HttpResponse {
    // Hand a freshly minted session id back to the client so its likes stay
    // attributable across requests.
    if session.minted {
        builder.cookie(session.persist_cookie());
    }
    builder.json(body)
}

/// Get like count and whether this session has liked the story
pub async fn get_like_state(
    state: web::Data<AppState>,
    story_id: web::Path<Uuid>,
    session: SessionContext,
) -> Result<HttpResponse> {
    let key = QueryKey::LikeState {
        story_id: *story_id,
        session_id: session.id.clone(),
    };

    let like_state = match state.cache.read::<LikeState>(&key).await {
        Some(cached) => cached,
        None => {
            let engagement = EngagementService::new(state.store.clone());
            let fresh = engagement.like_state(*story_id, &session).await?;
            state.cache.write(&key, &fresh).await;
            fresh
        }
    };

    Ok(respond_with_session(HttpResponse::Ok(), &session, &like_state))
}

/// Like a story for this session. Idempotent: liking twice leaves one row.
pub async fn like_story(
    state: web::Data<AppState>,
    story_id: web::Path<Uuid>,
    session: SessionContext,
) -> Result<HttpResponse> {
    let engagement = EngagementService::new(state.store.clone());
    engagement.like(*story_id, &session).await?;

    state.cache.apply(Mutation::LikeToggled(*story_id)).await;

    let like_state = engagement.like_state(*story_id, &session).await?;
    Ok(respond_with_session(HttpResponse::Ok(), &session, &like_state))
}

/// Remove this session's like. Idempotent: absence of the row is not an
/// error.
pub async fn unlike_story(
    state: web::Data<AppState>,
    story_id: web::Path<Uuid>,
    session: SessionContext,
) -> Result<HttpResponse> {
    let engagement = EngagementService::new(state.store.clone());
    engagement.unlike(*story_id, &session).await?;

    state.cache.apply(Mutation::LikeToggled(*story_id)).await;

    let like_state = engagement.like_state(*story_id, &session).await?;
    Ok(respond_with_session(HttpResponse::Ok(), &session, &like_state))
}
