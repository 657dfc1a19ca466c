/// Story handlers - HTTP endpoints for catalog operations
use crate::auth::Caller;
use crate::cache::{Mutation, QueryKey};
use crate::error::{AppError, Result};
use crate::handlers::AppState;
use crate::models::{derive_excerpt, NewStory, Story, StoryPatch};
use crate::services::CatalogService;
use actix_web::{web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Public list entry: full content stays on the detail view, lists carry the
/// stored excerpt or one derived from content.
#[derive(Serialize)]
pub struct StorySummary {
    pub id: Uuid,
    pub title: String,
    pub excerpt: String,
    pub cover_image: Option<String>,
    pub author_name: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Story> for StorySummary {
    fn from(story: &Story) -> Self {
        Self {
            id: story.id,
            title: story.title.clone(),
            excerpt: story
                .excerpt
                .clone()
                .unwrap_or_else(|| derive_excerpt(&story.content)),
            cover_image: story.cover_image.clone(),
            author_name: story.author_name.clone(),
            created_at: story.created_at,
        }
    }
}

/// List published stories
pub async fn list_stories(state: web::Data<AppState>) -> Result<HttpResponse> {
    let stories = match state.cache.read::<Vec<Story>>(&QueryKey::PublishedStories).await {
        Some(stories) => stories,
        None => {
            let catalog = CatalogService::new(state.store.clone());
            let stories = catalog.list_published().await?;
            state.cache.write(&QueryKey::PublishedStories, &stories).await;
            stories
        }
    };

    let summaries: Vec<StorySummary> = stories.iter().map(StorySummary::from).collect();

    Ok(HttpResponse::Ok().json(summaries))
}

/// List every story including drafts (admin)
pub async fn list_all_stories(
    state: web::Data<AppState>,
    caller: Caller,
) -> Result<HttpResponse> {
    // Gate before the cache so a cached admin view is never served to an
    // anonymous caller.
    if !caller.is_admin() {
        return Err(AppError::Forbidden("admin capability required".to_string()));
    }

    if let Some(stories) = state.cache.read::<Vec<Story>>(&QueryKey::AllStories).await {
        return Ok(HttpResponse::Ok().json(stories));
    }

    let catalog = CatalogService::new(state.store.clone());
    let stories = catalog.list_all(&caller).await?;
    state.cache.write(&QueryKey::AllStories, &stories).await;

    Ok(HttpResponse::Ok().json(stories))
}

/// Get a story by id, drafts included
pub async fn get_story(
    state: web::Data<AppState>,
    story_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let key = QueryKey::Story(*story_id);

    if let Some(story) = state.cache.read::<Story>(&key).await {
        return Ok(HttpResponse::Ok().json(story));
    }

    let catalog = CatalogService::new(state.store.clone());
    match catalog.get_story(*story_id).await? {
        Some(story) => {
            state.cache.write(&key, &story).await;
            Ok(HttpResponse::Ok().json(story))
        }
        None => Ok(HttpResponse::NotFound().finish()),
    }
}

/// Create a story (admin)
pub async fn create_story(
    state: web::Data<AppState>,
    caller: Caller,
    req: web::Json<NewStory>,
) -> Result<HttpResponse> {
    let catalog = CatalogService::new(state.store.clone());
    let story = catalog.create(&caller, req.into_inner()).await?;

    state.cache.apply(Mutation::StoryCreated).await;

    Ok(HttpResponse::Created().json(story))
}

/// Partially update a story (admin)
pub async fn update_story(
    state: web::Data<AppState>,
    caller: Caller,
    story_id: web::Path<Uuid>,
    req: web::Json<StoryPatch>,
) -> Result<HttpResponse> {
    let catalog = CatalogService::new(state.store.clone());
    let story = catalog.update(&caller, *story_id, req.into_inner()).await?;

    state.cache.apply(Mutation::StoryUpdated(*story_id)).await;

    Ok(HttpResponse::Ok().json(story))
}

/// Hard delete a story (admin)
pub async fn delete_story(
    state: web::Data<AppState>,
    caller: Caller,
    story_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let catalog = CatalogService::new(state.store.clone());
    catalog.delete(&caller, *story_id).await?;

    state.cache.apply(Mutation::StoryDeleted(*story_id)).await;

    Ok(HttpResponse::NoContent().finish())
}
