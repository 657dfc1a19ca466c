use crate::models::{NewStory, Story, StoryPatch};
use sqlx::PgPool;
use uuid::Uuid;

/// List published stories, newest first
pub async fn list_published(pool: &PgPool) -> Result<Vec<Story>, sqlx::Error> {
    let stories = sqlx::query_as::<_, Story>(
        r#"
        SELECT id, title, content, excerpt, cover_image, author_name, published,
               created_at, updated_at
        FROM stories
        WHERE published = TRUE
        ORDER BY created_at DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(stories)
}

/// List every story regardless of publish state, newest first
pub async fn list_all(pool: &PgPool) -> Result<Vec<Story>, sqlx::Error> {
    let stories = sqlx::query_as::<_, Story>(
        r#"
        SELECT id, title, content, excerpt, cover_image, author_name, published,
               created_at, updated_at
        FROM stories
        ORDER BY created_at DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(stories)
}

/// Find a story by ID. Drafts are returned too; list views are where the
/// published filter applies.
pub async fn find_by_id(pool: &PgPool, story_id: Uuid) -> Result<Option<Story>, sqlx::Error> {
    let story = sqlx::query_as::<_, Story>(
        r#"
        SELECT id, title, content, excerpt, cover_image, author_name, published,
               created_at, updated_at
        FROM stories
        WHERE id = $1
        "#,
    )
    .bind(story_id)
    .fetch_optional(pool)
    .await?;

    Ok(story)
}

/// Create a new story with server-assigned id and timestamps
pub async fn insert(pool: &PgPool, new: &NewStory) -> Result<Story, sqlx::Error> {
    let story = sqlx::query_as::<_, Story>(
        r#"
        INSERT INTO stories (title, content, excerpt, cover_image, author_name, published)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, title, content, excerpt, cover_image, author_name, published,
                  created_at, updated_at
        "#,
    )
    .bind(&new.title)
    .bind(&new.content)
    .bind(&new.excerpt)
    .bind(&new.cover_image)
    .bind(&new.author_name)
    .bind(new.published)
    .fetch_one(pool)
    .await?;

    Ok(story)
}

/// Apply a partial update. Absent patch fields keep the stored value; id and
/// created_at are never touched. Returns None when the id does not exist.
pub async fn update(
    pool: &PgPool,
    story_id: Uuid,
    patch: &StoryPatch,
) -> Result<Option<Story>, sqlx::Error> {
    let story = sqlx::query_as::<_, Story>(
        r#"
        UPDATE stories
        SET title = COALESCE($2, title),
            content = COALESCE($3, content),
            excerpt = COALESCE($4, excerpt),
            cover_image = COALESCE($5, cover_image),
            author_name = COALESCE($6, author_name),
            published = COALESCE($7, published),
            updated_at = NOW()
        WHERE id = $1
        RETURNING id, title, content, excerpt, cover_image, author_name, published,
                  created_at, updated_at
        "#,
    )
    .bind(story_id)
    .bind(&patch.title)
    .bind(&patch.content)
    .bind(&patch.excerpt)
    .bind(&patch.cover_image)
    .bind(&patch.author_name)
    .bind(patch.published)
    .fetch_optional(pool)
    .await?;

    Ok(story)
}

/// Hard delete a story. Comments and likes are left orphaned.
pub async fn delete(pool: &PgPool, story_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        DELETE FROM stories
        WHERE id = $1
        "#,
    )
    .bind(story_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}
