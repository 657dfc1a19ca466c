use crate::models::Comment;
use sqlx::PgPool;
use uuid::Uuid;

/// Comments for a story, newest first. The id tiebreak keeps ordering
/// stable when timestamps collide.
pub async fn list_by_story(pool: &PgPool, story_id: Uuid) -> Result<Vec<Comment>, sqlx::Error> {
    let comments = sqlx::query_as::<_, Comment>(
        r#"
        SELECT id, story_id, author_name, content, created_at
        FROM comments
        WHERE story_id = $1
        ORDER BY created_at DESC, id DESC
        "#,
    )
    .bind(story_id)
    .fetch_all(pool)
    .await?;

    Ok(comments)
}

/// Create a new comment with server-assigned id and timestamp
pub async fn insert(
    pool: &PgPool,
    story_id: Uuid,
    author_name: &str,
    content: &str,
) -> Result<Comment, sqlx::Error> {
    let comment = sqlx::query_as::<_, Comment>(
        r#"
        INSERT INTO comments (story_id, author_name, content)
        VALUES ($1, $2, $3)
        RETURNING id, story_id, author_name, content, created_at
        "#,
    )
    .bind(story_id)
    .bind(author_name)
    .bind(content)
    .fetch_one(pool)
    .await?;

    Ok(comment)
}
