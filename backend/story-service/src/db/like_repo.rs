use sqlx::PgPool;
use uuid::Uuid;

/// Create a like for (story, session) if none exists.
///
/// Idempotent under concurrent double-submit: the conflict target is the
/// unique (story_id, session_id) constraint, so a losing racer simply
/// affects zero rows. Returns whether a row was created.
pub async fn insert(
    pool: &PgPool,
    story_id: Uuid,
    session_id: &str,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO likes (story_id, session_id)
        VALUES ($1, $2)
        ON CONFLICT (story_id, session_id) DO NOTHING
        "#,
    )
    .bind(story_id)
    .bind(session_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Delete the like for (story, session) if it exists. Absence is not an
/// error; returns whether a row was removed.
pub async fn delete(
    pool: &PgPool,
    story_id: Uuid,
    session_id: &str,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        DELETE FROM likes
        WHERE story_id = $1 AND session_id = $2
        "#,
    )
    .bind(story_id)
    .bind(session_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Count likes for a story across all sessions
pub async fn count_by_story(pool: &PgPool, story_id: Uuid) -> Result<i64, sqlx::Error> {
    let count: i64 = sqlx::query_scalar(
        r#"
        SELECT COUNT(*) FROM likes
        WHERE story_id = $1
        "#,
    )
    .bind(story_id)
    .fetch_one(pool)
    .await?;

    Ok(count)
}

/// Check whether a session has liked a story
pub async fn exists(
    pool: &PgPool,
    story_id: Uuid,
    session_id: &str,
) -> Result<bool, sqlx::Error> {
    let exists: bool = sqlx::query_scalar(
        r#"
        SELECT EXISTS(
            SELECT 1 FROM likes
            WHERE story_id = $1 AND session_id = $2
        )
        "#,
    )
    .bind(story_id)
    .bind(session_id)
    .fetch_one(pool)
    .await?;

    Ok(exists)
}
