use crate::models::Comment;
use sqlx::PgPool;

const COMMENT_COLUMNS: &str =
    "id, post_id, user_id, content, reaction_count, created_at, updated_at";

/// Create a new comment with a zeroed reaction count
pub async fn create_comment(
    pool: &PgPool,
    post_id: i64,
    user_id: i64,
    content: &str,
) -> Result<Comment, sqlx::Error> {
    let comment = sqlx::query_as::<_, Comment>(
        r#"
        INSERT INTO comments (post_id, user_id, content, reaction_count)
        VALUES ($1, $2, $3, 0)
        RETURNING id, post_id, user_id, content, reaction_count, created_at, updated_at
        "#,
    )
    .bind(post_id)
    .bind(user_id)
    .bind(content)
    .fetch_one(pool)
    .await?;

    Ok(comment)
}

/// Find a comment by ID
pub async fn find_comment(pool: &PgPool, comment_id: i64) -> Result<Option<Comment>, sqlx::Error> {
    let comment = sqlx::query_as::<_, Comment>(&format!(
        "SELECT {COMMENT_COLUMNS} FROM comments WHERE id = $1"
    ))
    .bind(comment_id)
    .fetch_optional(pool)
    .await?;

    Ok(comment)
}

/// Update a comment's content
pub async fn update_comment_content(
    pool: &PgPool,
    comment_id: i64,
    content: &str,
) -> Result<Comment, sqlx::Error> {
    let comment = sqlx::query_as::<_, Comment>(
        r#"
        UPDATE comments
        SET content = $1, updated_at = NOW()
        WHERE id = $2
        RETURNING id, post_id, user_id, content, reaction_count, created_at, updated_at
        "#,
    )
    .bind(content)
    .bind(comment_id)
    .fetch_one(pool)
    .await?;

    Ok(comment)
}

/// Delete a comment, returning rows removed
pub async fn delete_comment(pool: &PgPool, comment_id: i64) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM comments WHERE id = $1")
        .bind(comment_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

/// List a post's comments, newest first
pub async fn list_by_post(pool: &PgPool, post_id: i64) -> Result<Vec<Comment>, sqlx::Error> {
    let comments = sqlx::query_as::<_, Comment>(&format!(
        "SELECT {COMMENT_COLUMNS} FROM comments WHERE post_id = $1 ORDER BY created_at DESC"
    ))
    .bind(post_id)
    .fetch_all(pool)
    .await?;

    Ok(comments)
}

/// Persist a comment's reaction count, returning rows updated
pub async fn set_reaction_count(
    pool: &PgPool,
    comment_id: i64,
    count: i64,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("UPDATE comments SET reaction_count = $1 WHERE id = $2")
        .bind(count)
        .bind(comment_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}
