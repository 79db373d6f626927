use crate::models::Post;
use sqlx::PgPool;

const POST_COLUMNS: &str = "id, user_id, content, reaction_count, created_at, updated_at";

/// Create a new post with a zeroed aggregate count
pub async fn create_post(pool: &PgPool, user_id: i64, content: &str) -> Result<Post, sqlx::Error> {
    let post = sqlx::query_as::<_, Post>(
        r#"
        INSERT INTO posts (user_id, content, reaction_count)
        VALUES ($1, $2, 0)
        RETURNING id, user_id, content, reaction_count, created_at, updated_at
        "#,
    )
    .bind(user_id)
    .bind(content)
    .fetch_one(pool)
    .await?;

    Ok(post)
}

/// Find a post by ID
pub async fn find_post(pool: &PgPool, post_id: i64) -> Result<Option<Post>, sqlx::Error> {
    let post = sqlx::query_as::<_, Post>(&format!(
        "SELECT {POST_COLUMNS} FROM posts WHERE id = $1"
    ))
    .bind(post_id)
    .fetch_optional(pool)
    .await?;

    Ok(post)
}

/// Update a post's content
pub async fn update_post_content(
    pool: &PgPool,
    post_id: i64,
    content: &str,
) -> Result<Post, sqlx::Error> {
    let post = sqlx::query_as::<_, Post>(
        r#"
        UPDATE posts
        SET content = $1, updated_at = NOW()
        WHERE id = $2
        RETURNING id, user_id, content, reaction_count, created_at, updated_at
        "#,
    )
    .bind(content)
    .bind(post_id)
    .fetch_one(pool)
    .await?;

    Ok(post)
}

/// Delete a post and its dependent rows, returning rows removed
pub async fn delete_post(pool: &PgPool, post_id: i64) -> Result<u64, sqlx::Error> {
    // Children first: comments and hashtag links reference the post by id
    sqlx::query("DELETE FROM comments WHERE post_id = $1")
        .bind(post_id)
        .execute(pool)
        .await?;
    sqlx::query("DELETE FROM post_hashtags WHERE post_id = $1")
        .bind(post_id)
        .execute(pool)
        .await?;

    let result = sqlx::query("DELETE FROM posts WHERE id = $1")
        .bind(post_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

/// List all posts, newest first
pub async fn list_recent(pool: &PgPool) -> Result<Vec<Post>, sqlx::Error> {
    let posts = sqlx::query_as::<_, Post>(&format!(
        "SELECT {POST_COLUMNS} FROM posts ORDER BY created_at DESC"
    ))
    .fetch_all(pool)
    .await?;

    Ok(posts)
}

/// List all posts, most reacted first
pub async fn list_top(pool: &PgPool) -> Result<Vec<Post>, sqlx::Error> {
    let posts = sqlx::query_as::<_, Post>(&format!(
        "SELECT {POST_COLUMNS} FROM posts ORDER BY reaction_count DESC, created_at DESC"
    ))
    .fetch_all(pool)
    .await?;

    Ok(posts)
}

/// List a user's posts, newest first
pub async fn list_by_user(pool: &PgPool, user_id: i64) -> Result<Vec<Post>, sqlx::Error> {
    let posts = sqlx::query_as::<_, Post>(&format!(
        "SELECT {POST_COLUMNS} FROM posts WHERE user_id = $1 ORDER BY created_at DESC"
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(posts)
}

/// Case-insensitive text search over post content
pub async fn search_by_content(pool: &PgPool, query: &str) -> Result<Vec<Post>, sqlx::Error> {
    let pattern = format!("%{}%", query);
    let posts = sqlx::query_as::<_, Post>(&format!(
        "SELECT {POST_COLUMNS} FROM posts WHERE content ILIKE $1 ORDER BY created_at DESC"
    ))
    .bind(pattern)
    .fetch_all(pool)
    .await?;

    Ok(posts)
}

/// List posts carrying any of the given normalized hashtag names
pub async fn list_by_hashtags(pool: &PgPool, names: &[String]) -> Result<Vec<Post>, sqlx::Error> {
    let posts = sqlx::query_as::<_, Post>(
        r#"
        SELECT DISTINCT p.id, p.user_id, p.content, p.reaction_count, p.created_at, p.updated_at
        FROM posts p
        JOIN post_hashtags ph ON ph.post_id = p.id
        JOIN hashtags h ON h.id = ph.hashtag_id
        WHERE h.name = ANY($1)
        ORDER BY p.created_at DESC
        "#,
    )
    .bind(names)
    .fetch_all(pool)
    .await?;

    Ok(posts)
}

/// Persist a post's aggregate reaction count, returning rows updated
pub async fn set_reaction_count(
    pool: &PgPool,
    post_id: i64,
    count: i64,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("UPDATE posts SET reaction_count = $1 WHERE id = $2")
        .bind(count)
        .bind(post_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}
