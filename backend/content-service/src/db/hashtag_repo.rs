use crate::models::Hashtag;
use sqlx::PgPool;

/// Find a hashtag by normalized name, creating it if absent.
///
/// The no-op `DO UPDATE` makes the row come back on both paths, so a
/// concurrent create resolves to the same hashtag instead of erroring.
pub async fn find_or_create(pool: &PgPool, name: &str) -> Result<Hashtag, sqlx::Error> {
    let hashtag = sqlx::query_as::<_, Hashtag>(
        r#"
        INSERT INTO hashtags (name)
        VALUES ($1)
        ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
        RETURNING id, name
        "#,
    )
    .bind(name)
    .fetch_one(pool)
    .await?;

    Ok(hashtag)
}

/// Attach a hashtag to a post (idempotent)
pub async fn link_post(pool: &PgPool, post_id: i64, hashtag_id: i64) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO post_hashtags (post_id, hashtag_id)
        VALUES ($1, $2)
        ON CONFLICT DO NOTHING
        "#,
    )
    .bind(post_id)
    .bind(hashtag_id)
    .execute(pool)
    .await?;

    Ok(())
}

/// Remove every hashtag association of a post
pub async fn clear_post(pool: &PgPool, post_id: i64) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM post_hashtags WHERE post_id = $1")
        .bind(post_id)
        .execute(pool)
        .await?;

    Ok(())
}

/// Names of the hashtags attached to a post
pub async fn names_for_post(pool: &PgPool, post_id: i64) -> Result<Vec<String>, sqlx::Error> {
    let names: Vec<String> = sqlx::query_scalar(
        r#"
        SELECT h.name
        FROM hashtags h
        JOIN post_hashtags ph ON ph.hashtag_id = h.id
        WHERE ph.post_id = $1
        ORDER BY h.name
        "#,
    )
    .bind(post_id)
    .fetch_all(pool)
    .await?;

    Ok(names)
}
