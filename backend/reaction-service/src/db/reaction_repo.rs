use crate::models::{Reaction, ReactionKind, TargetKind};
use sqlx::{PgPool, Row};

/// Find a user's reaction on a target, if any
pub async fn find_reaction(
    pool: &PgPool,
    user_id: i64,
    target_id: i64,
    target_type: TargetKind,
) -> Result<Option<Reaction>, sqlx::Error> {
    let reaction = sqlx::query_as::<_, Reaction>(
        r#"
        SELECT id, user_id, target_id, target_type, reaction_type, created_at, updated_at
        FROM reactions
        WHERE user_id = $1 AND target_id = $2 AND target_type = $3
        "#,
    )
    .bind(user_id)
    .bind(target_id)
    .bind(target_type)
    .fetch_optional(pool)
    .await?;

    Ok(reaction)
}

/// Insert a reaction, or replace its kind if the user already reacted.
///
/// The upsert makes the read-then-write toggle race safe: two concurrent
/// first reactions from the same user resolve to a single row instead of
/// one of them failing on the unique constraint.
pub async fn upsert_reaction(
    pool: &PgPool,
    user_id: i64,
    target_id: i64,
    target_type: TargetKind,
    reaction_type: ReactionKind,
) -> Result<Reaction, sqlx::Error> {
    let reaction = sqlx::query_as::<_, Reaction>(
        r#"
        INSERT INTO reactions (user_id, target_id, target_type, reaction_type)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (user_id, target_id, target_type)
        DO UPDATE SET reaction_type = EXCLUDED.reaction_type, updated_at = NOW()
        RETURNING id, user_id, target_id, target_type, reaction_type, created_at, updated_at
        "#,
    )
    .bind(user_id)
    .bind(target_id)
    .bind(target_type)
    .bind(reaction_type)
    .fetch_one(pool)
    .await?;

    Ok(reaction)
}

/// Delete a user's reaction on a target, returning the number of rows removed
pub async fn delete_reaction(
    pool: &PgPool,
    user_id: i64,
    target_id: i64,
    target_type: TargetKind,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        DELETE FROM reactions
        WHERE user_id = $1 AND target_id = $2 AND target_type = $3
        "#,
    )
    .bind(user_id)
    .bind(target_id)
    .bind(target_type)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

/// Remove every reaction attached to a target (cascading cleanup)
pub async fn delete_all_for_target(
    pool: &PgPool,
    target_id: i64,
    target_type: TargetKind,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        DELETE FROM reactions
        WHERE target_id = $1 AND target_type = $2
        "#,
    )
    .bind(target_id)
    .bind(target_type)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

/// Count reactions attached to a target
pub async fn count_for_target(
    pool: &PgPool,
    target_id: i64,
    target_type: TargetKind,
) -> Result<i64, sqlx::Error> {
    let row = sqlx::query(
        "SELECT COUNT(*) as count FROM reactions WHERE target_id = $1 AND target_type = $2",
    )
    .bind(target_id)
    .bind(target_type)
    .fetch_one(pool)
    .await?;

    Ok(row.get::<i64, _>("count"))
}

/// List all reactions attached to a target, newest first
pub async fn list_for_target(
    pool: &PgPool,
    target_id: i64,
    target_type: TargetKind,
) -> Result<Vec<Reaction>, sqlx::Error> {
    let reactions = sqlx::query_as::<_, Reaction>(
        r#"
        SELECT id, user_id, target_id, target_type, reaction_type, created_at, updated_at
        FROM reactions
        WHERE target_id = $1 AND target_type = $2
        ORDER BY created_at DESC
        "#,
    )
    .bind(target_id)
    .bind(target_type)
    .fetch_all(pool)
    .await?;

    Ok(reactions)
}
