/// User database operations for identity-service
use crate::models::{Role, User};
use sqlx::PgPool;

const USER_COLUMNS: &str = "id, name, email, password_hash, role, blocked, blocked_reason, \
     blocked_at, blocked_by_admin_id, created_at";

/// Create a user with the USER role
pub async fn create_user(
    pool: &PgPool,
    name: &str,
    email: &str,
    password_hash: &str,
) -> Result<User, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (name, email, password_hash, role, blocked)
        VALUES ($1, $2, $3, 'USER', FALSE)
        RETURNING id, name, email, password_hash, role, blocked, blocked_reason,
                  blocked_at, blocked_by_admin_id, created_at
        "#,
    )
    .bind(name)
    .bind(email)
    .bind(password_hash)
    .fetch_one(pool)
    .await?;

    Ok(user)
}

pub async fn find_by_id(pool: &PgPool, user_id: i64) -> Result<Option<User>, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
    ))
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
    ))
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

pub async fn list_users(pool: &PgPool) -> Result<Vec<User>, sqlx::Error> {
    let users = sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users ORDER BY created_at DESC"
    ))
    .fetch_all(pool)
    .await?;

    Ok(users)
}

pub async fn exists(pool: &PgPool, user_id: i64) -> Result<bool, sqlx::Error> {
    let found: Option<i64> = sqlx::query_scalar("SELECT id FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

    Ok(found.is_some())
}

/// Update a user's profile fields
pub async fn update_name(pool: &PgPool, user_id: i64, name: &str) -> Result<User, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(
        r#"
        UPDATE users
        SET name = $1
        WHERE id = $2
        RETURNING id, name, email, password_hash, role, blocked, blocked_reason,
                  blocked_at, blocked_by_admin_id, created_at
        "#,
    )
    .bind(name)
    .bind(user_id)
    .fetch_one(pool)
    .await?;

    Ok(user)
}

/// Mark a user blocked, recording reason, time and acting admin
pub async fn block(
    pool: &PgPool,
    user_id: i64,
    reason: &str,
    admin_id: i64,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE users
        SET blocked = TRUE, blocked_reason = $1, blocked_at = NOW(), blocked_by_admin_id = $2
        WHERE id = $3
        "#,
    )
    .bind(reason)
    .bind(admin_id)
    .bind(user_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

/// Clear a user's blocked state
pub async fn unblock(pool: &PgPool, user_id: i64) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE users
        SET blocked = FALSE, blocked_reason = NULL, blocked_at = NULL, blocked_by_admin_id = NULL
        WHERE id = $1
        "#,
    )
    .bind(user_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}
