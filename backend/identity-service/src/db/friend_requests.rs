/// Friend request database operations for identity-service
use crate::models::{FriendRequest, FriendRequestStatus};
use sqlx::PgPool;

const FR_COLUMNS: &str = "id, sender_id, receiver_id, status, created_at";

pub async fn create(
    pool: &PgPool,
    sender_id: i64,
    receiver_id: i64,
) -> Result<FriendRequest, sqlx::Error> {
    let request = sqlx::query_as::<_, FriendRequest>(
        r#"
        INSERT INTO friend_requests (sender_id, receiver_id, status)
        VALUES ($1, $2, 'PENDING')
        RETURNING id, sender_id, receiver_id, status, created_at
        "#,
    )
    .bind(sender_id)
    .bind(receiver_id)
    .fetch_one(pool)
    .await?;

    Ok(request)
}

pub async fn find_by_id(
    pool: &PgPool,
    request_id: i64,
) -> Result<Option<FriendRequest>, sqlx::Error> {
    let request = sqlx::query_as::<_, FriendRequest>(&format!(
        "SELECT {FR_COLUMNS} FROM friend_requests WHERE id = $1"
    ))
    .bind(request_id)
    .fetch_optional(pool)
    .await?;

    Ok(request)
}

/// Find any request between two users, in either direction
pub async fn find_between(
    pool: &PgPool,
    user_a: i64,
    user_b: i64,
) -> Result<Option<FriendRequest>, sqlx::Error> {
    let request = sqlx::query_as::<_, FriendRequest>(&format!(
        r#"
        SELECT {FR_COLUMNS} FROM friend_requests
        WHERE (sender_id = $1 AND receiver_id = $2)
           OR (sender_id = $2 AND receiver_id = $1)
        "#
    ))
    .bind(user_a)
    .bind(user_b)
    .fetch_optional(pool)
    .await?;

    Ok(request)
}

pub async fn set_status(
    pool: &PgPool,
    request_id: i64,
    status: FriendRequestStatus,
) -> Result<FriendRequest, sqlx::Error> {
    let request = sqlx::query_as::<_, FriendRequest>(
        r#"
        UPDATE friend_requests
        SET status = $1
        WHERE id = $2
        RETURNING id, sender_id, receiver_id, status, created_at
        "#,
    )
    .bind(status)
    .bind(request_id)
    .fetch_one(pool)
    .await?;

    Ok(request)
}

/// Pending requests addressed to a user, newest first
pub async fn list_pending_for_receiver(
    pool: &PgPool,
    receiver_id: i64,
) -> Result<Vec<FriendRequest>, sqlx::Error> {
    let requests = sqlx::query_as::<_, FriendRequest>(&format!(
        r#"
        SELECT {FR_COLUMNS} FROM friend_requests
        WHERE receiver_id = $1 AND status = 'PENDING'
        ORDER BY created_at DESC
        "#
    ))
    .bind(receiver_id)
    .fetch_all(pool)
    .await?;

    Ok(requests)
}

/// Requests sent by a user, newest first
pub async fn list_sent_by(
    pool: &PgPool,
    sender_id: i64,
) -> Result<Vec<FriendRequest>, sqlx::Error> {
    let requests = sqlx::query_as::<_, FriendRequest>(&format!(
        r#"
        SELECT {FR_COLUMNS} FROM friend_requests
        WHERE sender_id = $1
        ORDER BY created_at DESC
        "#
    ))
    .bind(sender_id)
    .fetch_all(pool)
    .await?;

    Ok(requests)
}
