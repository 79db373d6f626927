use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(type_name = "friend_request_status", rename_all = "UPPERCASE")]
pub enum FriendRequestStatus {
    Pending,
    Accepted,
    Declined,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct FriendRequest {
    pub id: i64,
    pub sender_id: i64,
    pub receiver_id: i64,
    pub status: FriendRequestStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FriendRequestView {
    pub id: i64,
    pub sender_id: i64,
    pub receiver_id: i64,
    pub status: FriendRequestStatus,
    pub created_at: DateTime<Utc>,
}

impl From<FriendRequest> for FriendRequestView {
    fn from(fr: FriendRequest) -> Self {
        FriendRequestView {
            id: fr.id,
            sender_id: fr.sender_id,
            receiver_id: fr.receiver_id,
            status: fr.status,
            created_at: fr.created_at,
        }
    }
}
