use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Account role. Admins may orchestrate cross-service admin actions and
/// block or unblock accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(type_name = "user_role", rename_all = "UPPERCASE")]
pub enum Role {
    User,
    Admin,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub blocked: bool,
    pub blocked_reason: Option<String>,
    pub blocked_at: Option<DateTime<Utc>>,
    pub blocked_by_admin_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

/// User as returned to API clients. Never carries the password hash.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub blocked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blocked_reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserView {
    fn from(u: User) -> Self {
        UserView {
            id: u.id,
            name: u.name,
            email: u.email,
            role: u.role,
            blocked: u.blocked,
            blocked_reason: u.blocked_reason,
            created_at: u.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_never_leaks_password_hash() {
        let user = User {
            id: 1,
            name: "Ada".into(),
            email: "ada@example.com".into(),
            password_hash: "$argon2id$...".into(),
            role: Role::User,
            blocked: false,
            blocked_reason: None,
            blocked_at: None,
            blocked_by_admin_id: None,
            created_at: Utc::now(),
        };

        let json = serde_json::to_string(&UserView::from(user)).unwrap();
        assert!(!json.contains("argon2id"));
        assert!(json.contains("\"role\":\"USER\""));
    }
}
