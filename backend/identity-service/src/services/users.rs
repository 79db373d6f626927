/// User service - accounts, authentication, block administration
use crate::db::users as user_repo;
use crate::error::{IdentityError, Result};
use crate::models::{Role, User, UserView};
use crate::security::password;
use serde::Serialize;
use sqlx::PgPool;

#[derive(Clone)]
pub struct UserService {
    pool: PgPool,
}

/// Login response: bearer token plus the authenticated account.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    pub token_type: String,
    pub user: UserView,
}

/// Admin gate shared by block/unblock. The users table is the only
/// source of role data, so this check lives in the service that owns it.
pub fn ensure_admin(user: &User) -> Result<()> {
    if user.role != Role::Admin {
        return Err(IdentityError::Forbidden(format!(
            "User {} is not authorized to perform admin actions",
            user.id
        )));
    }
    Ok(())
}

impl UserService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn register(&self, name: &str, email: &str, plain_password: &str) -> Result<UserView> {
        if user_repo::find_by_email(&self.pool, email).await?.is_some() {
            return Err(IdentityError::EmailAlreadyExists);
        }

        let password_hash = password::hash_password(plain_password)?;
        let user = user_repo::create_user(&self.pool, name, email, &password_hash).await?;

        tracing::info!(user_id = user.id, "Registered new user");
        Ok(UserView::from(user))
    }

    /// Authenticate and issue an access token.
    ///
    /// Blocked accounts cannot log in; the rejection carries the reason.
    pub async fn login(&self, email: &str, plain_password: &str) -> Result<AuthResponse> {
        let user = user_repo::find_by_email(&self.pool, email)
            .await?
            .ok_or(IdentityError::InvalidCredentials)?;

        if user.blocked {
            let reason = user
                .blocked_reason
                .clone()
                .unwrap_or_else(|| "No reason given".to_string());
            tracing::warn!(user_id = user.id, %reason, "Login attempt for blocked user");
            return Err(IdentityError::AccountBlocked(reason));
        }

        if !password::verify_password(plain_password, &user.password_hash)? {
            return Err(IdentityError::InvalidCredentials);
        }

        let token = crypto_core::jwt::generate_access_token(user.id, &user.email)?;

        Ok(AuthResponse {
            token,
            token_type: "Bearer".to_string(),
            user: UserView::from(user),
        })
    }

    pub async fn get_user(&self, user_id: i64) -> Result<UserView> {
        let user = self.require_user(user_id).await?;
        Ok(UserView::from(user))
    }

    pub async fn list_users(&self) -> Result<Vec<UserView>> {
        let users = user_repo::list_users(&self.pool).await?;
        Ok(users.into_iter().map(UserView::from).collect())
    }

    pub async fn user_exists(&self, user_id: i64) -> Result<bool> {
        Ok(user_repo::exists(&self.pool, user_id).await?)
    }

    /// Update a profile; only the account owner may do so.
    pub async fn update_profile(&self, user_id: i64, caller_id: i64, name: &str) -> Result<UserView> {
        if user_id != caller_id {
            return Err(IdentityError::Forbidden(
                "Not authorized to update this profile".to_string(),
            ));
        }
        self.require_user(user_id).await?;

        let user = user_repo::update_name(&self.pool, user_id, name).await?;
        Ok(UserView::from(user))
    }

    /// Block an account. Requires the acting user to hold the ADMIN role.
    ///
    /// Blocking an already-blocked account updates the recorded reason.
    pub async fn block_user(&self, target_user_id: i64, reason: &str, admin_id: i64) -> Result<()> {
        let admin = self.require_user(admin_id).await?;
        ensure_admin(&admin)?;

        let target = self.require_user(target_user_id).await?;
        if target.blocked {
            tracing::info!(target_user_id, "User already blocked; updating reason");
        }

        user_repo::block(&self.pool, target_user_id, reason, admin_id).await?;
        tracing::info!(target_user_id, admin_id, %reason, "User blocked by admin");
        Ok(())
    }

    /// Unblock an account. Requires the acting user to hold the ADMIN role.
    pub async fn unblock_user(&self, target_user_id: i64, admin_id: i64) -> Result<()> {
        let admin = self.require_user(admin_id).await?;
        ensure_admin(&admin)?;

        let target = self.require_user(target_user_id).await?;
        if !target.blocked {
            tracing::info!(target_user_id, "User already unblocked");
            return Ok(());
        }

        user_repo::unblock(&self.pool, target_user_id).await?;
        tracing::info!(target_user_id, admin_id, "User unblocked by admin");
        Ok(())
    }

    /// Whether the given user holds the ADMIN role.
    pub async fn is_admin(&self, user_id: i64) -> Result<bool> {
        let user = self.require_user(user_id).await?;
        Ok(user.role == Role::Admin)
    }

    async fn require_user(&self, user_id: i64) -> Result<User> {
        user_repo::find_by_id(&self.pool, user_id)
            .await?
            .ok_or_else(|| IdentityError::UserNotFound(format!("id {user_id}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn user_with_role(role: Role) -> User {
        User {
            id: 1,
            name: "Ada".into(),
            email: "ada@example.com".into(),
            password_hash: String::new(),
            role,
            blocked: false,
            blocked_reason: None,
            blocked_at: None,
            blocked_by_admin_id: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn admin_gate_rejects_plain_users() {
        let err = ensure_admin(&user_with_role(Role::User)).unwrap_err();
        assert!(matches!(err, IdentityError::Forbidden(_)));
    }

    #[test]
    fn admin_gate_accepts_admins() {
        assert!(ensure_admin(&user_with_role(Role::Admin)).is_ok());
    }
}
