/// Admin orchestrator - cross-service admin actions
///
/// Each action is an ordered pair of steps with no shared transaction:
/// mutate the service that owns the resource first, then clean up
/// dependent local state. If the remote step fails, the local step never
/// runs, so no reactions are dropped for a post that still exists. The
/// block/unblock actions have no local step at all.
///
/// The orchestrator never mints a credential of its own: it relays the
/// caller's original bearer token so the downstream service can apply
/// its own authorization check.
use crate::error::{AppError, Result};
use crate::models::{AdminActionConfirmation, TargetKind};
use crate::services::ReactionService;
use reqwest::header::AUTHORIZATION;
use reqwest::Client;
use serde::Serialize;

#[derive(Clone)]
pub struct AdminService {
    http: Client,
    reactions: ReactionService,
    content_base_url: String,
    identity_base_url: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockUserBody<'a> {
    pub reason: &'a str,
}

/// Require a relayed `Bearer` token before any network call is made.
fn require_bearer(forwarded_auth: Option<&str>) -> Result<String> {
    match forwarded_auth {
        Some(value) if value.starts_with("Bearer ") => Ok(value.to_string()),
        Some(_) => Err(AppError::Unauthorized(
            "Forwarded authorization is not a Bearer token".to_string(),
        )),
        None => Err(AppError::Unauthorized(
            "Original authorization header was not forwarded".to_string(),
        )),
    }
}

impl AdminService {
    pub fn new(
        http: Client,
        reactions: ReactionService,
        content_base_url: impl Into<String>,
        identity_base_url: impl Into<String>,
    ) -> Self {
        Self {
            http,
            reactions,
            content_base_url: content_base_url.into().trim_end_matches('/').to_string(),
            identity_base_url: identity_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn content_admin_url(&self, kind: TargetKind, id: i64) -> String {
        match kind {
            TargetKind::Post => format!("{}/internal/admin/posts/{}", self.content_base_url, id),
            TargetKind::Comment => {
                format!("{}/internal/admin/comments/{}", self.content_base_url, id)
            }
        }
    }

    fn identity_admin_url(&self, user_id: i64, action: &str) -> String {
        format!(
            "{}/internal/admin/users/{}/{}",
            self.identity_base_url, user_id, action
        )
    }

    /// Delete a post in content-service, then clean up its reactions here.
    pub async fn delete_post_as_admin(
        &self,
        admin_id: i64,
        post_id: i64,
        forwarded_auth: Option<&str>,
    ) -> Result<AdminActionConfirmation> {
        self.delete_target_as_admin(admin_id, post_id, TargetKind::Post, forwarded_auth)
            .await
    }

    /// Delete a comment in content-service, then clean up its reactions here.
    pub async fn delete_comment_as_admin(
        &self,
        admin_id: i64,
        comment_id: i64,
        forwarded_auth: Option<&str>,
    ) -> Result<AdminActionConfirmation> {
        self.delete_target_as_admin(admin_id, comment_id, TargetKind::Comment, forwarded_auth)
            .await
    }

    async fn delete_target_as_admin(
        &self,
        admin_id: i64,
        target_id: i64,
        kind: TargetKind,
        forwarded_auth: Option<&str>,
    ) -> Result<AdminActionConfirmation> {
        let auth = require_bearer(forwarded_auth)?;
        let url = self.content_admin_url(kind, target_id);

        tracing::info!(admin_id, %kind, target_id, %url, "Admin requesting deletion from content-service");

        let resp = self
            .http
            .delete(&url)
            .header(AUTHORIZATION, auth)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(%kind, target_id, error = %e, "Could not reach content-service for admin delete");
                AppError::UpstreamUnavailable(format!(
                    "Could not connect to content service to delete {kind}: {e}"
                ))
            })?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            tracing::error!(%kind, target_id, %status, %body, "Content-service rejected admin delete");
            return Err(AppError::UpstreamUnavailable(format!(
                "Failed to delete {kind} in content service: {status} ({body})"
            )));
        }

        tracing::info!(%kind, target_id, "Target deleted in content-service by admin");

        // The target is gone upstream; now drop the dependent rows we own.
        self.reactions.delete_all_for_target(target_id, kind).await?;

        let (message, action) = match kind {
            TargetKind::Post => (
                "Post and associated reactions deleted successfully by admin.",
                "DELETE_POST",
            ),
            TargetKind::Comment => (
                "Comment and associated reactions deleted successfully by admin.",
                "DELETE_COMMENT",
            ),
        };

        Ok(AdminActionConfirmation {
            message: message.to_string(),
            target_id,
            action: action.to_string(),
        })
    }

    /// Block a user via identity-service. No local state changes.
    pub async fn block_user(
        &self,
        admin_id: i64,
        target_user_id: i64,
        reason: &str,
        forwarded_auth: Option<&str>,
    ) -> Result<AdminActionConfirmation> {
        let auth = require_bearer(forwarded_auth)?;
        let url = self.identity_admin_url(target_user_id, "block");

        tracing::info!(admin_id, target_user_id, %url, "Admin requesting user block via identity-service");

        let resp = self
            .http
            .post(&url)
            .header(AUTHORIZATION, auth)
            .json(&BlockUserBody { reason })
            .send()
            .await
            .map_err(|e| {
                AppError::UpstreamUnavailable(format!(
                    "Could not connect to identity service to block user: {e}"
                ))
            })?;

        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        if !status.is_success() {
            tracing::error!(target_user_id, %status, %body, "Identity-service rejected user block");
            return Err(AppError::UpstreamUnavailable(format!(
                "Failed to block user in identity service: {status} ({body})"
            )));
        }

        Ok(AdminActionConfirmation {
            message: body,
            target_id: target_user_id,
            action: "BLOCK_USER".to_string(),
        })
    }

    /// Unblock a user via identity-service. No local state changes.
    pub async fn unblock_user(
        &self,
        admin_id: i64,
        target_user_id: i64,
        forwarded_auth: Option<&str>,
    ) -> Result<AdminActionConfirmation> {
        let auth = require_bearer(forwarded_auth)?;
        let url = self.identity_admin_url(target_user_id, "unblock");

        tracing::info!(admin_id, target_user_id, %url, "Admin requesting user unblock via identity-service");

        let resp = self
            .http
            .post(&url)
            .header(AUTHORIZATION, auth)
            .send()
            .await
            .map_err(|e| {
                AppError::UpstreamUnavailable(format!(
                    "Could not connect to identity service to unblock user: {e}"
                ))
            })?;

        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        if !status.is_success() {
            tracing::error!(target_user_id, %status, %body, "Identity-service rejected user unblock");
            return Err(AppError::UpstreamUnavailable(format!(
                "Failed to unblock user in identity service: {status} ({body})"
            )));
        }

        Ok(AdminActionConfirmation {
            message: body,
            target_id: target_user_id,
            action: "UNBLOCK_USER".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::CountSyncClient;
    use sqlx::PgPool;

    fn service() -> AdminService {
        // connect_lazy: no database is touched unless a query runs
        let pool = PgPool::connect_lazy("postgres://localhost/test").unwrap();
        let reactions =
            ReactionService::new(pool, CountSyncClient::new(Client::new(), "http://content:8082"));
        AdminService::new(
            Client::new(),
            reactions,
            "http://content:8082/",
            "http://identity:8081",
        )
    }

    #[tokio::test]
    async fn builds_content_admin_urls() {
        let svc = service();
        assert_eq!(
            svc.content_admin_url(TargetKind::Post, 42),
            "http://content:8082/internal/admin/posts/42"
        );
        assert_eq!(
            svc.content_admin_url(TargetKind::Comment, 9),
            "http://content:8082/internal/admin/comments/9"
        );
    }

    #[tokio::test]
    async fn builds_identity_admin_urls() {
        let svc = service();
        assert_eq!(
            svc.identity_admin_url(7, "block"),
            "http://identity:8081/internal/admin/users/7/block"
        );
        assert_eq!(
            svc.identity_admin_url(7, "unblock"),
            "http://identity:8081/internal/admin/users/7/unblock"
        );
    }

    #[tokio::test]
    async fn missing_forwarded_auth_fails_before_any_network_call() {
        let svc = service();

        let err = svc.delete_post_as_admin(1, 42, None).await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));

        let err = svc
            .block_user(1, 7, "spam", Some("Basic dXNlcjpwdw=="))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[test]
    fn accepts_bearer_tokens_only() {
        assert!(require_bearer(Some("Bearer abc.def.ghi")).is_ok());

        let err = require_bearer(Some("Basic dXNlcjpwdw==")).unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));

        let err = require_bearer(None).unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[test]
    fn block_body_wire_shape() {
        let body = BlockUserBody { reason: "spam" };
        assert_eq!(serde_json::to_string(&body).unwrap(), r#"{"reason":"spam"}"#);
    }
}
