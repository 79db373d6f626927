/// Admin forwarding - gateway routes relayed to the admin orchestrator
///
/// Admin forwards are the one place the gateway both re-checks the
/// caller (the users table lives here, so the ADMIN role gate runs
/// before anything leaves this service) and relays the original bearer
/// token, so the services downstream can run their own checks against
/// it.
use crate::error::{IdentityError, Result};
use crate::forward::ReactionForwarder;
use crate::middleware::BearerToken;
use crate::services::UserService;
use actix_middleware::UserId;
use actix_web::{web, HttpResponse};
use reqwest::Method;

async fn ensure_admin_caller(users: &UserService, caller: i64) -> Result<()> {
    if !users.is_admin(caller).await? {
        return Err(IdentityError::Forbidden(format!(
            "User {caller} is not authorized to perform admin actions"
        )));
    }
    Ok(())
}

pub async fn delete_post(
    fwd: web::Data<ReactionForwarder>,
    users: web::Data<UserService>,
    admin: UserId,
    token: BearerToken,
    post_id: web::Path<i64>,
) -> Result<HttpResponse> {
    ensure_admin_caller(&users, admin.0).await?;
    tracing::info!(admin_id = admin.0, post_id = *post_id, "Forwarding admin post deletion");

    let path = format!("/api/v1/admin/posts/{post_id}");
    fwd.0
        .forward(Method::DELETE, &path, admin.0, Some(&token.0), None)
        .await
}

pub async fn delete_comment(
    fwd: web::Data<ReactionForwarder>,
    users: web::Data<UserService>,
    admin: UserId,
    token: BearerToken,
    comment_id: web::Path<i64>,
) -> Result<HttpResponse> {
    ensure_admin_caller(&users, admin.0).await?;
    tracing::info!(
        admin_id = admin.0,
        comment_id = *comment_id,
        "Forwarding admin comment deletion"
    );

    let path = format!("/api/v1/admin/comments/{comment_id}");
    fwd.0
        .forward(Method::DELETE, &path, admin.0, Some(&token.0), None)
        .await
}

pub async fn block_user(
    fwd: web::Data<ReactionForwarder>,
    users: web::Data<UserService>,
    admin: UserId,
    token: BearerToken,
    target_user_id: web::Path<i64>,
    body: web::Json<serde_json::Value>,
) -> Result<HttpResponse> {
    ensure_admin_caller(&users, admin.0).await?;
    tracing::info!(
        admin_id = admin.0,
        target_user_id = *target_user_id,
        "Forwarding admin user block"
    );

    let path = format!("/api/v1/admin/users/{target_user_id}/block");
    fwd.0
        .forward(Method::POST, &path, admin.0, Some(&token.0), Some(&body))
        .await
}

pub async fn unblock_user(
    fwd: web::Data<ReactionForwarder>,
    users: web::Data<UserService>,
    admin: UserId,
    token: BearerToken,
    target_user_id: web::Path<i64>,
) -> Result<HttpResponse> {
    ensure_admin_caller(&users, admin.0).await?;
    tracing::info!(
        admin_id = admin.0,
        target_user_id = *target_user_id,
        "Forwarding admin user unblock"
    );

    let path = format!("/api/v1/admin/users/{target_user_id}/unblock");
    fwd.0
        .forward(Method::POST, &path, admin.0, Some(&token.0), None)
        .await
}
