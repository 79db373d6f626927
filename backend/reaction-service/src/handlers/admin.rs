/// Admin handlers - entry points of the orchestrated admin actions
///
/// The gateway forwards these with both trusted headers set. `UserId`
/// rejects requests without the acting admin's id; the orchestrator
/// itself refuses to run without the relayed bearer token, so both
/// identity requirements fail before any network call.
use crate::error::Result;
use crate::services::AdminService;
use actix_middleware::{ForwardedAuth, UserId};
use actix_web::{web, HttpResponse};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockUserRequest {
    pub reason: String,
}

pub async fn admin_delete_post(
    service: web::Data<AdminService>,
    admin: UserId,
    auth: ForwardedAuth,
    post_id: web::Path<i64>,
) -> Result<HttpResponse> {
    let confirmation = service
        .delete_post_as_admin(admin.0, *post_id, auth.0.as_deref())
        .await?;
    Ok(HttpResponse::Ok().json(confirmation))
}

pub async fn admin_delete_comment(
    service: web::Data<AdminService>,
    admin: UserId,
    auth: ForwardedAuth,
    comment_id: web::Path<i64>,
) -> Result<HttpResponse> {
    let confirmation = service
        .delete_comment_as_admin(admin.0, *comment_id, auth.0.as_deref())
        .await?;
    Ok(HttpResponse::Ok().json(confirmation))
}

pub async fn admin_block_user(
    service: web::Data<AdminService>,
    admin: UserId,
    auth: ForwardedAuth,
    target_user_id: web::Path<i64>,
    body: web::Json<BlockUserRequest>,
) -> Result<HttpResponse> {
    let confirmation = service
        .block_user(admin.0, *target_user_id, &body.reason, auth.0.as_deref())
        .await?;
    Ok(HttpResponse::Ok().json(confirmation))
}

pub async fn admin_unblock_user(
    service: web::Data<AdminService>,
    admin: UserId,
    auth: ForwardedAuth,
    target_user_id: web::Path<i64>,
) -> Result<HttpResponse> {
    let confirmation = service
        .unblock_user(admin.0, *target_user_id, auth.0.as_deref())
        .await?;
    Ok(HttpResponse::Ok().json(confirmation))
}
