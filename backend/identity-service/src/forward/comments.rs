/// Comment forwarding - gateway routes relayed to content-service
use crate::error::Result;
use crate::forward::ContentForwarder;
use actix_middleware::UserId;
use actix_web::{web, HttpResponse};
use reqwest::Method;

pub async fn update_comment(
    fwd: web::Data<ContentForwarder>,
    user: UserId,
    comment_id: web::Path<i64>,
    body: web::Json<serde_json::Value>,
) -> Result<HttpResponse> {
    let path = format!("/api/v1/comments/{comment_id}");
    fwd.0
        .forward(Method::PUT, &path, user.0, None, Some(&body))
        .await
}

pub async fn delete_comment(
    fwd: web::Data<ContentForwarder>,
    user: UserId,
    comment_id: web::Path<i64>,
) -> Result<HttpResponse> {
    let path = format!("/api/v1/comments/{comment_id}");
    fwd.0
        .forward(Method::DELETE, &path, user.0, None, None)
        .await
}
