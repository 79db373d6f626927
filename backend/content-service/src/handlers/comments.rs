/// Comment handlers - HTTP endpoints for comment operations
use crate::error::Result;
use crate::services::CommentService;
use actix_middleware::UserId;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CommentRequest {
    #[validate(length(min = 1, max = 2000))]
    pub content: String,
}

pub async fn create_comment(
    service: web::Data<CommentService>,
    user_id: UserId,
    post_id: web::Path<i64>,
    req: web::Json<CommentRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    let comment = service
        .create_comment(*post_id, user_id.0, &req.content)
        .await?;
    Ok(HttpResponse::Created().json(comment))
}

pub async fn get_post_comments(
    service: web::Data<CommentService>,
    post_id: web::Path<i64>,
) -> Result<HttpResponse> {
    let comments = service.comments_for_post(*post_id).await?;
    Ok(HttpResponse::Ok().json(comments))
}

pub async fn update_comment(
    service: web::Data<CommentService>,
    user_id: UserId,
    comment_id: web::Path<i64>,
    req: web::Json<CommentRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    let comment = service
        .update_comment(*comment_id, user_id.0, &req.content)
        .await?;
    Ok(HttpResponse::Ok().json(comment))
}

pub async fn delete_comment(
    service: web::Data<CommentService>,
    user_id: UserId,
    comment_id: web::Path<i64>,
) -> Result<HttpResponse> {
    service.delete_comment(*comment_id, user_id.0).await?;
    Ok(HttpResponse::NoContent().finish())
}
