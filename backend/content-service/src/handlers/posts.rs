/// Post handlers - HTTP endpoints for post operations
use crate::error::Result;
use crate::services::PostService;
use actix_middleware::UserId;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    #[validate(length(min = 1, max = 5000))]
    pub content: String,
    #[serde(default)]
    pub hashtags: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: String,
}

pub async fn create_post(
    service: web::Data<PostService>,
    user_id: UserId,
    req: web::Json<CreatePostRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    let post = service
        .create_post(user_id.0, &req.content, &req.hashtags)
        .await?;
    Ok(HttpResponse::Created().json(post))
}

pub async fn get_post(
    service: web::Data<PostService>,
    post_id: web::Path<i64>,
) -> Result<HttpResponse> {
    let post = service.get_post(*post_id).await?;
    Ok(HttpResponse::Ok().json(post))
}

pub async fn update_post(
    service: web::Data<PostService>,
    user_id: UserId,
    post_id: web::Path<i64>,
    req: web::Json<CreatePostRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    let post = service
        .update_post(*post_id, user_id.0, &req.content, &req.hashtags)
        .await?;
    Ok(HttpResponse::Ok().json(post))
}

pub async fn delete_post(
    service: web::Data<PostService>,
    user_id: UserId,
    post_id: web::Path<i64>,
) -> Result<HttpResponse> {
    service.delete_post(*post_id, user_id.0).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// All posts, newest first
pub async fn list_posts(service: web::Data<PostService>) -> Result<HttpResponse> {
    let posts = service.list_recent().await?;
    Ok(HttpResponse::Ok().json(posts))
}

/// All posts, most reacted first
pub async fn list_top_posts(service: web::Data<PostService>) -> Result<HttpResponse> {
    let posts = service.list_top().await?;
    Ok(HttpResponse::Ok().json(posts))
}

pub async fn get_user_posts(
    service: web::Data<PostService>,
    user_id: web::Path<i64>,
) -> Result<HttpResponse> {
    let posts = service.list_by_user(*user_id).await?;
    Ok(HttpResponse::Ok().json(posts))
}

pub async fn search_posts(
    service: web::Data<PostService>,
    query: web::Query<SearchQuery>,
) -> Result<HttpResponse> {
    let posts = service.search(&query.q).await?;
    Ok(HttpResponse::Ok().json(posts))
}

pub async fn get_posts_by_hashtag(
    service: web::Data<PostService>,
    tag: web::Path<String>,
) -> Result<HttpResponse> {
    let posts = service.list_by_hashtags(&[tag.into_inner()]).await?;
    Ok(HttpResponse::Ok().json(posts))
}
