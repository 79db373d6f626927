/// Post forwarding - gateway routes relayed to content-service
use crate::error::Result;
use crate::forward::ContentForwarder;
use actix_middleware::UserId;
use actix_web::{web, HttpRequest, HttpResponse};
use reqwest::Method;

pub async fn create_post(
    fwd: web::Data<ContentForwarder>,
    user: UserId,
    body: web::Json<serde_json::Value>,
) -> Result<HttpResponse> {
    fwd.0
        .forward(Method::POST, "/api/v1/posts", user.0, None, Some(&body))
        .await
}

pub async fn list_posts(fwd: web::Data<ContentForwarder>, user: UserId) -> Result<HttpResponse> {
    fwd.0
        .forward(Method::GET, "/api/v1/posts", user.0, None, None)
        .await
}

pub async fn list_top_posts(
    fwd: web::Data<ContentForwarder>,
    user: UserId,
) -> Result<HttpResponse> {
    fwd.0
        .forward(Method::GET, "/api/v1/posts/top", user.0, None, None)
        .await
}

pub async fn search_posts(
    fwd: web::Data<ContentForwarder>,
    user: UserId,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let path = format!("/api/v1/posts/search?{}", req.query_string());
    fwd.0.forward(Method::GET, &path, user.0, None, None).await
}

pub async fn get_posts_by_hashtag(
    fwd: web::Data<ContentForwarder>,
    user: UserId,
    tag: web::Path<String>,
) -> Result<HttpResponse> {
    let path = format!("/api/v1/posts/hashtag/{tag}");
    fwd.0.forward(Method::GET, &path, user.0, None, None).await
}

pub async fn get_user_posts(
    fwd: web::Data<ContentForwarder>,
    user: UserId,
    user_id: web::Path<i64>,
) -> Result<HttpResponse> {
    let path = format!("/api/v1/posts/user/{user_id}");
    fwd.0.forward(Method::GET, &path, user.0, None, None).await
}

pub async fn get_post(
    fwd: web::Data<ContentForwarder>,
    user: UserId,
    post_id: web::Path<i64>,
) -> Result<HttpResponse> {
    let path = format!("/api/v1/posts/{post_id}");
    fwd.0.forward(Method::GET, &path, user.0, None, None).await
}

pub async fn update_post(
    fwd: web::Data<ContentForwarder>,
    user: UserId,
    post_id: web::Path<i64>,
    body: web::Json<serde_json::Value>,
) -> Result<HttpResponse> {
    let path = format!("/api/v1/posts/{post_id}");
    fwd.0
        .forward(Method::PUT, &path, user.0, None, Some(&body))
        .await
}

pub async fn delete_post(
    fwd: web::Data<ContentForwarder>,
    user: UserId,
    post_id: web::Path<i64>,
) -> Result<HttpResponse> {
    let path = format!("/api/v1/posts/{post_id}");
    fwd.0
        .forward(Method::DELETE, &path, user.0, None, None)
        .await
}

pub async fn create_comment(
    fwd: web::Data<ContentForwarder>,
    user: UserId,
    post_id: web::Path<i64>,
    body: web::Json<serde_json::Value>,
) -> Result<HttpResponse> {
    let path = format!("/api/v1/posts/{post_id}/comments");
    fwd.0
        .forward(Method::POST, &path, user.0, None, Some(&body))
        .await
}

pub async fn get_post_comments(
    fwd: web::Data<ContentForwarder>,
    user: UserId,
    post_id: web::Path<i64>,
) -> Result<HttpResponse> {
    let path = format!("/api/v1/posts/{post_id}/comments");
    fwd.0.forward(Method::GET, &path, user.0, None, None).await
}
