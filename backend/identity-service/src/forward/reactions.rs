/// Reaction forwarding - gateway routes relayed to reaction-service
use crate::error::Result;
use crate::forward::ReactionForwarder;
use actix_middleware::UserId;
use actix_web::{web, HttpRequest, HttpResponse};
use reqwest::Method;

pub async fn apply_reaction(
    fwd: web::Data<ReactionForwarder>,
    user: UserId,
    body: web::Json<serde_json::Value>,
) -> Result<HttpResponse> {
    fwd.0
        .forward(Method::POST, "/api/v1/reactions", user.0, None, Some(&body))
        .await
}

pub async fn remove_reaction(
    fwd: web::Data<ReactionForwarder>,
    user: UserId,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let path = format!("/api/v1/reactions?{}", req.query_string());
    fwd.0
        .forward(Method::DELETE, &path, user.0, None, None)
        .await
}

pub async fn get_reactions_for_target(
    fwd: web::Data<ReactionForwarder>,
    user: UserId,
    path: web::Path<(String, i64)>,
) -> Result<HttpResponse> {
    let (target_type, target_id) = path.into_inner();
    let path = format!("/api/v1/reactions/target/{target_type}/{target_id}");
    fwd.0.forward(Method::GET, &path, user.0, None, None).await
}

pub async fn get_reaction_count_for_target(
    fwd: web::Data<ReactionForwarder>,
    user: UserId,
    path: web::Path<(String, i64)>,
) -> Result<HttpResponse> {
    let (target_type, target_id) = path.into_inner();
    let path = format!("/api/v1/reactions/target/{target_type}/{target_id}/count");
    fwd.0.forward(Method::GET, &path, user.0, None, None).await
}
