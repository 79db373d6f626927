/// Internal endpoints - reachable only from trusted peers
///
/// The reaction-count setters are called by reaction-service's count
/// sync client and carry no user credential at all. The admin deletes
/// are called by reaction-service's orchestrator, which relays the
/// caller's original bearer token; that token is verified here before
/// anything is deleted.
use crate::error::{AppError, Result};
use crate::services::{CommentService, PostService};
use actix_web::http::header;
use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;

/// Body of the "set direct reaction count" endpoints.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactionCountUpdate {
    pub reaction_count: i64,
}

/// `PUT /internal/posts/{id}/reaction-count`
pub async fn set_post_reaction_count(
    service: web::Data<PostService>,
    post_id: web::Path<i64>,
    body: web::Json<ReactionCountUpdate>,
) -> Result<HttpResponse> {
    service
        .update_post_reaction_count(*post_id, body.reaction_count)
        .await?;
    Ok(HttpResponse::Ok().finish())
}

/// `PUT /internal/comments/{id}/reaction-count`
pub async fn set_comment_reaction_count(
    service: web::Data<CommentService>,
    comment_id: web::Path<i64>,
    body: web::Json<ReactionCountUpdate>,
) -> Result<HttpResponse> {
    service
        .update_comment_reaction_count(*comment_id, body.reaction_count)
        .await?;
    Ok(HttpResponse::Ok().finish())
}

/// Verify the relayed bearer token and return the acting admin's id.
fn admin_from_forwarded_token(req: &HttpRequest) -> Result<i64> {
    let auth = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Missing Authorization header".to_string()))?;

    let token = auth
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Unauthorized("Invalid Authorization scheme".to_string()))?;

    crypto_core::jwt::get_user_id_from_token(token)
        .map_err(|_| AppError::Unauthorized("Invalid or expired token".to_string()))
}

/// `DELETE /internal/admin/posts/{id}`
pub async fn admin_delete_post(
    service: web::Data<PostService>,
    post_id: web::Path<i64>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let admin_id = admin_from_forwarded_token(&req)?;
    service.delete_post_as_admin(*post_id, admin_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// `DELETE /internal/admin/comments/{id}`
pub async fn admin_delete_comment(
    service: web::Data<CommentService>,
    comment_id: web::Path<i64>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let admin_id = admin_from_forwarded_token(&req)?;
    service.delete_comment_as_admin(*comment_id, admin_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn count_update_accepts_camel_case() {
        let body: ReactionCountUpdate =
            serde_json::from_str(r#"{"reactionCount": 5}"#).unwrap();
        assert_eq!(body.reaction_count, 5);
    }

    #[test]
    fn missing_authorization_is_rejected() {
        let req = TestRequest::default().to_http_request();
        let err = admin_from_forwarded_token(&req).unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[test]
    fn non_bearer_authorization_is_rejected() {
        let req = TestRequest::default()
            .insert_header((header::AUTHORIZATION, "Basic dXNlcjpwdw=="))
            .to_http_request();
        let err = admin_from_forwarded_token(&req).unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }
}
