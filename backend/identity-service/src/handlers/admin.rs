/// Internal admin endpoints - block and unblock accounts
///
/// These are the final hop of the orchestrated block/unblock flow:
/// client -> gateway -> reaction-service orchestrator -> here. The
/// orchestrator relays the caller's original bearer token in the
/// standard `Authorization` header; it is verified here and the role
/// check runs against the users table this service owns.
///
/// Responses are human-readable strings, echoed verbatim into the
/// orchestrator's confirmation message.
use crate::error::{IdentityError, Result};
use crate::services::UserService;
use actix_web::http::header;
use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockUserRequest {
    pub reason: String,
}

/// Verify the relayed bearer token and return the acting admin's id.
fn admin_from_forwarded_token(req: &HttpRequest) -> Result<i64> {
    let auth = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| {
            IdentityError::Unauthorized("Missing Authorization header".to_string())
        })?;

    let token = auth
        .strip_prefix("Bearer ")
        .ok_or_else(|| IdentityError::Unauthorized("Invalid Authorization scheme".to_string()))?;

    crypto_core::jwt::get_user_id_from_token(token).map_err(|_| IdentityError::InvalidToken)
}

/// `POST /internal/admin/users/{id}/block`
pub async fn block_user(
    service: web::Data<UserService>,
    target_user_id: web::Path<i64>,
    body: web::Json<BlockUserRequest>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let admin_id = admin_from_forwarded_token(&req)?;

    service
        .block_user(*target_user_id, &body.reason, admin_id)
        .await?;

    Ok(HttpResponse::Ok().body(format!(
        "User {} blocked successfully. Reason: {}",
        *target_user_id, body.reason
    )))
}

/// `POST /internal/admin/users/{id}/unblock`
pub async fn unblock_user(
    service: web::Data<UserService>,
    target_user_id: web::Path<i64>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let admin_id = admin_from_forwarded_token(&req)?;

    service.unblock_user(*target_user_id, admin_id).await?;

    Ok(HttpResponse::Ok().body(format!("User {} unblocked successfully.", *target_user_id)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn missing_authorization_is_rejected() {
        let req = TestRequest::default().to_http_request();
        let err = admin_from_forwarded_token(&req).unwrap_err();
        assert!(matches!(err, IdentityError::Unauthorized(_)));
    }

    #[test]
    fn non_bearer_scheme_is_rejected() {
        let req = TestRequest::default()
            .insert_header((header::AUTHORIZATION, "Token abc"))
            .to_http_request();
        let err = admin_from_forwarded_token(&req).unwrap_err();
        assert!(matches!(err, IdentityError::Unauthorized(_)));
    }
}
