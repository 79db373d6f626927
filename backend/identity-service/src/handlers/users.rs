/// User handlers - profile endpoints behind edge authentication
use crate::error::Result;
use crate::services::UserService;
use actix_middleware::UserId;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
}

pub async fn list_users(service: web::Data<UserService>) -> Result<HttpResponse> {
    let users = service.list_users().await?;
    Ok(HttpResponse::Ok().json(users))
}

pub async fn get_user(
    service: web::Data<UserService>,
    user_id: web::Path<i64>,
) -> Result<HttpResponse> {
    let user = service.get_user(*user_id).await?;
    Ok(HttpResponse::Ok().json(user))
}

pub async fn get_me(service: web::Data<UserService>, caller: UserId) -> Result<HttpResponse> {
    let user = service.get_user(caller.0).await?;
    Ok(HttpResponse::Ok().json(user))
}

pub async fn update_profile(
    service: web::Data<UserService>,
    caller: UserId,
    user_id: web::Path<i64>,
    req: web::Json<UpdateProfileRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    let user = service.update_profile(*user_id, caller.0, &req.name).await?;
    Ok(HttpResponse::Ok().json(user))
}
