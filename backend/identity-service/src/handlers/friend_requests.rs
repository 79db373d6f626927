/// Friend request handlers
use crate::error::Result;
use crate::services::FriendRequestService;
use actix_middleware::UserId;
use actix_web::{web, HttpResponse};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendFriendRequest {
    pub receiver_id: i64,
}

pub async fn send(
    service: web::Data<FriendRequestService>,
    caller: UserId,
    req: web::Json<SendFriendRequest>,
) -> Result<HttpResponse> {
    let request = service.send(caller.0, req.receiver_id).await?;
    Ok(HttpResponse::Created().json(request))
}

pub async fn accept(
    service: web::Data<FriendRequestService>,
    caller: UserId,
    request_id: web::Path<i64>,
) -> Result<HttpResponse> {
    let request = service.accept(*request_id, caller.0).await?;
    Ok(HttpResponse::Ok().json(request))
}

pub async fn decline(
    service: web::Data<FriendRequestService>,
    caller: UserId,
    request_id: web::Path<i64>,
) -> Result<HttpResponse> {
    let request = service.decline(*request_id, caller.0).await?;
    Ok(HttpResponse::Ok().json(request))
}

/// Pending requests addressed to the caller
pub async fn pending(
    service: web::Data<FriendRequestService>,
    caller: UserId,
) -> Result<HttpResponse> {
    let requests = service.pending_for(caller.0).await?;
    Ok(HttpResponse::Ok().json(requests))
}

/// Requests the caller has sent
pub async fn sent(
    service: web::Data<FriendRequestService>,
    caller: UserId,
) -> Result<HttpResponse> {
    let requests = service.sent_by(caller.0).await?;
    Ok(HttpResponse::Ok().json(requests))
}
