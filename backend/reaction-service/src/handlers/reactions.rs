/// Reaction handlers - HTTP endpoints for the public reaction API
///
/// All routes sit behind the trusted-identity filter; the acting user is
/// whoever the gateway put in `X-User-ID`.
use crate::error::Result;
use crate::models::{ReactionInput, TargetKind};
use crate::services::ReactionService;
use actix_middleware::UserId;
use actix_web::{web, HttpResponse};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveReactionQuery {
    pub target_id: i64,
    pub target_type: TargetKind,
}

/// Apply a reaction with toggle semantics.
///
/// 201 with the reaction view when a row survives, empty 200 when the
/// toggle removed it.
pub async fn apply_reaction(
    service: web::Data<ReactionService>,
    user_id: UserId,
    input: web::Json<ReactionInput>,
) -> Result<HttpResponse> {
    match service.apply_reaction(user_id.0, &input).await? {
        Some(view) => Ok(HttpResponse::Created().json(view)),
        None => Ok(HttpResponse::Ok().finish()),
    }
}

/// Explicitly remove the caller's reaction on a target.
pub async fn remove_reaction(
    service: web::Data<ReactionService>,
    user_id: UserId,
    query: web::Query<RemoveReactionQuery>,
) -> Result<HttpResponse> {
    service
        .remove_reaction(user_id.0, query.target_id, query.target_type)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// List reactions on a target.
pub async fn get_reactions_for_target(
    service: web::Data<ReactionService>,
    path: web::Path<(TargetKind, i64)>,
) -> Result<HttpResponse> {
    let (target_type, target_id) = path.into_inner();
    let reactions = service.reactions_for_target(target_id, target_type).await?;
    Ok(HttpResponse::Ok().json(reactions))
}

/// Count reactions on a target.
pub async fn get_reaction_count_for_target(
    service: web::Data<ReactionService>,
    path: web::Path<(TargetKind, i64)>,
) -> Result<HttpResponse> {
    let (target_type, target_id) = path.into_inner();
    let count = service.count_for_target(target_id, target_type).await?;
    Ok(HttpResponse::Ok().json(count))
}
