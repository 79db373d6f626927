/// Friend request service
///
/// Requests are unique per user pair (either direction): a new request
/// is refused while any previous one between the two users is pending
/// or accepted. A declined request may be retried.
use crate::db::friend_requests as fr_repo;
use crate::error::{IdentityError, Result};
use crate::models::{FriendRequest, FriendRequestStatus, FriendRequestView};
use crate::services::UserService;
use sqlx::PgPool;

#[derive(Clone)]
pub struct FriendRequestService {
    pool: PgPool,
    users: UserService,
}

/// Whether a new request between two users may be created, given the
/// state of any previous one.
pub fn may_send(previous: Option<FriendRequestStatus>) -> bool {
    !matches!(
        previous,
        Some(FriendRequestStatus::Pending) | Some(FriendRequestStatus::Accepted)
    )
}

/// Only pending requests can be answered.
pub fn may_answer(status: FriendRequestStatus) -> bool {
    status == FriendRequestStatus::Pending
}

impl FriendRequestService {
    pub fn new(pool: PgPool, users: UserService) -> Self {
        Self { pool, users }
    }

    pub async fn send(&self, sender_id: i64, receiver_id: i64) -> Result<FriendRequestView> {
        if sender_id == receiver_id {
            return Err(IdentityError::Validation(
                "Cannot send a friend request to yourself".to_string(),
            ));
        }
        if !self.users.user_exists(receiver_id).await? {
            return Err(IdentityError::UserNotFound(format!("id {receiver_id}")));
        }

        let previous = fr_repo::find_between(&self.pool, sender_id, receiver_id).await?;
        if !may_send(previous.map(|p| p.status)) {
            return Err(IdentityError::Conflict(
                "A friend request between these users already exists".to_string(),
            ));
        }

        let request = fr_repo::create(&self.pool, sender_id, receiver_id).await?;
        tracing::info!(sender_id, receiver_id, request_id = request.id, "Friend request sent");
        Ok(FriendRequestView::from(request))
    }

    pub async fn accept(&self, request_id: i64, caller_id: i64) -> Result<FriendRequestView> {
        let request = self.answerable_request(request_id, caller_id).await?;
        let updated =
            fr_repo::set_status(&self.pool, request.id, FriendRequestStatus::Accepted).await?;
        tracing::info!(request_id, caller_id, "Friend request accepted");
        Ok(FriendRequestView::from(updated))
    }

    pub async fn decline(&self, request_id: i64, caller_id: i64) -> Result<FriendRequestView> {
        let request = self.answerable_request(request_id, caller_id).await?;
        let updated =
            fr_repo::set_status(&self.pool, request.id, FriendRequestStatus::Declined).await?;
        tracing::info!(request_id, caller_id, "Friend request declined");
        Ok(FriendRequestView::from(updated))
    }

    pub async fn pending_for(&self, receiver_id: i64) -> Result<Vec<FriendRequestView>> {
        let requests = fr_repo::list_pending_for_receiver(&self.pool, receiver_id).await?;
        Ok(requests.into_iter().map(FriendRequestView::from).collect())
    }

    pub async fn sent_by(&self, sender_id: i64) -> Result<Vec<FriendRequestView>> {
        let requests = fr_repo::list_sent_by(&self.pool, sender_id).await?;
        Ok(requests.into_iter().map(FriendRequestView::from).collect())
    }

    async fn answerable_request(&self, request_id: i64, caller_id: i64) -> Result<FriendRequest> {
        let request = fr_repo::find_by_id(&self.pool, request_id)
            .await?
            .ok_or_else(|| IdentityError::NotFound(format!("Friend request {request_id}")))?;

        if request.receiver_id != caller_id {
            return Err(IdentityError::Forbidden(
                "Only the receiver may answer a friend request".to_string(),
            ));
        }
        if !may_answer(request.status) {
            return Err(IdentityError::Conflict(
                "Friend request was already answered".to_string(),
            ));
        }

        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sending_blocked_while_pending_or_accepted() {
        assert!(may_send(None));
        assert!(may_send(Some(FriendRequestStatus::Declined)));
        assert!(!may_send(Some(FriendRequestStatus::Pending)));
        assert!(!may_send(Some(FriendRequestStatus::Accepted)));
    }

    #[test]
    fn only_pending_requests_can_be_answered() {
        assert!(may_answer(FriendRequestStatus::Pending));
        assert!(!may_answer(FriendRequestStatus::Accepted));
        assert!(!may_answer(FriendRequestStatus::Declined));
    }
}
