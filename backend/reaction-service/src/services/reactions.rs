/// Reaction toggle engine
///
/// Reacting to a target follows toggle semantics: a first reaction
/// creates a row, repeating the same kind removes it, and a different
/// kind replaces it in place. Every successful mutation recounts the
/// target and pushes the new count to content-service before returning;
/// the push is best-effort (§ count_sync) and never rolls back the local
/// write.
use crate::db::reaction_repo;
use crate::error::{AppError, Result};
use crate::models::{ReactionInput, ReactionKind, ReactionView, TargetKind};
use crate::services::CountSyncClient;
use sqlx::PgPool;

#[derive(Clone)]
pub struct ReactionService {
    pool: PgPool,
    counts: CountSyncClient,
}

/// What a toggle application does to the stored row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleAction {
    Create,
    Replace,
    Remove,
}

/// Toggle decision table, kept free of I/O.
pub fn decide(existing: Option<ReactionKind>, incoming: ReactionKind) -> ToggleAction {
    match existing {
        None => ToggleAction::Create,
        Some(current) if current == incoming => ToggleAction::Remove,
        Some(_) => ToggleAction::Replace,
    }
}

impl ReactionService {
    pub fn new(pool: PgPool, counts: CountSyncClient) -> Self {
        Self { pool, counts }
    }

    /// Apply a reaction with toggle semantics.
    ///
    /// Returns the surviving reaction, or `None` when the toggle removed
    /// it (the caller answers with an empty 200 in that case).
    pub async fn apply_reaction(
        &self,
        user_id: i64,
        input: &ReactionInput,
    ) -> Result<Option<ReactionView>> {
        let existing =
            reaction_repo::find_reaction(&self.pool, user_id, input.target_id, input.target_type)
                .await?;

        let action = decide(existing.map(|r| r.reaction_type), input.reaction_type);

        let view = match action {
            ToggleAction::Remove => {
                reaction_repo::delete_reaction(
                    &self.pool,
                    user_id,
                    input.target_id,
                    input.target_type,
                )
                .await?;
                None
            }
            ToggleAction::Create | ToggleAction::Replace => {
                let saved = reaction_repo::upsert_reaction(
                    &self.pool,
                    user_id,
                    input.target_id,
                    input.target_type,
                    input.reaction_type,
                )
                .await?;
                Some(ReactionView::from(saved))
            }
        };

        self.recount_and_push(input.target_id, input.target_type)
            .await?;

        Ok(view)
    }

    /// Explicitly remove a user's reaction; `NotFound` if none exists.
    pub async fn remove_reaction(
        &self,
        user_id: i64,
        target_id: i64,
        target_type: TargetKind,
    ) -> Result<()> {
        let removed =
            reaction_repo::delete_reaction(&self.pool, user_id, target_id, target_type).await?;
        if removed == 0 {
            return Err(AppError::NotFound(format!(
                "No reaction by user {user_id} on {target_type} {target_id}"
            )));
        }

        self.recount_and_push(target_id, target_type).await?;
        Ok(())
    }

    /// Unconditional bulk delete after the target itself was destroyed.
    ///
    /// Does not push a count: the owning resource no longer exists.
    pub async fn delete_all_for_target(&self, target_id: i64, target_type: TargetKind) -> Result<u64> {
        let removed =
            reaction_repo::delete_all_for_target(&self.pool, target_id, target_type).await?;
        tracing::info!(%target_type, target_id, removed, "Deleted all reactions for target");
        Ok(removed)
    }

    pub async fn reactions_for_target(
        &self,
        target_id: i64,
        target_type: TargetKind,
    ) -> Result<Vec<ReactionView>> {
        let reactions =
            reaction_repo::list_for_target(&self.pool, target_id, target_type).await?;
        Ok(reactions.into_iter().map(ReactionView::from).collect())
    }

    pub async fn count_for_target(&self, target_id: i64, target_type: TargetKind) -> Result<i64> {
        Ok(reaction_repo::count_for_target(&self.pool, target_id, target_type).await?)
    }

    /// Local persist happened; recount and push before reporting success.
    async fn recount_and_push(&self, target_id: i64, target_type: TargetKind) -> Result<()> {
        let count = reaction_repo::count_for_target(&self.pool, target_id, target_type).await?;
        self.counts.push_count(target_id, target_type, count).await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_reaction_creates() {
        assert_eq!(decide(None, ReactionKind::Like), ToggleAction::Create);
    }

    #[test]
    fn repeating_same_kind_removes() {
        assert_eq!(
            decide(Some(ReactionKind::Like), ReactionKind::Like),
            ToggleAction::Remove
        );
        assert_eq!(
            decide(Some(ReactionKind::Angry), ReactionKind::Angry),
            ToggleAction::Remove
        );
    }

    #[test]
    fn differing_kind_replaces() {
        assert_eq!(
            decide(Some(ReactionKind::Like), ReactionKind::Love),
            ToggleAction::Replace
        );
        assert_eq!(
            decide(Some(ReactionKind::Sad), ReactionKind::Wow),
            ToggleAction::Replace
        );
    }

    #[test]
    fn opposite_pair_cancels_out() {
        // apply twice with the same kind: create then remove
        let after_first = decide(None, ReactionKind::Haha);
        assert_eq!(after_first, ToggleAction::Create);
        let after_second = decide(Some(ReactionKind::Haha), ReactionKind::Haha);
        assert_eq!(after_second, ToggleAction::Remove);
    }
}
