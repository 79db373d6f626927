/// Post service - post management and the aggregate rollup calculator
///
/// A post's stored `reaction_count` is a cache of
/// direct reactions + Σ(child comment counts). Two paths refresh it:
///
/// - `update_post_reaction_count`: reaction-service pushed a fresh direct
///   count; combine it with the stored comment counts and persist.
/// - `recalculate_aggregate`: something about the children changed; read
///   the direct count back from reaction-service, sum the children,
///   persist. A missing post fails with NotFound so racing deletions
///   stay observable to the caller (which logs and continues).
use crate::db::{comment_repo, hashtag_repo, post_repo};
use crate::error::{AppError, Result};
use crate::models::{Post, PostView};
use crate::services::ReactionCountClient;
use sqlx::PgPool;

#[derive(Clone)]
pub struct PostService {
    pool: PgPool,
    reaction_counts: ReactionCountClient,
}

/// Combine a direct count with child comment counts.
pub fn aggregate_total(direct: i64, comment_counts: &[i64]) -> i64 {
    direct + comment_counts.iter().sum::<i64>()
}

/// Normalize raw hashtag inputs: strip leading `#`, trim, lowercase,
/// drop empties and over-long names, dedupe preserving order.
pub fn normalize_hashtags(raw: &[String]) -> Vec<String> {
    let mut seen = Vec::new();
    for tag in raw {
        let name = tag.trim().trim_start_matches('#').trim().to_lowercase();
        if name.is_empty() || name.len() > 100 {
            tracing::warn!(tag = %tag, "Skipping invalid hashtag");
            continue;
        }
        if !seen.contains(&name) {
            seen.push(name);
        }
    }
    seen
}

impl PostService {
    pub fn new(pool: PgPool, reaction_counts: ReactionCountClient) -> Self {
        Self {
            pool,
            reaction_counts,
        }
    }

    pub async fn create_post(
        &self,
        user_id: i64,
        content: &str,
        hashtags: &[String],
    ) -> Result<PostView> {
        let post = post_repo::create_post(&self.pool, user_id, content).await?;
        let names = self.attach_hashtags(post.id, hashtags).await?;
        Ok(PostView::from_post(post, names))
    }

    pub async fn update_post(
        &self,
        post_id: i64,
        user_id: i64,
        content: &str,
        hashtags: &[String],
    ) -> Result<PostView> {
        let post = self.require_post(post_id).await?;
        if post.user_id != user_id {
            return Err(AppError::Forbidden(
                "Not authorized to update this post".to_string(),
            ));
        }

        let updated = post_repo::update_post_content(&self.pool, post_id, content).await?;
        hashtag_repo::clear_post(&self.pool, post_id).await?;
        let names = self.attach_hashtags(post_id, hashtags).await?;
        Ok(PostView::from_post(updated, names))
    }

    pub async fn delete_post(&self, post_id: i64, user_id: i64) -> Result<()> {
        let post = self.require_post(post_id).await?;
        if post.user_id != user_id {
            return Err(AppError::Forbidden(
                "Not authorized to delete this post".to_string(),
            ));
        }

        post_repo::delete_post(&self.pool, post_id).await?;
        tracing::info!(user_id, post_id, "User deleted post");
        Ok(())
    }

    /// Admin deletion skips the ownership check; reaction cleanup is the
    /// orchestrator's second step, not ours.
    pub async fn delete_post_as_admin(&self, post_id: i64, admin_id: i64) -> Result<()> {
        self.require_post(post_id).await?;
        post_repo::delete_post(&self.pool, post_id).await?;
        tracing::info!(admin_id, post_id, "Admin deleted post");
        Ok(())
    }

    pub async fn get_post(&self, post_id: i64) -> Result<PostView> {
        let post = self.require_post(post_id).await?;
        self.into_view(post).await
    }

    pub async fn list_recent(&self) -> Result<Vec<PostView>> {
        self.into_views(post_repo::list_recent(&self.pool).await?)
            .await
    }

    pub async fn list_top(&self) -> Result<Vec<PostView>> {
        self.into_views(post_repo::list_top(&self.pool).await?)
            .await
    }

    pub async fn list_by_user(&self, user_id: i64) -> Result<Vec<PostView>> {
        self.into_views(post_repo::list_by_user(&self.pool, user_id).await?)
            .await
    }

    pub async fn search(&self, query: &str) -> Result<Vec<PostView>> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Ok(Vec::new());
        }
        self.into_views(post_repo::search_by_content(&self.pool, trimmed).await?)
            .await
    }

    pub async fn list_by_hashtags(&self, raw_names: &[String]) -> Result<Vec<PostView>> {
        let names = normalize_hashtags(raw_names);
        if names.is_empty() {
            return Ok(Vec::new());
        }
        self.into_views(post_repo::list_by_hashtags(&self.pool, &names).await?)
            .await
    }

    /// Reaction-service pushed a fresh direct count for this post.
    pub async fn update_post_reaction_count(&self, post_id: i64, direct: i64) -> Result<()> {
        self.require_post(post_id).await?;

        let comment_counts = self.comment_counts(post_id).await?;
        let total = aggregate_total(direct, &comment_counts);

        tracing::info!(
            post_id,
            direct,
            comments = total - direct,
            total,
            "Updating aggregate reaction count from pushed direct count"
        );
        post_repo::set_reaction_count(&self.pool, post_id, total).await?;
        Ok(())
    }

    /// Re-derive a post's aggregate from scratch.
    ///
    /// Called whenever a child comment's count changed or a comment was
    /// created/removed, AFTER the child's own state is persisted.
    pub async fn recalculate_aggregate(&self, post_id: i64) -> Result<()> {
        self.require_post(post_id).await?;

        let direct = self.reaction_counts.direct_post_count(post_id).await;
        let comment_counts = self.comment_counts(post_id).await?;
        let total = aggregate_total(direct, &comment_counts);

        tracing::info!(
            post_id,
            direct,
            comments = total - direct,
            total,
            "Recalculated aggregate reaction count"
        );
        post_repo::set_reaction_count(&self.pool, post_id, total).await?;
        Ok(())
    }

    pub async fn post_exists(&self, post_id: i64) -> Result<bool> {
        Ok(post_repo::find_post(&self.pool, post_id).await?.is_some())
    }

    async fn require_post(&self, post_id: i64) -> Result<Post> {
        post_repo::find_post(&self.pool, post_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Post not found with id: {post_id}")))
    }

    async fn comment_counts(&self, post_id: i64) -> Result<Vec<i64>> {
        let comments = comment_repo::list_by_post(&self.pool, post_id).await?;
        Ok(comments.into_iter().map(|c| c.reaction_count).collect())
    }

    async fn attach_hashtags(&self, post_id: i64, raw: &[String]) -> Result<Vec<String>> {
        let names = normalize_hashtags(raw);
        for name in &names {
            let hashtag = hashtag_repo::find_or_create(&self.pool, name).await?;
            hashtag_repo::link_post(&self.pool, post_id, hashtag.id).await?;
        }
        Ok(names)
    }

    async fn into_view(&self, post: Post) -> Result<PostView> {
        let names = hashtag_repo::names_for_post(&self.pool, post.id).await?;
        Ok(PostView::from_post(post, names))
    }

    async fn into_views(&self, posts: Vec<Post>) -> Result<Vec<PostView>> {
        let mut views = Vec::with_capacity(posts.len());
        for post in posts {
            views.push(self.into_view(post).await?);
        }
        Ok(views)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aggregate_is_direct_plus_children() {
        assert_eq!(aggregate_total(2, &[1, 0, 3]), 6);
        assert_eq!(aggregate_total(0, &[]), 0);
        assert_eq!(aggregate_total(5, &[0, 0]), 5);
    }

    #[test]
    fn removing_a_child_count_shrinks_the_total() {
        // admin deletes comment 9 (count 4) under post 3 (direct 2)
        let before = aggregate_total(2, &[4, 1]);
        let after = aggregate_total(2, &[1]);
        assert_eq!(before, 7);
        assert_eq!(after, 3);
    }

    #[test]
    fn normalizes_hashtags() {
        let raw = vec![
            "#Rust".to_string(),
            "  actix ".to_string(),
            "".to_string(),
            "#rust".to_string(),
            "#".to_string(),
        ];
        assert_eq!(normalize_hashtags(&raw), vec!["rust", "actix"]);
    }

    #[test]
    fn rejects_over_long_hashtags() {
        let raw = vec!["a".repeat(101), "ok".to_string()];
        assert_eq!(normalize_hashtags(&raw), vec!["ok"]);
    }
}
