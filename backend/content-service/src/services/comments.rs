/// Comment service - comment management and rollup triggering
///
/// Comment mutations ripple into the parent post's cached aggregate.
/// The ordering rule: the comment's own state is persisted first, the
/// parent recalculation runs after, so the rollup never reads a stale
/// child value. A failed recalculation is logged and not escalated to
/// the caller whose own write already committed.
use crate::db::comment_repo;
use crate::error::{AppError, Result};
use crate::models::{Comment, CommentView};
use crate::services::PostService;
use sqlx::PgPool;

#[derive(Clone)]
pub struct CommentService {
    pool: PgPool,
    posts: PostService,
}

impl CommentService {
    pub fn new(pool: PgPool, posts: PostService) -> Self {
        Self { pool, posts }
    }

    pub async fn create_comment(
        &self,
        post_id: i64,
        user_id: i64,
        content: &str,
    ) -> Result<CommentView> {
        if !self.posts.post_exists(post_id).await? {
            return Err(AppError::NotFound(format!(
                "Post not found with id: {post_id}"
            )));
        }

        let comment = comment_repo::create_comment(&self.pool, post_id, user_id, content).await?;
        self.recalculate_parent(post_id, comment.id, "creation").await;
        Ok(CommentView::from(comment))
    }

    pub async fn update_comment(
        &self,
        comment_id: i64,
        user_id: i64,
        content: &str,
    ) -> Result<CommentView> {
        let comment = self.require_comment(comment_id).await?;
        if comment.user_id != user_id {
            return Err(AppError::Forbidden(
                "Not authorized to update this comment".to_string(),
            ));
        }

        let updated = comment_repo::update_comment_content(&self.pool, comment_id, content).await?;
        Ok(CommentView::from(updated))
    }

    pub async fn delete_comment(&self, comment_id: i64, user_id: i64) -> Result<()> {
        let comment = self.require_comment(comment_id).await?;
        if comment.user_id != user_id {
            return Err(AppError::Forbidden(
                "Not authorized to delete this comment".to_string(),
            ));
        }

        comment_repo::delete_comment(&self.pool, comment_id).await?;
        tracing::info!(user_id, comment_id, "User deleted comment");

        self.recalculate_parent(comment.post_id, comment_id, "deletion")
            .await;
        Ok(())
    }

    /// Admin deletion skips the ownership check.
    pub async fn delete_comment_as_admin(&self, comment_id: i64, admin_id: i64) -> Result<()> {
        let comment = self.require_comment(comment_id).await?;

        comment_repo::delete_comment(&self.pool, comment_id).await?;
        tracing::info!(
            admin_id,
            comment_id,
            original_author = comment.user_id,
            "Admin deleted comment"
        );

        self.recalculate_parent(comment.post_id, comment_id, "admin deletion")
            .await;
        Ok(())
    }

    pub async fn comments_for_post(&self, post_id: i64) -> Result<Vec<CommentView>> {
        if !self.posts.post_exists(post_id).await? {
            return Err(AppError::NotFound(format!(
                "Post not found with id: {post_id}"
            )));
        }

        let comments = comment_repo::list_by_post(&self.pool, post_id).await?;
        Ok(comments.into_iter().map(CommentView::from).collect())
    }

    /// Reaction-service pushed a fresh count for this comment.
    ///
    /// The comment's count is persisted before the parent recalculation
    /// runs, never after.
    pub async fn update_comment_reaction_count(&self, comment_id: i64, count: i64) -> Result<()> {
        let comment = self.require_comment(comment_id).await?;

        comment_repo::set_reaction_count(&self.pool, comment_id, count).await?;
        tracing::info!(comment_id, count, "Updated comment reaction count");

        self.recalculate_parent(comment.post_id, comment_id, "reaction count update")
            .await;
        Ok(())
    }

    async fn require_comment(&self, comment_id: i64) -> Result<Comment> {
        comment_repo::find_comment(&self.pool, comment_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Comment not found with id: {comment_id}")))
    }

    /// Post recalculation runs after the comment mutation committed; a
    /// failure (e.g. the post vanished concurrently) is logged only.
    async fn recalculate_parent(&self, post_id: i64, comment_id: i64, cause: &str) {
        if let Err(err) = self.posts.recalculate_aggregate(post_id).await {
            tracing::error!(
                post_id,
                comment_id,
                cause,
                error = %err,
                "Failed to recalculate post aggregate after comment change"
            );
        }
    }
}
