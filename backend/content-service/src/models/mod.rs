/// Data models for content-service
///
/// - Post: user content with a cached aggregate reaction count
/// - Comment: child of a post, referencing the owner by id only
/// - Hashtag: normalized tag associated to posts via a join table
///
/// `Post.reaction_count` is derived and eventually consistent: it caches
/// (reactions directly on the post) + Σ(child comment counts). The
/// reaction store is the only source of truth for direct counts; this
/// field is refreshed by explicit recalculation.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Post {
    pub id: i64,
    pub user_id: i64,
    pub content: String,
    pub reaction_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Comment {
    pub id: i64,
    pub post_id: i64,
    pub user_id: i64,
    pub content: String,
    pub reaction_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Hashtag {
    pub id: i64,
    pub name: String,
}

/// Post as returned to API clients.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostView {
    pub id: i64,
    pub user_id: i64,
    pub content: String,
    pub reaction_count: i64,
    pub hashtags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PostView {
    pub fn from_post(post: Post, hashtags: Vec<String>) -> Self {
        PostView {
            id: post.id,
            user_id: post.user_id,
            content: post.content,
            reaction_count: post.reaction_count,
            hashtags,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

/// Comment as returned to API clients.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentView {
    pub id: i64,
    pub post_id: i64,
    pub user_id: i64,
    pub content: String,
    pub reaction_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Comment> for CommentView {
    fn from(c: Comment) -> Self {
        CommentView {
            id: c.id,
            post_id: c.post_id,
            user_id: c.user_id,
            content: c.content,
            reaction_count: c.reaction_count,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_view_uses_camel_case_keys() {
        let view = PostView {
            id: 1,
            user_id: 7,
            content: "hello".into(),
            reaction_count: 3,
            hashtags: vec!["rust".into()],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["userId"], 7);
        assert_eq!(json["reactionCount"], 3);
        assert_eq!(json["hashtags"][0], "rust");
    }
}
