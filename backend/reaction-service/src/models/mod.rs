/// Data models for reaction-service
///
/// A reaction targets either a post or a comment, identified by
/// `(target_id, target_type)`. At most one reaction exists per
/// `(user_id, target_id, target_type)` tuple; this is enforced by a
/// unique constraint on the `reactions` table.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The kind of entity a reaction is attached to.
///
/// A closed set: dispatch over it is a plain `match` in the count-sync
/// and cleanup paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(type_name = "target_kind", rename_all = "UPPERCASE")]
pub enum TargetKind {
    Post,
    Comment,
}

impl TargetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetKind::Post => "POST",
            TargetKind::Comment => "COMMENT",
        }
    }
}

impl std::fmt::Display for TargetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Enumerated reaction kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(type_name = "reaction_kind", rename_all = "UPPERCASE")]
pub enum ReactionKind {
    Like,
    Love,
    Haha,
    Wow,
    Sad,
    Angry,
}

/// A stored reaction row.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Reaction {
    pub id: i64,
    pub user_id: i64,
    pub target_id: i64,
    pub target_type: TargetKind,
    pub reaction_type: ReactionKind,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload of `POST /api/v1/reactions`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactionInput {
    pub target_id: i64,
    pub target_type: TargetKind,
    pub reaction_type: ReactionKind,
}

/// Reaction as returned to API clients.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactionView {
    pub id: i64,
    pub user_id: i64,
    pub target_id: i64,
    pub target_type: TargetKind,
    pub reaction_type: ReactionKind,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Reaction> for ReactionView {
    fn from(r: Reaction) -> Self {
        ReactionView {
            id: r.id,
            user_id: r.user_id,
            target_id: r.target_id,
            target_type: r.target_type,
            reaction_type: r.reaction_type,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

/// Ephemeral confirmation returned after an orchestrated admin action.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminActionConfirmation {
    pub message: String,
    pub target_id: i64,
    pub action: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_kind_serializes_uppercase() {
        assert_eq!(
            serde_json::to_string(&TargetKind::Post).unwrap(),
            "\"POST\""
        );
        assert_eq!(
            serde_json::to_string(&TargetKind::Comment).unwrap(),
            "\"COMMENT\""
        );
    }

    #[test]
    fn reaction_input_uses_camel_case_keys() {
        let input: ReactionInput = serde_json::from_str(
            r#"{"targetId": 42, "targetType": "POST", "reactionType": "LIKE"}"#,
        )
        .unwrap();

        assert_eq!(input.target_id, 42);
        assert_eq!(input.target_type, TargetKind::Post);
        assert_eq!(input.reaction_type, ReactionKind::Like);
    }
}
