/// Count sync client - pushes recomputed reaction counts to content-service
///
/// The push is fire-and-forget with logging: by the time it runs, the
/// reaction mutation that triggered it has already committed locally, and
/// failing the user-visible write over a downstream sync was rejected in
/// favor of availability. A failed push leaves the stored aggregate stale
/// until the next mutation of the same target.
use crate::models::TargetKind;
use reqwest::Client;
use serde::Serialize;

#[derive(Clone)]
pub struct CountSyncClient {
    http: Client,
    content_base_url: String,
}

/// Body of the internal "set direct reaction count" endpoints.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactionCountUpdate {
    pub reaction_count: i64,
}

impl CountSyncClient {
    pub fn new(http: Client, content_base_url: impl Into<String>) -> Self {
        Self {
            http,
            content_base_url: content_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Internal content-service endpoint owning the target's direct count.
    pub fn count_url(&self, target_id: i64, target_type: TargetKind) -> String {
        match target_type {
            TargetKind::Post => format!(
                "{}/internal/posts/{}/reaction-count",
                self.content_base_url, target_id
            ),
            TargetKind::Comment => format!(
                "{}/internal/comments/{}/reaction-count",
                self.content_base_url, target_id
            ),
        }
    }

    /// Push a freshly computed count to the service owning the target.
    ///
    /// Network errors and non-2xx statuses are logged and swallowed.
    pub async fn push_count(&self, target_id: i64, target_type: TargetKind, count: i64) {
        let url = self.count_url(target_id, target_type);
        let body = ReactionCountUpdate {
            reaction_count: count,
        };

        match self.http.put(&url).json(&body).send().await {
            Ok(resp) if resp.status().is_success() => {
                tracing::info!(
                    %target_type,
                    target_id,
                    count,
                    "Pushed reaction count to content-service"
                );
            }
            Ok(resp) => {
                tracing::error!(
                    %target_type,
                    target_id,
                    count,
                    status = %resp.status(),
                    "Content-service rejected reaction count push"
                );
            }
            Err(err) => {
                tracing::error!(
                    %target_type,
                    target_id,
                    count,
                    error = %err,
                    "Failed to push reaction count to content-service"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> CountSyncClient {
        CountSyncClient::new(Client::new(), "http://content:8082/")
    }

    #[test]
    fn builds_post_count_url() {
        assert_eq!(
            client().count_url(42, TargetKind::Post),
            "http://content:8082/internal/posts/42/reaction-count"
        );
    }

    #[test]
    fn builds_comment_count_url() {
        assert_eq!(
            client().count_url(9, TargetKind::Comment),
            "http://content:8082/internal/comments/9/reaction-count"
        );
    }

    #[test]
    fn count_update_wire_shape() {
        let body = ReactionCountUpdate { reaction_count: 3 };
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"reactionCount":3}"#
        );
    }
}
