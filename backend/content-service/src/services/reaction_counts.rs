/// Read-side client for reaction-service's count endpoint
///
/// Used by the aggregate rollup to re-derive a post's direct count. A
/// 404 or any transport failure degrades to zero: the rollup must not
/// fail an unrelated caller because reaction-service was briefly
/// unreachable, and a race with target deletion legitimately yields no
/// count.
use reqwest::Client;
use reqwest::StatusCode;

#[derive(Clone)]
pub struct ReactionCountClient {
    http: Client,
    reaction_base_url: String,
}

impl ReactionCountClient {
    pub fn new(http: Client, reaction_base_url: impl Into<String>) -> Self {
        Self {
            http,
            reaction_base_url: reaction_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn post_count_url(&self, post_id: i64) -> String {
        format!(
            "{}/api/v1/reactions/target/POST/{}/count",
            self.reaction_base_url, post_id
        )
    }

    /// Fetch the number of reactions directly on a post.
    pub async fn direct_post_count(&self, post_id: i64) -> i64 {
        let url = self.post_count_url(post_id);

        let resp = match self.http.get(&url).send().await {
            Ok(resp) => resp,
            Err(err) => {
                tracing::error!(post_id, error = %err, "Failed to fetch direct reaction count");
                return 0;
            }
        };

        if resp.status() == StatusCode::NOT_FOUND {
            tracing::info!(post_id, "No direct reactions known to reaction-service");
            return 0;
        }
        if !resp.status().is_success() {
            tracing::warn!(post_id, status = %resp.status(), "Unexpected status fetching direct reaction count");
            return 0;
        }

        match resp.json::<i64>().await {
            Ok(count) => count,
            Err(err) => {
                tracing::error!(post_id, error = %err, "Malformed direct reaction count payload");
                0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_count_url() {
        let client = ReactionCountClient::new(Client::new(), "http://reactions:8083/");
        assert_eq!(
            client.post_count_url(3),
            "http://reactions:8083/api/v1/reactions/target/POST/3/count"
        );
    }
}
