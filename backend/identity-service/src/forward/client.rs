/// Generic request forwarding to internal services
use crate::error::{IdentityError, Result};
use actix_middleware::{ORIGINAL_AUTH_HEADER, USER_ID_HEADER};
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use reqwest::{Client, Method};

/// Forwards requests to one internal service, stamping the trusted
/// identity headers on every call.
#[derive(Clone)]
pub struct Forwarder {
    http: Client,
    base_url: String,
}

/// Forwarder bound to content-service.
#[derive(Clone)]
pub struct ContentForwarder(pub Forwarder);

/// Forwarder bound to reaction-service.
#[derive(Clone)]
pub struct ReactionForwarder(pub Forwarder);

impl Forwarder {
    pub fn new(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn url(&self, path_and_query: &str) -> String {
        format!("{}{}", self.base_url, path_and_query)
    }

    /// Forward a request, relaying the downstream status and body.
    ///
    /// `original_auth` carries the caller's verbatim `Authorization`
    /// value for admin flows; it travels in `X-Original-Authorization`
    /// so downstream services can tell relayed credentials from their
    /// own.
    pub async fn forward(
        &self,
        method: Method,
        path_and_query: &str,
        user_id: i64,
        original_auth: Option<&str>,
        body: Option<&serde_json::Value>,
    ) -> Result<HttpResponse> {
        let url = self.url(path_and_query);

        let mut request = self
            .http
            .request(method.clone(), &url)
            .header(USER_ID_HEADER, user_id.to_string());
        if let Some(auth) = original_auth {
            request = request.header(ORIGINAL_AUTH_HEADER, auth);
        }
        if let Some(json) = body {
            request = request.json(json);
        }

        let resp = request.send().await.map_err(|e| {
            tracing::error!(%method, %url, error = %e, "Forwarded request failed");
            IdentityError::UpstreamUnavailable(format!("{method} {url}: {e}"))
        })?;

        relay(resp).await
    }
}

/// Translate a downstream response into ours, preserving status and body.
async fn relay(resp: reqwest::Response) -> Result<HttpResponse> {
    let status =
        StatusCode::from_u16(resp.status().as_u16()).unwrap_or(StatusCode::BAD_GATEWAY);
    let content_type = resp
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let bytes = resp
        .bytes()
        .await
        .map_err(|e| IdentityError::UpstreamUnavailable(e.to_string()))?;

    let mut builder = HttpResponse::build(status);
    if let Some(ct) = content_type {
        builder.insert_header(("Content-Type", ct));
    }
    Ok(builder.body(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_base_url_and_path() {
        let fwd = Forwarder::new(Client::new(), "http://content:8082/");
        assert_eq!(
            fwd.url("/api/v1/posts/7/comments"),
            "http://content:8082/api/v1/posts/7/comments"
        );
    }

    #[tokio::test]
    async fn unreachable_peer_maps_to_upstream_error() {
        // Reserved TEST-NET address; nothing listens there
        let http = Client::builder()
            .timeout(std::time::Duration::from_millis(200))
            .build()
            .unwrap();
        let fwd = Forwarder::new(http, "http://192.0.2.1:1");

        let err = fwd
            .forward(Method::GET, "/api/v1/posts", 7, None, None)
            .await
            .unwrap_err();
        assert!(matches!(err, IdentityError::UpstreamUnavailable(_)));
    }
}
