//! GitHub pull request review comment client.
//!
//! # Security considerations
//!
//! The bearer token is read from [`RunContext`] and passed only to
//! `bearer_auth()`. It is never logged, serialized, or included in errors.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

use crate::context::RunContext;
use crate::error::Result;
use crate::http_client::{DEFAULT_TIMEOUT, create_client_with_timeout};
use crate::types::{FeedbackItem, Side};

/// Public GitHub REST API root.
pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";

/// Media type GitHub recommends for REST calls.
pub const GITHUB_ACCEPT: &str = "application/vnd.github+json";

/// Pinned REST API version.
pub const GITHUB_API_VERSION: &str = "2022-11-28";

/// Construct the API URL for a GitHub Enterprise Server instance.
pub fn construct_ghe_api_url(enterprise_url: &str) -> String {
    let url = enterprise_url.trim_end_matches('/');
    if url.ends_with("/api/v3") {
        url.to_string()
    } else {
        format!("{}/api/v3", url)
    }
}

/// Body of `POST /repos/{owner}/{repo}/pulls/{pull_number}/comments`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewCommentRequest {
    pub body: String,
    pub commit_id: String,
    pub path: String,
    pub side: Side,
    pub line: u32,
}

impl ReviewCommentRequest {
    pub fn new(context: &RunContext, item: &FeedbackItem) -> Self {
        Self {
            body: item.body.clone(),
            commit_id: context.commit_sha().to_string(),
            path: item.path.clone(),
            side: item.side,
            line: item.line,
        }
    }
}

/// Status and raw payload of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

/// Delivers one review comment to the forge.
///
/// Any HTTP status counts as a completed exchange; only failures to get a
/// response at all (DNS, refused connection, timeout) are errors.
#[async_trait]
pub trait CommentTransport: Send + Sync {
    async fn submit(
        &self,
        request: &ReviewCommentRequest,
    ) -> std::result::Result<TransportResponse, reqwest::Error>;
}

/// Connection settings for [`GitHubClient`].
#[derive(Debug, Clone)]
pub struct ClientSettings {
    /// REST API root, e.g. `https://api.github.com`.
    pub api_base_url: String,
    /// Total per-request timeout.
    pub timeout: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientSettings {
    pub fn with_api_base_url(mut self, api_base_url: impl Into<String>) -> Self {
        self.api_base_url = api_base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// GitHub API client bound to a single pull request.
pub struct GitHubClient {
    client: Client,
    token: SecretString,
    comments_url: String,
}

impl GitHubClient {
    /// Create a client for the pull request named by `context`.
    pub fn new(context: &RunContext, settings: &ClientSettings) -> Result<Self> {
        let client = create_client_with_timeout(settings.timeout)?;
        Ok(Self::with_client(client, context, &settings.api_base_url))
    }

    /// Create a client around an existing `reqwest::Client`.
    pub fn with_client(client: Client, context: &RunContext, api_base_url: &str) -> Self {
        let comments_url = format!(
            "{}/repos/{}/{}/pulls/{}/comments",
            api_base_url.trim_end_matches('/'),
            context.owner(),
            context.repo(),
            context.pr_number()
        );

        Self {
            client,
            token: SecretString::from(context.token().to_string()),
            comments_url,
        }
    }

    /// Review comments endpoint every request is sent to.
    pub fn comments_url(&self) -> &str {
        &self.comments_url
    }
}

#[async_trait]
impl CommentTransport for GitHubClient {
    async fn submit(
        &self,
        request: &ReviewCommentRequest,
    ) -> std::result::Result<TransportResponse, reqwest::Error> {
        let response = self
            .client
            .post(&self.comments_url)
            .bearer_auth(self.token.expose_secret())
            .header("Accept", GITHUB_ACCEPT)
            .header("X-GitHub-Api-Version", GITHUB_API_VERSION)
            .json(request)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = body_or_read_error(response.text().await);

        Ok(TransportResponse { status, body })
    }
}

/// A status already arrived, so a body that cannot be read still leaves a
/// diagnostic instead of an empty string.
fn body_or_read_error(body: std::result::Result<String, reqwest::Error>) -> String {
    body.unwrap_or_else(|e| format!("<failed to read response body: {e}>"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SHA: &str = "deadbeefdeadbeefdeadbeefdeadbeefdeadbeef";

    fn context() -> RunContext {
        RunContext::new("ghp_test", "acme/widgets", 42, SHA).unwrap()
    }

    #[test]
    fn test_comments_url_for_public_github() {
        let client = GitHubClient::new(&context(), &ClientSettings::default()).unwrap();
        assert_eq!(
            client.comments_url(),
            "https://api.github.com/repos/acme/widgets/pulls/42/comments"
        );
    }

    #[test]
    fn test_comments_url_trims_trailing_slash() {
        let client = GitHubClient::with_client(
            Client::new(),
            &context(),
            "https://ghe.example.com/api/v3/",
        );
        assert_eq!(
            client.comments_url(),
            "https://ghe.example.com/api/v3/repos/acme/widgets/pulls/42/comments"
        );
    }

    #[test]
    fn test_construct_ghe_api_url() {
        assert_eq!(
            construct_ghe_api_url("https://ghe.example.com"),
            "https://ghe.example.com/api/v3"
        );
        assert_eq!(
            construct_ghe_api_url("https://ghe.example.com/"),
            "https://ghe.example.com/api/v3"
        );
        assert_eq!(
            construct_ghe_api_url("https://ghe.example.com/api/v3"),
            "https://ghe.example.com/api/v3"
        );
    }

    #[test]
    fn test_request_body_shape() {
        let item = FeedbackItem::new("src/x.cs", 10, "fix this", Side::Right);
        let request = ReviewCommentRequest::new(&context(), &item);

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({
                "body": "fix this",
                "commit_id": SHA,
                "path": "src/x.cs",
                "side": "RIGHT",
                "line": 10
            })
        );
    }

    #[test]
    fn test_body_or_read_error_keeps_body() {
        assert_eq!(body_or_read_error(Ok("{}".to_string())), "{}");
    }

    #[tokio::test]
    async fn test_body_or_read_error_describes_failure() {
        // Port 1 on loopback refuses connections, giving a genuine reqwest::Error.
        let err = Client::new()
            .get("http://127.0.0.1:1/")
            .send()
            .await
            .unwrap_err();

        let body = body_or_read_error(Err(err));
        assert!(body.starts_with("<failed to read response body: "));
        assert!(body.len() > "<failed to read response body: >".len());
    }

    #[test]
    fn test_request_carries_left_side() {
        let item = FeedbackItem::new("src/old.rs", 3, "removed too early", Side::Left);
        let request = ReviewCommentRequest::new(&context(), &item);
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["side"], "LEFT");
    }
}
