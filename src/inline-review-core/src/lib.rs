//! Inline pull request review comments for GitHub.
//!
//! Takes a list of `(path, line, body, side)` feedback items, typically the
//! output of some analysis step, and posts each one as an inline review
//! comment on a pull request diff:
//! - [`RunContext`] validates the token, repository, PR number and commit
//! - [`GitHubClient`] sends `POST /repos/{owner}/{repo}/pulls/{n}/comments`
//! - [`CommentPublisher`] walks the items in order and records a
//!   [`PublishResult`] for each, continuing past failures

pub mod context;
pub mod error;
pub mod feedback;
pub mod github;
pub mod http_client;
pub mod publisher;
pub mod types;

pub use context::RunContext;
pub use error::{PublishError, Result};
pub use feedback::{load_feedback, parse_feedback};
pub use github::{
    ClientSettings, CommentTransport, DEFAULT_API_BASE_URL, GitHubClient, ReviewCommentRequest,
    TransportResponse, construct_ghe_api_url,
};
pub use publisher::{CommentPublisher, publish_comments};
pub use types::{FeedbackItem, PublishResult, PublishSummary, Side, TRANSPORT_ERROR_STATUS};
