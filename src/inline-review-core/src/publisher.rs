//! Comment publisher: posts feedback items one at a time and records outcomes.

use std::convert::Infallible;

use crate::context::RunContext;
use crate::error::Result;
use crate::github::{ClientSettings, CommentTransport, GitHubClient, ReviewCommentRequest};
use crate::types::{FeedbackItem, PublishResult};

/// Posts feedback items as inline review comments through a transport.
///
/// Items are sent strictly in order, each exactly once. A rejected item or a
/// failed connection is recorded in its [`PublishResult`] and never stops the
/// items after it.
pub struct CommentPublisher<T> {
    context: RunContext,
    transport: T,
    local_validation: bool,
}

impl<T: CommentTransport> CommentPublisher<T> {
    pub fn new(context: RunContext, transport: T) -> Self {
        Self {
            context,
            transport,
            local_validation: false,
        }
    }

    /// Record items failing [`FeedbackItem::validate`] as failed results
    /// without sending them. Off by default.
    pub fn with_local_validation(mut self, enabled: bool) -> Self {
        self.local_validation = enabled;
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Publish every item and return one result per item, in input order.
    pub async fn publish(&self, items: &[FeedbackItem]) -> Vec<PublishResult> {
        let outcome = self.publish_with(items, |_| Ok::<(), Infallible>(())).await;
        match outcome {
            Ok(results) => results,
            Err(never) => match never {},
        }
    }

    /// Publish every item, handing each result to `on_result` as soon as it
    /// is recorded and before the next item is sent.
    ///
    /// Item failures never stop the run. An error from `on_result` does.
    pub async fn publish_with<F, E>(
        &self,
        items: &[FeedbackItem],
        mut on_result: F,
    ) -> std::result::Result<Vec<PublishResult>, E>
    where
        F: FnMut(&PublishResult) -> std::result::Result<(), E>,
    {
        let mut results = Vec::with_capacity(items.len());

        for item in items {
            let result = self.publish_one(item).await;

            if result.succeeded {
                tracing::info!(
                    path = %item.path,
                    line = item.line,
                    status = result.status_code,
                    "Review comment posted"
                );
            } else {
                tracing::warn!(
                    path = %item.path,
                    line = item.line,
                    status = result.status_code,
                    response = result.diagnostic().unwrap_or_default(),
                    "Review comment rejected"
                );
            }

            on_result(&result)?;
            results.push(result);
        }

        Ok(results)
    }

    async fn publish_one(&self, item: &FeedbackItem) -> PublishResult {
        if self.local_validation {
            if let Err(e) = item.validate() {
                return PublishResult::local_rejection(item.clone(), e.to_string());
            }
        }

        let request = ReviewCommentRequest::new(&self.context, item);

        match self.transport.submit(&request).await {
            Ok(response) => {
                PublishResult::from_response(item.clone(), response.status, response.body)
            }
            Err(e) => {
                PublishResult::transport_failure(item.clone(), format!("transport error: {e}"))
            }
        }
    }
}

/// Build a GitHub client from `settings` and publish `items` against the
/// pull request named by `context`.
pub async fn publish_comments(
    context: RunContext,
    items: &[FeedbackItem],
    settings: &ClientSettings,
) -> Result<Vec<PublishResult>> {
    let client = GitHubClient::new(&context, settings)?;
    tracing::debug!(
        url = client.comments_url(),
        items = items.len(),
        "Publishing review comments"
    );

    let publisher = CommentPublisher::new(context, client);
    Ok(publisher.publish(items).await)
}
