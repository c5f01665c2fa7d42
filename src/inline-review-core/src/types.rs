//! Feedback items and per-item publish outcomes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{PublishError, Result};

/// Status code recorded when no HTTP response was received at all.
pub const TRANSPORT_ERROR_STATUS: u16 = 0;

/// Which version of a diffed file a line number refers to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    /// The base (original) version.
    Left,
    /// The head (modified) version.
    #[default]
    Right,
}

impl Side {
    /// Wire representation used by the review comments API.
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Left => "LEFT",
            Side::Right => "RIGHT",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Side {
    type Err = PublishError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "LEFT" => Ok(Side::Left),
            "RIGHT" => Ok(Side::Right),
            _ => Err(PublishError::InvalidSide(s.to_string())),
        }
    }
}

/// A single inline comment to post against a pull request diff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackItem {
    /// Repository-relative file path.
    pub path: String,
    /// 1-based line number in the file as it appears on `side`.
    pub line: u32,
    /// Comment text.
    pub body: String,
    /// Side of the diff the line belongs to.
    #[serde(default)]
    pub side: Side,
}

impl FeedbackItem {
    pub fn new(
        path: impl Into<String>,
        line: u32,
        body: impl Into<String>,
        side: Side,
    ) -> Self {
        Self {
            path: path.into(),
            line,
            body: body.into(),
            side,
        }
    }

    /// Local sanity checks run before publishing when the publisher is built
    /// with local validation. Anything that slips through is rejected by the
    /// remote side and recorded as a failed result.
    pub fn validate(&self) -> Result<()> {
        if self.path.trim().is_empty() {
            return Err(PublishError::InvalidFeedback(
                "path must not be empty".to_string(),
            ));
        }
        if self.line == 0 {
            return Err(PublishError::InvalidFeedback(format!(
                "{}: line numbers are 1-based, got 0",
                self.path
            )));
        }
        if self.body.trim().is_empty() {
            return Err(PublishError::InvalidFeedback(format!(
                "{}:{}: comment body must not be empty",
                self.path, self.line
            )));
        }
        Ok(())
    }
}

/// Outcome of publishing one [`FeedbackItem`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublishResult {
    pub item: FeedbackItem,
    /// HTTP status, or [`TRANSPORT_ERROR_STATUS`] when the call never completed.
    pub status_code: u16,
    pub succeeded: bool,
    /// Raw response payload, kept only for failed calls.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_body: Option<String>,
    /// Failure raised before any response arrived, such as an invalid item
    /// or a timeout.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_error: Option<String>,
}

impl PublishResult {
    /// Build a result from a completed HTTP exchange.
    pub fn from_response(item: FeedbackItem, status_code: u16, body: String) -> Self {
        let succeeded = status_code < 300;
        Self {
            item,
            status_code,
            succeeded,
            response_body: if succeeded { None } else { Some(body) },
            local_error: None,
        }
    }

    /// Build a failed result for a call that never produced a response.
    pub fn transport_failure(item: FeedbackItem, error: impl Into<String>) -> Self {
        Self {
            item,
            status_code: TRANSPORT_ERROR_STATUS,
            succeeded: false,
            response_body: None,
            local_error: Some(error.into()),
        }
    }

    /// Build a failed result for an item rejected before it was sent.
    pub fn local_rejection(item: FeedbackItem, reason: impl Into<String>) -> Self {
        Self::transport_failure(item, reason)
    }

    /// Diagnostic payload worth showing for a failed item.
    pub fn diagnostic(&self) -> Option<&str> {
        self.local_error
            .as_deref()
            .or(self.response_body.as_deref())
    }
}

impl fmt::Display for PublishResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Comment on {}:{} - Status: {}",
            self.item.path, self.item.line, self.status_code
        )
    }
}

/// Aggregate counts over a publish run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PublishSummary {
    pub attempted: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl PublishSummary {
    pub fn from_results(results: &[PublishResult]) -> Self {
        let succeeded = results.iter().filter(|r| r.succeeded).count();
        Self {
            attempted: results.len(),
            succeeded,
            failed: results.len() - succeeded,
        }
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}
