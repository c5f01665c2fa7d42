//! Run context: the credentials and pull request coordinates for one run.

use std::fmt;

use secrecy::{ExposeSecret, SecretString};

use crate::error::{PublishError, Result};

/// Length of a hex-encoded SHA-1 commit identifier.
const COMMIT_SHA_LEN: usize = 40;

/// Everything needed to address review comments at one pull request.
///
/// Constructed once at startup through [`RunContext::new`], which rejects
/// missing or malformed fields so that no request is ever built from them.
pub struct RunContext {
    token: SecretString,
    owner: String,
    repo: String,
    pr_number: u64,
    commit_sha: String,
}

impl RunContext {
    pub fn new(
        token: impl Into<String>,
        repo_slug: &str,
        pr_number: u64,
        commit_sha: &str,
    ) -> Result<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(PublishError::config("token", "must not be empty"));
        }

        let (owner, repo) = parse_repository(repo_slug)?;

        if pr_number == 0 {
            return Err(PublishError::config(
                "pr_number",
                "must be a positive integer",
            ));
        }

        let commit_sha = commit_sha.trim();
        if commit_sha.len() != COMMIT_SHA_LEN
            || !commit_sha.chars().all(|c| c.is_ascii_hexdigit())
        {
            return Err(PublishError::config(
                "commit_sha",
                format!(
                    "expected a {COMMIT_SHA_LEN}-character hex commit id, got '{commit_sha}'"
                ),
            ));
        }

        Ok(Self {
            token: SecretString::from(token),
            owner,
            repo,
            pr_number,
            commit_sha: commit_sha.to_string(),
        })
    }

    /// Bearer credential. Only meant for building the Authorization header.
    pub fn token(&self) -> &str {
        self.token.expose_secret()
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn repo(&self) -> &str {
        &self.repo
    }

    /// `owner/name` form of the repository.
    pub fn repo_slug(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }

    pub fn pr_number(&self) -> u64 {
        self.pr_number
    }

    pub fn commit_sha(&self) -> &str {
        &self.commit_sha
    }
}

impl fmt::Debug for RunContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunContext")
            .field("token", &"[REDACTED]")
            .field("owner", &self.owner)
            .field("repo", &self.repo)
            .field("pr_number", &self.pr_number)
            .field("commit_sha", &self.commit_sha)
            .finish()
    }
}

/// Parse repository string (owner/repo) into components.
fn parse_repository(repository: &str) -> Result<(String, String)> {
    let parts: Vec<&str> = repository.trim().split('/').collect();
    match parts.as_slice() {
        [owner, repo] if !owner.is_empty() && !repo.is_empty() => {
            Ok((owner.to_string(), repo.to_string()))
        }
        _ => Err(PublishError::config(
            "repository",
            format!("expected 'owner/repo', got '{repository}'"),
        )),
    }
}
