//! CLI argument structures and parsing.
//!
//! Every run-context option falls back to the environment variable a GitHub
//! Actions job already exposes, so the tool runs without flags inside CI.

use clap::Parser;
use std::path::PathBuf;

/// Log verbosity level for CLI output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogLevel {
    /// Only show errors
    Error,
    /// Show warnings and errors (default)
    #[default]
    Warn,
    /// Show informational messages, warnings, and errors
    Info,
    /// Show debug messages and above
    Debug,
    /// Show all messages including trace-level details
    Trace,
}

impl LogLevel {
    /// Convert to tracing filter string.
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }

    /// Parse from string (case-insensitive).
    pub fn from_str_loose(s: &str) -> Option<LogLevel> {
        match s.to_lowercase().as_str() {
            "error" => Some(LogLevel::Error),
            "warn" | "warning" => Some(LogLevel::Warn),
            "info" => Some(LogLevel::Info),
            "debug" => Some(LogLevel::Debug),
            "trace" => Some(LogLevel::Trace),
            _ => None,
        }
    }
}

/// Post inline review comments on a GitHub pull request.
///
/// Reads a JSON array of {path, line, body, side} feedback items and posts
/// each one as a review comment anchored to the given commit.
#[derive(Debug, Parser)]
#[command(name = "inline-review")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// GitHub token used as the bearer credential.
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Target repository in owner/name form.
    #[arg(long, env = "GITHUB_REPOSITORY")]
    pub repository: Option<String>,

    /// Pull request number within the repository.
    #[arg(long, env = "PR_NUMBER", value_parser = clap::value_parser!(u64).range(1..))]
    pub pr_number: Option<u64>,

    /// Commit SHA the comments are anchored to.
    #[arg(long, env = "GITHUB_SHA")]
    pub commit_sha: Option<String>,

    /// Path to the feedback JSON file, or '-' to read from stdin.
    #[arg(long, short = 'f')]
    pub feedback: PathBuf,

    /// GitHub REST API root.
    #[arg(long, env = "GITHUB_API_URL", default_value = inline_review_core::DEFAULT_API_BASE_URL)]
    pub api_url: String,

    /// GitHub Enterprise Server URL. Takes precedence over --api-url.
    #[arg(long, env = "GITHUB_ENTERPRISE_URL")]
    pub enterprise_url: Option<String>,

    /// Per-request timeout in seconds.
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: u64,

    /// Exit with status 1 when any comment fails to post.
    #[arg(long)]
    pub fail_on_error: bool,

    /// Validate inputs and print the requests without sending them.
    #[arg(long)]
    pub dry_run: bool,

    /// Log level for diagnostics written to stderr.
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    /// Enable verbose output (same as --log-level debug)
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

impl Cli {
    /// Effective API root after applying the enterprise override.
    pub fn api_base_url(&self) -> String {
        match self.enterprise_url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => inline_review_core::construct_ghe_api_url(url),
            _ => self.api_url.trim_end_matches('/').to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["inline-review"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_parses_explicit_flags() {
        let cli = parse(&[
            "--token",
            "t",
            "--repository",
            "acme/widgets",
            "--pr-number",
            "42",
            "--commit-sha",
            "abc",
            "--feedback",
            "feedback.json",
            "--fail-on-error",
        ]);
        assert_eq!(cli.token.as_deref(), Some("t"));
        assert_eq!(cli.repository.as_deref(), Some("acme/widgets"));
        assert_eq!(cli.pr_number, Some(42));
        assert_eq!(cli.commit_sha.as_deref(), Some("abc"));
        assert_eq!(cli.feedback, PathBuf::from("feedback.json"));
        assert!(cli.fail_on_error);
        assert_eq!(cli.timeout, 30);
    }

    #[test]
    fn test_rejects_zero_pr_number() {
        let result = Cli::try_parse_from([
            "inline-review",
            "--pr-number",
            "0",
            "--feedback",
            "f.json",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_feedback_is_required() {
        assert!(Cli::try_parse_from(["inline-review"]).is_err());
    }

    #[test]
    fn test_enterprise_url_overrides_api_url() {
        let mut cli = parse(&["--feedback", "f.json", "--api-url", "https://api.github.com/"]);
        cli.enterprise_url = None;
        assert_eq!(cli.api_base_url(), "https://api.github.com");

        cli.enterprise_url = Some("https://ghe.example.com".to_string());
        assert_eq!(cli.api_base_url(), "https://ghe.example.com/api/v3");
    }

    #[test]
    fn test_log_level_from_str_loose() {
        assert_eq!(LogLevel::from_str_loose("WARNING"), Some(LogLevel::Warn));
        assert_eq!(LogLevel::from_str_loose("debug"), Some(LogLevel::Debug));
        assert_eq!(LogLevel::from_str_loose("loud"), None);
    }
}
