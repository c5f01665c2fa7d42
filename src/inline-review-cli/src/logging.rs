//! Diagnostic logging setup.
//!
//! Logs go to stderr; stdout is reserved for the per-comment status lines.

use crate::cli::{Cli, LogLevel};

/// Environment variable that overrides the default log level.
pub const LOG_LEVEL_ENV: &str = "INLINE_REVIEW_LOG_LEVEL";

/// Resolve the effective log level: `--verbose`, then `INLINE_REVIEW_LOG_LEVEL`,
/// then `--log-level`.
pub fn resolve_log_level(cli: &Cli) -> LogLevel {
    if cli.verbose {
        LogLevel::Debug
    } else if let Ok(env_level) = std::env::var(LOG_LEVEL_ENV) {
        LogLevel::from_str_loose(&env_level).unwrap_or(cli.log_level)
    } else {
        cli.log_level
    }
}

/// Build the tracing filter directive for `level`.
///
/// When `RUST_LOG` is set, dependencies stay at `error` and only this tool's
/// crates follow the requested level.
pub fn filter_directive(level: LogLevel, rust_log_set: bool) -> String {
    if rust_log_set {
        format!(
            "error,inline_review={},inline_review_cli={},inline_review_core={}",
            level.as_filter_str(),
            level.as_filter_str(),
            level.as_filter_str()
        )
    } else {
        level.as_filter_str().to_string()
    }
}

/// Install the global tracing subscriber.
pub fn init_logging(level: LogLevel) {
    let filter = filter_directive(level, std::env::var("RUST_LOG").is_ok());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_directive_plain() {
        assert_eq!(filter_directive(LogLevel::Info, false), "info");
    }

    #[test]
    fn test_filter_directive_scopes_to_own_crates() {
        let directive = filter_directive(LogLevel::Debug, true);
        assert!(directive.starts_with("error,"));
        assert!(directive.contains("inline_review_core=debug"));
        assert!(directive.contains("inline_review_cli=debug"));
    }
}
