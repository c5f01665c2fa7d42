//! The publish command: resolve the run context, load feedback, post comments.

use std::io::Write;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use inline_review_core::{
    ClientSettings, CommentPublisher, FeedbackItem, GitHubClient, PublishResult, PublishSummary,
    ReviewCommentRequest, RunContext, load_feedback,
};

use crate::cli::Cli;

/// Run the publish command and report whether the process should fail.
///
/// Per-item failures never abort the run. They only turn into a failing
/// exit status when `--fail-on-error` is set.
pub async fn run(cli: Cli) -> Result<bool> {
    let context = resolve_context(&cli)?;

    let items = load_feedback(&cli.feedback)
        .with_context(|| format!("Failed to load feedback from {}", cli.feedback.display()))?;

    let settings = ClientSettings::default()
        .with_api_base_url(cli.api_base_url())
        .with_timeout(Duration::from_secs(cli.timeout));

    if cli.dry_run {
        write_dry_run(&mut std::io::stdout().lock(), &context, &items, &settings)?;
        return Ok(false);
    }

    tracing::info!(
        repository = %context.repo_slug(),
        pr = context.pr_number(),
        items = items.len(),
        "Posting review comments"
    );

    let client = GitHubClient::new(&context, &settings)?;
    let publisher = CommentPublisher::new(context, client).with_local_validation(true);

    let mut stdout = std::io::stdout();
    let results = publisher
        .publish_with(&items, |result| write_result(&mut stdout, result))
        .await
        .context("Failed to write results to stdout")?;

    let summary = PublishSummary::from_results(&results);
    tracing::info!(
        attempted = summary.attempted,
        succeeded = summary.succeeded,
        failed = summary.failed,
        "Finished posting review comments"
    );

    Ok(should_fail(&summary, cli.fail_on_error))
}

/// Build the run context, reporting every missing field at once.
pub fn resolve_context(cli: &Cli) -> Result<RunContext> {
    let token = present(&cli.token);
    let repository = present(&cli.repository);
    let commit_sha = present(&cli.commit_sha);

    match (token, repository, cli.pr_number, commit_sha) {
        (Some(token), Some(repository), Some(pr_number), Some(commit_sha)) => {
            RunContext::new(token, repository, pr_number, commit_sha)
                .context("Invalid run configuration")
        }
        _ => {
            let missing: Vec<&str> = [
                (token.is_none(), "--token / GITHUB_TOKEN"),
                (repository.is_none(), "--repository / GITHUB_REPOSITORY"),
                (cli.pr_number.is_none(), "--pr-number / PR_NUMBER"),
                (commit_sha.is_none(), "--commit-sha / GITHUB_SHA"),
            ]
            .into_iter()
            .filter_map(|(is_missing, name)| is_missing.then_some(name))
            .collect();

            bail!(
                "Missing required configuration:\n  {}\n\
                Set the environment variables or pass the flags.",
                missing.join("\n  ")
            );
        }
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

/// Print the status line for one result, then the diagnostic on failure.
///
/// Flushes so the line is visible even if the run is cut short later.
pub fn write_result(out: &mut impl Write, result: &PublishResult) -> std::io::Result<()> {
    writeln!(out, "{result}")?;
    if !result.succeeded {
        if let Some(diagnostic) = result.diagnostic() {
            writeln!(out, "{diagnostic}")?;
        }
    }
    out.flush()
}

fn write_dry_run(
    out: &mut impl Write,
    context: &RunContext,
    items: &[FeedbackItem],
    settings: &ClientSettings,
) -> Result<()> {
    let client = GitHubClient::new(context, settings)?;

    writeln!(out, "Dry run - no comments will be posted")?;
    writeln!(out, "POST {}", client.comments_url())?;
    for item in items {
        if let Err(e) = item.validate() {
            writeln!(out, "Skipping {}:{} - {e}", item.path, item.line)?;
            continue;
        }
        let request = ReviewCommentRequest::new(context, item);
        writeln!(out, "{}", serde_json::to_string(&request)?)?;
    }
    Ok(())
}

/// Exit policy: failures only fail the process when explicitly requested.
pub fn should_fail(summary: &PublishSummary, fail_on_error: bool) -> bool {
    fail_on_error && summary.has_failures()
}
