//! Inline review CLI - main entry point.

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use inline_review_cli::logging::{init_logging, resolve_log_level};
use inline_review_cli::{Cli, publish_cmd};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    init_logging(resolve_log_level(&cli));

    if publish_cmd::run(cli).await? {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
