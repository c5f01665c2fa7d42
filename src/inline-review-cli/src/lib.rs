//! Inline review CLI.
//!
//! Posts a list of feedback items as inline review comments on a GitHub
//! pull request.
//!
//! - `cli/` - Command-line argument parsing
//! - `logging` - Tracing subscriber setup
//! - `publish_cmd` - The publish run itself

pub mod cli;
pub mod logging;
pub mod publish_cmd;

pub use cli::{Cli, LogLevel};
