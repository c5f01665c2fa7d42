//! CLI argument parsing.
//!
//! - `args` - Command-line argument structures

pub mod args;

pub use args::{Cli, LogLevel};
