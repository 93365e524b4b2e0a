//! CLI module
//!
//! Command-line interface for collecting listings.
//!
//! # Commands
//!
//! - `issues` - Collect the issues of a repository, pages fetched concurrently
//! - `cards` - Collect the cards of a project column, page by page

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
