//! CLI commands and argument parsing

use crate::types::{ArchivedState, IssueState};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Collect paginated GitHub listings
#[derive(Parser, Debug)]
#[command(name = "issue-pager")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// API root, overrides the config file
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Maximum page fetches in flight, overrides the config file
    #[arg(long, global = true)]
    pub concurrency: Option<usize>,

    /// Output format
    #[arg(short, long, global = true, default_value = "pretty")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the issues of a repository, most recently updated first
    Issues {
        /// Repository owner
        #[arg(long)]
        owner: String,

        /// Repository name
        #[arg(long)]
        repo: String,

        /// Issue state filter
        #[arg(long, value_enum, default_value = "open")]
        state: IssueState,

        /// Only issues updated at or after this RFC 3339 timestamp
        #[arg(long, default_value = "")]
        since: String,

        /// Only issues updated before this RFC 3339 timestamp
        #[arg(long, default_value = "")]
        to: String,
    },

    /// List the cards of a project column
    Cards {
        /// Project column id
        #[arg(long)]
        column_id: i64,

        /// Archive filter
        #[arg(long, value_enum, default_value = "all")]
        archived_state: ArchivedState,

        /// Print the issue behind each card instead of the card
        #[arg(long)]
        resolve_issues: bool,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one record per line)
    Json,
    /// Human-readable output
    Pretty,
}
