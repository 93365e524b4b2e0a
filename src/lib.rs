// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # issue-pager
//!
//! Concurrent collection of paginated listings from the GitHub REST API.
//!
//! The first page is fetched on its own to learn how many pages exist. All
//! remaining pages are then requested at once (bounded by a concurrency
//! limit), and the records are stitched back together in page order no
//! matter which fetch finished first.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use issue_pager::{GitHubIssuesFetcher, HttpClient, IssueQuery, IssueState, PaginatedCollector};
//!
//! #[tokio::main]
//! async fn main() -> issue_pager::Result<()> {
//!     let client = HttpClient::new()?;
//!     let collector = PaginatedCollector::new(GitHubIssuesFetcher::new(client));
//!
//!     let query = IssueQuery::new("rust-lang", "rust", "", "", IssueState::Open)?;
//!     let collection = collector.collect(query).await?;
//!
//!     for issue in collection.records() {
//!         println!("{}", issue["title"]);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                   PaginatedCollector                      │
//! │  page 1 → (next, last) → fan-out 2..=last → PageSet       │
//! └───────────────────────────────────────────────────────────┘
//!                              │
//! ┌─────────────┬──────────────┴───┬──────────────┬───────────┐
//! │   Fetcher   │      HTTP        │  Pagination  │  Filter   │
//! ├─────────────┼──────────────────┼──────────────┼───────────┤
//! │ Issues      │ GET + timeout    │ Link header  │ updated_at│
//! │ Cards       │ Rate limit       │ Page/PageSet │ < to      │
//! └─────────────┴──────────────────┴──────────────┴───────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Listing queries and timestamp parsing
pub mod query;

/// HTTP client with timeouts and rate limiting
pub mod http;

/// Pages, page sets and Link header parsing
pub mod pagination;

/// Page fetchers
pub mod fetcher;

/// Concurrent page collection
pub mod collector;

/// Client-side timestamp filtering
pub mod filter;

/// Text rendering of records
pub mod render;

/// Configuration
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use collector::{CollectStats, Collection, CollectorConfig, PageFailure, PaginatedCollector};
pub use config::PagerConfig;
pub use fetcher::{Fetcher, GitHubIssuesFetcher, ProjectCardsFetcher};
pub use filter::{filter_updated_before, RangeFilter};
pub use http::{HttpClient, HttpClientConfig};
pub use pagination::{Page, PageOutcome, PageResponse, PageSet};
pub use query::{CardQuery, IssueQuery, IssueRef};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
