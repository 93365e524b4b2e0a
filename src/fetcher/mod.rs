//! Fetcher module
//!
//! A [`Fetcher`] performs one network call for one page. The collector
//! calls it once for page 1 and then concurrently for every other page, so
//! implementations must be shareable across tasks and must not mutate state
//! beyond what they return.

mod github;

pub use github::{GitHubIssuesFetcher, ProjectCardsFetcher, GITHUB_API_URL};

use crate::error::Result;
use crate::pagination::PageResponse;
use async_trait::async_trait;

/// Fetches a single page of a paginated listing
#[async_trait]
pub trait Fetcher: Send + Sync + 'static {
    /// Parameters shared read-only by every page of one collection
    type Query: Send + Sync + 'static;

    /// Fetch page `page` (1-based)
    async fn fetch(&self, page: u32, query: &Self::Query) -> Result<PageResponse>;

    /// Human-readable name of the listing, used in errors and logs
    fn describe(&self, query: &Self::Query) -> String;
}

#[cfg(test)]
mod tests;
