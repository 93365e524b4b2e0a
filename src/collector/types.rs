//! Collector types
//!
//! Configuration for a collection run and the settled result it returns.

use crate::error::Error;
use crate::pagination::{PageOutcome, PageSet};
use crate::types::Record;
use std::time::Duration;

/// Configuration for collection runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectorConfig {
    /// Maximum number of page fetches in flight at once
    pub max_concurrency: usize,
    /// Upper bound on pages per run
    pub max_pages: u32,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            max_concurrency: 8,
            max_pages: 10_000,
        }
    }
}

impl CollectorConfig {
    /// Set the concurrency limit. Zero is treated as 1.
    #[must_use]
    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency.max(1);
        self
    }

    /// Set the page limit
    #[must_use]
    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = max_pages;
        self
    }
}

/// A page whose fetch failed after page 1
#[derive(Debug)]
pub struct PageFailure {
    /// Page number
    pub page: u32,
    /// What went wrong
    pub error: Error,
}

/// Statistics for one collection run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollectStats {
    /// Pages fetched successfully
    pub pages_fetched: usize,
    /// Pages whose fetch failed
    pub pages_failed: usize,
    /// Records collected
    pub records: usize,
    /// Wall-clock duration in milliseconds
    pub duration_ms: u64,
}

/// Every page of one run, settled
#[derive(Debug)]
pub struct Collection {
    pages: PageSet,
    truncated: Option<u32>,
    duration: Duration,
}

impl Collection {
    pub(crate) fn new(pages: PageSet, truncated: Option<u32>, duration: Duration) -> Self {
        Self {
            pages,
            truncated,
            duration,
        }
    }

    /// The underlying pages
    pub fn pages(&self) -> &PageSet {
        &self.pages
    }

    /// Records in page order
    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.pages.records()
    }

    /// Pages that failed, in page order
    pub fn failures(&self) -> impl Iterator<Item = (u32, &Error)> {
        self.pages.failures()
    }

    /// Last page the server reported, if the run stopped at `max_pages` before it
    pub fn truncated(&self) -> Option<u32> {
        self.truncated
    }

    /// True if any page failed or was skipped, meaning the records are a partial result
    pub fn is_partial(&self) -> bool {
        self.truncated.is_some() || self.failures().next().is_some()
    }

    /// Run statistics
    pub fn stats(&self) -> CollectStats {
        let pages_failed = self.failures().count();
        CollectStats {
            pages_fetched: self.pages.len() - pages_failed,
            pages_failed,
            records: self.records().count(),
            duration_ms: self.duration.as_millis() as u64,
        }
    }

    /// Consume into records, dropping failure details
    pub fn into_records(self) -> Vec<Record> {
        self.into_parts().0
    }

    /// Consume into records and failures
    pub fn into_parts(self) -> (Vec<Record>, Vec<PageFailure>) {
        let mut records = Vec::new();
        let mut failures = Vec::new();

        for page in self.pages.into_pages() {
            let number = page.number();
            match page.into_outcome() {
                PageOutcome::Fetched(page_records) => records.extend(page_records),
                PageOutcome::Failed(error) => failures.push(PageFailure {
                    page: number,
                    error,
                }),
                PageOutcome::Pending => {}
            }
        }

        (records, failures)
    }
}
