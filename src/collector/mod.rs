//! Collector module
//!
//! Assembles every page of a paginated listing into one ordered result.
//!
//! # Overview
//!
//! [`PaginatedCollector::collect`] fetches page 1 on the caller's task to
//! learn the last page number, then spawns one task per remaining page. A
//! semaphore caps how many of those fetches run at once. The collector awaits
//! every task before it returns, so the result never contains an unsettled
//! page. Only a page 1 failure aborts the run; later failures are attached to
//! the returned [`Collection`].
//!
//! [`PaginatedCollector::collect_sequential`] walks `next` links one page at
//! a time for listings where a wide fan-out is not wanted.

mod types;

pub use types::{CollectStats, Collection, CollectorConfig, PageFailure};

use crate::error::{Error, Result};
use crate::fetcher::Fetcher;
use crate::pagination::{Page, PageResponse, PageSet};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Collects every page of a listing through a [`Fetcher`]
pub struct PaginatedCollector<F: Fetcher> {
    fetcher: Arc<F>,
    config: CollectorConfig,
}

impl<F: Fetcher> PaginatedCollector<F> {
    /// Create a collector with default configuration
    pub fn new(fetcher: F) -> Self {
        Self::from_arc(Arc::new(fetcher))
    }

    /// Create a collector around a shared fetcher
    pub fn from_arc(fetcher: Arc<F>) -> Self {
        Self {
            fetcher,
            config: CollectorConfig::default(),
        }
    }

    /// Set collector configuration
    #[must_use]
    pub fn with_config(mut self, config: CollectorConfig) -> Self {
        self.config = config;
        self
    }

    /// Collector configuration
    pub fn config(&self) -> &CollectorConfig {
        &self.config
    }

    /// The fetcher
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Fetch page 1, then every page up to the reported last page concurrently.
    ///
    /// Fails only if page 1 fails. Failures of later pages are reported by
    /// [`Collection::failures`]. Pages past `max_pages` are not fetched; the
    /// cut is reported by [`Collection::truncated`].
    pub async fn collect(&self, query: F::Query) -> Result<Collection> {
        let started = Instant::now();
        let query = Arc::new(query);
        let resource = self.fetcher.describe(&query);
        let mut pages = PageSet::new();

        let first = self
            .fetcher
            .fetch(1, &query)
            .await
            .map_err(|e| Error::first_page(&resource, e))?;
        let (next, last) = (first.next_page, first.last_page);
        seed_first_page(&mut pages, first)?;

        // Page 1 is already tracked, so a server pointing next back at it is ignored
        let first_dispatched = next.max(2);
        if next == 0 || last < first_dispatched {
            debug!("{} has a single page", resource);
            return Ok(finish(&resource, pages, None, started));
        }

        let last_dispatched = last.min(self.config.max_pages);
        let truncated = (last_dispatched < last).then_some(last);
        if truncated.is_some() {
            warn!(
                "{} reports {} pages, fetching only the first {}",
                resource, last, self.config.max_pages
            );
        }

        debug!(
            "Dispatching pages {}..={} of {} (max {} in flight)",
            first_dispatched, last_dispatched, resource, self.config.max_concurrency
        );

        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrency.max(1)));
        let mut handles: Vec<(u32, JoinHandle<Result<PageResponse>>)> =
            Vec::with_capacity(last_dispatched.saturating_sub(first_dispatched) as usize + 1);

        for number in first_dispatched..=last_dispatched {
            pages.add(Page::new(number))?;
            handles.push((number, self.spawn_fetch(number, &query, &semaphore)));
        }

        for (number, handle) in handles {
            let result = match handle.await {
                Ok(result) => result,
                Err(join_error) => Err(Error::Task {
                    page: number,
                    message: join_error.to_string(),
                }),
            };
            if let Err(ref err) = result {
                warn!("Page {} of {} failed: {}", number, resource, err);
            }
            pages.settle(number, result)?;
        }

        if !pages.is_complete() {
            return Err(Error::pagination(format!(
                "{resource} finished with unsettled pages"
            )));
        }

        Ok(finish(&resource, pages, truncated, started))
    }

    /// Follow `next` links one page at a time. Any failure aborts the run.
    pub async fn collect_sequential(&self, query: F::Query) -> Result<Collection> {
        let started = Instant::now();
        let resource = self.fetcher.describe(&query);
        let mut pages = PageSet::new();
        let mut number = 1;

        loop {
            if pages.len() >= self.config.max_pages as usize {
                return Err(Error::pagination(format!(
                    "{resource} exceeded the limit of {} pages",
                    self.config.max_pages
                )));
            }

            debug!("Fetching page {} of {}", number, resource);
            let response = match self.fetcher.fetch(number, &query).await {
                Ok(response) => response,
                Err(err) if number == 1 => return Err(Error::first_page(&resource, err)),
                Err(err) => return Err(Error::fetch(number, err)),
            };

            let next = response.next_page;
            let mut page = Page::new(number);
            page.populate(Ok(response));
            pages.add(page)?;

            if next == 0 {
                break;
            }
            if next <= number {
                return Err(Error::pagination(format!(
                    "{resource} page {number} points back to page {next}"
                )));
            }
            number = next;
        }

        Ok(finish(&resource, pages, None, started))
    }

    fn spawn_fetch(
        &self,
        number: u32,
        query: &Arc<F::Query>,
        semaphore: &Arc<Semaphore>,
    ) -> JoinHandle<Result<PageResponse>> {
        let fetcher = Arc::clone(&self.fetcher);
        let query = Arc::clone(query);
        let semaphore = Arc::clone(semaphore);

        tokio::spawn(async move {
            let _permit = semaphore.acquire_owned().await.map_err(|_| Error::Task {
                page: number,
                message: "semaphore closed".to_string(),
            })?;
            fetcher.fetch(number, &query).await
        })
    }
}

fn seed_first_page(pages: &mut PageSet, response: PageResponse) -> Result<()> {
    let mut page = Page::new(1);
    page.populate(Ok(response));
    pages.add(page)
}

fn finish(
    resource: &str,
    pages: PageSet,
    truncated: Option<u32>,
    started: Instant,
) -> Collection {
    let collection = Collection::new(pages, truncated, started.elapsed());
    let stats = collection.stats();
    info!(
        "Collected {} records from {} pages of {} in {}ms ({} failed)",
        stats.records, stats.pages_fetched, resource, stats.duration_ms, stats.pages_failed
    );
    collection
}

impl<F: Fetcher> std::fmt::Debug for PaginatedCollector<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaginatedCollector")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
