//! Page tracking types
//!
//! A [`Page`] carries the outcome of one fetch; a [`PageSet`] holds every page
//! of one collection run, keyed by page number.

use crate::error::{Error, Result};
use crate::types::Record;
use std::collections::BTreeMap;

/// What a fetcher hands back for one page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageResponse {
    /// Records in server order
    pub records: Vec<Record>,
    /// Next page number, 0 if there is none
    pub next_page: u32,
    /// Last page number, 0 if unknown
    pub last_page: u32,
}

impl PageResponse {
    /// Create a response
    pub fn new(records: Vec<Record>, next_page: u32, last_page: u32) -> Self {
        Self {
            records,
            next_page,
            last_page,
        }
    }

    /// A response with no further pages
    pub fn single(records: Vec<Record>) -> Self {
        Self::new(records, 0, 0)
    }

    /// True when the response points at a page to fetch after this one
    pub fn has_next(&self) -> bool {
        self.next_page != 0
    }
}

/// Settlement state of a page
#[derive(Debug, Default)]
pub enum PageOutcome {
    /// Fetch not settled yet
    #[default]
    Pending,
    /// Fetched successfully
    Fetched(Vec<Record>),
    /// Fetch failed
    Failed(Error),
}

/// One page of a paginated listing
#[derive(Debug)]
pub struct Page {
    number: u32,
    /// Next page number reported with this page
    pub next_page: u32,
    /// Last page number reported with this page
    pub last_page: u32,
    outcome: PageOutcome,
}

impl Page {
    /// Create a pending page
    pub fn new(number: u32) -> Self {
        Self {
            number,
            next_page: 0,
            last_page: 0,
            outcome: PageOutcome::Pending,
        }
    }

    /// 1-based page number
    pub fn number(&self) -> u32 {
        self.number
    }

    /// Record the result of fetching this page
    pub fn populate(&mut self, result: Result<PageResponse>) {
        self.outcome = match result {
            Ok(response) => {
                self.next_page = response.next_page;
                self.last_page = response.last_page;
                PageOutcome::Fetched(response.records)
            }
            Err(err) => PageOutcome::Failed(err),
        };
    }

    /// True once the fetch has settled, successfully or not
    pub fn is_fetched(&self) -> bool {
        !matches!(self.outcome, PageOutcome::Pending)
    }

    /// True if the fetch settled successfully
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, PageOutcome::Fetched(_))
    }

    /// Records, available only after a successful fetch
    pub fn records(&self) -> Option<&[Record]> {
        match &self.outcome {
            PageOutcome::Fetched(records) => Some(records),
            _ => None,
        }
    }

    /// Failure cause, if the fetch failed
    pub fn error(&self) -> Option<&Error> {
        match &self.outcome {
            PageOutcome::Failed(err) => Some(err),
            _ => None,
        }
    }

    /// Settlement state
    pub fn outcome(&self) -> &PageOutcome {
        &self.outcome
    }

    pub(crate) fn into_outcome(self) -> PageOutcome {
        self.outcome
    }
}

/// All pages of one collection run, ordered by page number
#[derive(Debug, Default)]
pub struct PageSet {
    pages: BTreeMap<u32, Page>,
}

impl PageSet {
    /// Create an empty page set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a page. Each page number may be added once.
    pub fn add(&mut self, page: Page) -> Result<()> {
        let number = page.number();
        if self.pages.contains_key(&number) {
            return Err(Error::DuplicatePage { page: number });
        }
        self.pages.insert(number, page);
        Ok(())
    }

    /// Record the fetch result of a tracked page
    pub fn settle(&mut self, number: u32, result: Result<PageResponse>) -> Result<()> {
        let page = self
            .pages
            .get_mut(&number)
            .ok_or(Error::UnknownPage { page: number })?;
        page.populate(result);
        Ok(())
    }

    /// True iff every page has settled
    pub fn is_complete(&self) -> bool {
        self.pages.values().all(Page::is_fetched)
    }

    /// Look up a page by number
    pub fn get(&self, number: u32) -> Option<&Page> {
        self.pages.get(&number)
    }

    /// Pages in ascending page order
    pub fn pages(&self) -> impl Iterator<Item = &Page> {
        self.pages.values()
    }

    /// Number of tracked pages
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// True if no page is tracked
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Records of successfully fetched pages, in page order then server order
    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.pages
            .values()
            .filter_map(Page::records)
            .flat_map(|records| records.iter())
    }

    /// Pages whose fetch failed
    pub fn failures(&self) -> impl Iterator<Item = (u32, &Error)> {
        self.pages
            .values()
            .filter_map(|page| page.error().map(|err| (page.number(), err)))
    }

    /// Consume the set, yielding every page in order
    pub fn into_pages(self) -> impl Iterator<Item = Page> {
        self.pages.into_values()
    }
}
