//! Pagination module
//!
//! Page bookkeeping for one collection run and `Link` header parsing.
//!
//! # Overview
//!
//! A collection run tracks every page it dispatches in a [`PageSet`]. Pages
//! are keyed by number, so the merged record order is always ascending page
//! order no matter which fetch finishes first. Each [`Page`] settles exactly
//! once, either with its records or with the error that stopped it.

mod link;
mod types;

pub use link::{parse_link_header, LinkPagination};
pub use types::{Page, PageOutcome, PageResponse, PageSet};
