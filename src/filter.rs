//! Client-side upper bound on record timestamps
//!
//! The listing endpoint accepts a `since` lower bound but has no matching
//! upper bound, so the upper bound is applied here after collection. The
//! lower bound is left to the server and is not checked again.

use crate::types::Record;
use chrono::{DateTime, Utc};

/// Field holding the last-update time of issues and cards
pub const UPDATED_AT: &str = "updated_at";

/// Keeps records whose timestamp is strictly before `to`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RangeFilter {
    to: Option<DateTime<Utc>>,
}

impl RangeFilter {
    /// Create a filter. `None` keeps every record.
    pub fn new(to: Option<DateTime<Utc>>) -> Self {
        Self { to }
    }

    /// The exclusive upper bound
    pub fn to(&self) -> Option<DateTime<Utc>> {
        self.to
    }

    /// Whether one record passes. With a bound set, records without a
    /// timestamp do not pass.
    pub fn accepts<T, F>(&self, record: &T, timestamp: F) -> bool
    where
        F: Fn(&T) -> Option<DateTime<Utc>>,
    {
        match self.to {
            None => true,
            Some(to) => timestamp(record).is_some_and(|ts| ts < to),
        }
    }

    /// Keep the records that pass, preserving order
    pub fn apply<T, F>(&self, records: Vec<T>, timestamp: F) -> Vec<T>
    where
        F: Fn(&T) -> Option<DateTime<Utc>>,
    {
        if self.to.is_none() {
            return records;
        }
        records
            .into_iter()
            .filter(|record| self.accepts(record, &timestamp))
            .collect()
    }
}

/// Read an RFC 3339 timestamp from a top-level string field of a JSON record
pub fn timestamp_field(record: &Record, field: &str) -> Option<DateTime<Utc>> {
    record
        .get(field)
        .and_then(|v| v.as_str())
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|ts| ts.with_timezone(&Utc))
}

/// `updated_at` of a JSON record
pub fn updated_at(record: &Record) -> Option<DateTime<Utc>> {
    timestamp_field(record, UPDATED_AT)
}

/// Keep records last updated strictly before `to`
pub fn filter_updated_before(records: Vec<Record>, to: Option<DateTime<Utc>>) -> Vec<Record> {
    RangeFilter::new(to).apply(records, updated_at)
}
