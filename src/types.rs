//! Common types used throughout issue-pager
//!
//! Shared type definitions and small value enums used by the query,
//! fetcher and CLI modules.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Type Aliases
// ============================================================================

/// A single fetched record. The pagination core never looks inside it.
pub type Record = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, serde_json::Value>;

// ============================================================================
// Issue State
// ============================================================================

/// Server-side state filter for issue listings
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum IssueState {
    /// Only open issues
    #[default]
    Open,
    /// Only closed issues
    Closed,
    /// Open and closed issues
    All,
}

impl IssueState {
    /// Query string value
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
            Self::All => "all",
        }
    }
}

impl fmt::Display for IssueState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Archived State
// ============================================================================

/// Archive filter for project card listings
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum ArchivedState {
    /// Archived and live cards
    #[default]
    All,
    /// Only archived cards
    Archived,
    /// Only live cards
    #[value(name = "not_archived")]
    NotArchived,
}

impl ArchivedState {
    /// Query string value
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Archived => "archived",
            Self::NotArchived => "not_archived",
        }
    }
}

impl fmt::Display for ArchivedState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
