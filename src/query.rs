//! Query parameters
//!
//! Caller-owned parameters handed to a [`Fetcher`](crate::fetcher::Fetcher).
//! Timestamps are validated here, before any network activity.

use crate::error::{Error, Result};
use crate::types::{ArchivedState, IssueState};
use chrono::{DateTime, SecondsFormat, Utc};

/// Parse an optional RFC 3339 timestamp. An empty string means "unset".
pub fn parse_timestamp(field: &str, value: &str) -> Result<Option<DateTime<Utc>>> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }

    DateTime::parse_from_rfc3339(value)
        .map(|ts| Some(ts.with_timezone(&Utc)))
        .map_err(|source| Error::InvalidTimestamp {
            field: field.to_string(),
            value: value.to_string(),
            source,
        })
}

/// Format a timestamp the way the API expects it in query strings
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Parameters for listing the issues of one repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueQuery {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// State filter
    pub state: IssueState,
    /// Lower bound on `updated_at`, applied by the server
    pub since: Option<DateTime<Utc>>,
    /// Upper bound on `updated_at`, applied client-side only
    pub to: Option<DateTime<Utc>>,
    /// Page size; the server default applies when unset
    pub per_page: Option<u32>,
}

impl IssueQuery {
    /// Sort key sent with every request
    pub const SORT: &'static str = "updated";
    /// Sort direction sent with every request
    pub const DIRECTION: &'static str = "desc";

    /// Build a query from raw CLI-style inputs.
    ///
    /// `since` and `to` are RFC 3339 strings; empty strings leave the bound unset.
    pub fn new(
        owner: impl Into<String>,
        repo: impl Into<String>,
        since: &str,
        to: &str,
        state: IssueState,
    ) -> Result<Self> {
        let owner = owner.into();
        let repo = repo.into();
        if owner.is_empty() || repo.is_empty() {
            return Err(Error::config("owner and repo are required"));
        }

        Ok(Self {
            owner,
            repo,
            state,
            since: parse_timestamp("since", since)?,
            to: parse_timestamp("to", to)?,
            per_page: None,
        })
    }

    /// Set the page size
    #[must_use]
    pub fn with_per_page(mut self, per_page: Option<u32>) -> Self {
        self.per_page = per_page;
        self
    }

    /// `owner/repo`
    pub fn resource(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }

    /// Query string pairs for one page
    pub fn query_pairs(&self, page: u32) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("sort".to_string(), Self::SORT.to_string()),
            ("direction".to_string(), Self::DIRECTION.to_string()),
            ("state".to_string(), self.state.as_str().to_string()),
        ];
        if let Some(since) = &self.since {
            pairs.push(("since".to_string(), format_timestamp(since)));
        }
        if let Some(per_page) = self.per_page {
            pairs.push(("per_page".to_string(), per_page.to_string()));
        }
        pairs.push(("page".to_string(), page.to_string()));
        pairs
    }
}

/// Parameters for listing the cards of one project column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardQuery {
    /// Project column id
    pub column_id: i64,
    /// Archive filter
    pub archived_state: ArchivedState,
}

impl CardQuery {
    /// Create a card query for a column
    pub fn new(column_id: i64) -> Self {
        Self {
            column_id,
            archived_state: ArchivedState::default(),
        }
    }

    /// Set the archive filter
    #[must_use]
    pub fn with_archived_state(mut self, archived_state: ArchivedState) -> Self {
        self.archived_state = archived_state;
        self
    }

    /// `column N`
    pub fn resource(&self) -> String {
        format!("column {}", self.column_id)
    }

    /// Query string pairs for one page
    pub fn query_pairs(&self, page: u32) -> Vec<(String, String)> {
        vec![
            (
                "archived_state".to_string(),
                self.archived_state.as_str().to_string(),
            ),
            ("page".to_string(), page.to_string()),
        ]
    }
}

/// One issue addressed by owner, repository and number
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueRef {
    /// Repository owner
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Issue number
    pub number: u64,
}

impl IssueRef {
    /// Read an issue reference from a project card's `content_url`.
    ///
    /// The host and any path prefix before `/repos/` are ignored, so
    /// Enterprise URLs such as `https://ghe.example.com/api/v3/repos/o/r/issues/3`
    /// resolve against the configured API root.
    pub fn from_content_url(content_url: &str) -> Result<Self> {
        let not_an_issue = || Error::decode(format!("'{content_url}' is not an issue URL"));

        let url = url::Url::parse(content_url).map_err(|_| not_an_issue())?;
        let segments: Vec<&str> = url
            .path_segments()
            .map(|segments| segments.filter(|s| !s.is_empty()).collect())
            .unwrap_or_default();

        let start = segments
            .iter()
            .rposition(|s| *s == "repos")
            .ok_or_else(not_an_issue)?;
        match segments[start + 1..] {
            [owner, repo, "issues", number] => Ok(Self {
                owner: owner.to_string(),
                repo: repo.to_string(),
                number: number.parse().map_err(|_| not_an_issue())?,
            }),
            _ => Err(not_an_issue()),
        }
    }

    /// API path of the issue
    pub fn path(&self) -> String {
        format!("/repos/{}/{}/issues/{}", self.owner, self.repo, self.number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_timestamp_empty_is_unset() {
        assert_eq!(parse_timestamp("since", "").unwrap(), None);
        assert_eq!(parse_timestamp("since", "   ").unwrap(), None);
    }

    #[test]
    fn test_parse_timestamp_normalizes_to_utc() {
        let ts = parse_timestamp("to", "2024-03-01T12:00:00+02:00")
            .unwrap()
            .unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_timestamp_reports_field() {
        let err = parse_timestamp("to", "yesterday").unwrap_err();
        assert!(err.is_config());
        let message = err.to_string();
        assert!(message.contains("`to`"));
        assert!(message.contains("yesterday"));
    }

    #[test]
    fn test_issue_query_rejects_bad_since() {
        let err = IssueQuery::new("o", "r", "2024-13-01", "", IssueState::Open).unwrap_err();
        assert!(matches!(err, Error::InvalidTimestamp { ref field, .. } if field == "since"));
    }

    #[test]
    fn test_issue_query_requires_resource() {
        let err = IssueQuery::new("", "r", "", "", IssueState::Open).unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_issue_query_pairs() {
        let query = IssueQuery::new(
            "rust-lang",
            "rust",
            "2024-01-01T00:00:00Z",
            "2024-02-01T00:00:00Z",
            IssueState::All,
        )
        .unwrap()
        .with_per_page(Some(50));

        assert_eq!(query.resource(), "rust-lang/rust");
        assert_eq!(
            query.query_pairs(3),
            vec![
                ("sort".to_string(), "updated".to_string()),
                ("direction".to_string(), "desc".to_string()),
                ("state".to_string(), "all".to_string()),
                ("since".to_string(), "2024-01-01T00:00:00Z".to_string()),
                ("per_page".to_string(), "50".to_string()),
                ("page".to_string(), "3".to_string()),
            ]
        );
    }

    #[test]
    fn test_upper_bound_is_not_sent() {
        let query = IssueQuery::new("o", "r", "", "2024-02-01T00:00:00Z", IssueState::Open)
            .unwrap();
        assert!(query.to.is_some());
        assert!(query.query_pairs(1).iter().all(|(k, _)| k != "to"));
    }

    #[test]
    fn test_card_query_pairs() {
        let query = CardQuery::new(42).with_archived_state(ArchivedState::Archived);
        assert_eq!(query.resource(), "column 42");
        assert_eq!(
            query.query_pairs(1),
            vec![
                ("archived_state".to_string(), "archived".to_string()),
                ("page".to_string(), "1".to_string()),
            ]
        );
    }

    #[test]
    fn test_issue_ref_from_content_url() {
        let issue =
            IssueRef::from_content_url("https://api.github.com/repos/rust-lang/rust/issues/1234")
                .unwrap();
        assert_eq!(
            issue,
            IssueRef {
                owner: "rust-lang".to_string(),
                repo: "rust".to_string(),
                number: 1234,
            }
        );
        assert_eq!(issue.path(), "/repos/rust-lang/rust/issues/1234");
    }

    #[test]
    fn test_issue_ref_ignores_api_prefix() {
        let issue =
            IssueRef::from_content_url("https://ghe.example.com/api/v3/repos/o/r/issues/3/")
                .unwrap();
        assert_eq!(issue.path(), "/repos/o/r/issues/3");
    }

    #[test]
    fn test_issue_ref_rejects_other_urls() {
        for url in [
            "https://api.github.com/repos/o/r/pulls/3",
            "https://api.github.com/repos/o/r/issues/three",
            "https://api.github.com/users/octocat",
            "not a url",
        ] {
            let err = IssueRef::from_content_url(url).unwrap_err();
            assert!(matches!(err, Error::Decode { .. }), "{url}");
        }
    }
}
