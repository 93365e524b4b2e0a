//! Link header parsing (RFC 5988)
//!
//! GitHub reports pagination through the `Link` response header:
//! `<https://api.github.com/repos/o/r/issues?page=2>; rel="next", <...&page=5>; rel="last"`

use reqwest::header::HeaderMap;

/// Page numbers found in a `Link` header
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkPagination {
    /// Page number of the `rel="next"` link
    pub next_page: Option<u32>,
    /// Page number of the `rel="last"` link
    pub last_page: Option<u32>,
}

impl LinkPagination {
    /// Read pagination from response headers. Missing header means no more pages.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        headers
            .get(reqwest::header::LINK)
            .and_then(|v| v.to_str().ok())
            .map(parse_link_header)
            .unwrap_or_default()
    }

    /// Next page, 0 when absent
    pub fn next(&self) -> u32 {
        self.next_page.unwrap_or(0)
    }

    /// Last page, 0 when absent
    pub fn last(&self) -> u32 {
        self.last_page.unwrap_or(0)
    }
}

/// Parse a Link header into next/last page numbers
pub fn parse_link_header(header: &str) -> LinkPagination {
    let mut info = LinkPagination::default();

    for part in header.split(',') {
        let mut url = None;
        let mut rel = None;

        for segment in part.trim().split(';') {
            let segment = segment.trim();
            if segment.starts_with('<') && segment.ends_with('>') {
                url = Some(&segment[1..segment.len() - 1]);
            } else if let Some(stripped) = segment.strip_prefix("rel=") {
                rel = Some(stripped.trim_matches('"').trim_matches('\''));
            }
        }

        let (Some(url), Some(rel)) = (url, rel) else {
            continue;
        };
        let Some(page) = page_from_url(url) else {
            continue;
        };

        // A rel value may list several space-separated relation types
        for rel_type in rel.split_whitespace() {
            match rel_type {
                "next" => info.next_page = Some(page),
                "last" => info.last_page = Some(page),
                _ => {}
            }
        }
    }

    info
}

/// Extract the `page` query parameter from a URL
fn page_from_url(raw: &str) -> Option<u32> {
    let parsed = url::Url::parse(raw).ok()?;
    parsed
        .query_pairs()
        .find(|(key, _)| key == "page")
        .and_then(|(_, value)| value.parse().ok())
}
