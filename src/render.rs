//! One-line text renderings of issues and project cards

use crate::filter::updated_at;
use crate::types::Record;
use chrono::{DateTime, Utc};

/// RFC 822 style: `02 Jan 06 15:04 UTC`
const RFC822: &str = "%d %b %y %H:%M %Z";

fn short_date(ts: Option<DateTime<Utc>>) -> String {
    ts.map(|ts| ts.format(RFC822).to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn str_field<'a>(record: &'a Record, field: &str) -> &'a str {
    record.get(field).and_then(|v| v.as_str()).unwrap_or("")
}

/// `#number, updated, state, author, title`
pub fn render_issue(issue: &Record) -> String {
    let number = issue.get("number").and_then(|v| v.as_u64()).unwrap_or(0);
    let login = issue
        .get("user")
        .map(|user| str_field(user, "login"))
        .unwrap_or("");

    format!(
        "#{}, {}, {}, {}, {}",
        number,
        short_date(updated_at(issue)),
        str_field(issue, "state"),
        login,
        str_field(issue, "title"),
    )
}

/// `content_url, last updated: updated`
pub fn render_card(card: &Record) -> String {
    let target = match str_field(card, "content_url") {
        "" => str_field(card, "note"),
        url => url,
    };
    format!("{}, last updated: {}", target, short_date(updated_at(card)))
}
