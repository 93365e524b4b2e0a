//! GitHub REST fetchers
//!
//! Both listings answer with a JSON array body and report pagination in the
//! `Link` header.

use super::Fetcher;
use crate::error::{Error, Result};
use crate::http::{HttpClient, RequestConfig};
use crate::pagination::{LinkPagination, PageResponse};
use crate::query::{CardQuery, IssueQuery, IssueRef};
use crate::types::Record;
use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

/// Public GitHub API root
pub const GITHUB_API_URL: &str = "https://api.github.com";

const GITHUB_ACCEPT: &str = "application/vnd.github+json";

/// Issues of one repository, most recently updated first
#[derive(Debug, Clone)]
pub struct GitHubIssuesFetcher {
    client: HttpClient,
}

impl GitHubIssuesFetcher {
    /// Create a fetcher over a configured client
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    /// Fetch a single issue
    pub async fn get_issue(&self, issue: &IssueRef) -> Result<Record> {
        let request = RequestConfig::new().header("Accept", GITHUB_ACCEPT);
        let record: Record = self
            .client
            .get_json_with_config(&issue.path(), request)
            .await?;
        debug!(
            "Fetched issue {}/{}#{}",
            issue.owner, issue.repo, issue.number
        );
        Ok(record)
    }
}

#[async_trait]
impl Fetcher for GitHubIssuesFetcher {
    type Query = IssueQuery;

    async fn fetch(&self, page: u32, query: &IssueQuery) -> Result<PageResponse> {
        let path = format!("/repos/{}/{}/issues", query.owner, query.repo);
        fetch_array_page(&self.client, &path, query.query_pairs(page)).await
    }

    fn describe(&self, query: &IssueQuery) -> String {
        query.resource()
    }
}

/// Cards of one classic project column
#[derive(Debug, Clone)]
pub struct ProjectCardsFetcher {
    client: HttpClient,
}

impl ProjectCardsFetcher {
    /// Create a fetcher over a configured client
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Fetcher for ProjectCardsFetcher {
    type Query = CardQuery;

    async fn fetch(&self, page: u32, query: &CardQuery) -> Result<PageResponse> {
        let path = format!("/projects/columns/{}/cards", query.column_id);
        fetch_array_page(&self.client, &path, query.query_pairs(page)).await
    }

    fn describe(&self, query: &CardQuery) -> String {
        query.resource()
    }
}

async fn fetch_array_page(
    client: &HttpClient,
    path: &str,
    query: Vec<(String, String)>,
) -> Result<PageResponse> {
    let request = RequestConfig::new()
        .header("Accept", GITHUB_ACCEPT)
        .queries(query);

    let response = client.get_with_config(path, request).await?;
    let links = LinkPagination::from_headers(response.headers());
    let body: Value = response.json().await.map_err(Error::Http)?;

    let records = into_records(body)?;
    debug!(
        "Fetched {} records from {} (next={}, last={})",
        records.len(),
        path,
        links.next(),
        links.last()
    );

    Ok(PageResponse::new(records, links.next(), links.last()))
}

fn into_records(body: Value) -> Result<Vec<Record>> {
    match body {
        Value::Array(records) => Ok(records),
        other => Err(Error::decode(format!(
            "expected a JSON array, got {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
