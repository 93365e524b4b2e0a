//! Tests for fetcher module

use super::*;
use crate::error::Error;
use crate::http::{HttpClient, HttpClientConfig};
use crate::query::{CardQuery, IssueQuery, IssueRef};
use crate::types::IssueState;
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> HttpClient {
    HttpClient::with_config(HttpClientConfig::builder().base_url(server.uri()).build()).unwrap()
}

fn link(server: &MockServer, next: u32, last: u32) -> String {
    format!(
        r#"<{uri}/repos/o/r/issues?page={next}>; rel="next", <{uri}/repos/o/r/issues?page={last}>; rel="last""#,
        uri = server.uri()
    )
}

#[tokio::test]
async fn test_issues_fetcher_sends_query_and_reads_links() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/o/r/issues"))
        .and(query_param("sort", "updated"))
        .and(query_param("direction", "desc"))
        .and(query_param("state", "closed"))
        .and(query_param("since", "2024-01-01T00:00:00Z"))
        .and(query_param("page", "1"))
        .and(header("Accept", "application/vnd.github+json"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("link", link(&server, 2, 4).as_str())
                .set_body_json(json!([{"number": 10}, {"number": 9}])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = GitHubIssuesFetcher::new(client_for(&server));
    let query = IssueQuery::new("o", "r", "2024-01-01T00:00:00Z", "", IssueState::Closed).unwrap();

    let response = fetcher.fetch(1, &query).await.unwrap();
    assert_eq!(response.records, vec![json!({"number": 10}), json!({"number": 9})]);
    assert_eq!(response.next_page, 2);
    assert_eq!(response.last_page, 4);
    assert_eq!(fetcher.describe(&query), "o/r");
}

#[tokio::test]
async fn test_issues_fetcher_without_link_is_last_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/o/r/issues"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let fetcher = GitHubIssuesFetcher::new(client_for(&server));
    let query = IssueQuery::new("o", "r", "", "", IssueState::Open).unwrap();

    let response = fetcher.fetch(1, &query).await.unwrap();
    assert!(response.records.is_empty());
    assert!(!response.has_next());
    assert_eq!(response.last_page, 0);
}

#[tokio::test]
async fn test_issues_fetcher_rejects_non_array_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/o/r/issues"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "nope"})))
        .mount(&server)
        .await;

    let fetcher = GitHubIssuesFetcher::new(client_for(&server));
    let query = IssueQuery::new("o", "r", "", "", IssueState::Open).unwrap();

    let err = fetcher.fetch(1, &query).await.unwrap_err();
    match err {
        Error::Decode { message } => assert!(message.contains("an object")),
        other => panic!("Expected Decode, got {other:?}"),
    }
}

#[tokio::test]
async fn test_issues_fetcher_propagates_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/o/missing/issues"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
        .mount(&server)
        .await;

    let fetcher = GitHubIssuesFetcher::new(client_for(&server));
    let query = IssueQuery::new("o", "missing", "", "", IssueState::Open).unwrap();

    let err = fetcher.fetch(1, &query).await.unwrap_err();
    assert!(matches!(err, Error::HttpStatus { status: 404, .. }));
}

#[tokio::test]
async fn test_cards_fetcher() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/projects/columns/77/cards"))
        .and(query_param("archived_state", "all"))
        .and(query_param("page", "2"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{"id": 1, "content_url": "https://x/issues/1"}])),
        )
        .mount(&server)
        .await;

    let fetcher = ProjectCardsFetcher::new(client_for(&server));
    let query = CardQuery::new(77);

    let response = fetcher.fetch(2, &query).await.unwrap();
    assert_eq!(response.records.len(), 1);
    assert_eq!(response.next_page, 0);
    assert_eq!(fetcher.describe(&query), "column 77");
}

#[tokio::test]
async fn test_get_issue_from_card_url() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/o/r/issues/3"))
        .and(header("Accept", "application/vnd.github+json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"number": 3, "title": "Bug"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = GitHubIssuesFetcher::new(client_for(&server));
    let issue = IssueRef::from_content_url("https://api.github.com/repos/o/r/issues/3").unwrap();

    let record = fetcher.get_issue(&issue).await.unwrap();
    assert_eq!(record, json!({"number": 3, "title": "Bug"}));
}

#[tokio::test]
async fn test_get_issue_missing() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/o/r/issues/404"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
        .mount(&server)
        .await;

    let fetcher = GitHubIssuesFetcher::new(client_for(&server));
    let issue = IssueRef::from_content_url("https://api.github.com/repos/o/r/issues/404").unwrap();

    let err = fetcher.get_issue(&issue).await.unwrap_err();
    assert!(matches!(err, Error::HttpStatus { status: 404, .. }));
}
