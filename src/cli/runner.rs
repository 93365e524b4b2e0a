//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::collector::{Collection, PaginatedCollector};
use crate::config::PagerConfig;
use crate::error::Result;
use crate::fetcher::{GitHubIssuesFetcher, ProjectCardsFetcher};
use crate::filter::filter_updated_before;
use crate::http::HttpClient;
use crate::query::{CardQuery, IssueQuery, IssueRef};
use crate::render::{render_card, render_issue};
use crate::types::{ArchivedState, IssueState, Record};
use std::io::{self, Write};
use tracing::{debug, info, warn};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command, writing records to stdout
    pub async fn run(&self) -> Result<()> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.run_with_output(&mut out).await
    }

    /// Run the CLI command, writing records to `out`
    pub async fn run_with_output<W: Write>(&self, out: &mut W) -> Result<()> {
        let config = self.resolve_config()?;

        match &self.cli.command {
            Commands::Issues {
                owner,
                repo,
                state,
                since,
                to,
            } => {
                self.issues(&config, owner, repo, *state, since, to, out)
                    .await
            }
            Commands::Cards {
                column_id,
                archived_state,
                resolve_issues,
            } => {
                self.cards(&config, *column_id, *archived_state, *resolve_issues, out)
                    .await
            }
        }
    }

    /// Config file (or defaults) with command-line overrides applied
    pub fn resolve_config(&self) -> Result<PagerConfig> {
        let mut config = match &self.cli.config {
            Some(path) => PagerConfig::load(path)?,
            None => PagerConfig::default(),
        };

        if let Some(base_url) = &self.cli.base_url {
            config.base_url.clone_from(base_url);
        }
        if let Some(concurrency) = self.cli.concurrency {
            config.max_concurrency = concurrency;
        }

        config.validate()?;
        Ok(config)
    }

    #[allow(clippy::too_many_arguments)]
    async fn issues<W: Write>(
        &self,
        config: &PagerConfig,
        owner: &str,
        repo: &str,
        state: IssueState,
        since: &str,
        to: &str,
        out: &mut W,
    ) -> Result<()> {
        // Timestamps are validated before any request goes out
        let query = IssueQuery::new(owner, repo, since, to, state)?.with_per_page(config.per_page);
        let upper_bound = query.to;

        let client = HttpClient::with_config(config.http_config())?;
        let collector = PaginatedCollector::new(GitHubIssuesFetcher::new(client))
            .with_config(config.collector_config());

        let collection = collector.collect(query).await?;
        let records = filter_updated_before(report_failures(collection), upper_bound);

        info!("{} issues after filtering", records.len());
        write_records(out, &records, self.cli.format, render_issue)
    }

    async fn cards<W: Write>(
        &self,
        config: &PagerConfig,
        column_id: i64,
        archived_state: ArchivedState,
        resolve_issues: bool,
        out: &mut W,
    ) -> Result<()> {
        let query = CardQuery::new(column_id).with_archived_state(archived_state);

        let client = HttpClient::with_config(config.http_config())?;
        let collector = PaginatedCollector::new(ProjectCardsFetcher::new(client.clone()))
            .with_config(config.collector_config());

        let cards = collector.collect_sequential(query).await?.into_records();
        if !resolve_issues {
            return write_records(out, &cards, self.cli.format, render_card);
        }

        let issues = resolve_card_issues(&GitHubIssuesFetcher::new(client), &cards).await;
        write_records(out, &issues, self.cli.format, render_issue)
    }
}

/// Fetch the issue behind every card that points at one. Note cards are
/// skipped; cards whose issue cannot be fetched are logged and skipped.
async fn resolve_card_issues(fetcher: &GitHubIssuesFetcher, cards: &[Record]) -> Vec<Record> {
    let mut issues = Vec::with_capacity(cards.len());

    for card in cards {
        let Some(content_url) = card.get("content_url").and_then(|v| v.as_str()) else {
            debug!("Skipping card without content: {}", card["id"]);
            continue;
        };

        let resolved = match IssueRef::from_content_url(content_url) {
            Ok(issue) => fetcher.get_issue(&issue).await,
            Err(e) => Err(e),
        };
        match resolved {
            Ok(issue) => issues.push(issue),
            Err(e) => warn!("Could not resolve {}: {}", content_url, e),
        }
    }

    issues
}

/// Log every failed page and keep the records that did arrive
fn report_failures(collection: Collection) -> Vec<Record> {
    if let Some(last) = collection.truncated() {
        warn!(
            "Output is partial: pages after {} of {} were not fetched",
            collection.pages().len(),
            last
        );
    }

    let (records, failures) = collection.into_parts();
    for failure in &failures {
        warn!("Page {} is missing from the output: {}", failure.page, failure.error);
    }
    if !failures.is_empty() {
        warn!(
            "Output is partial: {} page(s) could not be fetched",
            failures.len()
        );
    }
    records
}

fn write_records<W, F>(out: &mut W, records: &[Record], format: OutputFormat, render: F) -> Result<()>
where
    W: Write,
    F: Fn(&Record) -> String,
{
    for record in records {
        match format {
            OutputFormat::Json => writeln!(out, "{}", serde_json::to_string(record)?)?,
            OutputFormat::Pretty => writeln!(out, "{}", render(record))?,
        }
    }
    out.flush()?;
    Ok(())
}
