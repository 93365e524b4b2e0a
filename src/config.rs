//! Configuration
//!
//! Settings for the HTTP client and the collector, loadable from a YAML
//! file. Every field has a default, so an empty file is a valid config.

use crate::collector::CollectorConfig;
use crate::error::{Error, Result};
use crate::fetcher::GITHUB_API_URL;
use crate::http::{HttpClientConfig, RateLimiterConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagerConfig {
    /// API root
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// User agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Maximum page fetches in flight at once
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,

    /// Upper bound on pages per collection
    #[serde(default = "default_max_pages")]
    pub max_pages: u32,

    /// Page size; the server default applies when unset
    #[serde(default)]
    pub per_page: Option<u32>,

    /// Optional request pacing
    #[serde(default)]
    pub rate_limit: Option<RateLimiterConfig>,
}

impl Default for PagerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: default_user_agent(),
            timeout_seconds: default_timeout(),
            max_concurrency: default_max_concurrency(),
            max_pages: default_max_pages(),
            per_page: None,
            rate_limit: None,
        }
    }
}

fn default_base_url() -> String {
    GITHUB_API_URL.to_string()
}

fn default_user_agent() -> String {
    format!("issue-pager/{}", env!("CARGO_PKG_VERSION"))
}

fn default_timeout() -> u64 {
    30
}

fn default_max_concurrency() -> usize {
    CollectorConfig::default().max_concurrency
}

fn default_max_pages() -> u32 {
    CollectorConfig::default().max_pages
}

impl PagerConfig {
    /// Load and validate a YAML config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::config(format!("Config file '{}' not found", path.display()))
            } else {
                Error::Io(e)
            }
        })?;
        Self::from_yaml(&content)
            .map_err(|e| Error::config(format!("Invalid config '{}': {e}", path.display())))
    }

    /// Parse and validate YAML
    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: Self = if content.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(content)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject values the collector cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(Error::invalid_value("base_url", "must not be empty"));
        }
        url::Url::parse(&self.base_url)
            .map_err(|e| Error::invalid_value("base_url", e.to_string()))?;
        if self.max_concurrency == 0 {
            return Err(Error::invalid_value("max_concurrency", "must be at least 1"));
        }
        if self.max_pages == 0 {
            return Err(Error::invalid_value("max_pages", "must be at least 1"));
        }
        if self.timeout_seconds == 0 {
            return Err(Error::invalid_value("timeout_seconds", "must be at least 1"));
        }
        if let Some(0) = self.per_page {
            return Err(Error::invalid_value("per_page", "must be at least 1"));
        }
        Ok(())
    }

    /// HTTP client settings
    pub fn http_config(&self) -> HttpClientConfig {
        let builder = HttpClientConfig::builder()
            .base_url(&self.base_url)
            .timeout(Duration::from_secs(self.timeout_seconds))
            .user_agent(&self.user_agent);

        let builder = match self.rate_limit {
            Some(rate_limit) => builder.rate_limit(rate_limit),
            None => builder.no_rate_limit(),
        };
        builder.build()
    }

    /// Collector settings
    pub fn collector_config(&self) -> CollectorConfig {
        CollectorConfig::default()
            .with_max_concurrency(self.max_concurrency)
            .with_max_pages(self.max_pages)
    }
}
