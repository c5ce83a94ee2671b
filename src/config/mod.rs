use crate::config::cli::Args;
use crate::error::{ProxyError, Result};
use reqwest::Client;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub(crate) mod cli;

/// The site rejects requests that do not look like they come from a browser.
const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 6.1; WOW64; rv:20.0) Gecko/20100101 Firefox/20.0";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpstreamSettings {
    pub base_url: String,
    pub page_size: usize,
}

impl UpstreamSettings {
    pub fn load(path: &Path) -> Result<Self> {
        let settings: Self = serde_json::from_str(&std::fs::read_to_string(path)?)?;
        settings.validate()
    }

    fn validate(self) -> Result<Self> {
        if self.base_url.trim().is_empty() {
            return Err(ProxyError::Validation(
                "upstream base URL must not be empty".to_string(),
            ));
        }
        if self.page_size == 0 {
            return Err(ProxyError::Validation(
                "upstream page size must be positive".to_string(),
            ));
        }
        Ok(self)
    }
}

pub struct Config {
    pub args: Args,
    pub upstream: UpstreamSettings,
    pub http_client: Client,
}

impl Config {
    pub fn from_args(args: Args) -> Result<Self> {
        let upstream = match &args.config_file {
            Some(path) => {
                info!("Loading upstream settings from {}", path.display());
                UpstreamSettings::load(path)?
            }
            None => UpstreamSettings {
                base_url: args.base_url.clone(),
                page_size: args.page_size,
            }
            .validate()?,
        };

        let http_client = Client::builder()
            .timeout(Duration::from_secs(args.timeout_secs))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            args,
            upstream,
            http_client,
        })
    }
}
