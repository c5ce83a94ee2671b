use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::Level;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct Args {
    /// Base URL of the upstream statistics site
    #[arg(long, env = "DOTABUFF_BASE_URL", default_value = "https://www.dotabuff.com")]
    pub base_url: String,

    /// Number of matches the upstream site serves per match list page
    #[arg(long, env = "DOTABUFF_PAGE_SIZE", default_value_t = 50)]
    pub page_size: usize,

    /// JSON file overriding the upstream base URL and page size
    #[arg(long)]
    pub config_file: Option<PathBuf>,

    /// Address the proxy listens on
    #[arg(long, default_value = "127.0.0.1:8000")]
    pub bind: SocketAddr,

    /// Upstream request timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Args {
    /// Level for the tracing subscriber, installed before any settings are loaded.
    pub fn max_level(&self) -> Level {
        self.log_level.parse().unwrap_or(Level::INFO)
    }
}
