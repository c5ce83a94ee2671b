use crate::api::AppState;
use crate::config::cli::Args;
use crate::config::Config;
use crate::error::Result;
use crate::infrastructure::DotabuffClient;
use crate::services::DotabuffService;
use clap::Parser;
use std::sync::Arc;
use tracing::info;

mod api;
mod config;
mod domain;
mod error;
mod infrastructure;
mod services;
mod utils;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(args.max_level())
        .init();
    let config = Config::from_args(args)?;

    info!(
        base_url = %config.upstream.base_url,
        page_size = config.upstream.page_size,
        "Starting proxy"
    );

    let client = DotabuffClient::new(config.http_client.clone(), &config.upstream.base_url);
    let service = DotabuffService::new(client, config.upstream.page_size);

    api::serve(config.args.bind, AppState::new(Arc::new(service))).await
}
