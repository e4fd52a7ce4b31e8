//! Binary crate for the weather relay HTTP service.
//!
//! This crate focuses on:
//! - Parsing CLI arguments and loading configuration
//! - Wiring the TLS context, downstream client, and retrieval service
//! - Serving the inbound HTTP boundary

use anyhow::Context;
use clap::Parser;
use std::sync::Arc;

use relay_core::{DownstreamClient, RealtimeWeatherService, RelayConfig, TlsContext};

mod cli;
mod routes;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let args = cli::Cli::parse();

    let config = RelayConfig::load(&args.config)?;

    let tls = TlsContext::shared(&config.downstream)
        .context("Failed to initialize the client TLS context")?;
    let client = DownstreamClient::new(&config.downstream, tls)
        .context("Failed to build the downstream client")?;
    let service = Arc::new(RealtimeWeatherService::new(Box::new(client)));

    log::info!("weather relay listening on {}", args.address);
    routes::run(args.address, service).await;

    Ok(())
}
