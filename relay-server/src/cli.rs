use clap::Parser;
use std::{net::SocketAddr, path::PathBuf};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-relay", version, about = "Realtime weather relay")]
pub struct Cli {
    /// Path to the TOML configuration file.
    #[arg(long, env = "WEATHER_RELAY_CONFIG")]
    pub config: PathBuf,

    /// Socket address to bind the HTTP listener on.
    #[arg(long, env = "WEATHER_RELAY_ADDRESS", default_value = "127.0.0.1:8080")]
    pub address: SocketAddr,
}
