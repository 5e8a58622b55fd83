//! trixping CLI - main entry point
//!
//! Posts one message to the configured Matrix room.

use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use trixping::commands;

#[derive(Parser)]
#[command(name = "trixping")]
#[command(about = "Post a message to a Matrix room", long_about = None)]
#[command(version)]
struct Cli {
    /// Full path to the config file. Default paths are:
    /// ~/.config/trixping.json, then /etc/trixping.json
    #[arg(short = 'c', value_name = "FILE")]
    config: Option<PathBuf>,

    /// HTML message to be sent. Use "-" to use STDIN as input
    #[arg(short = 'm', value_name = "MESSAGE", default_value = "")]
    message: String,
}

#[tokio::main]
async fn main() {
    // Load .env for local development
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("trixping=info")),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = commands::ping::run(cli.config.as_deref(), &cli.message).await {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
