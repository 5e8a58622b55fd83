//! trixmail - mail-gateway front end.
//!
//! Under its own name it takes `-c`/`-m`/`-F`. Invoked through a link whose
//! name ends in `sendmail` it additionally accepts the classic sendmail
//! flags, so existing tools can pipe mail into a Matrix room unmodified.

use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use trixping::commands::mailgate::{self, MailArgs};

#[derive(Parser)]
#[command(name = "trixmail")]
#[command(about = "Post piped input to a Matrix room", long_about = None)]
#[command(version)]
struct Cli {
    /// Full path to the config file. Default paths are:
    /// ~/.config/trixping.json, then /etc/trixping.json
    #[arg(short = 'c', value_name = "FILE")]
    config: Option<PathBuf>,

    /// Message to be sent. Empty or "-" reads all of STDIN
    #[arg(short = 'm', value_name = "MESSAGE")]
    message: Option<String>,

    /// Sender name shown in the message header
    #[arg(short = 'F', value_name = "SENDER")]
    sender: Option<String>,
}

#[derive(Parser)]
#[command(name = "sendmail")]
#[command(about = "sendmail-compatible Matrix mail gateway", long_about = None)]
#[command(version)]
struct SendmailCli {
    /// Full path to the config file
    #[arg(short = 'c', value_name = "FILE")]
    config: Option<PathBuf>,

    /// Message to be sent. Empty or "-" reads all of STDIN
    #[arg(short = 'm', value_name = "MESSAGE")]
    message: Option<String>,

    /// Sender name shown in the message header
    #[arg(short = 'F', value_name = "SENDER")]
    sender: Option<String>,

    /// Ignore dots alone on lines (accepted for compatibility)
    #[arg(short = 'i')]
    ignore_dots: bool,

    /// Body type (accepted for compatibility)
    #[arg(short = 'B', value_name = "TYPE")]
    body_type: Option<String>,

    /// Set mail option (accepted for compatibility)
    #[arg(short = 'o', value_name = "OPTION")]
    options: Vec<String>,

    /// Destination addresses; the room always comes from the config
    #[arg(value_name = "USER")]
    destinations: Vec<String>,
}

fn invoked_as_sendmail() -> bool {
    std::env::args()
        .next()
        .map(PathBuf::from)
        .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        .map(|name| name.ends_with("sendmail"))
        .unwrap_or(false)
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

    let args = if invoked_as_sendmail() {
        let cli = SendmailCli::parse();
        debug!(
            ignore_dots = cli.ignore_dots,
            body_type = ?cli.body_type,
            options = ?cli.options,
            "sendmail compatibility flags accepted"
        );
        MailArgs {
            config_path: cli.config,
            message: cli.message,
            sender: cli.sender,
            destinations: cli.destinations,
        }
    } else {
        let cli = Cli::parse();
        MailArgs {
            config_path: cli.config,
            message: cli.message,
            sender: cli.sender,
            destinations: Vec::new(),
        }
    };

    if let Err(e) = mailgate::run(args).await {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
