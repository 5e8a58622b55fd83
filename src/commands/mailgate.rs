//! Mail-gateway send: wrap input in a host/sender header and post it.
//!
//! This backs the `trixmail` binary, including its sendmail-alias mode.

use std::path::PathBuf;

use tracing::{debug, info};

use crate::config::Config;
use crate::error::Result;
use crate::matrix::MatrixClient;
use crate::message;

#[derive(Debug, Default, Clone)]
pub struct MailArgs {
    pub config_path: Option<PathBuf>,
    /// Message body; empty, absent or `"-"` means "read all of stdin".
    pub message: Option<String>,
    /// Sender shown in the header (`-F`); `undefined` when absent.
    pub sender: Option<String>,
    /// Destination addresses from the sendmail command line. Accepted for
    /// compatibility only; the room always comes from the config.
    pub destinations: Vec<String>,
}

/// CLI entry point for the `trixmail` binary.
pub async fn run(args: MailArgs) -> Result<()> {
    let config = Config::load(args.config_path.as_deref())?;
    let client = MatrixClient::new(&config.server, &config.username, &config.token)?;

    let lines: Vec<String> = match args.message.as_deref() {
        Some(text) if !text.is_empty() && text != "-" => {
            text.lines().map(str::to_string).collect()
        }
        _ => message::read_stdin_lines()?,
    };

    if !args.destinations.is_empty() {
        debug!(destinations = ?args.destinations, "ignoring sendmail destinations");
    }

    let msg = message::compose_mail(&lines, args.sender.as_deref());
    let event_id = client.send_room_message(&config.room, &msg).await?;
    info!(%event_id, room = %config.room, lines = lines.len(), "mail message sent");

    Ok(())
}
