//! Send one message to the configured room, as-is.

use std::path::Path;

use tracing::info;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::matrix::MatrixClient;
use crate::message::{self, RoomMessage};

/// CLI entry point for the `trixping` binary.
///
/// `message` equal to `"-"` reads a single line from standard input.
pub async fn run(config_path: Option<&Path>, message: &str) -> Result<()> {
    if message.is_empty() {
        return Err(Error::MissingMessage);
    }

    let config = Config::load(config_path)?;
    let client = MatrixClient::new(&config.server, &config.username, &config.token)?;

    let text = if message == "-" {
        message::read_stdin_line()?
    } else {
        message.to_string()
    };

    let event_id = client
        .send_room_message(&config.room, &RoomMessage::plain(&text))
        .await?;
    info!(%event_id, room = %config.room, "message sent");

    Ok(())
}
