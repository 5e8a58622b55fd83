//! trixping — post a message to a Matrix room from the command line.
//!
//! This library backs two binaries:
//! - `trixping`: minimal `-c`/`-m` surface, sends the message as-is
//! - `trixmail`: mail-gateway surface that wraps piped input in a
//!   host/sender header block, with a sendmail-compatible alias mode

pub mod commands;
pub mod config;
pub mod error;
pub mod matrix;
pub mod message;

// Re-export common types
pub use config::Config;
pub use error::{Error, Result};
pub use matrix::MatrixClient;
pub use message::RoomMessage;
