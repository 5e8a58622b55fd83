//! Error types for trixping

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("message not set")]
    MissingMessage,

    #[error("configuration file does not exist")]
    ConfigNotFound,

    #[error("error reading config file {path}: {source}")]
    ConfigRead {
        path: String,
        source: std::io::Error,
    },

    #[error("error parsing config file {path}: {source}")]
    ConfigParse {
        path: String,
        source: serde_json::Error,
    },

    #[error("invalid client configuration: {0}")]
    Client(String),

    #[error("failed to send message: {0}")]
    Send(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
