//! Client error types

use game_state::GameError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Configuration error: {0}")]
    Config(&'static str),

    #[error("Invalid value for {key}: {value}")]
    InvalidConfig { key: &'static str, value: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected HTTP status {0}")]
    Status(u16),

    #[error("Game error: {0}")]
    Game(#[from] GameError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
