//! Core error types

use thiserror::Error;

use crate::position::Side;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid FEN '{fen}': {reason}")]
    InvalidFen { fen: String, reason: String },

    #[error("Illegal position '{fen}': {reason}")]
    IllegalPosition { fen: String, reason: String },

    #[error("Invalid game record: {0}")]
    InvalidRecord(String),
}

/// Why the rules engine refused a candidate move. The board is never touched
/// when one of these is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoveRejected {
    #[error("Malformed square: {0}")]
    MalformedSquare(String),

    #[error("No piece on {0}")]
    NoPieceOnSquare(String),

    #[error("It is {0}'s turn")]
    WrongTurn(Side),

    #[error("Game is over")]
    GameOver,

    #[error("Illegal move {from}{to}")]
    Illegal { from: String, to: String },
}
