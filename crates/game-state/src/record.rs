//! Authoritative game record as served by the remote game service.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::GameError;
use crate::position::{Position, Side};

/// Placeholder the service uses for a participant slot nobody has taken.
pub const ZERO_ADDRESS: &str = "0x0000000000000000000000000000000000000000";

/// Opaque participant identity (a wallet address).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    pub fn zero() -> Self {
        Self(ZERO_ADDRESS.to_string())
    }

    pub fn is_zero(&self) -> bool {
        self.0 == ZERO_ADDRESS
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Display form used in labels: `0x1234...abcd`.
    pub fn short(&self) -> String {
        shorten(&self.0)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Shorten a hash-like identifier to its first six and last four characters.
pub fn shorten(hash: &str) -> String {
    let chars: Vec<char> = hash.chars().collect();
    if chars.len() <= 10 {
        return hash.to_string();
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    #[serde(rename = "in_play")]
    InPlay,
    #[serde(rename = "draw")]
    Draw,
    #[serde(rename = "w", alias = "white_won")]
    WhiteWon,
    #[serde(rename = "b", alias = "black_won")]
    BlackWon,
}

/// Game lifecycle as the client observes it. Only the remote record moves a
/// game between these states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Unstarted,
    InPlay,
    Draw,
    WhiteWon,
    BlackWon,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRecord {
    /// White participant.
    pub w: Address,
    /// Black participant.
    pub b: Address,
    /// Serialized position (FEN).
    pub board: String,
    pub status: GameStatus,
    /// Zero until the game has started.
    #[serde(default)]
    pub started_at: i64,
    /// Zero until the game has ended.
    #[serde(default)]
    pub ended_at: i64,
}

impl GameRecord {
    pub fn from_json(body: &str) -> Result<Self, GameError> {
        serde_json::from_str(body).map_err(|e| GameError::InvalidRecord(e.to_string()))
    }

    pub fn position(&self) -> Result<Position, GameError> {
        Position::from_fen(&self.board)
    }

    pub fn participant(&self, side: Side) -> &Address {
        match side {
            Side::White => &self.w,
            Side::Black => &self.b,
        }
    }

    /// The side `address` plays, if any. White wins if both slots match.
    pub fn side_of(&self, address: &Address) -> Option<Side> {
        if self.w == *address {
            Some(Side::White)
        } else if self.b == *address {
            Some(Side::Black)
        } else {
            None
        }
    }

    pub fn is_started(&self) -> bool {
        self.started_at > 0
    }

    pub fn is_ended(&self) -> bool {
        self.ended_at > 0
    }

    /// Both participant slots are taken.
    pub fn is_seated(&self) -> bool {
        !self.w.is_zero() && !self.b.is_zero()
    }

    pub fn lifecycle(&self) -> Lifecycle {
        if !self.is_started() {
            return Lifecycle::Unstarted;
        }
        match self.status {
            GameStatus::InPlay => Lifecycle::InPlay,
            GameStatus::Draw => Lifecycle::Draw,
            GameStatus::WhiteWon => Lifecycle::WhiteWon,
            GameStatus::BlackWon => Lifecycle::BlackWon,
        }
    }
}
