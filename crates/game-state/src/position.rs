//! Board position snapshots and the ply arithmetic the reconciler relies on.

use std::fmt;

use shakmaty::fen::Fen;
use shakmaty::{CastlingMode, Chess, Color, EnPassantMode, File, Position as _, Rank, Square};

use crate::error::GameError;

/// Half-move clock value at which the fifty-move rule ends the game.
const FIFTY_MOVE_HALFMOVES: u32 = 100;

/// Largest full-move counter accepted from a FEN. Keeps the ply count, and
/// the ply count of every position reachable by further play, inside `u32`.
const MAX_FULL_MOVES: u32 = u32::MAX / 4;

/// Side of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    White,
    Black,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Side::White => "White",
            Side::Black => "Black",
        }
    }
}

impl From<Color> for Side {
    fn from(color: Color) -> Self {
        match color {
            Color::White => Side::White,
            Color::Black => Side::Black,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Immutable snapshot of a board. Every mutation produces a new value.
#[derive(Debug, Clone)]
pub struct Position {
    inner: Chess,
}

impl Position {
    /// Standard starting position.
    pub fn initial() -> Self {
        Self {
            inner: Chess::default(),
        }
    }

    /// Parse a FEN string. Rejects both malformed text and setups the rules
    /// engine considers impossible.
    pub fn from_fen(fen: &str) -> Result<Self, GameError> {
        let parsed: Fen = fen.trim().parse().map_err(|e: shakmaty::fen::ParseFenError| {
            GameError::InvalidFen {
                fen: fen.to_string(),
                reason: e.to_string(),
            }
        })?;

        let inner: Chess = parsed
            .into_position(CastlingMode::Standard)
            .map_err(|e| GameError::IllegalPosition {
                fen: fen.to_string(),
                reason: e.to_string(),
            })?;

        if inner.fullmoves().get() > MAX_FULL_MOVES {
            return Err(GameError::IllegalPosition {
                fen: fen.to_string(),
                reason: format!("full-move counter above {MAX_FULL_MOVES}"),
            });
        }

        Ok(Self { inner })
    }

    pub(crate) fn from_chess(inner: Chess) -> Self {
        Self { inner }
    }

    pub(crate) fn chess(&self) -> &Chess {
        &self.inner
    }

    /// Normalized FEN. Parsing the output yields an identical position.
    pub fn fen(&self) -> String {
        Fen::from_position(&self.inner, EnPassantMode::Legal).to_string()
    }

    pub fn turn(&self) -> Side {
        self.inner.turn().into()
    }

    pub fn full_move_number(&self) -> u32 {
        self.inner.fullmoves().get()
    }

    pub fn half_move_clock(&self) -> u32 {
        self.inner.halfmoves()
    }

    /// Number of half-moves played since the start of the game, derived from
    /// the full-move counter and the side to move.
    pub fn ply_count(&self) -> u32 {
        let black_to_move = u32::from(self.turn() == Side::Black);
        self.full_move_number()
            .saturating_sub(1)
            .saturating_mul(2)
            .saturating_add(black_to_move)
    }

    pub fn is_check(&self) -> bool {
        self.inner.is_check()
    }

    pub fn is_checkmate(&self) -> bool {
        self.inner.is_checkmate()
    }

    pub fn is_stalemate(&self) -> bool {
        self.inner.is_stalemate()
    }

    pub fn is_insufficient_material(&self) -> bool {
        self.inner.is_insufficient_material()
    }

    pub fn is_fifty_move_draw(&self) -> bool {
        self.half_move_clock() >= FIFTY_MOVE_HALFMOVES
    }

    /// Checkmate, stalemate, or a draw by rule that a single snapshot can
    /// prove. Threefold repetition needs history and is not considered.
    pub fn is_terminal(&self) -> bool {
        self.is_checkmate()
            || self.is_stalemate()
            || self.is_insufficient_material()
            || self.is_fifty_move_draw()
    }

    /// True when both positions normalize to the same FEN.
    pub fn same_content(&self, other: &Position) -> bool {
        self.fen() == other.fen()
    }

    /// Piece letter on a square (uppercase white, lowercase black).
    /// `file` and `rank` are zero-based; out-of-range coordinates are empty.
    pub fn piece_at(&self, file: u32, rank: u32) -> Option<char> {
        if file > 7 || rank > 7 {
            return None;
        }
        let square = Square::from_coords(File::new(file), Rank::new(rank));
        self.inner.board().piece_at(square).map(|p| p.char())
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::initial()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.fen())
    }
}
