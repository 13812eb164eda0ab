//! Move application against the local board.
//!
//! Legality, resulting position and move metadata all come from shakmaty's
//! legal-move generator. A candidate only has to name its squares (and a
//! promotion piece where one is required); everything else is looked up.

use shakmaty::san::San;
use shakmaty::{File, Move, Position as _, Role, Square};

use crate::error::MoveRejected;
use crate::position::{Position, Side};

/// A move as the player expressed it: two square names and an optional
/// promotion marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveInput {
    pub from: String,
    pub to: String,
    pub promotion: Option<char>,
}

impl MoveInput {
    pub fn new(from: impl Into<String>, to: impl Into<String>, promotion: Option<char>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            promotion,
        }
    }

    /// Build an input from a drag-and-drop gesture. The piece code is the
    /// dropped piece as the board widget reports it (`wP`, `bQ`, ...); its
    /// last character, lowercased, is the promotion marker. For non-promotion
    /// moves the marker is ignored.
    pub fn from_drop(source: &str, target: &str, piece: &str) -> Self {
        let promotion = piece.chars().last().map(|c| c.to_ascii_lowercase());
        Self::new(source, target, promotion)
    }
}

/// A move the rules engine accepted, with everything needed to describe,
/// submit and sound it.
#[derive(Debug, Clone)]
pub struct MoveRecord {
    pub side: Side,
    pub from: String,
    /// Destination of the moving piece; for castling, the king's square.
    pub to: String,
    pub role: Role,
    pub promotion: Option<Role>,
    pub captured: Option<Role>,
    pub is_check: bool,
    pub is_checkmate: bool,
    /// Standard algebraic notation with `+` / `#` suffix, e.g. `Qxf7#`.
    pub san: String,
    pub position: Position,
}

impl MoveRecord {
    /// Play `mv` on `before`. `mv` must be legal in `before`.
    fn from_legal(before: &Position, mv: &Move) -> Self {
        let san = San::from_move(before.chess(), mv.clone()).to_string();

        let mut after = before.chess().clone();
        after.play_unchecked(mv.clone());
        let after = Position::from_chess(after);

        let suffix = if after.is_checkmate() {
            "#"
        } else if after.is_check() {
            "+"
        } else {
            ""
        };

        let (from, to) = match mv {
            Move::Castle { king, rook } => (*king, king_destination(*king, *rook)),
            other => (other.from().unwrap_or(other.to()), other.to()),
        };

        Self {
            side: before.turn(),
            from: from.to_string(),
            to: to.to_string(),
            role: mv.role(),
            promotion: mv.promotion(),
            captured: mv.capture(),
            is_check: after.is_check(),
            is_checkmate: after.is_checkmate(),
            san: format!("{san}{suffix}"),
            position: after,
        }
    }

    pub fn ply(&self) -> u32 {
        self.position.ply_count()
    }
}

/// Validate `candidate` against `local` and compute the resulting move.
///
/// `local` is never modified; the caller decides whether to adopt
/// `MoveRecord::position`.
pub fn apply_move(local: &Position, candidate: &MoveInput) -> Result<MoveRecord, MoveRejected> {
    let from = parse_square(&candidate.from)?;
    let to = parse_square(&candidate.to)?;

    if local.is_terminal() {
        return Err(MoveRejected::GameOver);
    }

    let chess = local.chess();
    let piece = chess
        .board()
        .piece_at(from)
        .ok_or_else(|| MoveRejected::NoPieceOnSquare(candidate.from.clone()))?;
    if Side::from(piece.color) != local.turn() {
        return Err(MoveRejected::WrongTurn(local.turn()));
    }

    let promotion = candidate.promotion.and_then(Role::from_char);
    let legals = chess.legal_moves();
    let mv = legals
        .iter()
        .find(|m| matches_candidate(m, from, to, promotion))
        .ok_or_else(|| MoveRejected::Illegal {
            from: candidate.from.clone(),
            to: candidate.to.clone(),
        })?;

    Ok(MoveRecord::from_legal(local, mv))
}

/// Find the move that turns `before` into `after`, if `after` is exactly one
/// ply later and reachable by a single legal move.
pub fn infer_last_move(before: &Position, after: &Position) -> Option<MoveRecord> {
    if before.ply_count().checked_add(1) != Some(after.ply_count()) {
        return None;
    }

    let target = after.fen();
    let legals = before.chess().legal_moves();
    let mv = legals.iter().find(|m| {
        let mut next = before.chess().clone();
        next.play_unchecked((*m).clone());
        Position::from_chess(next).fen() == target
    })?;

    Some(MoveRecord::from_legal(before, mv))
}

fn parse_square(name: &str) -> Result<Square, MoveRejected> {
    name.trim()
        .parse::<Square>()
        .map_err(|_| MoveRejected::MalformedSquare(name.to_string()))
}

/// Source and destination must agree. The promotion marker only matters when
/// the legal move actually promotes.
fn matches_candidate(mv: &Move, from: Square, to: Square, promotion: Option<Role>) -> bool {
    if mv.from() != Some(from) {
        return false;
    }

    let lands = match mv {
        // Accept the king's destination as well as shakmaty's king-takes-rook square.
        Move::Castle { king, rook } => to == *rook || to == king_destination(*king, *rook),
        other => other.to() == to,
    };

    lands && (mv.promotion().is_none() || mv.promotion() == promotion)
}

fn king_destination(king: Square, rook: Square) -> Square {
    let file = if rook.file() > king.file() { File::G } else { File::C };
    Square::from_coords(file, king.rank())
}
