//! Text shown around the board.

use crate::gate::viewer_side;
use crate::position::{Position, Side};
use crate::record::{Address, GameRecord, GameStatus};

/// Result text for a finished game; empty while in play.
pub fn game_status_text(record: &GameRecord) -> String {
    match record.status {
        GameStatus::InPlay => String::new(),
        GameStatus::Draw => "Draw".to_string(),
        GameStatus::WhiteWon => format!("{} (w) won", record.w.short()),
        GameStatus::BlackWon => format!("{} (b) won", record.b.short()),
    }
}

/// Status line value: the result once the record has an end time.
pub fn status_label(record: &GameRecord) -> String {
    if record.is_ended() {
        game_status_text(record)
    } else {
        "In Play".to_string()
    }
}

pub fn turn_label(position: &Position) -> &'static str {
    position.turn().name()
}

pub fn is_guest(record: &GameRecord, viewer: &Address) -> bool {
    record.side_of(viewer).is_none()
}

/// Heading for the viewer's own seat.
pub fn viewer_heading(record: &GameRecord, viewer: &Address) -> &'static str {
    if is_guest(record, viewer) {
        "Not You again!"
    } else {
        "You"
    }
}

pub fn opponent_heading() -> &'static str {
    "Not You"
}

/// The seat drawn at the bottom of the board (`own`) and the one at the top.
pub fn seats(record: &GameRecord, viewer: &Address) -> (Side, Side) {
    let own = viewer_side(record, viewer);
    (own, own.opposite())
}
