//! Text rendering of the game view.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};

use game_state::labels::{opponent_heading, seats, status_label, turn_label, viewer_heading};
use game_state::record::shorten;
use game_state::{GameSession, Lifecycle, Position, Side, ViewState};

/// Timestamps above this are taken to be milliseconds.
const MILLIS_THRESHOLD: i64 = 10_000_000_000;

/// Draw the board from `orientation`'s side, `.` for empty squares.
pub fn render_board(position: &Position, orientation: Side) -> String {
    let files: Vec<u32> = match orientation {
        Side::White => (0..8).collect(),
        Side::Black => (0..8).rev().collect(),
    };
    let ranks: Vec<u32> = match orientation {
        Side::White => (0..8).rev().collect(),
        Side::Black => (0..8).collect(),
    };

    let file_row: String = files
        .iter()
        .map(|&f| format!(" {}", file_char(f)))
        .collect();

    let mut out = String::new();
    let _ = writeln!(out, "  {file_row}");
    for &rank in &ranks {
        let _ = write!(out, "{} ", rank + 1);
        for &file in &files {
            let _ = write!(out, " {}", position.piece_at(file, rank).unwrap_or('.'));
        }
        let _ = writeln!(out, "  {}", rank + 1);
    }
    let _ = writeln!(out, "  {file_row}");
    out
}

/// Format a record timestamp; zero means it has not happened.
pub fn render_timestamp(ts: i64) -> Option<String> {
    if ts <= 0 {
        return None;
    }
    let time: Option<DateTime<Utc>> = if ts > MILLIS_THRESHOLD {
        DateTime::from_timestamp_millis(ts)
    } else {
        DateTime::from_timestamp(ts, 0)
    };
    time.map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
}

/// Full game view for the current session state.
pub fn render_view(session: &GameSession) -> String {
    match session.state() {
        ViewState::Loading => return "Loading...\n".to_string(),
        ViewState::NotFound => return "Game not found\n".to_string(),
        ViewState::Redirect => return "Leaving game view\n".to_string(),
        ViewState::Playing => {}
    }

    let (Some(record), Some(board)) = (session.record(), session.board()) else {
        return "Loading...\n".to_string();
    };
    let position = board.position();
    let viewer = session.viewer();
    let (own, other) = seats(record, viewer);

    let mut out = String::new();
    let _ = writeln!(
        out,
        "Game ID: {}   Turn: {}   Status: {}",
        shorten(session.game_id()),
        turn_label(position),
        status_label(record)
    );
    match (record.lifecycle(), render_timestamp(record.started_at)) {
        (Lifecycle::Unstarted, _) | (_, None) => {
            let _ = writeln!(out, "Waiting for both players to join");
        }
        (_, Some(started)) => {
            let _ = write!(out, "Started: {started}");
            if let Some(ended) = render_timestamp(record.ended_at) {
                let _ = write!(out, "   Ended: {ended}");
            }
            let _ = writeln!(out);
        }
    }

    let _ = writeln!(out, "{}  {}", opponent_heading(), record.participant(other).short());
    out.push_str(&render_board(position, session.orientation()));
    let _ = writeln!(out, "{}  {}", viewer_heading(record, viewer), record.participant(own).short());

    if let Some(last) = board.last_move() {
        let _ = writeln!(out, "Last move: {}", last.san);
    }
    if board.has_failed_submission() {
        let _ = writeln!(out, "Warning: a move was not accepted by the server");
    }
    let _ = writeln!(
        out,
        "{}",
        if session.can_drag() { "Your move." } else { "Waiting..." }
    );
    out
}

fn file_char(file: u32) -> char {
    char::from(b'a' + file as u8)
}
