//! Audio cue selection.

use std::fmt;

use crate::moves::MoveRecord;
use crate::position::Position;

/// One sound per board update. Playback belongs to whoever consumes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    GameOver,
    Check,
    Capture,
    Promotion,
    SelfMove,
}

impl Cue {
    pub fn id(self) -> &'static str {
        match self {
            Cue::GameOver => "game_over_cue",
            Cue::Check => "check_cue",
            Cue::Capture => "capture_cue",
            Cue::Promotion => "promotion_cue",
            Cue::SelfMove => "self_move_cue",
        }
    }

    /// Sound file shipped with the web client for this cue.
    pub fn asset(self) -> &'static str {
        match self {
            Cue::GameOver => "notify.mp3",
            Cue::Check => "move-check.mp3",
            Cue::Capture => "capture.mp3",
            Cue::Promotion => "promote.mp3",
            Cue::SelfMove => "move-self.mp3",
        }
    }
}

impl fmt::Display for Cue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// First match wins: game over, then check, then capture, then promotion.
pub fn select_cue(position: &Position, last_move: Option<&MoveRecord>) -> Cue {
    if position.is_terminal() {
        return Cue::GameOver;
    }
    if position.is_check() {
        return Cue::Check;
    }
    match last_move {
        Some(mv) if mv.captured.is_some() => Cue::Capture,
        Some(mv) if mv.promotion.is_some() => Cue::Promotion,
        _ => Cue::SelfMove,
    }
}
