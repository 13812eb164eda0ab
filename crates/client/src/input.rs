//! Terminal stand-in for drag-and-drop: parses typed move gestures.

use std::sync::LazyLock;

use regex::Regex;

use game_state::MoveInput;

/// `e2e4`, `e2-e4`, `e4xd5`, `e7e8q`, `e7e8=Q`
static MOVE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([a-h][1-8])\s*[-x]?\s*([a-h][1-8])\s*=?\s*([qrbnQRBN])?$").expect("move pattern compiles")
});

/// `e7 e8 wQ`: source, target and the dropped piece code, as a board widget
/// would report a drop.
static DROP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([a-h][1-8])\s+([a-h][1-8])\s+([wb][PNBRQK])$").expect("drop pattern compiles")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Move(MoveInput),
    Board,
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> Option<Command> {
    let line = line.trim();

    match line.to_ascii_lowercase().as_str() {
        "quit" | "exit" | "q" => return Some(Command::Quit),
        "board" | "b" => return Some(Command::Board),
        "help" | "?" => return Some(Command::Help),
        _ => {}
    }

    if let Some(caps) = DROP_RE.captures(line) {
        return Some(Command::Move(MoveInput::from_drop(&caps[1], &caps[2], &caps[3])));
    }

    let caps = MOVE_RE.captures(line)?;
    let promotion = caps
        .get(3)
        .and_then(|m| m.as_str().chars().next())
        .map(|c| c.to_ascii_lowercase());
    Some(Command::Move(MoveInput::new(&caps[1], &caps[2], promotion)))
}

pub const HELP: &str = "\
Moves:    e2e4, e2-e4, e7e8q, e7e8=Q, or a drop such as `e7 e8 wQ`
Commands: board (redraw), help, quit";
