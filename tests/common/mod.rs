use game_state::{Address, GameRecord, GameStatus, GameSession, LookupResult, TieBreak};

pub const WHITE: &str = "0x1111111111111111111111111111111111111111";
pub const BLACK: &str = "0x2222222222222222222222222222222222222222";
pub const GUEST: &str = "0x3333333333333333333333333333333333333333";

pub const START: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
pub const AFTER_E4: &str = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1";
pub const AFTER_E4_E5: &str = "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 2";
pub const AFTER_E4_E5_NF3_NC6: &str =
    "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3";

/// A started, seated, in-play record between `WHITE` and `BLACK`.
pub fn live_record(board: &str) -> GameRecord {
    GameRecord {
        w: Address::new(WHITE),
        b: Address::new(BLACK),
        board: board.to_string(),
        status: GameStatus::InPlay,
        started_at: 1_715_000_000,
        ended_at: 0,
    }
}

/// A session for `viewer` that has already mounted `board`.
pub fn mounted_session(viewer: &str, board: &str) -> GameSession {
    let mut session = GameSession::new("0xgame", Address::new(viewer), TieBreak::default());
    session.on_lookup(LookupResult::Found(live_record(board)));
    session
}
