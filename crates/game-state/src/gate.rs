//! Whether the viewer may pick up a piece right now.

use crate::position::{Position, Side};
use crate::record::{Address, GameRecord, GameStatus};

/// True iff the game is running, both seats are taken, the viewer holds the
/// seat of the side to move in `local`, and `local` is not terminal.
///
/// A finished record (`endedAt > 0` or a non-`in_play` status) closes the
/// board even when the position itself is still playable, e.g. after a
/// resignation.
pub fn can_drag_piece(record: &GameRecord, local: &Position, viewer: &Address) -> bool {
    record.is_started()
        && !record.is_ended()
        && record.status == GameStatus::InPlay
        && record.side_of(viewer).is_some()
        && record.is_seated()
        && record.participant(local.turn()) == viewer
        && !local.is_terminal()
}

/// Side the board is drawn from. Guests and white see it from white.
pub fn viewer_side(record: &GameRecord, viewer: &Address) -> Side {
    if record.b == *viewer {
        Side::Black
    } else {
        Side::White
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::ZERO_ADDRESS;

    const WHITE: &str = "0x1111111111111111111111111111111111111111";
    const BLACK: &str = "0x2222222222222222222222222222222222222222";
    const GUEST: &str = "0x3333333333333333333333333333333333333333";
    const AFTER_E4: &str = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1";

    fn live_record() -> GameRecord {
        GameRecord {
            w: Address::new(WHITE),
            b: Address::new(BLACK),
            board: Position::initial().fen(),
            status: GameStatus::InPlay,
            started_at: 1_715_000_000,
            ended_at: 0,
        }
    }

    #[test]
    fn test_only_side_to_move_may_drag() {
        let record = live_record();
        let start = Position::initial();
        assert!(can_drag_piece(&record, &start, &Address::new(WHITE)));
        assert!(!can_drag_piece(&record, &start, &Address::new(BLACK)));
        assert!(!can_drag_piece(&record, &start, &Address::new(GUEST)));

        let after_e4 = Position::from_fen(AFTER_E4).unwrap();
        assert!(!can_drag_piece(&record, &after_e4, &Address::new(WHITE)));
        assert!(can_drag_piece(&record, &after_e4, &Address::new(BLACK)));
    }

    #[test]
    fn test_unstarted_game_is_locked() {
        let record = GameRecord {
            started_at: 0,
            ..live_record()
        };
        let start = Position::initial();
        for viewer in [WHITE, BLACK, GUEST, ZERO_ADDRESS] {
            assert!(!can_drag_piece(&record, &start, &Address::new(viewer)));
        }
    }

    #[test]
    fn test_empty_seat_locks_board() {
        let record = GameRecord {
            b: Address::zero(),
            ..live_record()
        };
        assert!(!can_drag_piece(&record, &Position::initial(), &Address::new(WHITE)));

        // A zero viewer must not match a zero seat either.
        let record = GameRecord {
            w: Address::zero(),
            ..live_record()
        };
        assert!(!can_drag_piece(&record, &Position::initial(), &Address::zero()));
    }

    #[test]
    fn test_finished_game_is_locked() {
        let record = GameRecord {
            status: GameStatus::WhiteWon,
            ended_at: 1_715_000_600,
            ..live_record()
        };
        let start = Position::initial();
        for viewer in [WHITE, BLACK, GUEST] {
            assert!(!can_drag_piece(&record, &start, &Address::new(viewer)));
        }
    }

    #[test]
    fn test_terminal_position_is_locked() {
        let record = live_record();
        let mated =
            Position::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3").unwrap();
        assert!(!can_drag_piece(&record, &mated, &Address::new(WHITE)));
    }

    #[test]
    fn test_viewer_side() {
        let record = live_record();
        assert_eq!(viewer_side(&record, &Address::new(WHITE)), Side::White);
        assert_eq!(viewer_side(&record, &Address::new(BLACK)), Side::Black);
        assert_eq!(viewer_side(&record, &Address::new(GUEST)), Side::White);
    }
}
