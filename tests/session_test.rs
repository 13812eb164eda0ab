/// End-to-end tests for one viewer's game session: mounting, optimistic
/// moves, remote catch-up and the submission gate.

mod common;

use common::*;
use game_state::{
    can_drag_piece, Address, Cue, DropOutcome, GameError, GameRecord, GameSession, GameStatus, LookupResult,
    MoveInput, MoveRejected, Position, SessionEvent, TieBreak, UpdateOrigin, ViewState,
};

#[test]
fn test_legal_move_advances_and_submits_san() {
    let mut session = mounted_session(WHITE, START);

    match session.on_drop(&MoveInput::from_drop("e2", "e4", "wP")) {
        DropOutcome::Accepted { record, update, submission } => {
            assert_eq!(record.san, "e4");
            assert_eq!(update.origin, UpdateOrigin::Local);
            assert_eq!(update.ply, 1);
            assert_eq!(update.cue, Cue::SelfMove);
            assert_eq!(submission.san, "e4");
            assert_eq!(submission.game_id, "0xgame");
        }
        other => panic!("expected acceptance, got {other:?}"),
    }

    assert_eq!(session.position().unwrap().ply_count(), 1);
    // Black to move now, white's board is locked
    assert!(!session.can_drag());
}

#[test]
fn test_illegal_move_is_rejected_without_side_effects() {
    // Black tries a three-square pawn jump
    let mut black = mounted_session(BLACK, AFTER_E4);
    let before = black.position().unwrap().fen();
    match black.on_drop(&MoveInput::new("e7", "e4", None)) {
        DropOutcome::Rejected(MoveRejected::Illegal { from, to }) => {
            assert_eq!(from, "e7");
            assert_eq!(to, "e4");
        }
        other => panic!("expected rejection, got {other:?}"),
    }
    assert_eq!(black.position().unwrap().fen(), before);
    assert!(black.board().unwrap().pending().is_empty());
}

#[test]
fn test_double_push_from_non_initial_rank_rejected() {
    let mut session = mounted_session(WHITE, AFTER_E4_E5);
    assert!(matches!(
        session.on_drop(&MoveInput::new("e4", "e6", None)),
        DropOutcome::Rejected(_)
    ));
    assert_eq!(session.position().unwrap().ply_count(), 2);
}

#[test]
fn test_finished_record_locks_every_viewer() {
    let record = GameRecord {
        status: GameStatus::WhiteWon,
        ended_at: 1_715_000_900,
        ..live_record(AFTER_E4_E5)
    };
    let local = record.position().unwrap();
    for viewer in [WHITE, BLACK, GUEST] {
        assert!(!can_drag_piece(&record, &local, &Address::new(viewer)));
    }

    let mut session = GameSession::new("0xgame", Address::new(WHITE), TieBreak::default());
    session.on_lookup(LookupResult::Found(record));
    assert!(!session.can_drag());
    assert!(matches!(
        session.on_drop(&MoveInput::new("d2", "d4", None)),
        DropOutcome::NotPermitted
    ));
}

#[test]
fn test_status_in_json_record_drives_gate() {
    let body = serde_json::json!({
        "w": WHITE,
        "b": BLACK,
        "board": START,
        "status": "w",
        "startedAt": 1_715_000_000,
        "endedAt": 1_715_000_900,
    })
    .to_string();
    let record = GameRecord::from_json(&body).unwrap();
    assert_eq!(record.status, GameStatus::WhiteWon);
    assert!(!can_drag_piece(&record, &Position::initial(), &Address::new(WHITE)));
}

#[test]
fn test_opponent_reply_is_adopted_and_sounded() {
    let mut session = mounted_session(WHITE, START);
    session.on_drop(&MoveInput::new("e2", "e4", None));

    // Poll still shows our move unconfirmed
    assert!(matches!(
        session.on_lookup(LookupResult::Found(live_record(START))),
        SessionEvent::Idle
    ));
    assert_eq!(session.position().unwrap().ply_count(), 1);

    match session.on_lookup(LookupResult::Found(live_record(AFTER_E4_E5))) {
        SessionEvent::Updated(update) => {
            assert_eq!(update.origin, UpdateOrigin::Remote);
            assert_eq!(update.ply, 2);
            assert_eq!(update.cue, Cue::SelfMove);
        }
        other => panic!("expected update, got {other:?}"),
    }
    assert!(session.board().unwrap().pending().is_empty());
    assert_eq!(
        session.board().unwrap().last_move().map(|m| m.san.as_str()),
        Some("e5")
    );
    assert!(session.can_drag());
}

#[test]
fn test_each_remote_ply_sounds_once() {
    let mut session = mounted_session(BLACK, START);

    let first = session.on_lookup(LookupResult::Found(live_record(AFTER_E4)));
    assert!(matches!(first, SessionEvent::Updated(_)));

    // Repeated polls of the same record are silent
    for _ in 0..3 {
        assert!(matches!(
            session.on_lookup(LookupResult::Found(live_record(AFTER_E4))),
            SessionEvent::Idle
        ));
    }
}

#[test]
fn test_divergence_is_reported_and_local_kept() {
    let mut session = mounted_session(WHITE, START);
    session.on_drop(&MoveInput::new("e2", "e4", None));

    let d4 = "rnbqkbnr/pppppppp/8/8/3P4/8/PPP1PPPP/RNBQKBNR b KQkq - 0 1";
    assert!(matches!(
        session.on_lookup(LookupResult::Found(live_record(d4))),
        SessionEvent::Diverged { ply: 1 }
    ));
    assert_eq!(session.position().unwrap().fen(), AFTER_E4);

    // The contradicted move stays queued and is flagged as not accepted
    let board = session.board().unwrap();
    assert_eq!(board.pending().len(), 1);
    assert!(board.has_failed_submission());
}

#[test]
fn test_oversized_move_counter_is_an_invalid_record() {
    let mut session = mounted_session(WHITE, START);
    let event = session.on_lookup(LookupResult::Found(live_record(
        "8/8/8/4k3/8/8/3R4/4K3 w - - 0 3000000000",
    )));
    assert!(matches!(event, SessionEvent::InvalidRecord(GameError::IllegalPosition { .. })));
    assert_eq!(session.position().unwrap().ply_count(), 0);
    assert!(session.can_drag());
}

#[test]
fn test_prefer_remote_resolves_divergence() {
    let mut session = GameSession::new("0xgame", Address::new(WHITE), TieBreak::PreferRemote);
    session.on_lookup(LookupResult::Found(live_record(START)));
    session.on_drop(&MoveInput::new("e2", "e4", None));

    let d4 = "rnbqkbnr/pppppppp/8/8/3P4/8/PPP1PPPP/RNBQKBNR b KQkq - 0 1";
    assert!(matches!(
        session.on_lookup(LookupResult::Found(live_record(d4))),
        SessionEvent::Updated(_)
    ));
    assert_eq!(session.position().unwrap().fen(), d4);
}

#[test]
fn test_not_found_then_found_mounts() {
    let mut session = GameSession::new("0xgame", Address::new(WHITE), TieBreak::default());
    assert!(matches!(session.on_lookup(LookupResult::NotFound), SessionEvent::NotFound));
    assert_eq!(session.state(), ViewState::NotFound);

    assert!(matches!(
        session.on_lookup(LookupResult::Found(live_record(START))),
        SessionEvent::Mounted(None)
    ));
    assert_eq!(session.state(), ViewState::Playing);
}

#[test]
fn test_lookup_failure_is_terminal() {
    let mut session = mounted_session(WHITE, START);
    assert!(matches!(
        session.on_lookup(LookupResult::Failed("HTTP 502".into())),
        SessionEvent::Redirect { .. }
    ));
    assert!(matches!(
        session.on_lookup(LookupResult::Found(live_record(AFTER_E4))),
        SessionEvent::Idle
    ));
    assert_eq!(session.position().unwrap().ply_count(), 0);
}

#[test]
fn test_guest_watches_with_white_orientation() {
    let mut session = mounted_session(GUEST, START);
    assert_eq!(session.orientation(), game_state::Side::White);
    assert!(!session.can_drag());
    assert!(matches!(
        session.on_drop(&MoveInput::new("e2", "e4", None)),
        DropOutcome::NotPermitted
    ));
}
