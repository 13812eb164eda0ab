//! One viewer's session on one game: the lifecycle of the game view and the
//! glue between lookups, drops and the local board.

use tracing::{debug, error, info, warn};

use crate::board::{BoardUpdate, LocalBoard, UpdateOrigin};
use crate::cue::select_cue;
use crate::error::{GameError, MoveRejected};
use crate::gate::{can_drag_piece, viewer_side};
use crate::moves::{MoveInput, MoveRecord};
use crate::position::{Position, Side};
use crate::reconcile::{Reconciliation, TieBreak};
use crate::record::{Address, GameRecord};

/// What the remote state source produced for one poll.
#[derive(Debug, Clone)]
pub enum LookupResult {
    Found(GameRecord),
    /// The service answered and has no such game.
    NotFound,
    /// Transport or lookup failure.
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    Loading,
    NotFound,
    Playing,
    /// The session is over; the view should navigate away.
    Redirect,
}

/// Payload for the move-submission channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub game_id: String,
    /// Ply produced by the move, used to report failures back.
    pub ply: u32,
    pub san: String,
}

#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// Nothing visible changed.
    Idle,
    /// The local board was created from the first record. Carries an update
    /// when the game already had moves, so the view can sound it.
    Mounted(Option<BoardUpdate>),
    Updated(BoardUpdate),
    /// Remote and local disagree at the same ply and local was kept.
    Diverged { ply: u32 },
    NotFound,
    Redirect { reason: String },
    /// The record arrived but its board could not be used.
    InvalidRecord(GameError),
}

#[derive(Debug, Clone)]
pub enum DropOutcome {
    /// The gate is closed; the gesture must be reverted.
    NotPermitted,
    /// The rules engine refused the move; the gesture must be reverted.
    Rejected(MoveRejected),
    Accepted {
        record: MoveRecord,
        update: BoardUpdate,
        submission: Submission,
    },
}

#[derive(Debug)]
pub struct GameSession {
    game_id: String,
    viewer: Address,
    tie_break: TieBreak,
    state: ViewState,
    record: Option<GameRecord>,
    board: Option<LocalBoard>,
}

impl GameSession {
    pub fn new(game_id: impl Into<String>, viewer: Address, tie_break: TieBreak) -> Self {
        Self {
            game_id: game_id.into(),
            viewer,
            tie_break,
            state: ViewState::Loading,
            record: None,
            board: None,
        }
    }

    pub fn game_id(&self) -> &str {
        &self.game_id
    }

    pub fn viewer(&self) -> &Address {
        &self.viewer
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    pub fn record(&self) -> Option<&GameRecord> {
        self.record.as_ref()
    }

    pub fn board(&self) -> Option<&LocalBoard> {
        self.board.as_ref()
    }

    pub fn position(&self) -> Option<&Position> {
        self.board.as_ref().map(LocalBoard::position)
    }

    /// Side the board is drawn from.
    pub fn orientation(&self) -> Side {
        self.record
            .as_ref()
            .map(|r| viewer_side(r, &self.viewer))
            .unwrap_or(Side::White)
    }

    /// Recomputed on every call; the session stores no gate state.
    pub fn can_drag(&self) -> bool {
        match (&self.record, &self.board) {
            (Some(record), Some(board)) => {
                self.state == ViewState::Playing && can_drag_piece(record, board.position(), &self.viewer)
            }
            _ => false,
        }
    }

    pub fn on_lookup(&mut self, result: LookupResult) -> SessionEvent {
        if self.state == ViewState::Redirect {
            return SessionEvent::Idle;
        }

        match result {
            LookupResult::Failed(reason) => {
                error!(game_id = %self.game_id, reason = %reason, "Game lookup failed, leaving game view");
                self.state = ViewState::Redirect;
                SessionEvent::Redirect { reason }
            }
            LookupResult::NotFound => {
                info!(game_id = %self.game_id, "Game not found");
                self.state = ViewState::NotFound;
                SessionEvent::NotFound
            }
            LookupResult::Found(record) => self.on_record(record),
        }
    }

    fn on_record(&mut self, record: GameRecord) -> SessionEvent {
        let event = match self.board.as_mut() {
            None => match record.position() {
                Ok(position) => {
                    let ply = position.ply_count();
                    let update = (ply > 0).then(|| BoardUpdate {
                        origin: UpdateOrigin::Remote,
                        ply,
                        cue: select_cue(&position, None),
                    });
                    info!(game_id = %self.game_id, ply, "Mounted game board");
                    self.board = Some(LocalBoard::new(position));
                    SessionEvent::Mounted(update)
                }
                Err(e) => {
                    warn!(game_id = %self.game_id, error = %e, "Cannot mount board from record");
                    return SessionEvent::InvalidRecord(e);
                }
            },
            Some(board) => match board.reconcile(&record, self.tie_break) {
                Ok((_, Some(update))) => SessionEvent::Updated(update),
                Ok((Reconciliation::Diverged { .. }, None)) => SessionEvent::Diverged {
                    ply: board.position().ply_count(),
                },
                Ok(_) => SessionEvent::Idle,
                Err(e) => {
                    warn!(game_id = %self.game_id, error = %e, "Ignoring unusable remote board");
                    SessionEvent::InvalidRecord(e)
                }
            },
        };

        self.record = Some(record);
        self.state = ViewState::Playing;
        event
    }

    /// Handle a drag-release of a piece.
    pub fn on_drop(&mut self, input: &MoveInput) -> DropOutcome {
        let (Some(record), Some(board)) = (self.record.as_ref(), self.board.as_mut()) else {
            return DropOutcome::NotPermitted;
        };

        if self.state != ViewState::Playing || !can_drag_piece(record, board.position(), &self.viewer) {
            debug!(game_id = %self.game_id, "Drop ignored, board is locked");
            return DropOutcome::NotPermitted;
        }

        match board.apply(input) {
            Ok((record, update)) => {
                let submission = Submission {
                    game_id: self.game_id.clone(),
                    ply: update.ply,
                    san: record.san.clone(),
                };
                DropOutcome::Accepted {
                    record,
                    update,
                    submission,
                }
            }
            Err(reason) => {
                info!(game_id = %self.game_id, reason = %reason, "Move rejected");
                DropOutcome::Rejected(reason)
            }
        }
    }

    pub fn on_submission_failed(&mut self, ply: u32) -> bool {
        self.board
            .as_mut()
            .map(|board| board.mark_failed(ply))
            .unwrap_or(false)
    }
}
