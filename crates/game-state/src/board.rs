//! Local board state: the client's current position plus the moves it has
//! sent but the remote record has not caught up with yet.

use tracing::{debug, info, warn};

use crate::cue::{select_cue, Cue};
use crate::error::{GameError, MoveRejected};
use crate::moves::{apply_move, MoveInput, MoveRecord};
use crate::position::Position;
use crate::reconcile::{reconcile_position, Reconciliation, TieBreak};
use crate::record::GameRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOrigin {
    Local,
    Remote,
}

/// Emitted once for every accepted change of the local position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardUpdate {
    pub origin: UpdateOrigin,
    pub ply: u32,
    pub cue: Cue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingState {
    Submitted,
    /// The submission channel reported an error. The move stays on the
    /// board until a remote record moves past it.
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingMove {
    /// Ply count of the position this move produced.
    pub ply: u32,
    pub san: String,
    pub state: PendingState,
}

#[derive(Debug, Clone)]
pub struct LocalBoard {
    position: Position,
    last_move: Option<MoveRecord>,
    pending: Vec<PendingMove>,
}

impl LocalBoard {
    pub fn new(position: Position) -> Self {
        Self {
            position,
            last_move: None,
            pending: Vec::new(),
        }
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn last_move(&self) -> Option<&MoveRecord> {
        self.last_move.as_ref()
    }

    pub fn pending(&self) -> &[PendingMove] {
        &self.pending
    }

    pub fn has_failed_submission(&self) -> bool {
        self.pending.iter().any(|p| p.state == PendingState::Failed)
    }

    /// Apply a move optimistically. On rejection nothing changes.
    pub fn apply(&mut self, input: &MoveInput) -> Result<(MoveRecord, BoardUpdate), MoveRejected> {
        let record = apply_move(&self.position, input)?;
        let cue = select_cue(&record.position, Some(&record));
        let ply = record.ply();

        info!(san = %record.san, ply, cue = %cue, "Applied local move");

        self.position = record.position.clone();
        self.last_move = Some(record.clone());
        self.pending.push(PendingMove {
            ply,
            san: record.san.clone(),
            state: PendingState::Submitted,
        });

        Ok((
            record,
            BoardUpdate {
                origin: UpdateOrigin::Local,
                ply,
                cue,
            },
        ))
    }

    /// Reconcile against a remote record. Returns the update when the remote
    /// position was adopted. Pending moves the remote has reached are dropped,
    /// unless the remote contradicts them, in which case they are marked
    /// failed and kept.
    pub fn reconcile(
        &mut self,
        record: &GameRecord,
        tie_break: TieBreak,
    ) -> Result<(Reconciliation, Option<BoardUpdate>), GameError> {
        let candidate = record.position()?;
        let remote_ply = candidate.ply_count();

        let outcome = reconcile_position(candidate, &self.position, tie_break);
        let update = match &outcome {
            Reconciliation::Adopted {
                position,
                last_move,
                cue,
            } => {
                self.position = position.clone();
                self.last_move = last_move.clone();
                Some(BoardUpdate {
                    origin: UpdateOrigin::Remote,
                    ply: position.ply_count(),
                    cue: *cue,
                })
            }
            Reconciliation::Unchanged | Reconciliation::Diverged { .. } => None,
        };

        match &outcome {
            Reconciliation::Diverged { .. } => self.contradict_through(remote_ply),
            Reconciliation::Unchanged | Reconciliation::Adopted { .. } => self.confirm_through(remote_ply),
        }
        Ok((outcome, update))
    }

    /// Record that the submission producing `ply` failed. Returns false if no
    /// such move is pending.
    pub fn mark_failed(&mut self, ply: u32) -> bool {
        match self.pending.iter_mut().find(|p| p.ply == ply) {
            Some(pending) => {
                warn!(ply, san = %pending.san, "Move submission failed, local board may diverge");
                pending.state = PendingState::Failed;
                true
            }
            None => false,
        }
    }

    fn contradict_through(&mut self, remote_ply: u32) {
        for pending in self.pending.iter_mut().filter(|p| p.ply <= remote_ply) {
            if pending.state != PendingState::Failed {
                warn!(ply = pending.ply, san = %pending.san, "Remote record contradicts pending move");
                pending.state = PendingState::Failed;
            }
        }
    }

    fn confirm_through(&mut self, remote_ply: u32) {
        let before = self.pending.len();
        self.pending.retain(|p| p.ply > remote_ply);
        let settled = before - self.pending.len();
        if settled > 0 {
            debug!(settled, remote_ply, "Remote record caught up with pending moves");
        }
    }
}
