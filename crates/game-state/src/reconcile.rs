//! Reconciliation of the local board with the remote record.
//!
//! The only recency signal is the ply count: a remote position further along
//! than ours replaces it, anything behind it is ignored. Equal ply counts with
//! different content are a desync; `TieBreak` decides who wins.

use std::str::FromStr;

use tracing::{debug, warn};

use crate::cue::{select_cue, Cue};
use crate::error::GameError;
use crate::moves::{infer_last_move, MoveRecord};
use crate::position::Position;
use crate::record::GameRecord;

/// Policy for equal-ply positions whose content differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TieBreak {
    /// Keep the local position and report the divergence.
    #[default]
    PreferLocal,
    /// Adopt the remote position. The ply count does not change.
    PreferRemote,
}

impl FromStr for TieBreak {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" | "prefer_local" => Ok(TieBreak::PreferLocal),
            "remote" | "prefer_remote" => Ok(TieBreak::PreferRemote),
            other => Err(format!("unknown tie-break policy '{other}'")),
        }
    }
}

#[derive(Debug, Clone)]
pub enum Reconciliation {
    /// Local state stays as it is.
    Unchanged,
    /// Same ply, different content, local kept.
    Diverged { remote: Position },
    /// The remote position replaces the local one.
    Adopted {
        position: Position,
        /// Present when the remote position is one legal move ahead.
        last_move: Option<MoveRecord>,
        cue: Cue,
    },
}

/// Parse the record's board and compare it with `local`.
pub fn reconcile(
    remote: &GameRecord,
    local: &Position,
    tie_break: TieBreak,
) -> Result<Reconciliation, GameError> {
    let candidate = remote.position()?;
    Ok(reconcile_position(candidate, local, tie_break))
}

pub(crate) fn reconcile_position(
    candidate: Position,
    local: &Position,
    tie_break: TieBreak,
) -> Reconciliation {
    let remote_ply = candidate.ply_count();
    let local_ply = local.ply_count();

    if remote_ply > local_ply {
        debug!(remote_ply, local_ply, "Remote position is ahead, adopting");
        return adopt(local, candidate);
    }

    if remote_ply == local_ply && !candidate.same_content(local) {
        return match tie_break {
            TieBreak::PreferLocal => {
                warn!(
                    ply = local_ply,
                    local = %local,
                    remote = %candidate,
                    "Remote position diverges at equal ply, keeping local"
                );
                Reconciliation::Diverged { remote: candidate }
            }
            TieBreak::PreferRemote => {
                warn!(ply = local_ply, remote = %candidate, "Remote position diverges at equal ply, adopting remote");
                adopt(local, candidate)
            }
        };
    }

    debug!(remote_ply, local_ply, "Local position is current");
    Reconciliation::Unchanged
}

fn adopt(local: &Position, candidate: Position) -> Reconciliation {
    let last_move = infer_last_move(local, &candidate);
    let cue = select_cue(&candidate, last_move.as_ref());
    Reconciliation::Adopted {
        position: candidate,
        last_move,
        cue,
    }
}
