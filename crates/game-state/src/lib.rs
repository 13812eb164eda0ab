//! Client-side game state for a two-player chess match.
//!
//! Holds the local view of the board, reconciles it with the authoritative
//! record polled from the remote game service, validates and applies local
//! moves through shakmaty, and picks the audio cue for every board change.
//! Nothing in this crate performs I/O; the `client` crate drives it.

pub mod board;
pub mod cue;
pub mod error;
pub mod gate;
pub mod labels;
pub mod moves;
pub mod position;
pub mod reconcile;
pub mod record;
pub mod session;

pub use shakmaty::Role;

pub use board::{BoardUpdate, LocalBoard, PendingMove, PendingState, UpdateOrigin};
pub use cue::{select_cue, Cue};
pub use error::{GameError, MoveRejected};
pub use gate::{can_drag_piece, viewer_side};
pub use moves::{apply_move, infer_last_move, MoveInput, MoveRecord};
pub use position::{Position, Side};
pub use reconcile::{reconcile, Reconciliation, TieBreak};
pub use record::{Address, GameRecord, GameStatus, Lifecycle, ZERO_ADDRESS};
pub use session::{DropOutcome, GameSession, LookupResult, SessionEvent, Submission, ViewState};
