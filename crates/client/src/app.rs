//! Controller between the session and the terminal: turns session events
//! into cues and output, and typed lines into drops.

use std::io::Write;

use tracing::{error, info};

use game_state::{DropOutcome, GameSession, LookupResult, SessionEvent, Submission, ViewState};

use crate::audio::CueSink;
use crate::error::ClientError;
use crate::input::{parse_command, Command, HELP};
use crate::render::render_view;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    Continue,
    /// Hand this to the submission channel.
    Submit(Submission),
    Quit,
}

pub struct App<S, W> {
    session: GameSession,
    sink: S,
    out: W,
    /// Ply of the divergence already reported, if any.
    diverged_at: Option<u32>,
}

impl<S: CueSink, W: Write> App<S, W> {
    pub fn new(session: GameSession, sink: S, out: W) -> Self {
        Self {
            session,
            sink,
            out,
            diverged_at: None,
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    pub fn on_lookup(&mut self, result: LookupResult) -> Result<Flow, ClientError> {
        let previous = self.session.state();

        match self.session.on_lookup(result) {
            SessionEvent::Idle | SessionEvent::InvalidRecord(_) => {}
            SessionEvent::Mounted(update) => {
                if let Some(update) = update {
                    self.sink.play(update.cue);
                }
                self.redraw()?;
            }
            SessionEvent::Updated(update) => {
                info!(ply = update.ply, cue = %update.cue, "Remote move arrived");
                self.diverged_at = None;
                self.sink.play(update.cue);
                self.redraw()?;
            }
            SessionEvent::Diverged { ply } => {
                if self.diverged_at != Some(ply) {
                    self.diverged_at = Some(ply);
                    writeln!(
                        self.out,
                        "Warning: server board differs at ply {ply}, keeping the local board"
                    )?;
                }
            }
            SessionEvent::NotFound => {
                if previous != ViewState::NotFound {
                    self.redraw()?;
                }
            }
            SessionEvent::Redirect { reason } => {
                writeln!(self.out, "Could not load game ({reason}), leaving game view")?;
                return Ok(Flow::Exit);
            }
        }

        Ok(Flow::Continue)
    }

    pub fn on_line(&mut self, line: &str) -> Result<LineOutcome, ClientError> {
        let command = match parse_command(line) {
            Some(command) => command,
            None => {
                if !line.trim().is_empty() {
                    writeln!(self.out, "Unrecognized input '{}', type 'help'", line.trim())?;
                }
                return Ok(LineOutcome::Continue);
            }
        };

        match command {
            Command::Quit => Ok(LineOutcome::Quit),
            Command::Help => {
                writeln!(self.out, "{HELP}")?;
                Ok(LineOutcome::Continue)
            }
            Command::Board => {
                self.redraw()?;
                Ok(LineOutcome::Continue)
            }
            Command::Move(input) => match self.session.on_drop(&input) {
                DropOutcome::NotPermitted => {
                    writeln!(self.out, "You cannot move right now")?;
                    Ok(LineOutcome::Continue)
                }
                DropOutcome::Rejected(reason) => {
                    writeln!(self.out, "Move rejected: {reason}")?;
                    Ok(LineOutcome::Continue)
                }
                DropOutcome::Accepted { update, submission, .. } => {
                    self.sink.play(update.cue);
                    self.redraw()?;
                    Ok(LineOutcome::Submit(submission))
                }
            },
        }
    }

    pub fn on_submission_failed(&mut self, ply: u32, reason: &str) -> Result<(), ClientError> {
        error!(ply, reason, "Move submission failed");
        if self.session.on_submission_failed(ply) {
            writeln!(self.out, "Server did not accept the move at ply {ply}: {reason}")?;
        }
        Ok(())
    }

    fn redraw(&mut self) -> Result<(), ClientError> {
        write!(self.out, "{}", render_view(&self.session))?;
        self.out.flush()?;
        Ok(())
    }
}
