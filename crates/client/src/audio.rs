//! Cue sink: the audio collaborator the core hands cues to.

use std::io::{self, Stdout, Write};

use game_state::Cue;
use tracing::{info, warn};

pub trait CueSink {
    fn play(&mut self, cue: Cue);
}

/// Logs every cue and optionally rings the terminal bell.
#[derive(Debug)]
pub struct LogCueSink<W = Stdout> {
    bell: bool,
    out: W,
}

impl LogCueSink {
    pub fn new(bell: bool) -> Self {
        Self::with_writer(bell, io::stdout())
    }
}

impl<W: Write> LogCueSink<W> {
    pub fn with_writer(bell: bool, out: W) -> Self {
        Self { bell, out }
    }

    fn ring(&mut self) -> io::Result<()> {
        self.out.write_all(b"\x07")?;
        self.out.flush()
    }
}

impl<W: Write> CueSink for LogCueSink<W> {
    fn play(&mut self, cue: Cue) {
        info!(cue = %cue, asset = cue.asset(), "Playing cue");
        if self.bell {
            if let Err(e) = self.ring() {
                warn!(cue = %cue, error = %e, "Failed to ring terminal bell");
            }
        }
    }
}

/// Keeps every cue it is given.
#[derive(Debug, Default)]
pub struct RecordingCueSink {
    pub played: Vec<Cue>,
}

impl CueSink for RecordingCueSink {
    fn play(&mut self, cue: Cue) {
        self.played.push(cue);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }
    }

    #[test]
    fn test_bell_rings_only_when_enabled() {
        let mut quiet = LogCueSink::with_writer(false, Vec::new());
        quiet.play(Cue::Check);
        assert!(quiet.out.is_empty());

        let mut loud = LogCueSink::with_writer(true, Vec::new());
        loud.play(Cue::Check);
        loud.play(Cue::SelfMove);
        assert_eq!(loud.out, b"\x07\x07");
    }

    #[test]
    fn test_bell_write_failure_is_not_fatal() {
        let mut sink = LogCueSink::with_writer(true, BrokenPipe);
        sink.play(Cue::GameOver);
        assert!(sink.ring().is_err());
    }
}
