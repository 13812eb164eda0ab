//! Terminal chess client
//!
//! Polls one game from the game service, reconciles it with the local
//! board and submits moves typed on stdin.

use std::io::Write;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{error, info, warn};

use client::api::GameApi;
use client::app::{App, Flow, LineOutcome};
use client::audio::LogCueSink;
use client::config::ClientConfig;
use game_state::GameSession;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Load .env file for local dev
    let _ = dotenvy::dotenv();

    // Logs go to stderr so they do not interleave with the board
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = ClientConfig::from_env()?;
    info!(
        api_base_url = %config.api_base_url,
        game_id = %config.game_id,
        viewer = %config.viewer.short(),
        poll_ms = config.poll_interval.as_millis() as u64,
        "Client config loaded"
    );

    let api = GameApi::new(&config)?;
    let session = GameSession::new(config.game_id.clone(), config.viewer.clone(), config.tie_break);
    let mut app = App::new(session, LogCueSink::new(config.bell), std::io::stdout());

    let (failures_tx, mut failures_rx) = mpsc::unbounded_channel::<(u32, String)>();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;

    let mut ticker = interval(config.poll_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                // Awaited in place so polls never overlap
                let result = api.fetch_game(&config.game_id).await;
                if app.on_lookup(result)? == Flow::Exit {
                    break;
                }
            }
            line = lines.next_line(), if stdin_open => {
                match line {
                    Ok(Some(line)) => match app.on_line(&line)? {
                        LineOutcome::Continue => {}
                        LineOutcome::Quit => break,
                        LineOutcome::Submit(submission) => {
                            let api = api.clone();
                            let failures_tx = failures_tx.clone();
                            tokio::spawn(async move {
                                if let Err(e) = api.submit_move(&submission).await {
                                    let _ = failures_tx.send((submission.ply, e.to_string()));
                                }
                            });
                        }
                    },
                    Ok(None) => {
                        info!("Stdin closed, watching only");
                        stdin_open = false;
                    }
                    Err(e) => {
                        warn!(error = %e, "Failed to read stdin");
                        stdin_open = false;
                    }
                }
            }
            Some((ply, reason)) = failures_rx.recv() => {
                app.on_submission_failed(ply, &reason)?;
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted");
                break;
            }
        }
    }

    if let Err(e) = std::io::stdout().flush() {
        error!(error = %e, "Failed to flush stdout");
    }
    info!(game_id = %config.game_id, "Client stopped");
    Ok(())
}
