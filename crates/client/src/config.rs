//! Client configuration from environment variables

use std::env;
use std::time::Duration;

use game_state::{Address, TieBreak};

use crate::error::ClientError;

/// Poll cadence of the web client.
const DEFAULT_POLL_INTERVAL_MS: u64 = 2000;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Base URL of the game service API
    pub api_base_url: String,

    /// Game to open
    pub game_id: String,

    /// Viewer's own address; the zero address watches as a guest
    pub viewer: Address,

    /// Fixed interval between record polls
    pub poll_interval: Duration,

    /// Per-request timeout for fetches and submissions
    pub request_timeout: Duration,

    /// Equal-ply divergence policy
    pub tie_break: TieBreak,

    /// Ring the terminal bell on cues
    pub bell: bool,
}

impl ClientConfig {
    /// Load from the process environment. The first CLI argument, when given,
    /// overrides `GAME_ID`.
    pub fn from_env() -> Result<Self, ClientError> {
        Self::from_vars(|key| env::var(key).ok(), env::args().nth(1))
    }

    pub fn from_vars(
        var: impl Fn(&str) -> Option<String>,
        game_arg: Option<String>,
    ) -> Result<Self, ClientError> {
        let api_base_url = var("API_BASE_URL")
            .ok_or(ClientError::Config("API_BASE_URL not set"))?
            .trim_end_matches('/')
            .to_string();

        let game_id = game_arg
            .or_else(|| var("GAME_ID"))
            .filter(|id| !id.trim().is_empty())
            .ok_or(ClientError::Config("GAME_ID not set and no game id argument given"))?;

        let viewer = var("VIEWER_ADDRESS")
            .map(Address::new)
            .unwrap_or_else(Address::zero);

        let poll_interval_ms = parse_or("POLL_INTERVAL_MS", var("POLL_INTERVAL_MS"), DEFAULT_POLL_INTERVAL_MS)?;
        if poll_interval_ms == 0 {
            return Err(ClientError::InvalidConfig {
                key: "POLL_INTERVAL_MS",
                value: "0".to_string(),
            });
        }

        let request_timeout_secs = parse_or(
            "REQUEST_TIMEOUT_SECS",
            var("REQUEST_TIMEOUT_SECS"),
            DEFAULT_REQUEST_TIMEOUT_SECS,
        )?;

        let tie_break = match var("TIE_BREAK") {
            Some(value) => value
                .parse()
                .map_err(|_| ClientError::InvalidConfig { key: "TIE_BREAK", value })?,
            None => TieBreak::default(),
        };

        let bell = var("CUE_BELL")
            .map(|v| matches!(v.as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Ok(Self {
            api_base_url,
            game_id: game_id.trim().to_string(),
            viewer,
            poll_interval: Duration::from_millis(poll_interval_ms),
            request_timeout: Duration::from_secs(request_timeout_secs),
            tie_break,
            bell,
        })
    }
}

fn parse_or(key: &'static str, value: Option<String>, default: u64) -> Result<u64, ClientError> {
    match value {
        Some(v) => v
            .trim()
            .parse()
            .map_err(|_| ClientError::InvalidConfig { key, value: v }),
        None => Ok(default),
    }
}
