//! HTTP client for the game service: record lookups and move submission.

use reqwest::{Client, StatusCode};
use serde::Serialize;
use tracing::{debug, info};

use game_state::{GameRecord, LookupResult, Submission};

use crate::config::ClientConfig;
use crate::error::ClientError;

#[derive(Debug, Clone)]
pub struct GameApi {
    client: Client,
    base_url: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MoveBody<'a> {
    game_id: &'a str,
    #[serde(rename = "move")]
    mv: &'a str,
}

impl GameApi {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let client = Client::builder()
            .user_agent(concat!("chess-client/", env!("CARGO_PKG_VERSION")))
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self {
            client,
            base_url: config.api_base_url.clone(),
        })
    }

    pub fn game_url(&self, game_id: &str) -> String {
        format!("{}/games/{}", self.base_url, game_id)
    }

    pub fn move_url(&self) -> String {
        format!("{}/actions/move", self.base_url)
    }

    /// One poll of the remote state source. Never fails: every error is
    /// folded into `LookupResult::Failed`.
    pub async fn fetch_game(&self, game_id: &str) -> LookupResult {
        match self.get_record(game_id).await {
            Ok(Some(record)) => LookupResult::Found(record),
            Ok(None) => LookupResult::NotFound,
            Err(e) => LookupResult::Failed(e.to_string()),
        }
    }

    async fn get_record(&self, game_id: &str) -> Result<Option<GameRecord>, ClientError> {
        let resp = self
            .client
            .get(self.game_url(game_id))
            .header("Accept", "application/json")
            .send()
            .await?;

        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !resp.status().is_success() {
            return Err(ClientError::Status(resp.status().as_u16()));
        }

        let body = resp.text().await?;
        debug!(game_id, bytes = body.len(), "Fetched game record");
        parse_record_body(&body)
    }

    /// Send a move in SAN. The caller does not wait on this for board state.
    pub async fn submit_move(&self, submission: &Submission) -> Result<(), ClientError> {
        let body = MoveBody {
            game_id: &submission.game_id,
            mv: &submission.san,
        };

        let resp = self
            .client
            .post(self.move_url())
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(ClientError::Status(resp.status().as_u16()));
        }

        info!(game_id = %submission.game_id, san = %submission.san, ply = submission.ply, "Move submitted");
        Ok(())
    }
}

/// Decode a lookup response. An empty body or JSON `null` means the game
/// does not exist.
pub fn parse_record_body(body: &str) -> Result<Option<GameRecord>, ClientError> {
    let body = body.trim();
    if body.is_empty() || body == "null" {
        return Ok(None);
    }
    Ok(Some(GameRecord::from_json(body)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use game_state::{Address, GameError, TieBreak};

    fn config() -> ClientConfig {
        ClientConfig {
            api_base_url: "http://localhost:3000/api".to_string(),
            game_id: "0xfeed".to_string(),
            viewer: Address::zero(),
            poll_interval: Duration::from_millis(2000),
            request_timeout: Duration::from_secs(5),
            tie_break: TieBreak::default(),
            bell: false,
        }
    }

    #[test]
    fn test_urls() {
        let api = GameApi::new(&config()).unwrap();
        assert_eq!(api.game_url("0xfeed"), "http://localhost:3000/api/games/0xfeed");
        assert_eq!(api.move_url(), "http://localhost:3000/api/actions/move");
    }

    #[test]
    fn test_parse_record_body() {
        assert!(parse_record_body("null").unwrap().is_none());
        assert!(parse_record_body("  ").unwrap().is_none());
        assert!(matches!(
            parse_record_body("{\"w\":1}"),
            Err(ClientError::Game(GameError::InvalidRecord(_)))
        ));

        let body = r#"{"w":"0xa","b":"0xb","board":"rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1","status":"in_play","startedAt":5,"endedAt":0}"#;
        let record = parse_record_body(body).unwrap().unwrap();
        assert_eq!(record.started_at, 5);
    }

    #[test]
    fn test_move_body_shape() {
        let body = MoveBody {
            game_id: "0xfeed",
            mv: "e4",
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json, serde_json::json!({ "gameId": "0xfeed", "move": "e4" }));
    }
}
