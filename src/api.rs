//! Typed client for the game backend under `/api/game`.
//!
//! One method per endpoint, no retries: a failed call is reported to the
//! caller and the UI stays where it was.

use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{GameState, Player};

pub const API_BASE: &str = "/api/game";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Net(#[from] gloo_net::Error),
    #[error("server responded with status {0}")]
    Status(u16),
}

/// Start response wraps the freshly seeded game state.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StartResponse {
    pub state: GameState,
    pub message: Option<String>,
}

/// Play response carries a sound reference, or nothing when the pool is
/// exhausted.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlayResponse {
    pub sound: Option<String>,
    pub sound_url: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GuessResponse {
    pub leaderboard: Vec<Player>,
    pub sound_name: Option<String>,
    pub message: Option<String>,
}

/// Branding fetched once at startup.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BrandingConfig {
    pub company_name: Option<String>,
    pub company_subtitle: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GuessRequest<'a> {
    player_name: &'a str,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GameApi;

impl GameApi {
    pub async fn start(&self) -> Result<StartResponse, ApiError> {
        self.post("/start").await
    }

    pub async fn play(&self) -> Result<PlayResponse, ApiError> {
        self.post("/play").await
    }

    pub async fn stop(&self) -> Result<(), ApiError> {
        self.post_ack("/stop").await
    }

    pub async fn skip(&self) -> Result<(), ApiError> {
        self.post_ack("/skip").await
    }

    pub async fn guess(&self, player_name: &str) -> Result<GuessResponse, ApiError> {
        let resp = Request::post(&endpoint("/guess"))
            .json(&GuessRequest { player_name })?
            .send()
            .await?;
        checked(resp)?.json().await.map_err(ApiError::from)
    }

    pub async fn state(&self) -> Result<GameState, ApiError> {
        self.get("/state").await
    }

    pub async fn config(&self) -> Result<BrandingConfig, ApiError> {
        self.get("/config").await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let resp = Request::get(&endpoint(path)).send().await?;
        checked(resp)?.json().await.map_err(ApiError::from)
    }

    async fn post<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let resp = Request::post(&endpoint(path)).send().await?;
        checked(resp)?.json().await.map_err(ApiError::from)
    }

    /// POST where the caller does not consume the payload.
    async fn post_ack(&self, path: &str) -> Result<(), ApiError> {
        let resp = Request::post(&endpoint(path)).send().await?;
        checked(resp).map(|_| ())
    }
}

fn endpoint(path: &str) -> String {
    format!("{API_BASE}{path}")
}

fn checked(resp: Response) -> Result<Response, ApiError> {
    if resp.ok() {
        Ok(resp)
    } else {
        Err(ApiError::Status(resp.status()))
    }
}

/// Avatar URL for a player; the scoreboard falls back to initials when the
/// image fails to load.
pub fn player_image_url(name: &str) -> String {
    let encoded = js_sys::encode_uri_component(name);
    format!("{API_BASE}/player-image/{encoded}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::GamePhase;

    #[test]
    fn game_state_decodes_the_server_shape() {
        let state: GameState = serde_json::from_str(
            r#"{
                "state": "BONUS_ROUND",
                "players": [{"name": "Ana", "score": 3}, {"name": "Bo", "score": 3}],
                "currentSound": "kettle.mp3",
                "playedSounds": ["horn.mp3"],
                "availableSounds": [],
                "bonusRound": true
            }"#,
        )
        .expect("full state decodes");
        assert_eq!(state.state, GamePhase::BonusRound);
        assert_eq!(state.players.len(), 2);
        assert_eq!(state.current_sound.as_deref(), Some("kettle.mp3"));
        assert!(state.bonus_round);
    }

    #[test]
    fn missing_current_sound_decodes_as_absent() {
        let state: GameState =
            serde_json::from_str(r#"{"state": "WAITING", "players": []}"#).expect("decodes");
        assert_eq!(state.state, GamePhase::Waiting);
        assert_eq!(state.current_sound, None);
    }

    #[test]
    fn exhausted_play_response_has_no_sound() {
        let resp: PlayResponse =
            serde_json::from_str(r#"{"message": "No more sounds available"}"#).expect("decodes");
        assert_eq!(resp.sound, None);
        assert_eq!(resp.sound_url, None);
    }

    #[test]
    fn play_response_carries_the_sound_reference() {
        let resp: PlayResponse = serde_json::from_str(
            r#"{"sound": "car_horn-1.mp3", "soundUrl": "/api/game/sound/car_horn-1.mp3", "state": "PLAYING"}"#,
        )
        .expect("decodes");
        assert_eq!(resp.sound.as_deref(), Some("car_horn-1.mp3"));
        assert_eq!(
            resp.sound_url.as_deref(),
            Some("/api/game/sound/car_horn-1.mp3")
        );
    }

    #[test]
    fn guess_request_serializes_camel_case() {
        let body = serde_json::to_string(&GuessRequest { player_name: "Ana" }).expect("encodes");
        assert_eq!(body, r#"{"playerName":"Ana"}"#);
    }

    #[test]
    fn branding_tolerates_an_empty_config() {
        let cfg: BrandingConfig = serde_json::from_str("{}").expect("decodes");
        assert_eq!(cfg.company_name, None);
        assert_eq!(cfg.company_subtitle, None);
    }
}
