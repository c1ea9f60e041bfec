//! Client for the "spot the fake" game.

use matrix_model::{GameAnswer, GamePair, Vote};
use serde::de::DeserializeOwned;

use crate::client::{build_http_client, handle_response};
use crate::config::{ClientConfig, join_url};
use crate::error::Result;

const GAME_PREFIX: &str = "/api/spot-game";

#[derive(Debug, Clone)]
pub struct GameClient {
    client: reqwest::Client,
    base_url: String,
    user_id: String,
}

impl GameClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        Ok(Self {
            client: build_http_client(config)?,
            base_url: config.game_base().to_string(),
            user_id: config.user_id.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        join_url(&self.base_url, &format!("{GAME_PREFIX}{path}"))
    }

    /// Fetches a random pair. Fake markers are never included.
    pub async fn pair(&self) -> Result<GamePair> {
        self.get_json(&self.url("/pair")).await
    }

    /// Records which item the user picked as fake.
    pub async fn vote(&self, pair_id: &str, choice: usize) -> Result<()> {
        let vote = Vote {
            pair_id: pair_id.to_string(),
            choice,
            user_id: self.user_id.clone(),
        };
        let url = self.url("/vote");
        tracing::debug!(pair_id, choice, "POST {}", url);
        let response = self.client.post(&url).json(&vote).send().await?;
        handle_response(response).await?;
        Ok(())
    }

    /// Reveals the fake item and per-item explanations.
    pub async fn answer(&self, pair_id: &str) -> Result<GameAnswer> {
        self.get_json(&self.url(&format!("/answer/{pair_id}")))
            .await
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        tracing::debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        let body = handle_response(response).await?;
        Ok(serde_json::from_slice(&body)?)
    }
}
