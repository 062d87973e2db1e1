use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::instrument;

use crate::{
    documents::{Game, NewGame, Stats},
    http::models::{ErrorResponse, GameList, Message},
    library::GameFilter,
    Status,
};

/// Client of the game store REST API.
pub struct GameClient {
    client: reqwest::Client,
    api_url: String,
}

impl GameClient {
    /// `api_url` is the API root, e.g. `http://localhost:7000/api`.
    pub fn new(api_url: impl Into<String>) -> Self {
        GameClient {
            client: reqwest::Client::new(),
            api_url: api_url.into().trim_end_matches('/').to_owned(),
        }
    }

    #[instrument(level = "trace", skip(self))]
    pub async fn list(&self, filter: &GameFilter) -> Result<GameList, Status> {
        let resp = self
            .client
            .get(format!("{}/games", self.api_url))
            .query(filter)
            .send()
            .await?;
        parse(resp).await
    }

    #[instrument(level = "trace", skip(self))]
    pub async fn stats(&self) -> Result<Stats, Status> {
        let resp = self
            .client
            .get(format!("{}/stats", self.api_url))
            .send()
            .await?;
        parse(resp).await
    }

    #[instrument(level = "trace", skip(self, new_game), fields(title = %new_game.title))]
    pub async fn create(&self, new_game: &NewGame) -> Result<Game, Status> {
        let resp = self
            .client
            .post(format!("{}/games", self.api_url))
            .json(new_game)
            .send()
            .await?;
        parse(resp).await
    }

    #[instrument(level = "trace", skip(self))]
    pub async fn toggle_favorite(&self, id: &str) -> Result<Game, Status> {
        let resp = self
            .client
            .post(format!("{}/games/{id}/favorite", self.api_url))
            .send()
            .await?;
        parse(resp).await
    }

    #[instrument(level = "trace", skip(self))]
    pub async fn delete(&self, id: &str) -> Result<Message, Status> {
        let resp = self
            .client
            .delete(format!("{}/games/{id}", self.api_url))
            .send()
            .await?;
        parse(resp).await
    }

    /// Returns the raw export document.
    #[instrument(level = "trace", skip(self))]
    pub async fn export(&self) -> Result<String, Status> {
        let resp = self
            .client
            .get(format!("{}/export", self.api_url))
            .send()
            .await?;

        match resp.status().is_success() {
            true => Ok(resp.text().await?),
            false => Err(into_status(resp).await),
        }
    }
}

async fn parse<T: DeserializeOwned>(resp: Response) -> Result<T, Status> {
    match resp.status().is_success() {
        true => Ok(resp.json::<T>().await?),
        false => Err(into_status(resp).await),
    }
}

/// Rebuilds the service side status from an error response.
async fn into_status(resp: Response) -> Status {
    let code = resp.status();
    let msg = match resp.json::<ErrorResponse>().await {
        Ok(body) => body.error,
        Err(_) => format!("request failed with status {code}"),
    };

    match code {
        StatusCode::BAD_REQUEST => Status::invalid_argument(msg),
        StatusCode::NOT_FOUND => Status::not_found(msg),
        _ => Status::internal(msg),
    }
}
