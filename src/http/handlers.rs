use crate::{
    documents::{GameUpdate, NewGame, Stats},
    http::models::{ErrorResponse, GameList, Message},
    library::{GameFilter, GameStore},
    Status,
};
use serde::Serialize;
use std::{convert::Infallible, sync::Arc};
use tracing::instrument;
use warp::http::StatusCode;

use super::query_logs::*;

#[instrument(level = "trace")]
pub async fn welcome() -> Result<impl warp::Reply, Infallible> {
    let event = QueryEvent::new("GET", "/", WELCOME_HANDLER);
    event.log(0);
    Ok(warp::reply::json(&Message::new("Game collection API")))
}

#[instrument(level = "trace", skip(store))]
pub async fn list_games(
    filter: GameFilter,
    store: Arc<dyn GameStore>,
) -> Result<Box<dyn warp::Reply>, Infallible> {
    let event = QueryEvent::new("GET", "/api/games", LIST_HANDLER);
    match store.list(&filter).await {
        Ok(games) => {
            event.log(games.len());
            Ok(json(&GameList::from(games), StatusCode::OK))
        }
        Err(status) => {
            event.log_error(&status);
            Ok(error(status))
        }
    }
}

#[instrument(level = "trace", skip(body, store))]
pub async fn create_game(
    body: serde_json::Value,
    store: Arc<dyn GameStore>,
) -> Result<Box<dyn warp::Reply>, Infallible> {
    let event = QueryEvent::new("POST", "/api/games", CREATE_HANDLER);

    let new_game = match serde_json::from_value::<NewGame>(body) {
        Ok(new_game) => new_game,
        Err(e) => {
            let status = Status::invalid_argument(format!("Game validation failed: {e}"));
            event.log_error(&status);
            return Ok(error(status));
        }
    };

    match store.create(new_game).await {
        Ok(game) => {
            event.log(1);
            Ok(json(&game, StatusCode::CREATED))
        }
        Err(status) => {
            event.log_error(&status);
            Ok(error(status))
        }
    }
}

#[instrument(level = "trace", skip(store))]
pub async fn get_game(
    id: String,
    store: Arc<dyn GameStore>,
) -> Result<Box<dyn warp::Reply>, Infallible> {
    let event = QueryEvent::new("GET", format!("/api/games/{id}"), GET_HANDLER);
    match store.read(&id).await {
        Ok(game) => {
            event.log(1);
            Ok(json(&game, StatusCode::OK))
        }
        Err(status) => {
            event.log_error(&status);
            Ok(error(status))
        }
    }
}

#[instrument(level = "trace", skip(body, store))]
pub async fn update_game(
    id: String,
    body: serde_json::Value,
    store: Arc<dyn GameStore>,
) -> Result<Box<dyn warp::Reply>, Infallible> {
    let event = QueryEvent::new("PUT", format!("/api/games/{id}"), UPDATE_HANDLER);

    let update = match serde_json::from_value::<GameUpdate>(body) {
        Ok(update) => update,
        Err(e) => {
            let status = Status::invalid_argument(format!("Game validation failed: {e}"));
            event.log_error(&status);
            return Ok(error(status));
        }
    };

    match store.update(&id, update).await {
        Ok(game) => {
            event.log(1);
            Ok(json(&game, StatusCode::OK))
        }
        Err(status) => {
            event.log_error(&status);
            Ok(error(status))
        }
    }
}

#[instrument(level = "trace", skip(store))]
pub async fn delete_game(
    id: String,
    store: Arc<dyn GameStore>,
) -> Result<Box<dyn warp::Reply>, Infallible> {
    let event = QueryEvent::new("DELETE", format!("/api/games/{id}"), DELETE_HANDLER);
    match store.delete(&id).await {
        Ok(()) => {
            event.log(0);
            Ok(json(&Message::new("Game deleted"), StatusCode::OK))
        }
        Err(status) => {
            event.log_error(&status);
            Ok(error(status))
        }
    }
}

#[instrument(level = "trace", skip(store))]
pub async fn toggle_favorite(
    id: String,
    store: Arc<dyn GameStore>,
) -> Result<Box<dyn warp::Reply>, Infallible> {
    let event = QueryEvent::new("POST", format!("/api/games/{id}/favorite"), FAVORITE_HANDLER);
    match store.toggle_favorite(&id).await {
        Ok(game) => {
            event.log(1);
            Ok(json(&game, StatusCode::OK))
        }
        Err(status) => {
            event.log_error(&status);
            Ok(error(status))
        }
    }
}

#[instrument(level = "trace", skip(store))]
pub async fn get_stats(store: Arc<dyn GameStore>) -> Result<Box<dyn warp::Reply>, Infallible> {
    let event = QueryEvent::new("GET", "/api/stats", STATS_HANDLER);
    match store.list_all().await {
        Ok(games) => {
            event.log(games.len());
            Ok(json(&Stats::compute(&games), StatusCode::OK))
        }
        Err(status) => {
            event.log_error(&status);
            Ok(error(status))
        }
    }
}

#[instrument(level = "trace", skip(store))]
pub async fn export(store: Arc<dyn GameStore>) -> Result<Box<dyn warp::Reply>, Infallible> {
    let event = QueryEvent::new("GET", "/api/export", EXPORT_HANDLER);
    match store.list_all().await {
        Ok(games) => {
            event.log(games.len());
            Ok(Box::new(warp::reply::with_header(
                warp::reply::json(&games),
                "Content-Disposition",
                EXPORT_DISPOSITION,
            )))
        }
        Err(status) => {
            event.log_error(&status);
            Ok(error(status))
        }
    }
}

fn json<T: Serialize>(value: &T, code: StatusCode) -> Box<dyn warp::Reply> {
    Box::new(warp::reply::with_status(warp::reply::json(value), code))
}

/// Maps a failed operation to its HTTP response.
pub fn error(status: Status) -> Box<dyn warp::Reply> {
    let code = match &status {
        Status::InvalidArgument(_) => StatusCode::BAD_REQUEST,
        Status::NotFound(_) => StatusCode::NOT_FOUND,
        Status::Internal(_) | Status::Ok => StatusCode::INTERNAL_SERVER_ERROR,
    };
    json(
        &ErrorResponse {
            error: status.message().to_owned(),
        },
        code,
    )
}

const EXPORT_DISPOSITION: &str = "attachment; filename=games.json";
