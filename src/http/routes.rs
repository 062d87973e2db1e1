use crate::library::{GameFilter, GameStore};
use std::sync::Arc;
use warp::{self, Filter};

use super::{handlers, rejections, resources::*};

/// Returns a Filter with all available routes.
pub fn routes(
    store: Arc<dyn GameStore>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = std::convert::Infallible> + Clone {
    home()
        .or(get_games(Arc::clone(&store)))
        .or(post_game(Arc::clone(&store)))
        .or(get_game(Arc::clone(&store)))
        .or(put_game(Arc::clone(&store)))
        .or(delete_game(Arc::clone(&store)))
        .or(post_favorite(Arc::clone(&store)))
        .or(get_stats(Arc::clone(&store)))
        .or(get_export(Arc::clone(&store)))
        .recover(rejections::recover)
}

/// GET /
fn home() -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path!().and(warp::get()).and_then(handlers::welcome)
}

/// GET /api/games?genre=&platform=&completed=&favorite=
fn get_games(
    store: Arc<dyn GameStore>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path!("api" / "games")
        .and(warp::get())
        .and(warp::query::<GameFilter>())
        .and(with_store(store))
        .and_then(handlers::list_games)
}

/// POST /api/games
fn post_game(
    store: Arc<dyn GameStore>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path!("api" / "games")
        .and(warp::post())
        .and(json_body())
        .and(with_store(store))
        .and_then(handlers::create_game)
}

/// GET /api/games/{id}
fn get_game(
    store: Arc<dyn GameStore>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path!("api" / "games" / String)
        .and(warp::get())
        .and(with_store(store))
        .and_then(handlers::get_game)
}

/// PUT /api/games/{id}
fn put_game(
    store: Arc<dyn GameStore>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path!("api" / "games" / String)
        .and(warp::put())
        .and(json_body())
        .and(with_store(store))
        .and_then(handlers::update_game)
}

/// DELETE /api/games/{id}
fn delete_game(
    store: Arc<dyn GameStore>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path!("api" / "games" / String)
        .and(warp::delete())
        .and(with_store(store))
        .and_then(handlers::delete_game)
}

/// POST /api/games/{id}/favorite
fn post_favorite(
    store: Arc<dyn GameStore>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path!("api" / "games" / String / "favorite")
        .and(warp::post())
        .and(with_store(store))
        .and_then(handlers::toggle_favorite)
}

/// GET /api/stats
fn get_stats(
    store: Arc<dyn GameStore>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path!("api" / "stats")
        .and(warp::get())
        .and(with_store(store))
        .and_then(handlers::get_stats)
}

/// GET /api/export
fn get_export(
    store: Arc<dyn GameStore>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path!("api" / "export")
        .and(warp::get())
        .and(with_store(store))
        .and_then(handlers::export)
}

fn json_body() -> impl Filter<Extract = (serde_json::Value,), Error = warp::Rejection> + Clone {
    warp::body::content_length_limit(32 * 1024).and(warp::body::json())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::MemoryGameStore;
    use serde_json::{json, Value};
    use warp::http::StatusCode;

    fn store() -> Arc<dyn GameStore> {
        Arc::new(MemoryGameStore::new())
    }

    fn new_game(title: &str, genres: Value) -> Value {
        json!({
            "title": title,
            "publisher": "P",
            "developer": "D",
            "release_year": 2020,
            "genres": genres,
            "platforms": ["PC"],
        })
    }

    fn body(resp: &warp::http::Response<warp::hyper::body::Bytes>) -> Value {
        serde_json::from_slice(resp.body()).unwrap()
    }

    async fn create(store: &Arc<dyn GameStore>, game: Value) -> Value {
        let resp = warp::test::request()
            .method("POST")
            .path("/api/games")
            .json(&game)
            .reply(&routes(Arc::clone(store)))
            .await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        body(&resp)
    }

    #[tokio::test]
    async fn welcome() {
        let resp = warp::test::request()
            .path("/")
            .reply(&routes(store()))
            .await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body(&resp), json!({ "message": "Game collection API" }));
    }

    #[tokio::test]
    async fn create_with_defaults() {
        let store = store();
        let game = create(&store, new_game("X", json!(["RPG"]))).await;

        assert!(game["id"].is_string());
        assert_eq!(game["title"], "X");
        assert_eq!(game["hours_played"], 0);
        assert_eq!(game["completed"], false);
        assert_eq!(game["favorite"], false);
        assert!(game["created_at"].is_string());
        assert_eq!(game["created_at"], game["updated_at"]);
    }

    #[tokio::test]
    async fn create_missing_field() {
        let store = store();
        let resp = warp::test::request()
            .method("POST")
            .path("/api/games")
            .json(&json!({ "title": "X", "genres": ["RPG"], "platforms": ["PC"] }))
            .reply(&routes(Arc::clone(&store)))
            .await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(body(&resp)["error"].as_str().unwrap().contains("publisher"));
        assert_eq!(store.list_all().await.unwrap().len(), 0);
    }

    #[tokio::test]
    async fn create_malformed_json() {
        let resp = warp::test::request()
            .method("POST")
            .path("/api/games")
            .header("content-type", "application/json")
            .body("{ not json")
            .reply(&routes(store()))
            .await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(body(&resp)["error"].is_string());
    }

    #[tokio::test]
    async fn get_update_and_missing() {
        let store = store();
        let game = create(&store, new_game("X", json!(["RPG"]))).await;
        let id = game["id"].as_str().unwrap();

        let resp = warp::test::request()
            .path(&format!("/api/games/{id}"))
            .reply(&routes(Arc::clone(&store)))
            .await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body(&resp), game);

        let resp = warp::test::request()
            .method("PUT")
            .path(&format!("/api/games/{id}"))
            .json(&json!({ "hours_played": 30, "completed": true }))
            .reply(&routes(Arc::clone(&store)))
            .await;
        assert_eq!(resp.status(), StatusCode::OK);
        let updated = body(&resp);
        assert_eq!(updated["hours_played"], 30);
        assert_eq!(updated["completed"], true);
        assert_eq!(updated["title"], "X");

        let resp = warp::test::request()
            .method("PUT")
            .path("/api/games/missing")
            .json(&json!({ "completed": true }))
            .reply(&routes(Arc::clone(&store)))
            .await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let resp = warp::test::request()
            .path("/api/games/missing")
            .reply(&routes(store))
            .await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn update_invalid_score() {
        let store = store();
        let game = create(&store, new_game("X", json!(["RPG"]))).await;
        let id = game["id"].as_str().unwrap();

        let resp = warp::test::request()
            .method("PUT")
            .path(&format!("/api/games/{id}"))
            .json(&json!({ "metacritic_score": 250 }))
            .reply(&routes(store))
            .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn delete_twice() {
        let store = store();
        let game = create(&store, new_game("X", json!(["RPG"]))).await;
        let path = format!("/api/games/{}", game["id"].as_str().unwrap());

        let resp = warp::test::request()
            .method("DELETE")
            .path(&path)
            .reply(&routes(Arc::clone(&store)))
            .await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body(&resp), json!({ "message": "Game deleted" }));

        let resp = warp::test::request()
            .method("DELETE")
            .path(&path)
            .reply(&routes(store))
            .await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn toggle_favorite_twice() {
        let store = store();
        let game = create(&store, new_game("X", json!(["RPG"]))).await;
        let path = format!("/api/games/{}/favorite", game["id"].as_str().unwrap());

        let resp = warp::test::request()
            .method("POST")
            .path(&path)
            .reply(&routes(Arc::clone(&store)))
            .await;
        assert_eq!(body(&resp)["favorite"], true);

        let resp = warp::test::request()
            .method("POST")
            .path(&path)
            .reply(&routes(store))
            .await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body(&resp), game);
    }

    #[tokio::test]
    async fn list_with_filters() {
        let store = store();
        create(&store, new_game("A", json!(["RPG", "Action"]))).await;
        create(&store, new_game("B", json!("Puzzle"))).await;
        create(&store, new_game("C", json!(["RPG"]))).await;

        let resp = warp::test::request()
            .path("/api/games")
            .reply(&routes(Arc::clone(&store)))
            .await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body(&resp)["count"], 3);

        let resp = warp::test::request()
            .path("/api/games?genre=RPG")
            .reply(&routes(Arc::clone(&store)))
            .await;
        let list = body(&resp);
        assert_eq!(list["count"], 2);
        for game in list["games"].as_array().unwrap() {
            assert!(game["genres"].as_array().unwrap().contains(&json!("RPG")));
        }

        let resp = warp::test::request()
            .path("/api/games?genre=RPG&favorite=true")
            .reply(&routes(store))
            .await;
        assert_eq!(body(&resp), json!({ "count": 0, "games": [] }));
    }

    #[tokio::test]
    async fn list_bad_query() {
        let resp = warp::test::request()
            .path("/api/games?completed=maybe")
            .reply(&routes(store()))
            .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn stats_empty_collection() {
        let resp = warp::test::request()
            .path("/api/stats")
            .reply(&routes(store()))
            .await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            body(&resp),
            json!({
                "total_games": 0,
                "completed_games": 0,
                "favorite_games": 0,
                "total_hours_played": 0,
                "average_metacritic_score": 0,
                "average_rated_metacritic_score": 0,
            })
        );
    }

    #[tokio::test]
    async fn stats_and_export() {
        let store = store();
        let mut scored = new_game("A", json!(["RPG"]));
        scored["metacritic_score"] = json!(80);
        scored["hours_played"] = json!(12);
        scored["completed"] = json!(true);
        create(&store, scored).await;
        create(&store, new_game("B", json!(["RPG"]))).await;

        let resp = warp::test::request()
            .path("/api/stats")
            .reply(&routes(Arc::clone(&store)))
            .await;
        let stats = body(&resp);
        assert_eq!(stats["total_games"], 2);
        assert_eq!(stats["completed_games"], 1);
        assert_eq!(stats["total_hours_played"], 12);
        assert_eq!(stats["average_metacritic_score"], 40);
        assert_eq!(stats["average_rated_metacritic_score"], 80);

        let resp = warp::test::request()
            .path("/api/export")
            .reply(&routes(store))
            .await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers()["content-disposition"],
            "attachment; filename=games.json"
        );
        assert_eq!(body(&resp).as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn unknown_route_and_method() {
        let resp = warp::test::request()
            .path("/api/nothing")
            .reply(&routes(store()))
            .await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert!(body(&resp)["error"].is_string());

        let resp = warp::test::request()
            .method("DELETE")
            .path("/api/stats")
            .reply(&routes(store()))
            .await;
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
