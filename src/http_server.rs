use clap::Parser;
use game_collection::{
    api::FirestoreApi,
    config::{Config, StoreKind},
    http,
    library::{firestore::FirestoreGameStore, GameStore, MemoryGameStore},
    Status, Tracing,
};
use std::sync::Arc;
use tracing::info;
use warp::{self, Filter};

#[tokio::main]
async fn main() -> Result<(), Status> {
    let config = Config::parse();

    match config.prod_tracing {
        false => Tracing::setup("game-collection-http")?,
        true => Tracing::setup_prod(&config.project_id)?,
    }

    let store: Arc<dyn GameStore> = match config.store {
        StoreKind::Firestore => {
            let firestore = FirestoreApi::connect(&config.project_id).await?;
            Arc::new(FirestoreGameStore::new(
                Arc::new(firestore),
                config.collection.clone(),
            ))
        }
        StoreKind::Memory => Arc::new(MemoryGameStore::new()),
    };

    let port = config.listen_port();
    info!(
        "game collection service listening on port {port} ({:?} store)",
        config.store
    );

    warp::serve(
        http::routes::routes(store).with(
            warp::cors()
                .allow_methods(vec!["GET", "POST", "PUT", "DELETE"])
                .allow_headers(vec!["Content-Type"])
                .allow_any_origin(),
        ),
    )
    .run(([0, 0, 0, 0], port))
    .await;

    Ok(())
}
