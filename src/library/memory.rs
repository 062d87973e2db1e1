use async_trait::async_trait;
use std::{
    collections::BTreeMap,
    sync::atomic::{AtomicU64, Ordering},
};
use tokio::sync::RwLock;
use tracing::instrument;

use crate::{
    documents::Game,
    log_event,
    logging::StoreEvent,
    Status,
};

use super::{validate_id, GameFilter, GameStore};

/// Keeps the collection in process memory.
#[derive(Default)]
pub struct MemoryGameStore {
    games: RwLock<BTreeMap<String, Game>>,
    next_id: AtomicU64,
}

impl MemoryGameStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn generate_id(&self) -> String {
        format!("{:020}", self.next_id.fetch_add(1, Ordering::Relaxed) + 1)
    }
}

#[async_trait]
impl GameStore for MemoryGameStore {
    #[instrument(name = "memory::insert", level = "trace", skip(self, game))]
    async fn insert(&self, mut game: Game) -> Result<Game, Status> {
        let id = self.generate_id();
        game.id = Some(id.clone());

        self.games.write().await.insert(id.clone(), game.clone());
        log_event!(StoreEvent::create(COLLECTION, &id, None));
        Ok(game)
    }

    #[instrument(name = "memory::list", level = "trace", skip(self))]
    async fn list(&self, filter: &GameFilter) -> Result<Vec<Game>, Status> {
        let games = self.games.read().await;
        log_event!(StoreEvent::scan(COLLECTION, games.len(), None));

        Ok(games
            .values()
            .filter(|game| filter.matches(game))
            .cloned()
            .collect())
    }

    #[instrument(name = "memory::read", level = "trace", skip(self))]
    async fn read(&self, id: &str) -> Result<Game, Status> {
        validate_id(id)?;

        match self.games.read().await.get(id) {
            Some(game) => {
                log_event!(StoreEvent::read(COLLECTION, id, None));
                Ok(game.clone())
            }
            None => {
                log_event!(StoreEvent::read_not_found(COLLECTION, id));
                Err(Status::not_found(format!("Game '{id}' was not found")))
            }
        }
    }

    #[instrument(name = "memory::write", level = "trace", skip(self, game))]
    async fn write(&self, game: &Game) -> Result<(), Status> {
        let id = match &game.id {
            Some(id) => id,
            None => return Err(Status::internal(format!("{game} has no id to write to"))),
        };
        validate_id(id)?;

        self.games.write().await.insert(id.clone(), game.clone());
        log_event!(StoreEvent::write(COLLECTION, id, None));
        Ok(())
    }

    #[instrument(name = "memory::delete", level = "trace", skip(self))]
    async fn delete(&self, id: &str) -> Result<(), Status> {
        validate_id(id)?;

        match self.games.write().await.remove(id) {
            Some(_) => {
                log_event!(StoreEvent::delete(COLLECTION, id, None));
                Ok(())
            }
            None => {
                log_event!(StoreEvent::read_not_found(COLLECTION, id));
                Err(Status::not_found(format!("Game '{id}' was not found")))
            }
        }
    }
}

const COLLECTION: &str = "memory/games";
