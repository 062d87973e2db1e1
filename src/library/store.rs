use async_trait::async_trait;
use chrono::Utc;
use tracing::instrument;

use crate::{
    documents::{Game, GameUpdate, NewGame},
    Status,
};

use super::GameFilter;

/// Access to the game collection.
///
/// Implementations provide the primitive document operations. Validation and
/// the read-modify-write mutations are built on top of them. Mutations are
/// not atomic: two concurrent updates of the same game may lose one of them.
#[async_trait]
pub trait GameStore: Send + Sync {
    /// Persists a new document and returns it with its store assigned id.
    async fn insert(&self, game: Game) -> Result<Game, Status>;

    async fn list(&self, filter: &GameFilter) -> Result<Vec<Game>, Status>;

    async fn read(&self, id: &str) -> Result<Game, Status>;

    /// Overwrites the document identified by `game.id`.
    async fn write(&self, game: &Game) -> Result<(), Status>;

    /// Removes a document. Returns NotFound if it does not exist.
    async fn delete(&self, id: &str) -> Result<(), Status>;

    #[instrument(level = "trace", skip(self, new_game), fields(title = %new_game.title))]
    async fn create(&self, new_game: NewGame) -> Result<Game, Status> {
        new_game.validate()?;
        self.insert(new_game.into_game(Utc::now())).await
    }

    async fn list_all(&self) -> Result<Vec<Game>, Status> {
        self.list(&GameFilter::default()).await
    }

    #[instrument(level = "trace", skip(self, update))]
    async fn update(&self, id: &str, update: GameUpdate) -> Result<Game, Status> {
        let mut game = self.read(id).await?;
        game.merge(update)?;
        self.write(&game).await?;
        Ok(game)
    }

    #[instrument(level = "trace", skip(self))]
    async fn toggle_favorite(&self, id: &str) -> Result<Game, Status> {
        let mut game = self.read(id).await?;
        game.favorite = !game.favorite;
        self.write(&game).await?;
        Ok(game)
    }
}

/// Checks that `id` can name a document in the collection.
pub fn validate_id(id: &str) -> Result<(), Status> {
    if id.is_empty() {
        return Err(Status::invalid_argument("Game id cannot be empty"));
    }
    if id.len() > MAX_ID_BYTES {
        return Err(Status::invalid_argument(format!(
            "Game id is longer than {MAX_ID_BYTES} bytes"
        )));
    }
    if id.contains('/')
        || id == "."
        || id == ".."
        || (id.len() >= 4 && id.starts_with("__") && id.ends_with("__"))
    {
        return Err(Status::invalid_argument(format!("Malformed game id '{id}'")));
    }
    Ok(())
}

const MAX_ID_BYTES: usize = 1500;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_ids() {
        assert_eq!(validate_id("Hq3xB2nP0aZ9kLmR7sTu"), Ok(()));
        assert_eq!(validate_id("00000000000000000001"), Ok(()));
        assert_eq!(validate_id("_x_"), Ok(()));
    }

    #[test]
    fn malformed_ids() {
        for id in ["", ".", "..", "a/b", "__reserved__", "____"] {
            assert!(
                matches!(validate_id(id), Err(Status::InvalidArgument(_))),
                "{id}"
            );
        }
        assert!(validate_id(&"x".repeat(1501)).is_err());
    }
}
