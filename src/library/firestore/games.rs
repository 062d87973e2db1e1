use std::{fmt::Display, sync::Arc};

use async_trait::async_trait;
use firestore::errors::FirestoreError;
use futures::{stream::BoxStream, StreamExt};
use tracing::instrument;

use crate::{
    api::FirestoreApi,
    documents::Game,
    library::{validate_id, GameFilter, GameStore},
    log_event,
    logging::StoreEvent,
    Status,
};

/// Game collection persisted in a Firestore collection.
pub struct FirestoreGameStore {
    firestore: Arc<FirestoreApi>,
    collection: String,
}

impl FirestoreGameStore {
    pub fn new(firestore: Arc<FirestoreApi>, collection: impl Into<String>) -> Self {
        FirestoreGameStore {
            firestore,
            collection: collection.into(),
        }
    }

    /// Streams every document of the collection.
    async fn list_all_docs(&self) -> Result<Vec<Game>, Status> {
        let doc_stream: BoxStream<Game> = self
            .firestore
            .db()
            .fluent()
            .list()
            .from(self.collection.as_str())
            .obj()
            .stream_all()
            .await
            .map_err(|e| {
                log_event!(StoreEvent::scan(&self.collection, 0, Some(e.to_string())));
                make_status(e, &self.collection, "*")
            })?;

        let games: Vec<Game> = doc_stream.collect().await;
        log_event!(StoreEvent::scan(&self.collection, games.len(), None));
        Ok(games)
    }

    /// Runs a query pushing down the equality constraints and at most one
    /// array-contains constraint, which is all Firestore allows in a single
    /// query. The rest of the filter is applied on the results.
    async fn query(&self, filter: &GameFilter) -> Result<Vec<Game>, Status> {
        let array_filter = match (&filter.genre, &filter.platform) {
            (Some(genre), _) => Some((GENRES_FIELD, genre.as_str())),
            (None, Some(platform)) => Some((PLATFORMS_FIELD, platform.as_str())),
            (None, None) => None,
        };

        let result: Result<Vec<Game>, FirestoreError> = self
            .firestore
            .db()
            .fluent()
            .select()
            .from(self.collection.as_str())
            .filter(|q| {
                q.for_all([
                    array_filter.and_then(|(field, value)| q.field(field).array_contains(value)),
                    filter
                        .completed
                        .and_then(|completed| q.field(COMPLETED_FIELD).eq(completed)),
                    filter
                        .favorite
                        .and_then(|favorite| q.field(FAVORITE_FIELD).eq(favorite)),
                ])
            })
            .obj()
            .query()
            .await;

        match result {
            Ok(mut games) => {
                log_event!(StoreEvent::scan(&self.collection, games.len(), None));
                games.retain(|game| filter.matches(game));
                Ok(games)
            }
            Err(e) => {
                log_event!(StoreEvent::scan(&self.collection, 0, Some(e.to_string())));
                Err(make_status(e, &self.collection, "*"))
            }
        }
    }
}

#[async_trait]
impl GameStore for FirestoreGameStore {
    #[instrument(name = "games::insert", level = "trace", skip(self, game))]
    async fn insert(&self, game: Game) -> Result<Game, Status> {
        let result: Result<Game, FirestoreError> = self
            .firestore
            .db()
            .fluent()
            .insert()
            .into(self.collection.as_str())
            .generate_document_id()
            .object(&Game { id: None, ..game })
            .execute()
            .await;

        match result {
            Ok(game) => match &game.id {
                Some(id) => {
                    log_event!(StoreEvent::create(&self.collection, id, None));
                    Ok(game)
                }
                None => Err(Status::internal(format!(
                    "Firestore did not return the id of the new '{}' document",
                    self.collection
                ))),
            },
            Err(e) => {
                log_event!(StoreEvent::create(
                    &self.collection,
                    "<new>",
                    Some(e.to_string())
                ));
                Err(make_status(e, &self.collection, "<new>"))
            }
        }
    }

    #[instrument(name = "games::list", level = "trace", skip(self))]
    async fn list(&self, filter: &GameFilter) -> Result<Vec<Game>, Status> {
        match filter.is_empty() {
            true => self.list_all_docs().await,
            false => self.query(filter).await,
        }
    }

    #[instrument(name = "games::read", level = "trace", skip(self))]
    async fn read(&self, id: &str) -> Result<Game, Status> {
        validate_id(id)?;

        let doc: Result<Option<Game>, FirestoreError> = self
            .firestore
            .db()
            .fluent()
            .select()
            .by_id_in(self.collection.as_str())
            .obj()
            .one(id)
            .await;

        match doc {
            Ok(Some(game)) => {
                log_event!(StoreEvent::read(&self.collection, id, None));
                Ok(game)
            }
            Ok(None) => {
                log_event!(StoreEvent::read_not_found(&self.collection, id));
                Err(Status::not_found(format!(
                    "Firestore document '{}/{id}' was not found",
                    self.collection
                )))
            }
            Err(e) => {
                log_event!(StoreEvent::read(&self.collection, id, Some(e.to_string())));
                Err(make_status(e, &self.collection, id))
            }
        }
    }

    #[instrument(name = "games::write", level = "trace", skip(self, game))]
    async fn write(&self, game: &Game) -> Result<(), Status> {
        let id = match &game.id {
            Some(id) => id.as_str(),
            None => return Err(Status::internal(format!("{game} has no id to write to"))),
        };
        validate_id(id)?;

        // The id lives in the document name, not in its fields.
        let doc = Game {
            id: None,
            ..game.clone()
        };

        let result = self
            .firestore
            .db()
            .fluent()
            .update()
            .in_col(self.collection.as_str())
            .document_id(id)
            .object(&doc)
            .execute::<()>()
            .await;

        match result {
            Ok(()) => {
                log_event!(StoreEvent::write(&self.collection, id, None));
                Ok(())
            }
            Err(e) => {
                log_event!(StoreEvent::write(&self.collection, id, Some(e.to_string())));
                Err(make_status(e, &self.collection, id))
            }
        }
    }

    #[instrument(name = "games::delete", level = "trace", skip(self))]
    async fn delete(&self, id: &str) -> Result<(), Status> {
        // Firestore deletes of missing documents succeed silently.
        self.read(id).await?;

        let result = self
            .firestore
            .db()
            .fluent()
            .delete()
            .from(self.collection.as_str())
            .document_id(id)
            .execute()
            .await;

        match result {
            Ok(()) => {
                log_event!(StoreEvent::delete(&self.collection, id, None));
                Ok(())
            }
            Err(e) => {
                log_event!(StoreEvent::delete(&self.collection, id, Some(e.to_string())));
                Err(make_status(e, &self.collection, id))
            }
        }
    }
}

fn make_status<S: Display>(error: FirestoreError, collection: &str, doc_id: S) -> Status {
    match error {
        FirestoreError::DeserializeError(e) => Status::internal(format!(
            "Firestore '{collection}/{doc_id}' document failed to parse with error '{}'",
            e.message,
        )),
        FirestoreError::DataNotFoundError(_) => Status::not_found(format!(
            "Firestore document '{collection}/{doc_id}' was not found"
        )),
        e => Status::internal(format!("Firestore '{collection}/{doc_id}' error: {e}")),
    }
}

const GENRES_FIELD: &str = "genres";
const PLATFORMS_FIELD: &str = "platforms";
const COMPLETED_FIELD: &str = "completed";
const FAVORITE_FIELD: &str = "favorite";
