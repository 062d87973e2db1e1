use chrono::{DateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::Status;

/// Document type under '/games' holding a single game of the collection.
#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq)]
pub struct Game {
    /// Store assigned document id. Never written as part of the document.
    #[serde(default)]
    #[serde(alias = "_firestore_id")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    pub title: String,

    #[serde(deserialize_with = "one_or_many")]
    pub genres: Vec<String>,

    #[serde(deserialize_with = "one_or_many")]
    pub platforms: Vec<String>,

    pub publisher: String,
    pub developer: String,
    pub release_year: i32,

    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metacritic_score: Option<i64>,

    #[serde(default)]
    pub hours_played: u32,

    #[serde(default)]
    pub completed: bool,

    #[serde(default)]
    pub favorite: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Game {
    /// Applies the fields present in `update` and validates the result. The
    /// game is left untouched when the merged record is invalid.
    pub fn merge(&mut self, update: GameUpdate) -> Result<(), Status> {
        let mut merged = self.clone();

        if let Some(title) = update.title {
            merged.title = title;
        }
        if let Some(genres) = update.genres {
            merged.genres = genres;
        }
        if let Some(platforms) = update.platforms {
            merged.platforms = platforms;
        }
        if let Some(publisher) = update.publisher {
            merged.publisher = publisher;
        }
        if let Some(developer) = update.developer {
            merged.developer = developer;
        }
        if let Some(release_year) = update.release_year {
            merged.release_year = release_year;
        }
        if let Some(metacritic_score) = update.metacritic_score {
            merged.metacritic_score = metacritic_score;
        }
        if let Some(hours_played) = update.hours_played {
            merged.hours_played = hours_played;
        }
        if let Some(completed) = update.completed {
            merged.completed = completed;
        }
        if let Some(favorite) = update.favorite {
            merged.favorite = favorite;
        }

        merged.validate()?;
        *self = merged;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), Status> {
        validate_record(Record {
            title: &self.title,
            genres: &self.genres,
            platforms: &self.platforms,
            publisher: &self.publisher,
            developer: &self.developer,
            metacritic_score: self.metacritic_score,
        })
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.id {
            Some(id) => write!(f, "Game({id}): '{}'", &self.title),
            None => write!(f, "Game: '{}'", &self.title),
        }
    }
}

/// Request body for adding a game in the collection.
#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq)]
pub struct NewGame {
    pub title: String,

    #[serde(deserialize_with = "one_or_many")]
    pub genres: Vec<String>,

    #[serde(deserialize_with = "one_or_many")]
    pub platforms: Vec<String>,

    pub publisher: String,
    pub developer: String,
    pub release_year: i32,

    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metacritic_score: Option<i64>,

    #[serde(default)]
    pub hours_played: u32,

    #[serde(default)]
    pub completed: bool,

    #[serde(default)]
    pub favorite: bool,
}

impl NewGame {
    pub fn validate(&self) -> Result<(), Status> {
        validate_record(Record {
            title: &self.title,
            genres: &self.genres,
            platforms: &self.platforms,
            publisher: &self.publisher,
            developer: &self.developer,
            metacritic_score: self.metacritic_score,
        })
    }

    /// Builds the document to persist. The id is left for the store to
    /// assign.
    pub fn into_game(self, now: DateTime<Utc>) -> Game {
        Game {
            id: None,
            title: self.title,
            genres: self.genres,
            platforms: self.platforms,
            publisher: self.publisher,
            developer: self.developer,
            release_year: self.release_year,
            metacritic_score: self.metacritic_score,
            hours_played: self.hours_played,
            completed: self.completed,
            favorite: self.favorite,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update of a game. Only fields present in the request are changed.
#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq)]
pub struct GameUpdate {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default, deserialize_with = "optional_one_or_many")]
    pub genres: Option<Vec<String>>,

    #[serde(default, deserialize_with = "optional_one_or_many")]
    pub platforms: Option<Vec<String>>,

    #[serde(default)]
    pub publisher: Option<String>,

    #[serde(default)]
    pub developer: Option<String>,

    #[serde(default)]
    pub release_year: Option<i32>,

    /// `Some(None)` clears the score, `None` leaves it as is.
    #[serde(default, deserialize_with = "nullable")]
    pub metacritic_score: Option<Option<i64>>,

    #[serde(default)]
    pub hours_played: Option<u32>,

    #[serde(default)]
    pub completed: Option<bool>,

    #[serde(default)]
    pub favorite: Option<bool>,
}

struct Record<'a> {
    title: &'a str,
    genres: &'a [String],
    platforms: &'a [String],
    publisher: &'a str,
    developer: &'a str,
    metacritic_score: Option<i64>,
}

fn validate_record(record: Record) -> Result<(), Status> {
    let mut errors = vec![];

    for (name, value) in [
        ("title", record.title),
        ("publisher", record.publisher),
        ("developer", record.developer),
    ] {
        if value.trim().is_empty() {
            errors.push(format!("`{name}` is required"));
        }
    }

    for (name, values) in [("genres", record.genres), ("platforms", record.platforms)] {
        if values.is_empty() {
            errors.push(format!("`{name}` must contain at least one value"));
        } else if values.iter().any(|v| v.trim().is_empty()) {
            errors.push(format!("`{name}` cannot contain blank values"));
        }
    }

    if let Some(score) = record.metacritic_score {
        if !(0..=100).contains(&score) {
            errors.push(format!(
                "`metacritic_score` must be between 0 and 100, got {score}"
            ));
        }
    }

    match errors.is_empty() {
        true => Ok(()),
        false => Err(Status::invalid_argument(format!(
            "Game validation failed: {}",
            errors.join(", ")
        ))),
    }
}

/// Accepts either a single string or a sequence of strings. A single string
/// becomes a one element sequence.
fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    struct OneOrMany;

    impl<'de> de::Visitor<'de> for OneOrMany {
        type Value = Vec<String>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a string or a sequence of strings")
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
            Ok(vec![value.to_owned()])
        }

        fn visit_seq<A: de::SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
            let mut values = vec![];
            while let Some(value) = seq.next_element::<String>()? {
                values.push(value);
            }
            Ok(values)
        }
    }

    deserializer.deserialize_any(OneOrMany)
}

fn optional_one_or_many<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    one_or_many(deserializer).map(Some)
}

fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
