use serde::{Deserialize, Serialize};

use crate::documents::Game;

/// Response of the list endpoint.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct GameList {
    pub count: usize,
    pub games: Vec<Game>,
}

impl From<Vec<Game>> for GameList {
    fn from(games: Vec<Game>) -> Self {
        GameList {
            count: games.len(),
            games,
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Self {
        Message {
            message: message.into(),
        }
    }
}

/// Body of every non successful response.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
