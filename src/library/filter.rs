use serde::{Deserialize, Serialize};

use crate::documents::Game;

/// Equality constraints narrowing a list query. Absent fields do not
/// constrain the result.
#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct GameFilter {
    /// Matches games whose genres contain this value.
    #[serde(default, alias = "genres")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,

    /// Matches games whose platforms contain this value.
    #[serde(default, alias = "platforms")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,

    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,

    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favorite: Option<bool>,
}

impl GameFilter {
    pub fn is_empty(&self) -> bool {
        self.genre.is_none()
            && self.platform.is_none()
            && self.completed.is_none()
            && self.favorite.is_none()
    }

    pub fn matches(&self, game: &Game) -> bool {
        self.genre
            .as_ref()
            .map_or(true, |genre| game.genres.contains(genre))
            && self
                .platform
                .as_ref()
                .map_or(true, |platform| game.platforms.contains(platform))
            && self
                .completed
                .map_or(true, |completed| game.completed == completed)
            && self
                .favorite
                .map_or(true, |favorite| game.favorite == favorite)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(genres: &[&str], platforms: &[&str], completed: bool) -> Game {
        Game {
            title: "Game Title".to_owned(),
            genres: genres.iter().map(|g| g.to_string()).collect(),
            platforms: platforms.iter().map(|p| p.to_string()).collect(),
            completed,
            ..Default::default()
        }
    }

    #[test]
    fn empty_filter_matches_all() {
        let filter = GameFilter::default();
        assert!(filter.is_empty());
        assert!(filter.matches(&game(&["RPG"], &["PC"], false)));
    }

    #[test]
    fn genre_contained_in_sequence() {
        let filter = GameFilter {
            genre: Some("RPG".to_owned()),
            ..Default::default()
        };
        assert!(filter.matches(&game(&["Action", "RPG"], &["PC"], false)));
        assert!(!filter.matches(&game(&["Action"], &["PC"], false)));
        assert!(!filter.matches(&game(&["rpg"], &["PC"], false)));
    }

    #[test]
    fn all_constraints_apply() {
        let filter = GameFilter {
            genre: Some("RPG".to_owned()),
            platform: Some("PC".to_owned()),
            completed: Some(true),
            favorite: None,
        };
        assert!(filter.matches(&game(&["RPG"], &["PC", "PS5"], true)));
        assert!(!filter.matches(&game(&["RPG"], &["PC"], false)));
        assert!(!filter.matches(&game(&["RPG"], &["Switch"], true)));
    }

    #[test]
    fn parse_query_string() {
        let filter: GameFilter =
            serde_urlencoded::from_str("genre=RPG&completed=true&favorite=false").unwrap();
        assert_eq!(
            filter,
            GameFilter {
                genre: Some("RPG".to_owned()),
                platform: None,
                completed: Some(true),
                favorite: Some(false),
            }
        );
    }

    #[test]
    fn unknown_query_param_rejected() {
        assert!(serde_urlencoded::from_str::<GameFilter>("publisher=P").is_err());
    }
}
