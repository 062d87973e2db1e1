use clap::Args;

use crate::{documents::NewGame, Status};

/// Fields of the add game form. Genres and platforms are comma separated.
#[derive(Args, Clone, Debug, Default)]
pub struct GameForm {
    #[clap(long)]
    pub title: String,

    #[clap(long)]
    pub publisher: String,

    #[clap(long)]
    pub developer: String,

    #[clap(long)]
    pub release_year: i32,

    /// Comma separated list, e.g. "RPG, Action".
    #[clap(long)]
    pub genres: String,

    /// Comma separated list, e.g. "PC, PS5".
    #[clap(long)]
    pub platforms: String,

    #[clap(long)]
    pub metacritic_score: Option<i64>,

    #[clap(long, default_value = "0")]
    pub hours_played: u32,

    #[clap(long)]
    pub completed: bool,
}

impl GameForm {
    /// Builds the create request, checking it before it is sent.
    pub fn into_new_game(self) -> Result<NewGame, Status> {
        let new_game = NewGame {
            title: self.title.trim().to_owned(),
            genres: split_list(&self.genres),
            platforms: split_list(&self.platforms),
            publisher: self.publisher.trim().to_owned(),
            developer: self.developer.trim().to_owned(),
            release_year: self.release_year,
            metacritic_score: self.metacritic_score,
            hours_played: self.hours_played,
            completed: self.completed,
            favorite: false,
        };
        new_game.validate()?;
        Ok(new_game)
    }
}

fn split_list(values: &str) -> Vec<String> {
    values
        .split(',')
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
        .map(|value| value.to_owned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> GameForm {
        GameForm {
            title: "Hades".to_owned(),
            publisher: "Supergiant".to_owned(),
            developer: "Supergiant".to_owned(),
            release_year: 2020,
            genres: "Roguelike, Action ,".to_owned(),
            platforms: "PC".to_owned(),
            ..Default::default()
        }
    }

    #[test]
    fn splits_and_trims_lists() {
        let new_game = form().into_new_game().unwrap();
        assert_eq!(new_game.genres, vec!["Roguelike", "Action"]);
        assert_eq!(new_game.platforms, vec!["PC"]);
        assert_eq!(new_game.hours_played, 0);
        assert_eq!(new_game.metacritic_score, None);
    }

    #[test]
    fn empty_platforms_rejected() {
        let mut form = form();
        form.platforms = " , ".to_owned();
        assert!(matches!(
            form.into_new_game(),
            Err(Status::InvalidArgument(_))
        ));
    }
}
