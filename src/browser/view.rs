use std::{collections::BTreeSet, fmt::Write};

use crate::documents::{Game, Stats};

/// Values offered by the genre and platform filters. Derived from the games
/// currently loaded, not from everything in the store.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FilterOptions {
    pub genres: Vec<String>,
    pub platforms: Vec<String>,
}

impl FilterOptions {
    pub fn from_games(games: &[Game]) -> Self {
        let genres: BTreeSet<&String> = games.iter().flat_map(|g| &g.genres).collect();
        let platforms: BTreeSet<&String> = games.iter().flat_map(|g| &g.platforms).collect();

        FilterOptions {
            genres: genres.into_iter().cloned().collect(),
            platforms: platforms.into_iter().cloned().collect(),
        }
    }
}

pub fn render_stats(stats: &Stats) -> String {
    format!(
        "Total: {} | Completed: {} | Favorites: {} | Hours: {}h | Average score: {} (rated only: {})",
        stats.total_games,
        stats.completed_games,
        stats.favorite_games,
        stats.total_hours_played,
        stats.average_metacritic_score,
        stats.average_rated_metacritic_score,
    )
}

pub fn render_games(games: &[Game]) -> String {
    if games.is_empty() {
        return "No games in the collection.\n".to_owned();
    }

    let mut out = String::new();
    for game in games {
        let _ = writeln!(
            out,
            "{} {} ({}) [{}]",
            if game.favorite { "*" } else { " " },
            game.title,
            game.release_year,
            game.id.as_deref().unwrap_or("-"),
        );
        let _ = writeln!(
            out,
            "    {} / {} | {} | {}",
            game.developer,
            game.publisher,
            game.genres.join(", "),
            game.platforms.join(", "),
        );
        let _ = writeln!(
            out,
            "    score: {} | {}h played{}",
            game.metacritic_score
                .map_or("-".to_owned(), |score| score.to_string()),
            game.hours_played,
            if game.completed { " | completed" } else { "" },
        );
    }
    out
}

pub fn render_filter_options(options: &FilterOptions) -> String {
    format!(
        "Genres: {}\nPlatforms: {}",
        options.genres.join(", "),
        options.platforms.join(", ")
    )
}
