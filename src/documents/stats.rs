use serde::{Deserialize, Serialize};

use super::Game;

/// Aggregate figures over the whole collection.
#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq)]
pub struct Stats {
    pub total_games: usize,
    pub completed_games: usize,
    pub favorite_games: usize,
    pub total_hours_played: u64,

    /// Sum of scores over the number of games, where an unscored game counts
    /// as 0. This is biased low when some games have no score and is kept for
    /// compatibility with existing clients.
    pub average_metacritic_score: u32,

    /// Mean score over the games that carry one.
    pub average_rated_metacritic_score: u32,
}

impl Stats {
    pub fn compute(games: &[Game]) -> Self {
        let score_sum: i64 = games.iter().filter_map(|g| g.metacritic_score).sum();
        let rated = games.iter().filter(|g| g.metacritic_score.is_some()).count();

        Stats {
            total_games: games.len(),
            completed_games: games.iter().filter(|g| g.completed).count(),
            favorite_games: games.iter().filter(|g| g.favorite).count(),
            total_hours_played: games.iter().map(|g| g.hours_played as u64).sum(),
            average_metacritic_score: rounded_mean(score_sum, games.len()),
            average_rated_metacritic_score: rounded_mean(score_sum, rated),
        }
    }
}

fn rounded_mean(sum: i64, count: usize) -> u32 {
    match count {
        0 => 0,
        count => (sum as f64 / count as f64).round() as u32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(score: Option<i64>, hours: u32, completed: bool, favorite: bool) -> Game {
        Game {
            title: "Game Title".to_owned(),
            metacritic_score: score,
            hours_played: hours,
            completed,
            favorite,
            ..Default::default()
        }
    }

    #[test]
    fn empty_collection() {
        assert_eq!(Stats::compute(&[]), Stats::default());
    }

    #[test]
    fn counts_and_sums() {
        let games = vec![
            game(Some(90), 10, true, false),
            game(Some(71), 5, true, true),
            game(None, 120, false, true),
        ];

        let stats = Stats::compute(&games);
        assert_eq!(stats.total_games, 3);
        assert_eq!(stats.completed_games, 2);
        assert_eq!(stats.favorite_games, 2);
        assert_eq!(stats.total_hours_played, 135);
        // (90 + 71 + 0) / 3 = 53.67
        assert_eq!(stats.average_metacritic_score, 54);
        // (90 + 71) / 2 = 80.5
        assert_eq!(stats.average_rated_metacritic_score, 81);
    }

    #[test]
    fn no_scores_at_all() {
        let games = vec![game(None, 1, false, false), game(None, 2, false, false)];

        let stats = Stats::compute(&games);
        assert_eq!(stats.total_games, 2);
        assert_eq!(stats.average_metacritic_score, 0);
        assert_eq!(stats.average_rated_metacritic_score, 0);
    }
}
