use std::str::FromStr;

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::{config::SearchConfig, rules::board::Board, util::errors::InputError};

use self::{alpha_beta::AlphaBeta, minimax::Minimax, monte_carlo::MonteCarlo};

use super::SearchResult;

pub mod alpha_beta;
pub mod minimax;
pub mod monte_carlo;


/// A move selector. `budget` is a depth in plies for the minimax variants
/// and an iteration count for Monte Carlo search.
pub trait SearchStrategy {
    fn select_move(&mut self, board: &Board, budget: u32) -> SearchResult;
    fn name(&self) -> &'static str;
}


#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SearchType {
    Minimax,
    AlphaBeta,
    MonteCarlo,
}

impl SearchType {
    pub fn iter() -> impl Iterator<Item = SearchType> {
        return [SearchType::Minimax, SearchType::AlphaBeta, SearchType::MonteCarlo].into_iter();
    }

    pub fn value(&self) -> &'static str {
        return match self {
            SearchType::Minimax => "minimax",
            SearchType::AlphaBeta => "alpha-beta",
            SearchType::MonteCarlo => "mcts",
        }
    }

    /// Depth searches count plies, Monte Carlo counts iterations.
    pub fn budget(&self, config: &SearchConfig) -> u32 {
        return match self {
            SearchType::Minimax | SearchType::AlphaBeta => config.depth,
            SearchType::MonteCarlo => config.iterations,
        }
    }

    pub fn build(&self, config: &SearchConfig) -> Box<dyn SearchStrategy> {
        return match self {
            SearchType::Minimax => Box::new(Minimax::new(config.evaluator)),
            SearchType::AlphaBeta => Box::new(AlphaBeta::new(config.evaluator)),
            SearchType::MonteCarlo => {
                let rng = match config.seed {
                    Some(seed) => ChaCha20Rng::seed_from_u64(seed),
                    None => ChaCha20Rng::from_entropy(),
                };
                Box::new(MonteCarlo::new(config.mcts, rng))
            },
        }
    }
}

impl FromStr for SearchType {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        return match s.to_lowercase().as_str() {
            "minimax" => Ok(SearchType::Minimax),
            "alpha-beta" | "alphabeta" | "ab" => Ok(SearchType::AlphaBeta),
            "mcts" | "monte-carlo" => Ok(SearchType::MonteCarlo),
            other => Err(InputError::new(&format!("Unknown algorithm '{}', expected one of minimax, alpha-beta, mcts.", other))),
        }
    }
}


#[cfg(test)]
mod tests {
    use crate::rules::Move;

    use super::*;

    #[test]
    fn parses_algorithm_names() {
        assert_eq!("minimax".parse::<SearchType>().unwrap(), SearchType::Minimax);
        assert_eq!("Alpha-Beta".parse::<SearchType>().unwrap(), SearchType::AlphaBeta);
        assert_eq!("mcts".parse::<SearchType>().unwrap(), SearchType::MonteCarlo);
        assert!("negamax".parse::<SearchType>().is_err());
        for search_type in SearchType::iter() {
            assert_eq!(search_type.value().parse::<SearchType>().unwrap(), search_type);
        }
    }

    #[test]
    fn budget_follows_the_search_type() {
        let config = SearchConfig::default().with_depth(5).with_iterations(300);
        assert_eq!(SearchType::Minimax.budget(&config), 5);
        assert_eq!(SearchType::AlphaBeta.budget(&config), 5);
        assert_eq!(SearchType::MonteCarlo.budget(&config), 300);
    }

    #[test]
    fn built_strategies_report_their_names_and_move() {
        let config = SearchConfig::default().with_seed(Some(7));
        let board = Board::new();
        for search_type in SearchType::iter() {
            let mut strategy = search_type.build(&config);
            assert_eq!(strategy.name(), search_type.value());
            let budget = match search_type {
                SearchType::MonteCarlo => 200,
                _ => 2,
            };
            let result = strategy.select_move(&board, budget);
            assert!(matches!(result.best_move, Move::Drop(column) if column < 7));
        }
    }
}
