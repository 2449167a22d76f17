use std::time::{Duration, Instant};

use tracing::debug;

use crate::{config::SearchConfig, rules::{Move, board::Board}};

use self::search::{SearchStrategy, SearchType};

pub mod evaluation;
pub mod scores;
pub mod search;


#[derive(Clone, Debug)]
pub struct SearchResult {
    pub best_move: Move,

    /// Reported by the minimax variants only.
    pub best_score: Option<i32>,
    pub calculated_nodes: u64,

    /// Arena footprint, reported by Monte Carlo search only.
    pub tree_bytes: Option<u64>,
    pub search_time: Duration,
}

impl SearchResult {
    pub fn new(best_move: Move, best_score: Option<i32>, calculated_nodes: u64) -> Self {
        return Self {
            best_move: best_move,
            best_score: best_score,
            calculated_nodes: calculated_nodes,
            tree_bytes: None,
            search_time: Default::default(),
        }
    }

    pub fn with_tree_bytes(mut self, bytes: u64) -> Self {
        self.tree_bytes = Some(bytes);
        return self;
    }
}


/// Owns the configured strategy and budget. Searches are timed here, the
/// strategies themselves never look at the clock.
pub struct Engine {
    strategy: Box<dyn SearchStrategy>,
    search_type: SearchType,
    config: SearchConfig,
}

impl Engine {
    pub fn new(search_type: SearchType, config: SearchConfig) -> Self {
        return Self {
            strategy: search_type.build(&config),
            search_type: search_type,
            config: config,
        }
    }

    pub fn get_search_type(&self) -> SearchType {
        return self.search_type;
    }

    pub fn get_config(&self) -> &SearchConfig {
        return &self.config;
    }

    pub fn get_budget(&self) -> u32 {
        return self.search_type.budget(&self.config);
    }

    pub fn set_search_type(&mut self, search_type: SearchType) {
        self.search_type = search_type;
        self.strategy = search_type.build(&self.config);
    }

    pub fn reconfigure(&mut self, search_type: SearchType, config: SearchConfig) {
        self.config = config;
        self.set_search_type(search_type);
    }

    /// Sets the budget for the current search type: plies for the minimax
    /// variants, iterations for Monte Carlo.
    pub fn set_budget(&mut self, budget: u32) {
        match self.search_type {
            SearchType::Minimax | SearchType::AlphaBeta => self.config.depth = budget,
            SearchType::MonteCarlo => self.config.iterations = budget,
        }
    }

    pub fn do_search(&mut self, board: &Board) -> SearchResult {
        let budget = self.get_budget();
        let start = Instant::now();
        let mut result = self.strategy.select_move(board, budget);
        result.search_time = start.elapsed();
        debug!(
            strategy = self.strategy.name(),
            budget,
            best_move = %result.best_move,
            score = ?result.best_score,
            nodes = result.calculated_nodes,
            elapsed_ms = result.search_time.as_millis() as u64,
            "search complete"
        );
        return result;
    }
}
