use anyhow::{anyhow, Result};
use clap::Parser;
use tracing::level_filters::LevelFilter;

use crate::engine::evaluation::{Evaluator, TEMPO_BONUS};
use crate::engine::search::{SearchType, monte_carlo::{MctsConfig, config::{EXPLORATION, WIN_NORMALIZATION}}};
use crate::rules::{Color, board::{Board, CELLS}};
use crate::util::errors::InputError;

pub const DEFAULT_DEPTH: u32 = 6;
pub const DEFAULT_ITERATIONS: u32 = 20000;


fn parse_color(value: &str) -> Result<Color, InputError> {
    return match value.to_lowercase().as_str() {
        "o" => Ok(Color::O),
        "x" => Ok(Color::X),
        other => Err(InputError::new(&format!("Unknown color '{}', expected o or x.", other))),
    }
}

fn parse_search_type(value: &str) -> Result<SearchType, InputError> {
    return value.parse();
}


/// Every option can also be supplied through a `CONNECT_FOUR_*` environment
/// variable; command-line values take priority.
#[derive(Parser, Debug, Clone)]
#[command(name = "connect-four")]
#[command(about = "Connect Four engine with minimax, alpha-beta and Monte Carlo tree search")]
pub struct LaunchArgs {
    /// Starting position: 42 characters, top row first ('b' marks a blank)
    #[arg(long, env = "CONNECT_FOUR_BOARD")]
    pub board: Option<String>,

    /// Side to move in the starting position (o or x)
    #[arg(long, env = "CONNECT_FOUR_TO_MOVE", value_parser = parse_color)]
    pub to_move: Option<Color>,

    /// Search algorithm (minimax, alpha-beta, mcts)
    #[arg(long, env = "CONNECT_FOUR_ALGORITHM", default_value = "alpha-beta", value_parser = parse_search_type)]
    pub algorithm: SearchType,

    /// Search depth in plies for minimax and alpha-beta
    #[arg(long, env = "CONNECT_FOUR_DEPTH", default_value_t = DEFAULT_DEPTH)]
    pub depth: u32,

    /// Iterations per move for Monte Carlo search
    #[arg(long, env = "CONNECT_FOUR_ITERATIONS", default_value_t = DEFAULT_ITERATIONS)]
    pub iterations: u32,

    /// Seed for Monte Carlo rollouts (random when omitted)
    #[arg(long, env = "CONNECT_FOUR_SEED")]
    pub seed: Option<u64>,

    /// Score adjustment in favor of the side to move
    #[arg(long, env = "CONNECT_FOUR_TEMPO_BONUS", default_value_t = TEMPO_BONUS)]
    pub tempo_bonus: i32,

    /// Divisor turning accumulated rollout rewards into a win rate
    #[arg(long, env = "CONNECT_FOUR_WIN_NORMALIZATION", default_value_t = WIN_NORMALIZATION)]
    pub win_normalization: f64,

    /// UCB1 exploration weight used while descending the tree
    #[arg(long, env = "CONNECT_FOUR_EXPLORATION", default_value_t = EXPLORATION)]
    pub exploration: f64,

    /// UCB1 exploration weight used for the final move choice
    #[arg(long, env = "CONNECT_FOUR_FINAL_EXPLORATION", default_value_t = EXPLORATION)]
    pub final_exploration: f64,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long, env = "CONNECT_FOUR_LOG_LEVEL", default_value = "warn")]
    pub log_level: String,

    /// Print the engine's move for the starting position and exit
    #[arg(long)]
    pub suggest: bool,
}

impl LaunchArgs {
    pub fn validate(&self) -> Result<()> {
        self.search_config().validate()?;
        if self.log_level.parse::<LevelFilter>().is_err() {
            return Err(anyhow!(
                "invalid log level '{}', expected one of trace, debug, info, warn, error",
                self.log_level
            ));
        }
        return Ok(());
    }

    pub fn starting_board(&self) -> Result<Board> {
        let mut board = match &self.board {
            Some(notation) => Board::from_notation(notation)?,
            None => Board::new(),
        };
        if let Some(color) = self.to_move {
            board.set_move_color(color);
        }
        return Ok(board);
    }

    pub fn search_config(&self) -> SearchConfig {
        return SearchConfig::default()
            .with_depth(self.depth)
            .with_iterations(self.iterations)
            .with_seed(self.seed)
            .with_evaluator(Evaluator::default().with_tempo_bonus(self.tempo_bonus))
            .with_mcts(MctsConfig::default()
                .with_win_normalization(self.win_normalization)
                .with_exploration(self.exploration)
                .with_final_exploration(self.final_exploration));
    }
}


/// Everything a strategy needs to be built, plus both budgets so switching
/// algorithms keeps the other's setting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchConfig {
    pub evaluator: Evaluator,
    pub mcts: MctsConfig,
    pub depth: u32,
    pub iterations: u32,
    pub seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        return Self {
            evaluator: Evaluator::default(),
            mcts: MctsConfig::default(),
            depth: DEFAULT_DEPTH,
            iterations: DEFAULT_ITERATIONS,
            seed: None,
        }
    }
}

impl SearchConfig {
    /// Checks both budgets and the Monte Carlo weights. Run on every path that
    /// hands a configuration to the engine.
    pub fn validate(&self) -> Result<(), InputError> {
        if self.depth == 0 || self.depth > CELLS as u32 {
            return Err(InputError::new(&format!("The depth must be between 1 and {}, got {}.", CELLS, self.depth)));
        }
        if self.iterations < 2 {
            return Err(InputError::new(&format!("The iteration count must be at least 2, got {}.", self.iterations)));
        }
        if !(self.mcts.win_normalization > 0.0) {
            return Err(InputError::new(&format!("The win normalization must be positive, got {}.", self.mcts.win_normalization)));
        }
        if !(self.mcts.exploration >= 0.0) || !(self.mcts.final_exploration >= 0.0) {
            return Err(InputError::new("Exploration weights cannot be negative."));
        }
        return Ok(());
    }

    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = depth;
        return self;
    }

    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        return self;
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        return self;
    }

    pub fn with_evaluator(mut self, evaluator: Evaluator) -> Self {
        self.evaluator = evaluator;
        return self;
    }

    pub fn with_mcts(mut self, mcts: MctsConfig) -> Self {
        self.mcts = mcts;
        return self;
    }
}
