use rand::Rng;
use tracing::{debug, trace};

use crate::engine::SearchResult;
use crate::rules::{Move, board::Board, board::state::GameState};
use crate::util::format_bytes;

use self::tree::MonteCarloTree;

use super::SearchStrategy;

pub mod config;
pub mod node;
pub mod tree;

pub use self::config::MctsConfig;


/// UCB1 tree search with uniformly random rollouts. Each iteration descends
/// to a leaf, expands it if it has been visited before, plays one random game
/// from the chosen node and credits the outcome back up to the root. Rewards
/// are scored for the side to move at the root.
pub fn monte_carlo<R: Rng + ?Sized>(board: Board, max_iterations: u32, config: &MctsConfig, rng: &mut R) -> SearchResult {
    let root_color = board.get_move_color();
    let mut tree = MonteCarloTree::new(board);
    let mut calculated_nodes: u64 = 0;

    for iteration in 0..max_iterations {
        let mut selected = tree.find_best_leaf(config.win_normalization, config.exploration);
        if tree.get(selected).visits > 0 {
            match tree.expand(selected) {
                Some(child) => {
                    calculated_nodes += tree.get(selected).children.len() as u64;
                    selected = child;
                },
                None => {
                    debug!(iteration, "selected leaf has no legal moves, stopping early");
                    break;
                },
            }
        }
        let outcome = rollout(tree.get(selected).board, rng);
        tree.backpropagate(selected, outcome, root_color);
        trace!(iteration, node = selected.0, outcome = outcome.value(), "rollout");
    }

    let best_move = tree.select_child(tree.root(), config.win_normalization, config.final_exploration)
        .map(|id| tree.get(id).mov)
        .unwrap_or(Move::NullMove);
    debug!(
        nodes = tree.len(),
        tree_size = %format_bytes(tree.memory_size()),
        root_visits = tree.get(tree.root()).visits,
        "monte carlo tree built"
    );
    return SearchResult::new(best_move, None, calculated_nodes).with_tree_bytes(tree.memory_size());
}


/// Random playout until someone connects four or the board fills.
fn rollout<R: Rng + ?Sized>(mut board: Board, rng: &mut R) -> GameState {
    loop {
        let status = board.evaluate();
        if status.state.is_over() {
            return status.state;
        }
        match board.random_legal_move(rng) {
            Move::Drop(column) => { board.insert(column); },
            Move::NullMove => return status.state,
        }
    }
}


pub struct MonteCarlo<R: Rng> {
    config: MctsConfig,
    rng: R,
}

impl<R: Rng> MonteCarlo<R> {
    pub fn new(config: MctsConfig, rng: R) -> Self {
        return Self { config: config, rng: rng }
    }
}

impl<R: Rng> SearchStrategy for MonteCarlo<R> {
    fn select_move(&mut self, board: &Board, budget: u32) -> SearchResult {
        return monte_carlo(*board, budget, &self.config, &mut self.rng);
    }

    fn name(&self) -> &'static str {
        return "mcts";
    }
}


#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    use crate::rules::Color;

    use super::*;

    fn x_to_complete_four() -> Board {
        let mut board = Board::from_notation(concat!(
            "bbbbbbb",
            "bbbbbbb",
            "bbbbbbb",
            "bbbbbbb",
            "bOOObbb",
            "bXXXbbb",
        )).unwrap();
        board.set_move_color(Color::X);
        board
    }

    #[test]
    fn too_few_iterations_yield_no_move() {
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        for iterations in 0..=1 {
            let result = monte_carlo(Board::new(), iterations, &MctsConfig::default(), &mut rng);
            assert_eq!(result.best_move, Move::NullMove);
            assert_eq!(result.calculated_nodes, 0);
            assert_eq!(result.best_score, None);
        }
    }

    #[test]
    fn full_board_yields_no_move() {
        let board = Board::from_notation(&"XXOOXXOOOXXOOX".repeat(3)).unwrap();
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        let result = monte_carlo(board, 100, &MctsConfig::default(), &mut rng);
        assert_eq!(result.best_move, Move::NullMove);
        assert_eq!(result.calculated_nodes, 0);
    }

    #[test]
    fn one_round_over_the_children_finds_the_win() {
        // Iteration 1 plays out from the root, 2 expands it and 3..=8 visit
        // each remaining child once. Column 0 wins its rollout outright and
        // ties are resolved toward the earlier column.
        let mut rng = ChaCha20Rng::seed_from_u64(99);
        let result = monte_carlo(x_to_complete_four(), 8, &MctsConfig::default(), &mut rng);
        assert_eq!(result.best_move, Move::Drop(0));
        assert_eq!(result.calculated_nodes, 7);
        assert!(result.tree_bytes.unwrap() > 0);
    }

    #[test]
    fn greedy_final_pick_completes_the_four() {
        let config = MctsConfig::default().with_final_exploration(0.0);
        let mut rng = ChaCha20Rng::seed_from_u64(2024);
        let board = x_to_complete_four();
        let result = monte_carlo(board, 500, &config, &mut rng);
        assert!(result.best_move == Move::Drop(0) || result.best_move == Move::Drop(4));
        let mut after = board;
        after.insert(result.best_move.column().unwrap());
        assert_eq!(after.evaluate().state, GameState::XWins);
    }

    #[test]
    fn node_count_matches_expansions() {
        let mut rng = ChaCha20Rng::seed_from_u64(5);
        let result = monte_carlo(Board::new(), 300, &MctsConfig::default(), &mut rng);
        assert!(result.calculated_nodes > 0);
        assert_eq!(result.calculated_nodes % 7, 0);
    }

    #[test]
    fn seeded_searches_are_reproducible() {
        let config = MctsConfig::default();
        let first = monte_carlo(Board::new(), 400, &config, &mut ChaCha20Rng::seed_from_u64(11));
        let second = monte_carlo(Board::new(), 400, &config, &mut ChaCha20Rng::seed_from_u64(11));
        assert_eq!(first.best_move, second.best_move);
        assert_eq!(first.calculated_nodes, second.calculated_nodes);
    }

    #[test]
    fn rollouts_end_in_a_decided_state() {
        let mut rng = ChaCha20Rng::seed_from_u64(3);
        for _ in 0..20 {
            assert!(rollout(Board::new(), &mut rng).is_over());
        }
    }

    #[test]
    fn strategy_uses_its_own_random_source() {
        let mut strategy = MonteCarlo::new(MctsConfig::default(), ChaCha20Rng::seed_from_u64(8));
        assert_eq!(strategy.name(), "mcts");
        let result = strategy.select_move(&Board::new(), 200);
        assert!(matches!(result.best_move, Move::Drop(_)));
    }
}
