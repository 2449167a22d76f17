use std::cmp::{max, min};

use crate::engine::{SearchResult, evaluation::Evaluator, scores::{is_better, worst_score}};
use crate::rules::{Color, Move, board::{Board, COLUMNS}};

use super::SearchStrategy;


struct AlphaBetaContext<'a> {
    board: Board,
    evaluator: &'a Evaluator,
    calculated_nodes: u64,
}


pub fn alpha_beta(board: Board, max_depth: u32) -> SearchResult {
    return alpha_beta_with(board, max_depth, &Evaluator::default());
}

pub fn alpha_beta_with(board: Board, max_depth: u32, evaluator: &Evaluator) -> SearchResult {
    let mut ctx = AlphaBetaContext { board: board, evaluator: evaluator, calculated_nodes: 0 };
    let (best_move, score) = search(i32::MIN, i32::MAX, max_depth, &mut ctx);
    return SearchResult::new(best_move, Some(score), ctx.calculated_nodes);
}


/// Fail-soft alpha-beta. The bound check runs after each child has been
/// searched and undone, so the first child is always explored.
fn search(mut alpha: i32, mut beta: i32, depth: u32, ctx: &mut AlphaBetaContext) -> (Move, i32) {
    if depth == 0 || ctx.board.is_full() {
        return (Move::NullMove, ctx.evaluator.evaluate(&ctx.board).score);
    }
    let mover = ctx.board.get_move_color();
    let mut best_move = Move::NullMove;
    let mut best_score = worst_score(mover);
    for column in 0..COLUMNS as u8 {
        if !ctx.board.insert(column) {
            continue;
        }
        ctx.calculated_nodes += 1;
        let (_, score) = search(alpha, beta, depth - 1, ctx);
        if is_better(score, best_score, mover) {
            best_score = score;
            best_move = Move::Drop(column);
        }
        match mover {
            Color::X => alpha = max(alpha, score),
            Color::O => beta = min(beta, score),
        }
        ctx.board.undo(column);
        if beta <= alpha {
            break;
        }
    }
    if best_move.is_null() {
        return (Move::NullMove, ctx.evaluator.evaluate(&ctx.board).score);
    }
    return (best_move, best_score);
}


pub struct AlphaBeta {
    evaluator: Evaluator,
}

impl AlphaBeta {
    pub fn new(evaluator: Evaluator) -> Self {
        return Self { evaluator: evaluator }
    }
}

impl SearchStrategy for AlphaBeta {
    fn select_move(&mut self, board: &Board, budget: u32) -> SearchResult {
        return alpha_beta_with(*board, budget, &self.evaluator);
    }

    fn name(&self) -> &'static str {
        return "alpha-beta";
    }
}


#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    use crate::engine::search::minimax::minimax;
    use crate::rules::board::state::GameState;

    use super::*;

    fn random_position(rng: &mut ChaCha20Rng, plies: usize) -> Board {
        let mut board = Board::new();
        for _ in 0..plies {
            if board.evaluate().state.is_over() {
                break;
            }
            match board.random_legal_move(rng) {
                Move::Drop(column) => { board.insert(column); },
                Move::NullMove => break,
            }
        }
        board
    }

    #[test]
    fn agrees_with_minimax_on_random_positions() {
        let mut rng = ChaCha20Rng::seed_from_u64(2024);
        for plies in 0..24 {
            let board = random_position(&mut rng, plies);
            for depth in 1..=4 {
                let full = minimax(board, depth);
                let pruned = alpha_beta(board, depth);
                assert_eq!(pruned.best_move, full.best_move, "depth {} on\n{}", depth, board);
                assert_eq!(pruned.best_score, full.best_score, "depth {} on\n{}", depth, board);
                assert!(pruned.calculated_nodes <= full.calculated_nodes);
            }
        }
    }

    #[test]
    fn pruning_expands_fewer_nodes() {
        let full = minimax(Board::new(), 5);
        let pruned = alpha_beta(Board::new(), 5);
        assert_eq!(pruned.best_move, full.best_move);
        assert!(pruned.calculated_nodes < full.calculated_nodes);
    }

    #[test]
    fn completes_a_horizontal_four() {
        let mut board = Board::from_notation(concat!(
            "bbbbbbb",
            "bbbbbbb",
            "bbbbbbb",
            "bbbbbbb",
            "bOOObbb",
            "bXXXbbb",
        )).unwrap();
        board.set_move_color(Color::X);
        for depth in 1..=3 {
            let result = alpha_beta(board, depth);
            assert!(result.best_move == Move::Drop(0) || result.best_move == Move::Drop(4));
            let mut after = board;
            after.insert(result.best_move.column().unwrap());
            assert_eq!(after.evaluate().state, GameState::XWins);
        }
    }
}
