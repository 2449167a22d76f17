use crate::engine::{SearchResult, evaluation::Evaluator, scores::{is_better, worst_score}};
use crate::rules::{Move, board::{Board, COLUMNS}};

use super::SearchStrategy;


struct MinimaxContext<'a> {
    board: Board,
    evaluator: &'a Evaluator,
    calculated_nodes: u64,
}


pub fn minimax(board: Board, max_depth: u32) -> SearchResult {
    return minimax_with(board, max_depth, &Evaluator::default());
}

pub fn minimax_with(board: Board, max_depth: u32, evaluator: &Evaluator) -> SearchResult {
    let mut ctx = MinimaxContext { board: board, evaluator: evaluator, calculated_nodes: 0 };
    let (best_move, score) = search(max_depth, &mut ctx);
    return SearchResult::new(best_move, Some(score), ctx.calculated_nodes);
}


fn search(depth: u32, ctx: &mut MinimaxContext) -> (Move, i32) {
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
        let (_, score) = search(depth - 1, ctx);
        if is_better(score, best_score, mover) {
            best_score = score;
            best_move = Move::Drop(column);
        }
        ctx.board.undo(column);
    }
    if best_move.is_null() {
        return (Move::NullMove, ctx.evaluator.evaluate(&ctx.board).score);
    }
    return (best_move, best_score);
}


pub struct Minimax {
    evaluator: Evaluator,
}

impl Minimax {
    pub fn new(evaluator: Evaluator) -> Self {
        return Self { evaluator: evaluator }
    }
}

impl SearchStrategy for Minimax {
    fn select_move(&mut self, board: &Board, budget: u32) -> SearchResult {
        return minimax_with(*board, budget, &self.evaluator);
    }

    fn name(&self) -> &'static str {
        return "minimax";
    }
}


#[cfg(test)]
mod tests {
    use crate::rules::board::state::GameState;

    use super::*;

    #[test]
    fn depth_one_on_empty_board_prefers_the_center() {
        let board = Board::new();
        let result = minimax(board, 1);
        let mut best = i32::MAX;
        for column in 0..COLUMNS as u8 {
            let mut child = board;
            child.insert(column);
            best = best.min(child.evaluate().score);
        }
        let mut chosen = board;
        chosen.insert(result.best_move.column().unwrap());
        assert_eq!(chosen.evaluate().score, best);
        assert_eq!(result.best_move, Move::Drop(3));
        assert_eq!(result.calculated_nodes, 7);
    }

    #[test]
    fn depth_zero_returns_static_score_without_a_move() {
        let board = Board::new();
        let result = minimax(board, 0);
        assert_eq!(result.best_move, Move::NullMove);
        assert_eq!(result.best_score, Some(board.evaluate().score));
        assert_eq!(result.calculated_nodes, 0);
    }

    #[test]
    fn node_count_covers_every_sequence() {
        let result = minimax(Board::new(), 3);
        assert_eq!(result.calculated_nodes, 7 + 49 + 343);
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
        board.set_move_color(crate::rules::Color::X);
        let result = minimax(board, 1);
        assert!(result.best_move == Move::Drop(0) || result.best_move == Move::Drop(4));
        board.insert(result.best_move.column().unwrap());
        assert_eq!(board.evaluate().state, GameState::XWins);
    }

    #[test]
    fn full_board_yields_null_move() {
        let board = Board::from_notation(&"XXOOXXOOOXXOOX".repeat(3)).unwrap();
        assert!(board.is_full());
        let result = minimax(board, 4);
        assert_eq!(result.best_move, Move::NullMove);
        assert_eq!(result.calculated_nodes, 0);
    }
}
