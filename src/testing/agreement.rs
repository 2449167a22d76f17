use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use tabled::Tabled;

use crate::engine::search::{alpha_beta::alpha_beta, minimax::minimax};
use crate::rules::{Move, board::Board};
use crate::util::format_count;

const MAX_OPENING_PLIES: u32 = 20;


#[derive(Clone, Debug)]
pub struct PositionAgreement {
    pub notation: String,
    pub minimax_move: Move,
    pub alpha_beta_move: Move,
    pub minimax_score: Option<i32>,
    pub alpha_beta_score: Option<i32>,
    pub minimax_nodes: u64,
    pub alpha_beta_nodes: u64,
}

impl PositionAgreement {
    pub fn agrees(&self) -> bool {
        return self.minimax_move == self.alpha_beta_move && self.minimax_score == self.alpha_beta_score;
    }
}


#[derive(Clone, Debug)]
pub struct AgreementReport {
    pub depth: u32,
    pub positions: Vec<PositionAgreement>,
}

impl AgreementReport {
    pub fn mismatches(&self) -> Vec<&PositionAgreement> {
        return self.positions.iter().filter(|p| !p.agrees()).collect();
    }

    pub fn minimax_nodes(&self) -> u64 {
        return self.positions.iter().map(|p| p.minimax_nodes).sum();
    }

    pub fn alpha_beta_nodes(&self) -> u64 {
        return self.positions.iter().map(|p| p.alpha_beta_nodes).sum();
    }

    pub fn get_analysis(&self) -> Vec<PrintableAgreement> {
        return self.positions.iter().map(|p| PrintableAgreement::from_position(p)).collect();
    }
}


#[derive(Tabled)]
pub struct PrintableAgreement {
    pub position: String,
    pub minimax: String,
    pub alpha_beta: String,
    pub minimax_nodes: String,
    pub alpha_beta_nodes: String,
    pub agrees: String,
}

impl PrintableAgreement {
    pub fn from_position(position: &PositionAgreement) -> Self {
        let describe = |mov: Move, score: Option<i32>| match score {
            Some(score) => format!("{} ({})", mov, score),
            None => mov.to_string(),
        };
        return Self {
            position: position.notation.clone(),
            minimax: describe(position.minimax_move, position.minimax_score),
            alpha_beta: describe(position.alpha_beta_move, position.alpha_beta_score),
            minimax_nodes: format_count(position.minimax_nodes),
            alpha_beta_nodes: format_count(position.alpha_beta_nodes),
            agrees: String::from(if position.agrees() { "yes" } else { "NO" }),
        }
    }
}


/// Plays up to `MAX_OPENING_PLIES` random moves, backing out of any move
/// that would end the game, so the result is always still in progress.
fn random_position<R: Rng>(rng: &mut R) -> Board {
    let mut board = Board::new();
    let plies = rng.gen_range(0..=MAX_OPENING_PLIES);
    for _ in 0..plies {
        let column = match board.random_legal_move(rng) {
            Move::Drop(column) => column,
            Move::NullMove => break,
        };
        board.insert(column);
        if board.evaluate().state.is_over() {
            board.undo(column);
            break;
        }
    }
    return board;
}


/// Runs both minimax variants at `depth` on `positions` random positions.
pub fn agreement(depth: u32, positions: usize, seed: u64) -> AgreementReport {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let positions = (0..positions).map(|_| {
        let board = random_position(&mut rng);
        let full = minimax(board, depth);
        let pruned = alpha_beta(board, depth);
        PositionAgreement {
            notation: board.to_notation(),
            minimax_move: full.best_move,
            alpha_beta_move: pruned.best_move,
            minimax_score: full.best_score,
            alpha_beta_score: pruned.best_score,
            minimax_nodes: full.calculated_nodes,
            alpha_beta_nodes: pruned.calculated_nodes,
        }
    }).collect();
    return AgreementReport { depth: depth, positions: positions };
}
