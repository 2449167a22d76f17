use std::time::{Duration, Instant};

use fxhash::FxHashSet;
use tabled::Tabled;

use crate::{rules::board::{Board, COLUMNS, state::GameState}, util::format_count};


enum PerftType {
    Sequence,
    OWin,
    XWin,
    Draw,
}


#[derive(Default)]
pub struct Perft {
    levels: Vec<LevelPerft>,
    positions: Vec<FxHashSet<Board>>,
    pub duration: Duration,
}

impl Perft {
    fn create_and_increment(&mut self, ply: usize, analysis_type: PerftType) {
        while self.levels.len() < ply {
            self.levels.push(Default::default());
        }
        let analysis_level = &mut self.levels[ply - 1];
        match analysis_type {
            PerftType::Sequence => analysis_level.sequences += 1,
            PerftType::OWin     => analysis_level.o_wins += 1,
            PerftType::XWin     => analysis_level.x_wins += 1,
            PerftType::Draw     => analysis_level.draws += 1,
        };
    }

    fn record_position(&mut self, ply: usize, board: Board) {
        while self.positions.len() < ply {
            self.positions.push(Default::default());
        }
        self.positions[ply - 1].insert(board);
    }

    /// Counts for plies 1..=depth, in order.
    pub fn get_levels(&self) -> Vec<LevelPerft> {
        return self.levels.iter().enumerate().map(|(i, level)| LevelPerft {
            unique_positions: self.positions.get(i).map(|p| p.len() as u64).unwrap_or(0),
            ..level.clone()
        }).collect();
    }

    pub fn get_analysis(&self) -> Vec<PrintablePerft> {
        return self.get_levels().iter().enumerate().map(|(i, l)| PrintablePerft::from_level(i + 1, l)).collect();
    }
}


#[derive(Default, Clone, Debug, PartialEq, Eq)]
pub struct LevelPerft {
    pub sequences: u64,
    pub unique_positions: u64,
    pub o_wins: u64,
    pub x_wins: u64,
    pub draws: u64,
}


#[derive(Tabled)]
pub struct PrintablePerft {
    pub ply: String,
    pub sequences: String,
    pub unique_positions: String,
    pub o_wins: String,
    pub x_wins: String,
    pub draws: String,
}

impl PrintablePerft {
    pub fn from_level(ply: usize, level: &LevelPerft) -> Self {
        return Self {
            ply: ply.to_string(),
            sequences: format_count(level.sequences),
            unique_positions: format_count(level.unique_positions),
            o_wins: format_count(level.o_wins),
            x_wins: format_count(level.x_wins),
            draws: format_count(level.draws),
        }
    }
}


pub struct PerftRunner {}

impl PerftRunner {
    /// Enumerates every move sequence up to `depth` plies. Decided positions
    /// are counted but not extended.
    pub fn do_perft(board: Board, depth: u32) -> Perft {
        let mut result: Perft = Default::default();
        let start = Instant::now();
        let mut board = board;
        if !board.evaluate().state.is_over() {
            Self::perft(&mut board, 1, depth as usize, &mut result);
        }
        result.duration = start.elapsed();
        return result;
    }

    fn perft(board: &mut Board, ply: usize, depth: usize, result: &mut Perft) {
        if ply > depth {
            return;
        }
        for column in 0..COLUMNS as u8 {
            if !board.insert(column) {
                continue;
            }
            result.create_and_increment(ply, PerftType::Sequence);
            result.record_position(ply, *board);
            match board.evaluate().state {
                GameState::InProgress => Self::perft(board, ply + 1, depth, result),
                GameState::OWins => result.create_and_increment(ply, PerftType::OWin),
                GameState::XWins => result.create_and_increment(ply, PerftType::XWin),
                GameState::Draw => result.create_and_increment(ply, PerftType::Draw),
            }
            board.undo(column);
        }
    }
}


#[cfg(test)]
mod tests {
    use crate::rules::Color;

    use super::*;

    #[test]
    fn sequences_grow_by_seven_before_any_win() {
        let levels = PerftRunner::do_perft(Board::new(), 4).get_levels();
        assert_eq!(levels.len(), 4);
        for (i, level) in levels.iter().enumerate() {
            assert_eq!(level.sequences, 7u64.pow(i as u32 + 1));
            assert_eq!(level.o_wins + level.x_wins + level.draws, 0);
        }
        assert_eq!(levels[0].unique_positions, 7);
        assert_eq!(levels[1].unique_positions, 49);
        assert!(levels[2].unique_positions < levels[2].sequences);
    }

    #[test]
    fn decided_positions_are_not_extended() {
        let mut board = Board::from_notation(concat!(
            "bbbbbbb",
            "bbbbbbb",
            "bbbbbbb",
            "bbbbbbb",
            "bOOObbb",
            "bXXXbbb",
        )).unwrap();
        board.set_move_color(Color::X);
        let levels = PerftRunner::do_perft(board, 2).get_levels();
        assert_eq!(levels[0].sequences, 7);
        assert_eq!(levels[0].x_wins, 2);
        assert_eq!(levels[1].sequences, 5 * 7);
    }

    #[test]
    fn finished_games_have_nothing_to_count() {
        let board = Board::from_notation(&"XXOOXXOOOXXOOX".repeat(3)).unwrap();
        let perft = PerftRunner::do_perft(board, 3);
        assert!(perft.get_levels().is_empty());
        assert!(perft.get_analysis().is_empty());
    }

    #[test]
    fn analysis_rows_are_formatted() {
        let rows = PerftRunner::do_perft(Board::new(), 2).get_analysis();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].ply, "2");
        assert_eq!(rows[1].sequences, "49");
    }
}
