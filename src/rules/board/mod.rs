pub mod state;

use std::fmt;

use rand::Rng;

use crate::engine::evaluation::Evaluator;
use crate::util::errors::NotationError;
use crate::util::notation::NotationBoard;

use self::state::{BoardState, Status};

use super::{Color, Move};


pub const COLUMNS: usize = 7;
pub const ROWS: usize = 6;
pub const CELLS: usize = COLUMNS * ROWS;


/// Gravity board. Each column is a stack filled bottom-up; cells at or above
/// a column's height always hold the default color.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Board {
    pub state: BoardState,
    heights: [u8; COLUMNS],
    cells: [[Color; ROWS]; COLUMNS],
}

impl Board {
    pub fn new() -> Self {
        return Default::default();
    }

    pub fn from_notation(notation: &str) -> Result<Self, NotationError> {
        let parsed = NotationBoard::from_notation(notation)?;
        let mut board = Board::new();
        for (column, stack) in parsed.columns.iter().enumerate() {
            for stone in stack.iter() {
                match stone {
                    Some(color) => {
                        let height = board.heights[column] as usize;
                        board.cells[column][height] = *color;
                        board.heights[column] += 1;
                    },
                    None => break,
                }
            }
        }
        return Ok(board);
    }

    pub fn to_notation(&self) -> String {
        let mut notation = NotationBoard::default();
        for column in 0..COLUMNS {
            for row in 0..ROWS {
                notation.columns[column][row] = self.stone_at(column, row);
            }
        }
        return notation.to_notation();
    }

    /// Drops a stone for the side to move. Returns false, leaving the board
    /// untouched, when the column is full.
    pub fn insert(&mut self, column: u8) -> bool {
        assert!((column as usize) < COLUMNS, "column {} is off the board", column);
        let column = column as usize;
        let height = self.heights[column] as usize;
        if height >= ROWS {
            return false;
        }
        self.cells[column][height] = self.state.get_move_color();
        self.heights[column] += 1;
        self.state.change_move_color();
        return true;
    }

    /// Takes back the most recent stone in `column`. Only valid directly after
    /// a matching `insert` that has not been undone yet.
    pub fn undo(&mut self, column: u8) {
        assert!((column as usize) < COLUMNS, "column {} is off the board", column);
        let column = column as usize;
        assert!(self.heights[column] > 0, "undo on empty column {}", column);
        self.heights[column] -= 1;
        self.cells[column][self.heights[column] as usize] = Color::default();
        self.state.change_move_color();
    }

    pub fn is_full(&self) -> bool {
        return self.heights.iter().all(|h| *h as usize == ROWS);
    }

    pub fn is_column_full(&self, column: usize) -> bool {
        return self.heights[column] as usize >= ROWS;
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        return (0..COLUMNS)
            .filter(|c| !self.is_column_full(*c))
            .map(|c| Move::Drop(c as u8))
            .collect();
    }

    pub fn random_legal_move<R: Rng + ?Sized>(&self, rng: &mut R) -> Move {
        let mut open = [0u8; COLUMNS];
        let mut count = 0;
        for column in 0..COLUMNS {
            if !self.is_column_full(column) {
                open[count] = column as u8;
                count += 1;
            }
        }
        return match count {
            0 => Move::NullMove,
            n => Move::Drop(open[rng.gen_range(0..n)]),
        }
    }

    pub fn evaluate(&self) -> Status {
        return Evaluator::default().evaluate(self);
    }

    pub fn height(&self, column: usize) -> usize {
        return self.heights[column] as usize;
    }

    pub fn stone_at(&self, column: usize, row: usize) -> Option<Color> {
        return match row < self.height(column) {
            true => Some(self.cells[column][row]),
            false => None,
        }
    }

    pub fn stone_count(&self) -> usize {
        return self.heights.iter().map(|h| *h as usize).sum();
    }

    pub fn get_move_color(&self) -> Color {
        return self.state.get_move_color();
    }

    pub fn set_move_color(&mut self, color: Color) {
        self.state.to_move = color;
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in (0..ROWS).rev() {
            let line = (0..COLUMNS).map(|column| {
                match self.stone_at(column, row) {
                    Some(color) => color.notation(),
                    None => '-',
                }.to_string()
            }).collect::<Vec<String>>().join(" ");
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
