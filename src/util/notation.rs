use crate::rules::Color;
use crate::rules::board::{COLUMNS, ROWS, CELLS};

use super::errors::NotationError;


pub const BLANK: char = 'b';


pub fn get_notation_for_stone(stone: Option<Color>) -> char {
    return match stone {
        Some(color) => color.notation(),
        None => BLANK,
    }
}


fn get_stone_for_notation(c: char) -> Option<Color> {
    return match c {
        'b' | 'B' => None,
        'x' | 'X' => Some(Color::X),
        _ => Some(Color::O),
    }
}


/// Column stacks read from a board notation string, bottom cell first.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct NotationBoard {
    pub columns: [[Option<Color>; ROWS]; COLUMNS],
}

impl NotationBoard {
    /// Lines are given top row first. Each column is read from the bottom line
    /// upward and ends at its first blank marker; anything above that marker is
    /// ignored.
    pub fn from_notation(notation: &str) -> Result<Self, NotationError> {
        let chars: Vec<char> = notation.chars().collect();
        if chars.len() != CELLS {
            return Err(NotationError::Length { expected: CELLS, found: chars.len() });
        }
        let mut board = NotationBoard::default();
        for column in 0..COLUMNS {
            for line in (0..ROWS).rev() {
                let row = ROWS - 1 - line;
                match get_stone_for_notation(chars[line * COLUMNS + column]) {
                    Some(color) => board.columns[column][row] = Some(color),
                    None => break,
                }
            }
        }
        return Ok(board);
    }

    pub fn to_notation(&self) -> String {
        let mut notation = String::with_capacity(CELLS);
        for line in 0..ROWS {
            let row = ROWS - 1 - line;
            for column in 0..COLUMNS {
                notation.push(get_notation_for_stone(self.columns[column][row]));
            }
        }
        return notation;
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    const EMPTY_BOARD: &str = "bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb";

    #[test]
    fn empty_board_notation_is_all_blank() {
        let board = NotationBoard::from_notation(EMPTY_BOARD).unwrap();
        assert_eq!(board, NotationBoard::default());
        assert_eq!(board.to_notation(), EMPTY_BOARD);
    }

    #[test]
    fn unknown_characters_are_o_stones() {
        let mut notation = String::from(&EMPTY_BOARD[..CELLS - COLUMNS]);
        notation.push_str("?Xx.bbb");
        let board = NotationBoard::from_notation(&notation).unwrap();
        assert_eq!(board.columns[0][0], Some(Color::O));
        assert_eq!(board.columns[1][0], Some(Color::X));
        assert_eq!(board.columns[2][0], Some(Color::X));
        assert_eq!(board.columns[3][0], Some(Color::O));
        assert_eq!(board.columns[4][0], None);
        assert_eq!(&board.to_notation()[CELLS - COLUMNS..], "OXXObbb");
    }

    #[test]
    fn length_mismatch_reports_both_lengths() {
        let err = NotationBoard::from_notation(&"b".repeat(CELLS + 1)).unwrap_err();
        assert_eq!(err, NotationError::Length { expected: CELLS, found: CELLS + 1 });
        assert!(err.to_string().contains("43"));
    }
}
