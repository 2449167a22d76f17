pub mod board;


/// Stone colors. `O` moves first and minimizes the score, `X` maximizes it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    O,
    X,
}

impl Color {
    pub fn iter() -> ColorIterator {
        return ColorIterator::new();
    }

    pub fn swap(&self) -> Color {
        return match self {
            Color::O => Color::X,
            Color::X => Color::O,
        }
    }

    pub fn value(&self) -> &'static str {
        return match self {
            &Color::O => "O",
            &Color::X => "X",
        }
    }

    pub fn notation(&self) -> char {
        return match self {
            Color::O => 'O',
            Color::X => 'X',
        }
    }
}

impl Default for Color {
    fn default() -> Self { Color::O }
}


pub struct ColorIterator {
    state: Option<Color>,
}

impl ColorIterator {
    pub fn new() -> Self {
        return Self { state: None }
    }
}

impl Iterator for ColorIterator {
    type Item = Color;

    fn next(&mut self) -> Option<Self::Item> {
        let next = match self.state {
            None => Some(Color::O),
            Some(Color::O) => Some(Color::X),
            Some(Color::X) => None
        };
        self.state = next;
        return next;
    }
}


/// A column drop, or the sentinel for "no legal move".
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Move {
    Drop(u8),
    NullMove,
}

impl Move {
    pub fn column(&self) -> Option<u8> {
        return match self {
            Move::Drop(column) => Some(*column),
            Move::NullMove => None,
        }
    }

    pub fn is_null(&self) -> bool {
        return *self == Move::NullMove;
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Move::Drop(column) => write!(f, "column {}", column),
            Move::NullMove => write!(f, "no move"),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colors_iterate_in_turn_order() {
        let colors: Vec<Color> = Color::iter().collect();
        assert_eq!(colors, vec![Color::O, Color::X]);
        assert_eq!(Color::O.swap(), Color::X);
        assert_eq!(Color::X.swap().swap(), Color::X);
    }

    #[test]
    fn null_move_has_no_column() {
        assert_eq!(Move::Drop(4).column(), Some(4));
        assert_eq!(Move::NullMove.column(), None);
        assert!(Move::NullMove.is_null());
        assert_eq!(Move::Drop(2).to_string(), "column 2");
    }
}
