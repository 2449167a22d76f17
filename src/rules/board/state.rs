use crate::rules::Color;


#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum GameState {
    InProgress,
    Draw,
    OWins,
    XWins,
}

impl GameState {
    pub fn is_over(&self) -> bool {
        return *self != GameState::InProgress;
    }

    pub fn winner(&self) -> Option<Color> {
        return match self {
            GameState::OWins => Some(Color::O),
            GameState::XWins => Some(Color::X),
            _ => None,
        }
    }

    pub fn value(&self) -> &'static str {
        return match self {
            GameState::InProgress => "Not over",
            GameState::Draw => "Draw",
            GameState::OWins => "O won",
            GameState::XWins => "X won",
        }
    }
}


/// Terminal state plus signed heuristic score (positive favors X).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Status {
    pub state: GameState,
    pub score: i32,
}

impl Status {
    pub fn new(state: GameState, score: i32) -> Self {
        return Self { state: state, score: score }
    }
}


#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct BoardState {
    pub to_move: Color,
}

impl BoardState {
    pub fn get_move_color(&self) -> Color {
        return self.to_move
    }

    pub fn change_move_color(&mut self) {
        self.to_move = self.to_move.swap();
    }
}
