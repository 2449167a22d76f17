use crate::rules::{Color, board::{Board, COLUMNS, ROWS, state::{GameState, Status}}};


pub const WIN_SCORE: i32 = 512;
pub const TEMPO_BONUS: i32 = 16;
pub const WINDOW_WEIGHTS: [i32; 4] = [0, 1, 10, 50];

// (column step, row step); the other four compass directions are the same
// windows read from the opposite end.
const DIRECTIONS: [(i32, i32); 4] = [(1, -1), (1, 0), (1, 1), (0, 1)];


/// Positional heuristic. Scores 4-cell windows that contain stones of only one
/// color and detects four in a row.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Evaluator {
    pub win_score: i32,
    pub tempo_bonus: i32,
    pub window_weights: [i32; 4],
}

impl Default for Evaluator {
    fn default() -> Self {
        return Self {
            win_score: WIN_SCORE,
            tempo_bonus: TEMPO_BONUS,
            window_weights: WINDOW_WEIGHTS,
        }
    }
}

impl Evaluator {
    pub fn with_tempo_bonus(mut self, bonus: i32) -> Self {
        self.tempo_bonus = bonus;
        return self;
    }

    pub fn evaluate(&self, board: &Board) -> Status {
        let mut score = 0i32;
        for column in 0..COLUMNS as i32 {
            for row in 0..ROWS as i32 {
                for (dx, dy) in DIRECTIONS.iter() {
                    let (mut o_count, mut x_count) = (0usize, 0usize);
                    let (mut x, mut y) = (column, row);
                    for step in 0..4 {
                        if step > 0 {
                            x += dx;
                            y += dy;
                        }
                        match stone_on_grid(board, x, y) {
                            Some(Color::O) => o_count += 1,
                            Some(Color::X) => x_count += 1,
                            None => (),
                        }
                    }
                    if o_count == 4 {
                        return Status::new(GameState::OWins, -self.win_score);
                    }
                    if x_count == 4 {
                        return Status::new(GameState::XWins, self.win_score);
                    }
                    // Scoring only counts windows whose far end is on the grid;
                    // win detection above does not need the gate.
                    if cell_on_grid(x, y) {
                        if o_count == 0 {
                            score += self.window_weights[x_count];
                        } else if x_count == 0 {
                            score -= self.window_weights[o_count];
                        }
                    }
                }
            }
        }
        if board.is_full() {
            return Status::new(GameState::Draw, 0);
        }
        let tempo = match board.get_move_color() {
            Color::X => self.tempo_bonus,
            Color::O => -self.tempo_bonus,
        };
        return Status::new(GameState::InProgress, score + tempo);
    }
}


fn cell_on_grid(x: i32, y: i32) -> bool {
    return x >= 0 && x < COLUMNS as i32 && y >= 0 && y < ROWS as i32;
}

fn stone_on_grid(board: &Board, x: i32, y: i32) -> Option<Color> {
    if !cell_on_grid(x, y) {
        return None;
    }
    return board.stone_at(x as usize, y as usize);
}
