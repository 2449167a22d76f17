use tracing::info;

use crate::{
    config::SearchConfig,
    engine::{Engine, SearchResult, search::SearchType},
    rules::{Color, Move, board::{Board, COLUMNS, state::Status}},
    util::errors::{MoveError, NotationError},
};


pub struct Game {
    board: Board,
    engine: Engine,
    move_history: Vec<Move>,
}

impl Game {
    pub fn new(search_type: SearchType, config: SearchConfig) -> Self {
        return Self::from_board(Board::new(), search_type, config);
    }

    pub fn from_notation(notation: &str, search_type: SearchType, config: SearchConfig) -> Result<Self, NotationError> {
        return Ok(Self::from_board(Board::from_notation(notation)?, search_type, config));
    }

    pub fn from_board(board: Board, search_type: SearchType, config: SearchConfig) -> Self {
        info!(position = %board.to_notation(), to_move = board.get_move_color().value(), "new game");
        return Self {
            board: board,
            engine: Engine::new(search_type, config),
            move_history: Vec::new(),
        }
    }

    /// Drops a stone for the side to move. Columns are numbered from 0.
    pub fn make_move(&mut self, column: usize) -> Result<Status, MoveError> {
        let status = self.status();
        if status.state.is_over() {
            return Err(MoveError::GameOver(String::from(status.state.value())));
        }
        if column >= COLUMNS {
            return Err(MoveError::OutOfRange(column, COLUMNS - 1));
        }
        let color = self.board.get_move_color();
        if !self.board.insert(column as u8) {
            return Err(MoveError::ColumnFull(column));
        }
        self.move_history.push(Move::Drop(column as u8));
        let status = self.status();
        info!(color = color.value(), column, score = status.score, "move played");
        if status.state.is_over() {
            info!(result = status.state.value(), moves = self.move_history.len(), "game over");
        }
        return Ok(status);
    }

    /// Searches the current position without playing the result.
    pub fn suggest_move(&mut self) -> SearchResult {
        return self.engine.do_search(&self.board);
    }

    pub fn play_engine_move(&mut self) -> Result<(SearchResult, Status), MoveError> {
        let status = self.status();
        if status.state.is_over() {
            return Err(MoveError::GameOver(String::from(status.state.value())));
        }
        let result = self.suggest_move();
        return match result.best_move {
            Move::Drop(column) => {
                let status = self.make_move(column as usize)?;
                Ok((result, status))
            },
            Move::NullMove => Err(MoveError::NoMove),
        }
    }

    pub fn status(&self) -> Status {
        return self.engine.get_config().evaluator.evaluate(&self.board);
    }

    pub fn board(&self) -> &Board {
        return &self.board;
    }

    pub fn history(&self) -> &[Move] {
        return &self.move_history;
    }

    pub fn get_current_turn(&self) -> Color {
        return self.board.get_move_color();
    }

    pub fn engine(&self) -> &Engine {
        return &self.engine;
    }

    pub fn set_search_type(&mut self, search_type: SearchType) {
        self.engine.set_search_type(search_type);
    }

    pub fn set_budget(&mut self, budget: u32) {
        self.engine.set_budget(budget);
    }

    pub fn configure(&mut self, search_type: SearchType, config: SearchConfig) {
        self.engine.reconfigure(search_type, config);
    }

    pub fn serialize_board(&self) -> String {
        return self.board.to_notation();
    }
}
