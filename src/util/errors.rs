use thiserror::Error;


#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid input: {msg}")]
pub struct InputError {
    pub msg: String,
}

impl InputError {
    pub fn new(msg: &str) -> InputError {
        return InputError {
            msg: String::from(msg)
        }
    }
}


#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotationError {
    #[error("incorrect dimension of the board: expected {expected} characters, found {found}")]
    Length { expected: usize, found: usize },
}


#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("Invalid column number {0}. It should be no greater than {1}.")]
    OutOfRange(usize, usize),

    #[error("Column {0} is already full! Try again with a different column.")]
    ColumnFull(usize),

    #[error("The game is already over: {0}")]
    GameOver(String),

    #[error("The engine found no move to play")]
    NoMove,
}


#[derive(Debug, Error)]
pub enum ShellError {
    #[error("Input closed")]
    Closed,

    #[error(transparent)]
    Input(#[from] InputError),

    #[error("Could not read a line: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
}
