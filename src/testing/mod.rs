pub mod agreement;
pub mod perft;
