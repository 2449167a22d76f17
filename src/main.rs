#![allow(dead_code)]

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use config::LaunchArgs;
use game::Game;
use interface::cli::Interface;

mod config;
mod engine;
mod game;
mod interface;
mod rules;
mod testing;
mod util;


/// Logs go to stderr so they never interleave with the board on stdout.
fn init_tracing(level: &str) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}


fn main() -> Result<()> {
    let args = LaunchArgs::parse();
    args.validate()?;
    init_tracing(&args.log_level);

    let board = args.starting_board().context("could not load the starting position")?;
    let mut game = Game::from_board(board, args.algorithm, args.search_config());
    info!(algorithm = args.algorithm.value(), budget = game.engine().get_budget(), "engine ready");

    if args.suggest {
        let result = game.suggest_move();
        println!("{}", result.best_move);
        return Ok(());
    }

    let mut interface = Interface::new(game)?;
    interface.init()?;
    return Ok(());
}
