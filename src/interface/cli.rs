use std::collections::HashSet;

use tabled::{Table, Style, Tabled};
use tracing::info;

use crate::{
    config::SearchConfig,
    engine::{Engine, SearchResult, search::SearchType},
    game::Game,
    interface::{arguments::{ParsedArgs, ParsedCommand}, shell::InteractiveShell},
    rules::board::state::Status,
    testing::{agreement::agreement, perft::PerftRunner},
    util::{errors::{InputError, ShellError}, format_bytes, format_count},
};

use super::arguments::ArgumentParser;

const HELP: &str = "\
Commands:
  new [--from-notation S] [--no-confirm]   start a new game, optionally from a position
  board [--as-notation]                    show the board
  move [column]                            drop a stone (columns 0-6); the engine replies
  play                                     let the engine move for the side to move
  search [--algorithm A] [--engine-depth N] [--iterations N]
                                           search the position without playing
  engine [--algorithm A] [--engine-depth N] [--iterations N]
                                           show or change the engine settings
  status                                   show the game state and score
  history                                  list the moves played so far
  perft --engine-depth N                   count reachable positions per ply
  compare --engine-depth N [--positions K] [--seed S]
                                           check minimax and alpha-beta agree
  help                                     show this message
  quit, exit                               leave the shell";


fn build_argument_parser() -> Result<ArgumentParser, InputError> {
    let mut builder = ArgumentParser::builder();
    builder.add_subcommand("new")?
        .add_named_arg("from_notation", HashSet::from(["--from-notation"]), false)?
        .add_flag_arg("no_confirm", HashSet::from(["--no-confirm"]))?;

    builder.add_subcommand("board")?
        .add_flag_arg("as_notation", HashSet::from(["--as-notation"]))?;

    builder.add_subcommand("move")?
        .add_positional_arg("column", false)?;

    builder.add_subcommand("play")?;

    for name in ["search", "engine"] {
        builder.add_subcommand(name)?
            .add_named_arg("algorithm", HashSet::from(["--algorithm"]), false)?
            .add_named_arg("depth", HashSet::from(["--engine-depth"]), false)?
            .add_named_arg("iterations", HashSet::from(["--iterations"]), false)?;
    }

    builder.add_subcommand("status")?;
    builder.add_subcommand("history")?;

    builder.add_subcommand("perft")?
        .add_named_arg("depth", HashSet::from(["--engine-depth"]), true)?;

    builder.add_subcommand("compare")?
        .add_named_arg("depth", HashSet::from(["--engine-depth"]), true)?
        .add_named_arg("positions", HashSet::from(["--positions"]), false)?
        .add_named_arg("seed", HashSet::from(["--seed"]), false)?;

    for name in ["help", "quit", "exit"] {
        builder.add_subcommand(name)?;
    }
    return Ok(builder.build());
}


#[derive(Tabled)]
struct PrintableSearch {
    algorithm: String,
    best_move: String,
    score: String,
    nodes: String,
    tree_size: String,
    time: String,
}

impl PrintableSearch {
    fn from_result(algorithm: SearchType, result: &SearchResult) -> Self {
        return Self {
            algorithm: String::from(algorithm.value()),
            best_move: result.best_move.to_string(),
            score: result.best_score.map(|s| s.to_string()).unwrap_or_else(|| String::from("-")),
            nodes: format_count(result.calculated_nodes),
            tree_size: result.tree_bytes.map(format_bytes).unwrap_or_else(|| String::from("-")),
            time: format!("{:?}", result.search_time),
        }
    }
}


/// Merges `--algorithm`, `--engine-depth` and `--iterations` over the game's
/// current engine settings. The merged budgets must pass the same checks as
/// the launch options.
fn engine_settings(game: &Game, args: &ParsedArgs) -> Result<(SearchType, SearchConfig), InputError> {
    let engine = game.engine();
    let mut config = *engine.get_config();
    let search_type = args.get_parsed::<SearchType>("algorithm")?.unwrap_or(engine.get_search_type());
    if let Some(depth) = args.get_parsed::<u32>("depth")? {
        config.depth = depth;
    }
    if let Some(iterations) = args.get_parsed::<u32>("iterations")? {
        config.iterations = iterations;
    }
    config.validate()?;
    return Ok((search_type, config));
}


/// One line per recorded move. Movers alternate backwards from the side to
/// move, so positions loaded with X to move are attributed correctly.
fn history_lines(game: &Game) -> Vec<String> {
    let history = game.history();
    let mut first_mover = game.get_current_turn();
    if history.len() % 2 == 1 {
        first_mover = first_mover.swap();
    }
    return history.iter().enumerate().map(|(index, mov)| {
        let mover = if index % 2 == 0 { first_mover } else { first_mover.swap() };
        format!("{:>3}. {} {}", index + 1, mover.value(), mov)
    }).collect();
}


#[derive(Tabled)]
struct PrintableSettings {
    algorithm: String,
    depth: String,
    iterations: String,
    seed: String,
}


pub struct Interface {
    shell: InteractiveShell,
    game: Game,
    confirmations: HashSet<String>,
}

impl Interface {
    pub fn new(game: Game) -> Result<Interface, InputError> {
        let prompt = "connect-four > ";

        return Ok(Interface {
            shell: InteractiveShell::new(Some(prompt), build_argument_parser()?),
            game: game,
            confirmations: HashSet::from([String::from("y"), String::from("yes")]),
        })
    }

    pub fn init(&mut self) -> Result<(), ShellError> {
        self.shell.output("Connect Four. Type 'help' for a list of commands.");
        self.do_board(&ParsedArgs::default());
        loop {
            let outcome = match self.shell.get_command() {
                Ok(command) => self.dispatch(command),
                Err(e) => Err(e),
            };
            match outcome {
                Ok(true) => {},
                Ok(false) | Err(ShellError::Closed) => break,
                Err(ShellError::Input(e)) => self.shell.output(&e.to_string()),
                Err(e) => return Err(e),
            }
            self.shell.empty_line();
        }
        self.shell.output("Exiting...");
        self.shell.empty_line();
        return Ok(());
    }

    /// Returns false once the user asks to leave.
    fn dispatch(&mut self, command: ParsedCommand) -> Result<bool, ShellError> {
        let args = &command.args;
        match command.name.as_str() {
            "new"           => self.do_new(args)?,
            "board"         => self.do_board(args),
            "move"          => self.do_move(args)?,
            "play"          => self.do_play(),
            "search"        => self.do_search(args)?,
            "engine"        => self.do_engine(args)?,
            "status"        => self.do_status(),
            "history"       => self.do_history(),
            "perft"         => self.do_perft(args)?,
            "compare"       => self.do_compare(args)?,
            "help"          => self.shell.output(HELP),
            "quit" | "exit" => return Ok(false),
            x => self.shell.output(&format!("Unknown subcommand {} encountered", x)),
        };
        return Ok(true);
    }

    fn do_new(&mut self, args: &ParsedArgs) -> Result<(), ShellError> {
        let mut confirmed = args.get_flag("no_confirm");
        if !confirmed {
            let confirm = self.shell.input("Are you sure you want to start a new game? All progress on the current game will be lost. (y/N): ")?;
            confirmed = self.confirmations.contains(&confirm.to_lowercase());
        }
        if !confirmed {
            self.shell.output("OK, aborting...");
            return Ok(());
        }
        let search_type = self.game.engine().get_search_type();
        let config = *self.game.engine().get_config();
        match args.get_arg("from_notation") {
            Some(notation) => match Game::from_notation(&notation, search_type, config) {
                Ok(game) => self.game = game,
                Err(e) => {
                    self.shell.output(&format!("Could not load the position: {}", e));
                    return Ok(());
                },
            },
            None => self.game = Game::new(search_type, config),
        }
        self.shell.output("New game started!");
        self.do_board(&ParsedArgs::default());
        return Ok(());
    }

    fn do_board(&self, args: &ParsedArgs) {
        match args.get_flag("as_notation") {
            true => self.shell.output(&self.game.serialize_board()),
            false => {
                self.shell.output(&self.game.board().to_string());
                self.shell.output("0 1 2 3 4 5 6");
            }
        }
    }

    fn do_move(&mut self, args: &ParsedArgs) -> Result<(), ShellError> {
        let column: usize = match args.get_parsed("column")? {
            Some(column) => column,
            None => {
                let prompt = format!("Where should {} play? ", self.game.get_current_turn().value());
                let answer = self.shell.input(&prompt)?;
                match answer.parse() {
                    Ok(column) => column,
                    Err(_) => return Err(InputError::new(&format!("'{}' is not a column number.", answer)).into()),
                }
            }
        };
        match self.game.make_move(column) {
            Err(e) => self.shell.output(&e.to_string()),
            Ok(status) => {
                self.do_board(&ParsedArgs::default());
                self.report_status(status);
                if !status.state.is_over() {
                    self.shell.empty_line();
                    self.do_play();
                }
            }
        }
        return Ok(());
    }

    fn do_play(&mut self) {
        let color = self.game.get_current_turn();
        self.shell.output(&format!("Engine is thinking for {}...", color.value()));
        match self.game.play_engine_move() {
            Err(e) => self.shell.output(&e.to_string()),
            Ok((result, status)) => {
                self.shell.output(&format!("{} plays {}", color.value(), result.best_move));
                self.output_search(self.game.engine().get_search_type(), &result);
                self.do_board(&ParsedArgs::default());
                self.report_status(status);
            }
        }
    }

    /// Builds a one-off engine from the current settings plus overrides.
    fn do_search(&mut self, args: &ParsedArgs) -> Result<(), ShellError> {
        let (search_type, config) = engine_settings(&self.game, args)?;
        let mut engine = Engine::new(search_type, config);
        self.shell.output("Searching...");
        let result = engine.do_search(self.game.board());
        self.output_search(search_type, &result);
        return Ok(());
    }

    fn do_engine(&mut self, args: &ParsedArgs) -> Result<(), ShellError> {
        let (search_type, config) = engine_settings(&self.game, args)?;
        self.game.configure(search_type, config);
        info!(algorithm = search_type.value(), depth = config.depth, iterations = config.iterations, "engine settings changed");
        let current = self.game.engine().get_config();
        let settings = PrintableSettings {
            algorithm: String::from(self.game.engine().get_search_type().value()),
            depth: current.depth.to_string(),
            iterations: format_count(current.iterations as u64),
            seed: current.seed.map(|s| s.to_string()).unwrap_or_else(|| String::from("random")),
        };
        self.shell.output(&Table::new(vec![settings]).with(Style::pseudo_clean()).to_string());
        return Ok(());
    }

    fn do_status(&self) {
        self.shell.output(&format!("{} to move, {} moves played.", self.game.get_current_turn().value(), self.game.history().len()));
        self.report_status(self.game.status());
    }

    fn do_history(&self) {
        if self.game.history().is_empty() {
            self.shell.output("No moves have been played yet.");
            return;
        }
        for line in history_lines(&self.game) {
            self.shell.output(&line);
        }
    }

    fn do_perft(&mut self, args: &ParsedArgs) -> Result<(), ShellError> {
        let depth: u32 = args.get_parsed("depth")?.unwrap_or_default();
        let result = PerftRunner::do_perft(*self.game.board(), depth);
        let table = Table::new(result.get_analysis()).with(Style::pseudo_clean());
        self.shell.output(&table.to_string());
        self.shell.output(&format!("Completed in {:?}", result.duration));
        return Ok(());
    }

    fn do_compare(&mut self, args: &ParsedArgs) -> Result<(), ShellError> {
        let depth: u32 = args.get_parsed("depth")?.unwrap_or_default();
        let positions: usize = args.get_parsed("positions")?.unwrap_or(10);
        let seed: u64 = args.get_parsed("seed")?.unwrap_or(0);
        SearchConfig::default().with_depth(depth).validate()?;
        let report = agreement(depth, positions, seed);
        let table = Table::new(report.get_analysis()).with(Style::pseudo_clean());
        self.shell.output(&table.to_string());
        self.shell.output(&format!(
            "{} of {} positions agree at depth {}. Nodes: minimax {}, alpha-beta {}.",
            report.positions.len() - report.mismatches().len(),
            report.positions.len(),
            report.depth,
            format_count(report.minimax_nodes()),
            format_count(report.alpha_beta_nodes()),
        ));
        return Ok(());
    }

    fn output_search(&self, search_type: SearchType, result: &SearchResult) {
        let table = Table::new(vec![PrintableSearch::from_result(search_type, result)]).with(Style::pseudo_clean());
        self.shell.output(&table.to_string());
    }

    fn report_status(&self, status: Status) {
        match status.state.is_over() {
            true => self.shell.output(&format!("Game over: {}", status.state.value())),
            false => self.shell.output(&format!("Score: {}", status.score)),
        }
    }
}


#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::rules::{Color, Move, board::Board};

    use super::*;

    fn parse(input: &str) -> ParsedArgs {
        return build_argument_parser().unwrap().parse(input).unwrap().args;
    }

    fn game() -> Game {
        let config = SearchConfig::default().with_depth(3).with_iterations(200).with_seed(Some(7));
        return Game::new(SearchType::AlphaBeta, config);
    }

    #[test]
    fn history_starts_with_o_on_a_fresh_board() {
        let mut game = game();
        game.make_move(3).unwrap();
        game.make_move(4).unwrap();
        game.make_move(3).unwrap();
        assert_eq!(history_lines(&game), vec![
            "  1. O column 3",
            "  2. X column 4",
            "  3. O column 3",
        ]);
    }

    #[test]
    fn history_credits_x_when_x_moves_first() {
        let mut board = Board::new();
        board.set_move_color(Color::X);
        let mut game = Game::from_board(board, SearchType::AlphaBeta, SearchConfig::default().with_depth(2));
        assert!(history_lines(&game).is_empty());

        game.make_move(0).unwrap();
        assert_eq!(history_lines(&game), vec!["  1. X column 0"]);
        game.make_move(6).unwrap();
        assert_eq!(history_lines(&game), vec!["  1. X column 0", "  2. O column 6"]);
    }

    #[test]
    fn engine_settings_merge_over_the_current_ones() {
        let game = game();
        let (search_type, config) = engine_settings(&game, &parse("engine")).unwrap();
        assert_eq!(search_type, SearchType::AlphaBeta);
        assert_eq!(&config, game.engine().get_config());

        let (search_type, config) = engine_settings(&game, &parse("engine --algorithm mcts --iterations 500")).unwrap();
        assert_eq!(search_type, SearchType::MonteCarlo);
        assert_eq!(config.iterations, 500);
        assert_eq!(config.depth, 3);
        assert_eq!(config.seed, Some(7));

        let (_, config) = engine_settings(&game, &parse("search --engine-depth 42")).unwrap();
        assert_eq!(config.depth, 42);
    }

    #[test]
    fn engine_settings_reject_unusable_values() {
        let game = game();
        for input in [
            "engine --iterations 0",
            "engine --iterations 1",
            "engine --engine-depth 0",
            "engine --engine-depth 43",
            "search --engine-depth 99",
            "engine --iterations many",
            "engine --algorithm negamax",
        ] {
            assert!(engine_settings(&game, &parse(input)).is_err(), "{} was accepted", input);
        }
    }

    #[test]
    fn a_rejected_iteration_count_leaves_the_engine_playable() {
        let mut game = game();
        game.configure(SearchType::MonteCarlo, *game.engine().get_config());
        game.make_move(3).unwrap();

        assert!(engine_settings(&game, &parse("engine --iterations 1")).is_err());
        assert_eq!(game.engine().get_budget(), 200);
        let (result, _) = game.play_engine_move().unwrap();
        assert!(matches!(result.best_move, Move::Drop(_)));
    }

    #[test]
    fn search_rows_use_placeholders_for_missing_values() {
        let minimax = SearchResult::new(Move::Drop(3), Some(-16), 1234567);
        let row = PrintableSearch::from_result(SearchType::Minimax, &minimax);
        assert_eq!(row.algorithm, "minimax");
        assert_eq!(row.best_move, "column 3");
        assert_eq!(row.score, "-16");
        assert_eq!(row.nodes, "1,234,567");
        assert_eq!(row.tree_size, "-");

        let mut mcts = SearchResult::new(Move::NullMove, None, 14).with_tree_bytes(2048);
        mcts.search_time = Duration::from_millis(5);
        let row = PrintableSearch::from_result(SearchType::MonteCarlo, &mcts);
        assert_eq!(row.algorithm, "mcts");
        assert_eq!(row.best_move, "no move");
        assert_eq!(row.score, "-");
        assert_eq!(row.tree_size, format_bytes(2048));
        assert_eq!(row.time, "5ms");
    }
}
