use std::io::{self, BufRead, Write};

use anyhow::Context;
use clap::Parser;
use sweeper_core::{
    CellCount, Coord, ErrorKind, Game, GameConfig, GameStatus, Outcome, RandomBoardGenerator,
};

mod input;
mod render;

use input::{Command, parse_command};
use render::BoardView;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Side length of the square board
    #[arg(short, long, default_value_t = GameConfig::default().size)]
    size: Coord,

    /// Number of mines, must leave at least one safe cell
    #[arg(short, long, default_value_t = GameConfig::default().mines)]
    mines: CellCount,

    /// Force a seed instead of random
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.verbose.tracing_level_filter())
        .with_writer(io::stderr)
        .init();

    let config = GameConfig::new(args.size, args.mines).context("Invalid board configuration")?;
    let seed = args.seed.unwrap_or_else(rand::random);
    log::debug!("seed: {}", seed);

    println!("Creating random board...");
    let mut game = Game::generate(config, RandomBoardGenerator::from_seed(seed))?;
    println!("Done creating board!");

    let stdin = io::stdin();
    let outcome = play(&mut game, stdin.lock(), io::stdout().lock())?;
    match outcome {
        Some(Outcome::Won) => println!("You won!"),
        Some(Outcome::Lost) => println!("You lost!"),
        None => println!("Bye!"),
    }

    Ok(())
}

/// Runs the read-eval loop until the game ends or the input is exhausted.
fn play(game: &mut Game, input: impl BufRead, mut out: impl Write) -> io::Result<Option<Outcome>> {
    let mut lines = input.lines();

    while !game.is_finished() {
        write!(out, "{}", BoardView(game.board()))?;
        writeln!(out, "Mines left: {}", game.mines_left())?;
        write!(out, "> ")?;
        out.flush()?;

        let Some(line) = lines.next() else {
            return Ok(None);
        };

        let action = match parse_command(&line?) {
            Ok(Command::Play(action)) => action,
            Ok(Command::Quit) => return Ok(None),
            Err(err) => {
                writeln!(out, "{err}")?;
                continue;
            }
        };

        match game.apply(action) {
            Ok(GameStatus::Lost) => writeln!(out, "There was a mine there!")?,
            Ok(_) => {}
            Err(err) if err.kind() == ErrorKind::OutOfBounds => {
                writeln!(out, "Pick a row and column between 1 and {}", game.size())?
            }
            Err(err) => writeln!(out, "{err}")?,
        }
    }

    write!(out, "{}", BoardView(game.board()))?;
    Ok(game.outcome())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sweeper_core::Board;

    fn run(mines: &[(Coord, Coord)], script: &str) -> (Option<Outcome>, String) {
        let mut game = Game::new(Board::from_mine_coords(3, mines).unwrap());
        let mut out = Vec::new();
        let outcome = play(&mut game, script.as_bytes(), &mut out).unwrap();
        (outcome, String::from_utf8(out).unwrap())
    }

    #[test]
    fn winning_script() {
        let (outcome, out) = run(&[(2, 2)], "r 1 1\n");

        assert_eq!(outcome, Some(Outcome::Won));
        assert!(out.ends_with("3 0 1 #\n"), "{out}");
    }

    #[test]
    fn losing_script_shows_struck_mine() {
        let (outcome, out) = run(&[(0, 0)], "f 3 3\nr 1 1\n");

        assert_eq!(outcome, Some(Outcome::Lost));
        assert!(out.contains("There was a mine there!"));
        assert!(out.contains("1 * # #\n"), "{out}");
        assert!(out.contains("3 # # X\n"), "{out}");
    }

    #[test]
    fn recovers_from_bad_input() {
        let (outcome, out) = run(&[(0, 0)], "hello\nr 9 9\nr 2 2\nf 2 2\nq\n");

        assert_eq!(outcome, None);
        assert!(out.contains("Unknown command `hello`"));
        assert!(out.contains("Pick a row and column between 1 and 3"));
        assert!(out.contains("Revealed cells cannot be flagged"));
    }

    #[test]
    fn end_of_input_stops_the_game() {
        let (outcome, _) = run(&[(0, 0)], "");
        assert_eq!(outcome, None);
    }
}
