use sweeper_core::{Action, Coord, Coord2};
use thiserror::Error;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Command {
    Play(Action),
    Quit,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub(crate) enum ParseError {
    #[error("Enter a command, for example `r 3 4` to reveal or `f 3 4` to flag")]
    Empty,
    #[error("Unknown command `{0}`, use `r`, `f` or `q`")]
    UnknownCommand(String),
    #[error("Expected a row and a column")]
    MissingCoordinate,
    #[error("`{0}` is not a valid row or column")]
    InvalidNumber(String),
    #[error("Rows and columns start at 1")]
    ZeroCoordinate,
}

/// Parses one line of player input, rows and columns are 1-based.
pub(crate) fn parse_command(line: &str) -> Result<Command, ParseError> {
    let mut words = line.split_whitespace();
    let command = words.next().ok_or(ParseError::Empty)?;

    let make_action: fn(Coord2) -> Action = match command.to_ascii_lowercase().as_str() {
        "q" | "quit" => return Ok(Command::Quit),
        "r" | "m" | "reveal" | "mine" => Action::reveal,
        "f" | "flag" => Action::toggle_flag,
        _ => return Err(ParseError::UnknownCommand(command.to_string())),
    };

    let row = parse_coord(words.next())?;
    let col = parse_coord(words.next())?;
    Ok(Command::Play(make_action((row, col))))
}

/// Converts a 1-based coordinate to the 0-based one the engine uses.
fn parse_coord(word: Option<&str>) -> Result<Coord, ParseError> {
    let word = word.ok_or(ParseError::MissingCoordinate)?;
    let value: Coord = word
        .parse()
        .map_err(|_| ParseError::InvalidNumber(word.to_string()))?;
    value.checked_sub(1).ok_or(ParseError::ZeroCoordinate)
}
