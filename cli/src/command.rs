use std::str::FromStr;

use cubesweeper_core::{CellCount, Coord, Coord3};
use thiserror::Error;

pub const HELP: &str = "\
commands:
  reveal|r X Y Z   reveal a block (first reveal places the mines)
  flag|f X Y Z     toggle a flag
  hover X Y Z      highlight a block, `hover` alone clears it
  tick|t SECONDS   advance block animations
  size X Y Z       resize the grid (mine count resets to 10%)
  mines N          change the mine count
  new              regenerate with the current settings
  show|s           print the grid again
  help|?           this text
  quit|q           leave";

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Command {
    Reveal(Coord3),
    Flag(Coord3),
    Hover(Option<Coord3>),
    Tick(f32),
    Size(Coord3),
    Mines(CellCount),
    New,
    Show,
    Help,
    Quit,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseCommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command `{0}`, try `help`")]
    Unknown(String),
    #[error("`{command}` expects {expected}")]
    BadArguments {
        command: &'static str,
        expected: &'static str,
    },
}

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Err(ParseCommandError::Empty);
        };
        let args: Vec<&str> = words.collect();

        let command = match name.to_ascii_lowercase().as_str() {
            "reveal" | "r" => Self::Reveal(coords("reveal", &args)?),
            "flag" | "f" => Self::Flag(coords("flag", &args)?),
            "hover" | "h" if args.is_empty() => Self::Hover(None),
            "hover" | "h" => Self::Hover(Some(coords("hover", &args)?)),
            "tick" | "t" => Self::Tick(single("tick", "a duration in seconds", &args)?),
            "size" => Self::Size(coords("size", &args)?),
            "mines" | "m" => Self::Mines(single("mines", "a mine count", &args)?),
            "new" | "n" => Self::New,
            "show" | "s" => Self::Show,
            "help" | "?" => Self::Help,
            "quit" | "q" | "exit" => Self::Quit,
            other => return Err(ParseCommandError::Unknown(other.to_string())),
        };
        Ok(command)
    }
}

fn coords(command: &'static str, args: &[&str]) -> Result<Coord3, ParseCommandError> {
    let bad = || ParseCommandError::BadArguments {
        command,
        expected: "three coordinates `X Y Z`",
    };

    let [x, y, z] = args else {
        return Err(bad());
    };
    let parse = |value: &str| value.parse::<Coord>().map_err(|_| bad());
    Ok((parse(*x)?, parse(*y)?, parse(*z)?))
}

fn single<T: FromStr>(
    command: &'static str,
    expected: &'static str,
    args: &[&str],
) -> Result<T, ParseCommandError> {
    let bad = ParseCommandError::BadArguments { command, expected };
    match args {
        [value] => value.parse().map_err(|_| bad),
        _ => Err(bad),
    }
}
