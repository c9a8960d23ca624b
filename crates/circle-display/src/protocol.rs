use std::fmt;
use std::num::ParseFloatError;
use std::str::FromStr;
use thiserror::Error;

pub const SOCKET_PATH: &str = "/tmp/circle-display.sock";
/// Total used by `refresh`, which shows a random value below it.
pub const REFRESH_TOTAL: f64 = 1000.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlCommand {
    /// `show <value> <total> [animated|instant]`
    Show {
        value: f64,
        total: f64,
        animated: bool,
    },
    Replay,
    Refresh,
    Reload,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommandParseError {
    #[error("Empty command")]
    Empty,
    #[error("Unknown command '{0}'")]
    Unknown(String),
    #[error("Missing argument <{0}>")]
    MissingArgument(&'static str),
    #[error("Invalid number for <{name}>: {source}")]
    InvalidNumber {
        name: &'static str,
        source: ParseFloatError,
    },
    #[error("Unexpected argument '{0}'")]
    Unexpected(String),
}

fn number<'a>(
    args: &mut impl Iterator<Item = &'a str>,
    name: &'static str,
) -> Result<f64, CommandParseError> {
    args.next()
        .ok_or(CommandParseError::MissingArgument(name))?
        .parse()
        .map_err(|source| CommandParseError::InvalidNumber { name, source })
}

impl FromStr for ControlCommand {
    type Err = CommandParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut args = line.split_whitespace();
        let command = match args.next().ok_or(CommandParseError::Empty)? {
            "show" => {
                let value = number(&mut args, "value")?;
                let total = number(&mut args, "total")?;
                let animated = match args.next() {
                    None | Some("animated") => true,
                    Some("instant") => false,
                    Some(other) => return Err(CommandParseError::Unexpected(other.to_string())),
                };
                Self::Show {
                    value,
                    total,
                    animated,
                }
            }
            "replay" => Self::Replay,
            "refresh" => Self::Refresh,
            "reload" => Self::Reload,
            other => return Err(CommandParseError::Unknown(other.to_string())),
        };

        match args.next() {
            Some(extra) => Err(CommandParseError::Unexpected(extra.to_string())),
            None => Ok(command),
        }
    }
}

impl fmt::Display for ControlCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Show {
                value,
                total,
                animated,
            } => {
                let mode = if *animated { "animated" } else { "instant" };
                write!(f, "show {} {} {}", value, total, mode)
            }
            Self::Replay => f.write_str("replay"),
            Self::Refresh => f.write_str("refresh"),
            Self::Reload => f.write_str("reload"),
        }
    }
}
