use std::str::FromStr;

use tessera_forms::{
    calendar::CalendarDate,
    date_field::{DateFieldEvent, Key},
    error::DateParseError,
};
use thiserror::Error;

/// One line of driver input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Forward an event to the field.
    Event(DateFieldEvent),
    /// Replace the controlled value.
    Value(Option<CalendarDate>),
    /// Print the current state without changing it.
    Show,
    /// Leave the driver.
    Quit,
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("unknown command {0:?}; try `help`")]
    Unknown(String),
    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),
    #[error("`{command}` expects a day index, got {argument:?}")]
    BadIndex {
        command: &'static str,
        argument: String,
    },
    #[error(transparent)]
    Date(#[from] DateParseError),
}

pub const HELP: &str = "\
commands:
  type <text>        replace the input text
  down | up          arrow keys
  enter | esc        enter and escape keys
  focus | blur       focus changes
  open | close       show or hide the grid
  hover <n> | leave  pointer over day index n / leaving a day
  enter-input        pointer over the text input
  click <date>       click a day (YYYY-MM-DD)
  prev | next        previous / next month
  prev-year | next-year
  today | clear
  value <date|->     set the controlled value
  show | quit";

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim_start();
        let (word, rest) = line.split_once(' ').unwrap_or((line.trim_end(), ""));
        let event = match word {
            "type" => DateFieldEvent::Input(rest.to_string()),
            "down" => DateFieldEvent::Key(Key::ArrowDown),
            "up" => DateFieldEvent::Key(Key::ArrowUp),
            "enter" => DateFieldEvent::Key(Key::Enter),
            "esc" => DateFieldEvent::Key(Key::Escape),
            "focus" => DateFieldEvent::Focus,
            "blur" => DateFieldEvent::Blur,
            "open" => DateFieldEvent::Open,
            "close" => DateFieldEvent::Close,
            "hover" => {
                let argument = required(rest, "hover")?;
                let index = argument.parse().map_err(|_| CommandError::BadIndex {
                    command: "hover",
                    argument: argument.to_string(),
                })?;
                DateFieldEvent::PointerEnterDay(index)
            }
            "leave" => DateFieldEvent::PointerLeaveDay,
            "enter-input" => DateFieldEvent::PointerEnterInput,
            "click" => DateFieldEvent::DayClicked(required(rest, "click")?.parse()?),
            "prev" => DateFieldEvent::PreviousMonth,
            "next" => DateFieldEvent::NextMonth,
            "prev-year" => DateFieldEvent::PreviousYear,
            "next-year" => DateFieldEvent::NextYear,
            "today" => DateFieldEvent::Today,
            "clear" => DateFieldEvent::Clear,
            "value" => {
                return match required(rest, "value")? {
                    "-" => Ok(Command::Value(None)),
                    text => Ok(Command::Value(Some(text.parse()?))),
                };
            }
            "show" | "" => return Ok(Command::Show),
            "quit" | "exit" => return Ok(Command::Quit),
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(Command::Event(event))
    }
}

fn required<'a>(rest: &'a str, command: &'static str) -> Result<&'a str, CommandError> {
    let rest = rest.trim();
    if rest.is_empty() {
        Err(CommandError::MissingArgument(command))
    } else {
        Ok(rest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            "type 03/15/2024".parse::<Command>().unwrap(),
            Command::Event(DateFieldEvent::Input("03/15/2024".into()))
        );
        assert_eq!(
            "type ".parse::<Command>().unwrap(),
            Command::Event(DateFieldEvent::Input(String::new()))
        );
        assert_eq!(
            "down".parse::<Command>().unwrap(),
            Command::Event(DateFieldEvent::Key(Key::ArrowDown))
        );
        assert_eq!(
            "hover 4".parse::<Command>().unwrap(),
            Command::Event(DateFieldEvent::PointerEnterDay(4))
        );
        assert_eq!("value -".parse::<Command>().unwrap(), Command::Value(None));
        assert_eq!(
            "value 2024-05-01".parse::<Command>().unwrap(),
            Command::Value(CalendarDate::new(2024, 5, 1))
        );
        assert_eq!("".parse::<Command>().unwrap(), Command::Show);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!("jump".parse::<Command>(), Err(CommandError::Unknown(_))));
        assert!(matches!(
            "click".parse::<Command>(),
            Err(CommandError::MissingArgument("click"))
        ));
        assert!(matches!(
            "hover x".parse::<Command>(),
            Err(CommandError::BadIndex { .. })
        ));
        assert!(matches!(
            "click 2024-02-30".parse::<Command>(),
            Err(CommandError::Date(_))
        ));
    }
}
