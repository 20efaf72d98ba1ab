//! Line commands understood by the terminal driver.

use arrowword_core::{Position, Variant};
use arrowword_game::Mode;

/// Command reference printed by `help`.
pub const HELP: &str = "\
commands:
  R C                       click a cell (place cursor / toggle number)
  type WORD                 enter letters at the cursor
  del [N]                   delete backwards N times
  start                     start the countdown
  edit | play               switch mode
  clue R C DIR ANSWER TEXT  set a clue (DIR: right, down, left-down; ANSWER: - for none)
  unclue R C                remove a clue
  number on|off             toggle solution-word numbering
  renumber                  clear all solution-word numbers
  clear-answers             wipe all letters
  reset-timer               reset the timer
  clear-all                 start over with an empty grid and drop the draft
  show | help | quit";

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Show,
    Quit,
    SetMode(Mode),
    Start,
    Click(Position),
    Type(String),
    Delete { count: usize },
    SetClue {
        pos: Position,
        variant: Variant,
        answer: String,
        text: String,
    },
    RemoveClue(Position),
    Numbering(bool),
    ResetNumbers,
    ClearAnswers,
    ResetTimer,
    ClearAll,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseError {
    #[display("unknown command {name:?}; type `help`")]
    Unknown { name: String },
    #[display("usage: {usage}")]
    Usage { usage: &'static str },
    #[display("{row},{col} is outside the grid")]
    OutOfGrid { row: usize, col: usize },
}

fn usage(usage: &'static str) -> ParseError {
    ParseError::Usage { usage }
}

fn parse_position<'a>(
    words: &mut impl Iterator<Item = &'a str>,
    hint: &'static str,
) -> Result<Position, ParseError> {
    let mut number = || {
        words
            .next()
            .and_then(|w| w.parse::<usize>().ok())
            .ok_or_else(|| usage(hint))
    };
    let row = number()?;
    let col = number()?;
    Position::try_new(row, col).ok_or(ParseError::OutOfGrid { row, col })
}

fn parse_variant(word: &str) -> Option<Variant> {
    match word {
        "right" | "r" => Some(Variant::LeftThenRight),
        "down" | "d" => Some(Variant::AboveThenDown),
        "left-down" | "ld" => Some(Variant::LeftThenDown),
        _ => None,
    }
}

/// Parses one input line; blank lines yield `None`.
pub fn parse_line(line: &str) -> Result<Option<Command>, ParseError> {
    let mut words = line.split_whitespace();
    let Some(name) = words.next() else {
        return Ok(None);
    };

    let command = match name {
        "help" | "?" => Command::Help,
        "show" => Command::Show,
        "quit" | "q" | "exit" => Command::Quit,
        "edit" => Command::SetMode(Mode::Edit),
        "play" => Command::SetMode(Mode::Play),
        "start" => Command::Start,
        "type" => {
            let word: String = words.collect();
            if word.is_empty() {
                return Err(usage("type WORD"));
            }
            Command::Type(word)
        }
        "del" | "back" => {
            let count = match words.next() {
                Some(n) => n.parse().map_err(|_| usage("del [N]"))?,
                None => 1,
            };
            Command::Delete { count }
        }
        "clue" => {
            const USAGE: &str = "clue R C DIR ANSWER TEXT";
            let pos = parse_position(&mut words, USAGE)?;
            let variant = words.next().and_then(parse_variant).ok_or_else(|| usage(USAGE))?;
            let answer = match words.next() {
                Some("-") => String::new(),
                Some(answer) => answer.to_owned(),
                None => return Err(usage(USAGE)),
            };
            let text = words.collect::<Vec<_>>().join(" ");
            Command::SetClue {
                pos,
                variant,
                answer,
                text,
            }
        }
        "unclue" => Command::RemoveClue(parse_position(&mut words, "unclue R C")?),
        "number" => match words.next() {
            Some("on") => Command::Numbering(true),
            Some("off") => Command::Numbering(false),
            _ => return Err(usage("number on|off")),
        },
        "renumber" => Command::ResetNumbers,
        "clear-answers" => Command::ClearAnswers,
        "reset-timer" => Command::ResetTimer,
        "clear-all" => Command::ClearAll,
        _ if name.parse::<usize>().is_ok() => {
            let mut words = line.split_whitespace();
            Command::Click(parse_position(&mut words, "R C")?)
        }
        _ => {
            return Err(ParseError::Unknown {
                name: name.to_owned(),
            });
        }
    };
    Ok(Some(command))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Command {
        parse_line(line).unwrap().unwrap()
    }

    #[test]
    fn test_simple_commands() {
        assert_eq!(parse_line("   ").unwrap(), None);
        assert_eq!(parse("play"), Command::SetMode(Mode::Play));
        assert_eq!(parse("3 4"), Command::Click(Position::new(3, 4)));
        assert_eq!(parse("type pa ris"), Command::Type("paris".into()));
        assert_eq!(parse("del"), Command::Delete { count: 1 });
        assert_eq!(parse("del 3"), Command::Delete { count: 3 });
        assert_eq!(parse("number on"), Command::Numbering(true));
    }

    #[test]
    fn test_clue_command() {
        assert_eq!(
            parse("clue 0 0 right PARIS Capital of  France"),
            Command::SetClue {
                pos: Position::new(0, 0),
                variant: Variant::LeftThenRight,
                answer: "PARIS".into(),
                text: "Capital of France".into(),
            }
        );
        assert_eq!(
            parse("clue 2 5 ld - Mystery"),
            Command::SetClue {
                pos: Position::new(2, 5),
                variant: Variant::LeftThenDown,
                answer: String::new(),
                text: "Mystery".into(),
            }
        );
    }

    #[test]
    fn test_errors() {
        assert_eq!(
            parse_line("12 0"),
            Err(ParseError::OutOfGrid { row: 12, col: 0 })
        );
        assert!(matches!(parse_line("clue 0 0 sideways X"), Err(ParseError::Usage { .. })));
        assert!(matches!(parse_line("dance"), Err(ParseError::Unknown { .. })));
        assert!(matches!(parse_line("type"), Err(ParseError::Usage { .. })));
    }
}
