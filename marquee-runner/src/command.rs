//! The stdin command language: one command per line, the stand-in for the
//! form submit, hover, click, and slider interactions of a pointer UI.

use crossbeam_channel::Sender;
use log::warn;
use marquee_core::label::MAX_TEXT_LEN;
use marquee_core::LabelId;
use std::io::{self, BufRead};
use thiserror::Error;

/// A single line of user input, parsed.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// `add <text>` — submit new label text.
    Add(String),
    /// `rm <id>` — delete a label.
    Remove(LabelId),
    /// `pause <id>` — hover-enter: hold a label in place.
    Pause(LabelId),
    /// `resume <id>` — hover-leave: let it move again.
    Resume(LabelId),
    /// `speed <value>` — adjust the shared speed multiplier.
    Speed(f32),
    /// `list` — print the active labels.
    List,
    /// `quit` — stop the runner.
    Quit,
}

#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    #[error("label text cannot be empty")]
    EmptyText,
    #[error("label text longer than {MAX_TEXT_LEN} characters")]
    TextTooLong,
    #[error("not a label id: {0:?}")]
    BadId(String),
    #[error("not a speed value: {0:?}")]
    BadSpeed(String),
    #[error("unknown command: {0:?} (try add/rm/pause/resume/speed/list/quit)")]
    Unknown(String),
}

pub fn parse(line: &str) -> Result<Command, ParseError> {
    let line = line.trim();
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    match verb {
        "add" => {
            if rest.is_empty() {
                return Err(ParseError::EmptyText);
            }
            if rest.chars().count() > MAX_TEXT_LEN {
                return Err(ParseError::TextTooLong);
            }
            Ok(Command::Add(rest.to_string()))
        }
        "rm" | "remove" => Ok(Command::Remove(parse_id(rest)?)),
        "pause" => Ok(Command::Pause(parse_id(rest)?)),
        "resume" => Ok(Command::Resume(parse_id(rest)?)),
        "speed" => rest
            .parse::<f32>()
            .map(Command::Speed)
            .map_err(|_| ParseError::BadSpeed(rest.to_string())),
        "list" => Ok(Command::List),
        "quit" | "exit" => Ok(Command::Quit),
        other => Err(ParseError::Unknown(other.to_string())),
    }
}

fn parse_id(arg: &str) -> Result<LabelId, ParseError> {
    arg.parse::<u64>()
        .map(LabelId)
        .map_err(|_| ParseError::BadId(arg.to_string()))
}

/// Read stdin lines, parse them, and forward commands until EOF or until
/// the receiving side goes away. Parse failures are logged and skipped.
pub fn read_commands(tx: Sender<Command>) {
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                warn!("stdin read failed: {e}");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }
        match parse(&line) {
            Ok(cmd) => {
                let quit = cmd == Command::Quit;
                if tx.send(cmd).is_err() || quit {
                    break;
                }
            }
            Err(e) => warn!("{e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_add_with_spaces_in_text() {
        assert_eq!(
            parse("add hello there  "),
            Ok(Command::Add("hello there".to_string()))
        );
    }

    #[test]
    fn rejects_empty_and_overlong_text() {
        assert_eq!(parse("add"), Err(ParseError::EmptyText));
        assert_eq!(parse("add    "), Err(ParseError::EmptyText));

        let long = "x".repeat(MAX_TEXT_LEN + 1);
        assert_eq!(parse(&format!("add {long}")), Err(ParseError::TextTooLong));

        let exactly = "x".repeat(MAX_TEXT_LEN);
        assert!(parse(&format!("add {exactly}")).is_ok());
    }

    #[test]
    fn parses_id_commands() {
        assert_eq!(parse("rm 3"), Ok(Command::Remove(LabelId(3))));
        assert_eq!(parse("remove 3"), Ok(Command::Remove(LabelId(3))));
        assert_eq!(parse("pause 0"), Ok(Command::Pause(LabelId(0))));
        assert_eq!(parse("resume 12"), Ok(Command::Resume(LabelId(12))));
        assert_eq!(parse("rm x"), Err(ParseError::BadId("x".to_string())));
        assert_eq!(parse("pause"), Err(ParseError::BadId(String::new())));
    }

    #[test]
    fn parses_speed() {
        assert_eq!(parse("speed 1.5"), Ok(Command::Speed(1.5)));
        assert_eq!(
            parse("speed fast"),
            Err(ParseError::BadSpeed("fast".to_string()))
        );
    }

    #[test]
    fn parses_bare_commands_and_unknown_verbs() {
        assert_eq!(parse("list"), Ok(Command::List));
        assert_eq!(parse("quit"), Ok(Command::Quit));
        assert_eq!(parse("exit"), Ok(Command::Quit));
        assert_eq!(
            parse("frobnicate 1"),
            Err(ParseError::Unknown("frobnicate".to_string()))
        );
    }
}
