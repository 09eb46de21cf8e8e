use thiserror::Error;

use drill_core::model::{AnswerDraft, AnswerError, CarryPlace, Digit, DigitError};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("type an answer like 72, optionally followed by h=1 t=0")]
    Empty,
    #[error("only one answer per line, got {first:?} and {second:?}")]
    TwoAnswers { first: String, second: String },
    #[error("unknown carry column {0:?}; use h= or t=")]
    UnknownCarry(String),
    #[error("carry {0:?} must be a single digit")]
    CarryValue(String),
    #[error(transparent)]
    Answer(#[from] AnswerError),
    #[error(transparent)]
    Digit(#[from] DigitError),
}

/// One line typed at a problem prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Answer(AnswerDraft),
    Back,
    Next,
    Quit,
}

/// Parses `72`, `125 h=1 t=1`, `b`/`back`, `n`/`next` or `q`/`quit`.
pub fn parse_command(line: &str) -> Result<Command, InputError> {
    match line.trim().to_ascii_lowercase().as_str() {
        "" => return Err(InputError::Empty),
        "b" | "back" => return Ok(Command::Back),
        "n" | "next" => return Ok(Command::Next),
        "q" | "quit" => return Ok(Command::Quit),
        _ => {}
    }

    let mut answer: Option<&str> = None;
    let mut carries = Vec::new();
    for token in line.split_whitespace() {
        if let Some((column, value)) = token.split_once('=') {
            carries.push((parse_carry_place(column)?, parse_carry_digit(value)?));
            continue;
        }
        if let Some(first) = answer {
            return Err(InputError::TwoAnswers {
                first: first.to_string(),
                second: token.to_string(),
            });
        }
        answer = Some(token);
    }

    let mut draft = AnswerDraft::parse_answer(answer.unwrap_or_default())?;
    for (place, digit) in carries {
        draft.set_carry(place, Some(digit));
    }
    Ok(Command::Answer(draft))
}

fn parse_carry_place(column: &str) -> Result<CarryPlace, InputError> {
    match column.to_ascii_lowercase().as_str() {
        "h" | "hundreds" => Ok(CarryPlace::Hundreds),
        "t" | "tens" => Ok(CarryPlace::Tens),
        _ => Err(InputError::UnknownCarry(column.to_string())),
    }
}

fn parse_carry_digit(value: &str) -> Result<Digit, InputError> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => Ok(Digit::from_char(ch)?),
        _ => Err(InputError::CarryValue(value.to_string())),
    }
}

/// Whether a line on the closing screen asks for another drill.
pub fn wants_restart(line: &str) -> bool {
    matches!(
        line.trim().to_ascii_lowercase().as_str(),
        "r" | "restart" | "again"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use drill_core::model::{CarryDigits, Place};

    fn d(v: u8) -> Digit {
        Digit::new(v).unwrap()
    }

    #[test]
    fn navigation_words() {
        assert_eq!(parse_command(" B "), Ok(Command::Back));
        assert_eq!(parse_command("next"), Ok(Command::Next));
        assert_eq!(parse_command("q"), Ok(Command::Quit));
    }

    #[test]
    fn answer_with_carries() {
        let Ok(Command::Answer(draft)) = parse_command("125 h=1 t=1") else {
            panic!("expected an answer");
        };
        assert_eq!(draft.compose(), 125);
        assert_eq!(
            draft.carry(),
            CarryDigits {
                hundreds: Some(d(1)),
                tens: Some(d(1)),
            }
        );
    }

    #[test]
    fn answer_keeps_empty_columns() {
        let Ok(Command::Answer(draft)) = parse_command("7") else {
            panic!("expected an answer");
        };
        assert_eq!(draft.get(Place::Tens), None);
        assert_eq!(draft.get(Place::Ones), Some(d(7)));
    }

    #[test]
    fn rejects_bad_lines() {
        assert_eq!(parse_command("   "), Err(InputError::Empty));
        assert_eq!(
            parse_command("72 h=12"),
            Err(InputError::CarryValue("12".to_string()))
        );
        assert_eq!(
            parse_command("72 o=1"),
            Err(InputError::UnknownCarry("o".to_string()))
        );
        assert!(matches!(
            parse_command("72 27"),
            Err(InputError::TwoAnswers { .. })
        ));
        assert_eq!(
            parse_command("h=1"),
            Err(InputError::Answer(AnswerError::Empty))
        );
    }

    #[test]
    fn restart_words() {
        assert!(wants_restart("R"));
        assert!(!wants_restart(""));
    }
}
