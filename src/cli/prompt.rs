//! Interactive prompts for board settings.

use super::CliError;
use delve::GameConfig;
use delve::config::{DEFAULT_BOMBS, DEFAULT_HEIGHT, DEFAULT_WIDTH, MANDATORY_CELLS};
use std::fmt::Display;
use std::io::{BufRead, Write};
use std::str::FromStr;

/// Ask for a number until the answer parses and is at least `min`.
///
/// An empty line or end of input takes `default`.
pub(super) fn ask_number<T, R, W>(
    input: &mut R,
    output: &mut W,
    label: &str,
    default: T,
    min: T,
) -> Result<T, CliError>
where
    T: FromStr + PartialOrd + Display + Copy,
    R: BufRead,
    W: Write,
{
    loop {
        write!(output, "{label} [{default}]: ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(output)?;
            return Ok(default);
        }

        let answer = line.trim();
        if answer.is_empty() {
            return Ok(default);
        }
        match answer.parse::<T>() {
            Ok(value) if value >= min => return Ok(value),
            _ => writeln!(output, "Please enter a whole number of at least {min}.")?,
        }
    }
}

/// Fill in whatever the command line left out.
///
/// With `assume_defaults` nothing is asked and the defaults are used. The
/// default bomb count shrinks to what the chosen grid can hold, and a typed
/// count that does not fit is asked for again.
pub(super) fn resolve_config<R: BufRead, W: Write>(
    width: Option<u16>,
    height: Option<u16>,
    bombs: Option<u32>,
    assume_defaults: bool,
    input: &mut R,
    output: &mut W,
) -> Result<GameConfig, CliError> {
    let mut ask_u16 = |value: Option<u16>, label: &str, default: u16| match value {
        Some(v) => Ok(v),
        None if assume_defaults => Ok(default),
        None => ask_number(input, output, label, default, 1),
    };
    let width = ask_u16(width, "Board width", DEFAULT_WIDTH)?;
    let height = ask_u16(height, "Board height", DEFAULT_HEIGHT)?;

    let area = GameConfig::new(width, height, 0).area();
    let max_bombs = u32::try_from(area.saturating_sub(MANDATORY_CELLS)).unwrap_or(u32::MAX);
    let default_bombs = DEFAULT_BOMBS.min(max_bombs);

    let bombs = match bombs {
        Some(b) => b,
        None if assume_defaults => default_bombs,
        None => loop {
            let b = ask_number(input, output, "Number of bombs", default_bombs, 0)?;
            if b <= max_bombs {
                break b;
            }
            writeln!(output, "At most {max_bombs} bombs fit on a {width}x{height} board.")?;
        },
    };

    Ok(GameConfig::new(width, height, bombs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn ask(script: &str, default: u16) -> (u16, String) {
        let mut input = Cursor::new(script.as_bytes());
        let mut output = Vec::new();
        let value = ask_number(&mut input, &mut output, "Width", default, 1).unwrap();
        (value, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_empty_line_takes_default() {
        let (value, shown) = ask("\n", 12);
        assert_eq!(value, 12);
        assert_eq!(shown, "Width [12]: ");
    }

    #[test]
    fn test_end_of_input_takes_default() {
        assert_eq!(ask("", 7).0, 7);
    }

    #[test]
    fn test_invalid_input_reprompts() {
        let (value, shown) = ask("abc\n0\n-3\n 9 \n", 12);
        assert_eq!(value, 9);
        assert_eq!(shown.matches("Width [12]: ").count(), 4);
        assert_eq!(shown.matches("Please enter").count(), 3);
    }

    #[test]
    fn test_resolve_config_only_asks_for_missing() {
        let mut input = Cursor::new("5\n\n".as_bytes());
        let mut output = Vec::new();
        let config = resolve_config(Some(3), None, None, false, &mut input, &mut output).unwrap();
        assert_eq!(config, GameConfig::new(3, 5, DEFAULT_BOMBS));

        let shown = String::from_utf8(output).unwrap();
        assert!(!shown.contains("Board width"));
        assert!(shown.contains("Board height"));
        assert!(shown.contains("Number of bombs"));
    }

    #[test]
    fn test_resolve_config_zero_bombs_allowed() {
        let mut input = Cursor::new("1\n2\n0\n".as_bytes());
        let mut output = Vec::new();
        let config = resolve_config(None, None, None, false, &mut input, &mut output).unwrap();
        assert_eq!(config, GameConfig::new(1, 2, 0));
    }

    #[test]
    fn test_resolve_config_assume_defaults() {
        let mut input = Cursor::new("".as_bytes());
        let mut output = Vec::new();
        let config = resolve_config(None, None, Some(3), true, &mut input, &mut output).unwrap();
        assert_eq!(config, GameConfig::new(DEFAULT_WIDTH, DEFAULT_HEIGHT, 3));
        assert!(output.is_empty());
    }

    #[test]
    fn test_resolve_config_caps_default_bombs_to_board() {
        let mut input = Cursor::new("3\n3\n\n".as_bytes());
        let mut output = Vec::new();
        let config = resolve_config(None, None, None, false, &mut input, &mut output).unwrap();
        assert_eq!(config, GameConfig::new(3, 3, 7));
        assert!(config.validate().is_ok());
        assert!(String::from_utf8(output).unwrap().contains("Number of bombs [7]: "));

        let mut input = Cursor::new("".as_bytes());
        let mut output = Vec::new();
        let config = resolve_config(Some(3), Some(3), None, true, &mut input, &mut output).unwrap();
        assert_eq!(config, GameConfig::new(3, 3, 7));
    }

    #[test]
    fn test_resolve_config_reprompts_when_bombs_do_not_fit() {
        let mut input = Cursor::new("20\n4\n".as_bytes());
        let mut output = Vec::new();
        let config =
            resolve_config(Some(3), Some(3), None, false, &mut input, &mut output).unwrap();
        assert_eq!(config, GameConfig::new(3, 3, 4));

        let shown = String::from_utf8(output).unwrap();
        assert_eq!(shown.matches("Number of bombs [7]: ").count(), 2);
        assert!(shown.contains("At most 7 bombs fit on a 3x3 board."));
    }
}
