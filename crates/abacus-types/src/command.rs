use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::keypad;
use crate::{CalcOp, Digit, InputError};

/// A discrete command a keypad or command line issues to the calculator.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyCommand {
    /// Append a digit to the entry.
    Digit(Digit),
    /// Remove the most recently entered digit.
    Backspace,
    /// Switch between integer and fraction entry.
    ToggleDecimal,
    /// Select an operator.
    SetOp(CalcOp),
    /// Commit the pending operator ("=").
    Apply,
}

impl FromStr for KeyCommand {
    type Err = InputError;

    /// Parses a keypad label (`7`, `×`, `←`, `x²`, ...) or an ASCII alias
    /// (`mul`, `*`, `back`, `sqrt`, ...). Aliases are case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        if let Some(button) = keypad::button_for(key) {
            return Ok(button.command);
        }

        let mut chars = key.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            if let Some(digit) = Digit::from_char(c) {
                return Ok(Self::Digit(digit));
            }
        }

        let command = match key.to_ascii_lowercase().as_str() {
            "add" | "plus" | "+" => Self::SetOp(CalcOp::Add),
            "sub" | "minus" | "-" => Self::SetOp(CalcOp::Sub),
            "mul" | "times" | "*" | "x" => Self::SetOp(CalcOp::Mul),
            "div" | "/" => Self::SetOp(CalcOp::Div),
            "mod" | "%" => Self::SetOp(CalcOp::Mod),
            "pow" | "^" => Self::SetOp(CalcOp::Pow),
            "sq" | "square" | "x^2" => Self::SetOp(CalcOp::Square),
            "sqrt" | "root" => Self::SetOp(CalcOp::Sqrt),
            "inv" | "recip" | "1/x" => Self::SetOp(CalcOp::Inv),
            "neg" | "negate" | "+/-" => Self::SetOp(CalcOp::Negate),
            "c" | "clear" => Self::SetOp(CalcOp::Clear),
            "back" | "bs" | "backspace" | "<-" => Self::Backspace,
            "dot" | "." | "," => Self::ToggleDecimal,
            "eq" | "equals" | "=" => Self::Apply,
            _ => return Err(InputError::UnknownKey(key.to_string())),
        };
        Ok(command)
    }
}

impl fmt::Display for KeyCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Digit(d) => write!(f, "{d}"),
            Self::Backspace => f.write_str("←"),
            Self::ToggleDecimal => f.write_str("."),
            Self::SetOp(op) => write!(f, "{op}"),
            Self::Apply => f.write_str("="),
        }
    }
}

/// Parses one whitespace-free token into the key presses it stands for.
///
/// A token made only of digits and decimal points (`12.5`) expands into one
/// press per character; anything else must name a single key.
///
/// # Errors
///
/// Returns [`InputError::UnknownKey`] when the token is neither a number nor
/// a known key.
pub fn parse_token(token: &str) -> Result<Vec<KeyCommand>, InputError> {
    let token = token.trim();
    let is_number = token.len() > 1
        && token.chars().any(|c| c.is_ascii_digit())
        && token.chars().all(|c| c.is_ascii_digit() || c == '.');

    if is_number {
        Ok(token
            .chars()
            .map(|c| Digit::from_char(c).map_or(KeyCommand::ToggleDecimal, KeyCommand::Digit))
            .collect())
    } else {
        token.parse().map(|command| vec![command])
    }
}
