use serde::{Deserialize, Serialize};
use std::fmt;

use crate::InputError;

/// Operator tag held by the calculator while it waits for an operand.
///
/// Operators fall into two classes. Binary operators (`Add` through `Pow`,
/// plus `None`) are deferred: selecting one commits whatever was pending and
/// then waits for the next operand. Immediate operators (`Square` through
/// `Clear`) act on the accumulator the moment they are selected.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalcOp {
    /// No operator pending; committing moves the entry into the accumulator.
    #[default]
    None,
    /// `last + current`
    Add,
    /// `last - current`
    Sub,
    /// `last * current`
    Mul,
    /// `last / current`
    Div,
    /// Floating point remainder of `last / current`
    Mod,
    /// `last` raised to `current`
    Pow,
    /// `last * last`
    Square,
    /// Square root of `last`
    Sqrt,
    /// Reciprocal of `last`
    Inv,
    /// `-last`
    Negate,
    /// Reset the accumulator to zero
    Clear,
}

impl CalcOp {
    /// All operators, in declaration order.
    pub const ALL: [Self; 12] = [
        Self::None,
        Self::Add,
        Self::Sub,
        Self::Mul,
        Self::Div,
        Self::Mod,
        Self::Pow,
        Self::Square,
        Self::Sqrt,
        Self::Inv,
        Self::Negate,
        Self::Clear,
    ];

    /// Whether selecting this operator applies it at once instead of waiting
    /// for another operand.
    #[must_use]
    pub const fn is_immediate(self) -> bool {
        matches!(self, Self::Square | Self::Sqrt | Self::Inv | Self::Negate | Self::Clear)
    }

    /// Whether this operator combines the accumulator with a second operand.
    #[must_use]
    pub const fn is_binary(self) -> bool {
        matches!(self, Self::Add | Self::Sub | Self::Mul | Self::Div | Self::Mod | Self::Pow)
    }

    /// The keypad label for this operator. `None` has no button and renders
    /// as an empty string.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::None => "",
            Self::Add => "+",
            Self::Sub => "−",
            Self::Mul => "×",
            Self::Div => "÷",
            Self::Mod => "%",
            Self::Pow => "yˣ",
            Self::Square => "x²",
            Self::Sqrt => "√x",
            Self::Inv => "¹∕ₓ",
            Self::Negate => "⁺∕₋",
            Self::Clear => "C",
        }
    }
}

impl fmt::Display for CalcOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A single decimal digit, `0..=9`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Digit(u8);

impl Digit {
    /// The digit zero.
    pub const ZERO: Self = Self(0);

    /// Returns the digit for `value`, or `None` if it is above nine.
    #[must_use]
    pub const fn new(value: u8) -> Option<Self> {
        if value <= 9 { Some(Self(value)) } else { None }
    }

    /// Returns the digit for an ASCII character `'0'..='9'`.
    #[must_use]
    pub fn from_char(c: char) -> Option<Self> {
        c.to_digit(10).and_then(|d| u8::try_from(d).ok()).map(Self)
    }

    /// The numeric value of this digit.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Whether this is the digit zero.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl TryFrom<u8> for Digit {
    type Error = InputError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(InputError::InvalidDigit(value))
    }
}

impl From<Digit> for u8 {
    fn from(digit: Digit) -> Self {
        digit.0
    }
}

impl From<Digit> for f64 {
    fn from(digit: Digit) -> Self {
        Self::from(digit.0)
    }
}

impl fmt::Display for Digit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
