//! The fixed calculator keypad.
//!
//! Twenty-four buttons laid out four to a row underneath a display row. The
//! table is pure data: a front end renders it and forwards each press as the
//! button's [`KeyCommand`].

use serde::Serialize;

use crate::{CalcOp, Digit, KeyCommand};

/// Buttons per keypad row.
pub const ROW_COUNT: usize = 4;

/// Rows occupied by the display above the buttons.
pub const DISPLAY_ROWS: usize = 1;

/// Visual grouping of a button; front ends colour buttons by kind.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonKind {
    /// The clear button.
    Clear,
    /// Operators, backspace and the decimal point.
    Operator,
    /// Digit buttons.
    Number,
    /// The equals button.
    Equals,
}

/// One keypad button.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct Button {
    /// Text printed on the button.
    pub label: &'static str,
    /// Command issued when the button is pressed.
    pub command: KeyCommand,
    /// Visual grouping.
    pub kind: ButtonKind,
}

impl Button {
    const fn op(label: &'static str, op: CalcOp) -> Self {
        Self { label, command: KeyCommand::SetOp(op), kind: ButtonKind::Operator }
    }

    const fn num(label: &'static str, value: u8) -> Self {
        // Only ever called with literals 0..=9 below.
        let digit = match Digit::new(value) {
            Some(d) => d,
            None => Digit::ZERO,
        };
        Self { label, command: KeyCommand::Digit(digit), kind: ButtonKind::Number }
    }

    /// Grid cell `(column, row)` of the button at `index` in [`BUTTONS`].
    /// Row 0 is the display.
    #[must_use]
    pub const fn grid_position(index: usize) -> (usize, usize) {
        (index % ROW_COUNT, index / ROW_COUNT + DISPLAY_ROWS)
    }
}

/// The keypad, in row-major order.
pub const BUTTONS: [Button; 24] = [
    Button { label: "C", command: KeyCommand::SetOp(CalcOp::Clear), kind: ButtonKind::Clear },
    Button::op("x²", CalcOp::Square),
    Button::op("√x", CalcOp::Sqrt),
    Button { label: "←", command: KeyCommand::Backspace, kind: ButtonKind::Operator },
    Button::op("yˣ", CalcOp::Pow),
    Button::op("¹∕ₓ", CalcOp::Inv),
    Button::op("%", CalcOp::Mod),
    Button::op("÷", CalcOp::Div),
    Button::num("7", 7),
    Button::num("8", 8),
    Button::num("9", 9),
    Button::op("×", CalcOp::Mul),
    Button::num("4", 4),
    Button::num("5", 5),
    Button::num("6", 6),
    Button::op("−", CalcOp::Sub),
    Button::num("1", 1),
    Button::num("2", 2),
    Button::num("3", 3),
    Button::op("+", CalcOp::Add),
    Button::op("⁺∕₋", CalcOp::Negate),
    Button::num("0", 0),
    Button { label: ".", command: KeyCommand::ToggleDecimal, kind: ButtonKind::Operator },
    Button { label: "=", command: KeyCommand::Apply, kind: ButtonKind::Equals },
];

/// Total grid rows, display included.
pub const GRID_ROWS: usize = BUTTONS.len() / ROW_COUNT + DISPLAY_ROWS;

/// Looks up a button by its exact label.
#[must_use]
pub fn button_for(label: &str) -> Option<&'static Button> {
    BUTTONS.iter().find(|b| b.label == label)
}
