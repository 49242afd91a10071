#![deny(warnings)]
//! The Abacus calculator engine.
//!
//! [`CalcState`] is the engine: a single-owner state machine that folds key
//! presses into a running accumulator. [`Calculator`] is the object-safe,
//! shareable face a binding layer talks to, and [`SharedCalculator`] is its
//! lock-guarded implementation over a `CalcState`.

use std::any::Any;
use std::sync::Arc;

pub use abacus_types::{CalcOp, Digit, InputError, KeyCommand, keypad, parse_token};

pub mod engine;
pub mod ieee;
pub mod shared;

pub use engine::{CalcState, Phase};
pub use shared::SharedCalculator;

/// A calculator as seen by a binding or UI layer.
///
/// Every method takes `&self` so one instance can be handed to several
/// callers; implementations are responsible for serializing the calls.
pub trait Calculator: Send + Sync {
    /// Appends a digit to the current entry.
    fn add_digit(&self, digit: Digit);

    /// Removes the most recently entered digit.
    fn backspace(&self);

    /// Commits the pending operator ("=").
    fn apply_op(&self);

    /// Selects an operator.
    fn set_op(&self, op: CalcOp);

    /// The value to display.
    fn get(&self) -> f64;

    /// Switches between integer and fraction entry.
    fn toggle_decimal(&self);

    /// An independent calculator with the same state.
    fn copy(&self) -> Arc<dyn Calculator>;

    /// Structural equality with another calculator. Calculators of different
    /// concrete types are never equal.
    fn eq(&self, rhs: &dyn Calculator) -> bool;

    /// Upcast used by [`Calculator::eq`] to recover the concrete type.
    fn as_any(&self) -> &dyn Any;

    /// Dispatches a key command onto the methods above.
    fn press(&self, command: KeyCommand) {
        match command {
            KeyCommand::Digit(d) => self.add_digit(d),
            KeyCommand::Backspace => self.backspace(),
            KeyCommand::ToggleDecimal => self.toggle_decimal(),
            KeyCommand::SetOp(op) => self.set_op(op),
            KeyCommand::Apply => self.apply_op(),
        }
    }
}

impl dyn Calculator {
    /// Whether the concrete type behind this trait object is `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.as_any().is::<T>()
    }

    /// Borrows the concrete type behind this trait object, if it is `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }
}
