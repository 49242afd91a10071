//! Calculator engine state machine.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace};

use abacus_types::{CalcOp, Digit, KeyCommand};

/// Where the engine is in its entry cycle.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// No entry in progress and nothing pending.
    Idle,
    /// Digits are being entered.
    Entering,
    /// An operator is waiting for its operand.
    OperatorPending,
}

/// Calculator engine.
///
/// Digits accumulate into `current`; selecting an operator folds `current`
/// into the accumulator `last`. The state is plain data: it performs no
/// locking and is owned by one caller at a time. `Clone` gives an
/// independent copy and `PartialEq` compares every field exactly.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CalcState {
    #[serde(with = "crate::ieee")]
    last: f64,
    #[serde(with = "crate::ieee::option")]
    current: Option<f64>,
    integer_digits: Vec<Digit>,
    fraction_digits: Vec<Digit>,
    decimal_mode: bool,
    pending_op: CalcOp,
}

impl CalcState {
    pub fn new() -> Self {
        Self::default()
    }

    /// A fresh engine whose accumulator starts at `last`.
    pub fn with_accumulator(last: f64) -> Self {
        Self { last, ..Self::default() }
    }

    /// The value to display: the entry in progress, else the accumulator.
    pub fn get(&self) -> f64 {
        self.current.unwrap_or(self.last)
    }

    pub fn last(&self) -> f64 {
        self.last
    }

    pub fn current(&self) -> Option<f64> {
        self.current
    }

    pub fn integer_digits(&self) -> &[Digit] {
        &self.integer_digits
    }

    pub fn fraction_digits(&self) -> &[Digit] {
        &self.fraction_digits
    }

    pub fn decimal_mode(&self) -> bool {
        self.decimal_mode
    }

    pub fn pending_op(&self) -> CalcOp {
        self.pending_op
    }

    pub fn phase(&self) -> Phase {
        match (self.current, self.pending_op) {
            (Some(_), _) => Phase::Entering,
            (None, CalcOp::None) => Phase::Idle,
            (None, _) => Phase::OperatorPending,
        }
    }

    /// Appends a digit to the integer or fraction part, depending on
    /// decimal mode. A zero typed into an empty integer part is dropped.
    pub fn add_digit(&mut self, digit: Digit) {
        if digit.is_zero() && self.integer_digits.is_empty() && !self.decimal_mode {
            trace!("dropping leading zero");
            return;
        }
        if self.decimal_mode {
            self.fraction_digits.push(digit);
        } else {
            self.integer_digits.push(digit);
        }
        self.update_current();
        trace!(%digit, current = ?self.current, "digit entered");
    }

    /// Removes the last digit of the part selected by decimal mode. Does
    /// nothing when that part is already empty.
    pub fn backspace(&mut self) {
        let removed = if self.decimal_mode {
            self.fraction_digits.pop()
        } else {
            self.integer_digits.pop()
        };
        if removed.is_some() {
            self.update_current();
        }
        trace!(?removed, current = ?self.current, "backspace");
    }

    pub fn toggle_decimal(&mut self) {
        self.decimal_mode = !self.decimal_mode;
        trace!(decimal_mode = self.decimal_mode, "decimal mode toggled");
    }

    /// Selects an operator. Immediate operators are applied on the spot;
    /// binary ones first commit whatever was pending and then wait for an
    /// operand.
    #[instrument(level = "debug", skip(self), fields(pending = ?self.pending_op))]
    pub fn set_op(&mut self, op: CalcOp) {
        if op.is_immediate() {
            self.pending_op = op;
            self.apply_op();
        } else {
            self.apply_op();
            self.pending_op = op;
        }
    }

    /// Commits the pending operator against the accumulator and resets the
    /// entry. `pending_op` is `None` afterwards.
    pub fn apply_op(&mut self) {
        let op = self.pending_op;
        if let Some(cur) = self.current {
            self.last = match op {
                CalcOp::Add => self.last + cur,
                CalcOp::Sub => self.last - cur,
                CalcOp::Mul => self.last * cur,
                CalcOp::Div => self.last / cur,
                CalcOp::Mod => self.last % cur,
                CalcOp::Pow => self.last.powf(cur),
                // The entry becomes the accumulator, and the operand of an
                // immediate operator.
                CalcOp::None
                | CalcOp::Square
                | CalcOp::Sqrt
                | CalcOp::Inv
                | CalcOp::Negate
                | CalcOp::Clear => cur,
            };
        }
        self.last = match op {
            CalcOp::Square => self.last * self.last,
            CalcOp::Sqrt => self.last.sqrt(),
            CalcOp::Inv => self.last.recip(),
            CalcOp::Negate => -self.last,
            CalcOp::Clear => 0.0,
            _ => self.last,
        };

        self.current = None;
        self.pending_op = CalcOp::None;
        self.decimal_mode = false;
        self.integer_digits.clear();
        self.fraction_digits.clear();
        debug!(?op, last = self.last, "operator committed");
    }

    /// Dispatches a key command.
    pub fn apply(&mut self, command: KeyCommand) {
        match command {
            KeyCommand::Digit(d) => self.add_digit(d),
            KeyCommand::Backspace => self.backspace(),
            KeyCommand::ToggleDecimal => self.toggle_decimal(),
            KeyCommand::SetOp(op) => self.set_op(op),
            KeyCommand::Apply => self.apply_op(),
        }
    }

    // Positional fold: the last integer digit is the ones place, the first
    // fraction digit is the tenths place.
    fn update_current(&mut self) {
        let integer = self
            .integer_digits
            .iter()
            .fold(0.0, |acc, &d| acc * 10.0 + f64::from(d));
        let mut weight = 0.1;
        let mut fraction = 0.0;
        for &d in &self.fraction_digits {
            fraction += f64::from(d) * weight;
            weight /= 10.0;
        }
        self.current = Some(integer + fraction);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(value: u8) -> Digit {
        Digit::new(value).unwrap()
    }

    fn enter(calc: &mut CalcState, digits: &[u8]) {
        for &v in digits {
            calc.add_digit(d(v));
        }
    }

    #[test]
    fn test_fresh_state_is_idle_at_zero() {
        let calc = CalcState::new();
        assert_eq!(calc.get(), 0.0);
        assert_eq!(calc.current(), None);
        assert_eq!(calc.pending_op(), CalcOp::None);
        assert_eq!(calc.phase(), Phase::Idle);
    }

    #[test]
    fn test_integer_entry() {
        let mut calc = CalcState::new();
        enter(&mut calc, &[1, 2, 3]);
        assert_eq!(calc.get(), 123.0);
        assert_eq!(calc.phase(), Phase::Entering);
    }

    #[test]
    fn test_fraction_entry() {
        let mut calc = CalcState::new();
        calc.add_digit(d(5));
        calc.toggle_decimal();
        enter(&mut calc, &[2, 5]);
        assert_eq!(calc.get(), 5.25);
        assert_eq!(calc.integer_digits(), &[d(5)]);
        assert_eq!(calc.fraction_digits(), &[d(2), d(5)]);
    }

    #[test]
    fn test_leading_zero_is_dropped() {
        let mut calc = CalcState::new();
        calc.add_digit(d(0));
        assert_eq!(calc.current(), None);
        assert!(calc.integer_digits().is_empty());

        enter(&mut calc, &[7, 0, 0]);
        assert_eq!(calc.get(), 700.0);
    }

    #[test]
    fn test_zero_allowed_after_decimal_point() {
        let mut calc = CalcState::new();
        calc.toggle_decimal();
        enter(&mut calc, &[0, 5]);
        assert_eq!(calc.get(), 0.05);
    }

    #[test]
    fn test_toggle_back_keeps_both_parts() {
        let mut calc = CalcState::new();
        calc.add_digit(d(1));
        calc.toggle_decimal();
        calc.add_digit(d(5));
        calc.toggle_decimal();
        calc.add_digit(d(2));
        assert_eq!(calc.get(), 12.5);
        assert!(!calc.decimal_mode());
    }

    #[test]
    fn test_backspace_removes_from_active_part() {
        let mut calc = CalcState::new();
        enter(&mut calc, &[4, 2]);
        calc.toggle_decimal();
        enter(&mut calc, &[7]);
        calc.backspace();
        assert_eq!(calc.get(), 42.0);
        calc.toggle_decimal();
        calc.backspace();
        assert_eq!(calc.get(), 4.0);
    }

    #[test]
    fn test_backspace_on_empty_part_is_noop() {
        let mut calc = CalcState::with_accumulator(9.0);
        calc.backspace();
        assert_eq!(calc, CalcState::with_accumulator(9.0));
        assert_eq!(calc.get(), 9.0);

        calc.toggle_decimal();
        calc.backspace();
        assert_eq!(calc.current(), None);
    }

    #[test]
    fn test_backspace_last_digit_leaves_zero_entry() {
        let mut calc = CalcState::with_accumulator(9.0);
        calc.add_digit(d(3));
        calc.backspace();
        assert_eq!(calc.current(), Some(0.0));
        assert_eq!(calc.get(), 0.0);
    }

    #[test]
    fn test_add_round_trip() {
        let mut calc = CalcState::with_accumulator(10.0);
        calc.set_op(CalcOp::Add);
        assert_eq!(calc.phase(), Phase::OperatorPending);
        enter(&mut calc, &[3, 2]);
        calc.apply_op();
        assert_eq!(calc.get(), 42.0);
        assert_eq!(calc.phase(), Phase::Idle);
    }

    #[test]
    fn test_entry_without_operator_becomes_accumulator() {
        let mut calc = CalcState::with_accumulator(99.0);
        enter(&mut calc, &[6]);
        calc.set_op(CalcOp::Mul);
        assert_eq!(calc.last(), 6.0);
        enter(&mut calc, &[7]);
        calc.apply_op();
        assert_eq!(calc.get(), 42.0);
    }

    #[test]
    fn test_chained_operators_commit_left_to_right() {
        let mut calc = CalcState::with_accumulator(2.0);
        calc.set_op(CalcOp::Add);
        enter(&mut calc, &[3]);
        calc.set_op(CalcOp::Mul);
        assert_eq!(calc.get(), 5.0);
        enter(&mut calc, &[4]);
        calc.apply_op();
        assert_eq!(calc.get(), 20.0);
    }

    #[test]
    fn test_binary_operators() {
        let cases = [
            (CalcOp::Sub, 10.0, 4, 6.0),
            (CalcOp::Mul, 10.0, 4, 40.0),
            (CalcOp::Div, 10.0, 4, 2.5),
            (CalcOp::Mod, 10.0, 4, 2.0),
            (CalcOp::Pow, 10.0, 4, 10_000.0),
        ];
        for (op, last, operand, expected) in cases {
            let mut calc = CalcState::with_accumulator(last);
            calc.set_op(op);
            calc.add_digit(d(operand));
            calc.apply_op();
            assert_eq!(calc.get(), expected, "{op:?}");
        }
    }

    #[test]
    fn test_switching_operator_without_operand_replaces_it() {
        let mut calc = CalcState::with_accumulator(8.0);
        calc.set_op(CalcOp::Add);
        calc.set_op(CalcOp::Sub);
        assert_eq!(calc.last(), 8.0);
        assert_eq!(calc.pending_op(), CalcOp::Sub);
        calc.add_digit(d(3));
        calc.apply_op();
        assert_eq!(calc.get(), 5.0);
    }

    #[test]
    fn test_square_applies_immediately() {
        let mut calc = CalcState::with_accumulator(4.0);
        calc.set_op(CalcOp::Square);
        assert_eq!(calc.get(), 16.0);
        assert_eq!(calc.phase(), Phase::Idle);
    }

    #[test]
    fn test_immediate_operator_uses_entry() {
        let mut calc = CalcState::new();
        enter(&mut calc, &[9]);
        calc.set_op(CalcOp::Sqrt);
        assert_eq!(calc.get(), 3.0);

        calc.set_op(CalcOp::Negate);
        assert_eq!(calc.get(), -3.0);
    }

    #[test]
    fn test_immediate_operator_discards_pending_binary() {
        let mut calc = CalcState::with_accumulator(4.0);
        calc.set_op(CalcOp::Add);
        calc.set_op(CalcOp::Inv);
        assert_eq!(calc.get(), 0.25);
        assert_eq!(calc.pending_op(), CalcOp::None);
    }

    #[test]
    fn test_clear_resets_accumulator() {
        let mut calc = CalcState::with_accumulator(12.0);
        calc.set_op(CalcOp::Add);
        enter(&mut calc, &[3]);
        calc.toggle_decimal();
        calc.set_op(CalcOp::Clear);
        assert_eq!(calc, CalcState::new());
        assert_eq!(calc.get(), 0.0);
    }

    #[test]
    fn test_commit_resets_entry_state() {
        let mut calc = CalcState::new();
        enter(&mut calc, &[1]);
        calc.toggle_decimal();
        enter(&mut calc, &[5]);
        calc.set_op(CalcOp::Add);
        assert!(!calc.decimal_mode());
        assert!(calc.integer_digits().is_empty());
        assert!(calc.fraction_digits().is_empty());
        assert_eq!(calc.current(), None);
        assert_eq!(calc.get(), 1.5);
    }

    #[test]
    fn test_bare_zero_divisor_is_dropped() {
        let mut calc = CalcState::with_accumulator(5.0);
        calc.set_op(CalcOp::Div);
        calc.add_digit(Digit::ZERO);
        assert_eq!(calc.current(), None);
        assert_eq!(calc.phase(), Phase::OperatorPending);
        calc.apply_op();
        assert_eq!(calc.get(), 5.0);
        assert_eq!(calc.current(), None);
    }

    #[test]
    fn test_ieee_special_values() {
        let mut calc = CalcState::with_accumulator(5.0);
        calc.set_op(CalcOp::Div);
        calc.toggle_decimal();
        calc.add_digit(d(0));
        calc.apply_op();
        assert_eq!(calc.get(), f64::INFINITY);

        let mut calc = CalcState::with_accumulator(-4.0);
        calc.set_op(CalcOp::Sqrt);
        assert!(calc.get().is_nan());

        let mut calc = CalcState::new();
        calc.set_op(CalcOp::Inv);
        assert_eq!(calc.get(), f64::INFINITY);
    }

    #[test]
    fn test_apply_dispatches_key_commands() {
        let mut calc = CalcState::new();
        for command in [
            KeyCommand::Digit(d(1)),
            KeyCommand::Digit(d(2)),
            KeyCommand::Backspace,
            KeyCommand::Digit(d(5)),
            KeyCommand::SetOp(CalcOp::Mul),
            KeyCommand::Digit(d(2)),
            KeyCommand::Apply,
        ] {
            calc.apply(command);
        }
        assert_eq!(calc.get(), 30.0);
    }

    fn divide_five_by(zero_entry: impl Fn(&mut CalcState)) -> CalcState {
        let mut calc = CalcState::with_accumulator(5.0);
        calc.set_op(CalcOp::Div);
        zero_entry(&mut calc);
        calc
    }

    #[test]
    fn test_snapshot_keeps_infinity() {
        let mut calc = divide_five_by(|c| {
            c.toggle_decimal();
            c.add_digit(Digit::ZERO);
        });
        let pending = serde_json::to_string(&calc).unwrap();
        let back: CalcState = serde_json::from_str(&pending).unwrap();
        assert_eq!(back, calc);

        calc.apply_op();
        let json = serde_json::to_value(&calc).unwrap();
        assert_eq!(json["last"], "inf");
        assert_eq!(json["current"], serde_json::Value::Null);
        let back: CalcState = serde_json::from_value(json).unwrap();
        assert_eq!(back, calc);
        assert_eq!(back.get(), f64::INFINITY);
    }

    #[test]
    fn test_snapshot_keeps_nan() {
        let mut calc = CalcState::with_accumulator(-1.0);
        calc.set_op(CalcOp::Sqrt);
        enter(&mut calc, &[2]);
        let json = serde_json::to_string(&calc).unwrap();
        assert!(json.contains(r#""last":"NaN""#), "{json}");

        let back: CalcState = serde_json::from_str(&json).unwrap();
        assert!(back.last().is_nan());
        assert_eq!(back.current(), Some(2.0));
        assert_eq!(back.phase(), Phase::Entering);
    }
}
