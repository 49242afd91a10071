//! Lock-guarded calculator for callers that share one instance.

use std::any::Any;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::warn;

use crate::{CalcOp, CalcState, Calculator, Digit};

/// A [`CalcState`] behind an `RwLock`, usable through `&self` from any
/// thread. Each command takes the write lock once.
#[derive(Debug, Default)]
pub struct SharedCalculator(RwLock<CalcState>);

impl SharedCalculator {
    pub fn new(state: CalcState) -> Self {
        Self(RwLock::new(state))
    }

    /// A cloned copy of the current state.
    pub fn snapshot(&self) -> CalcState {
        self.read().clone()
    }

    pub fn into_arc(self) -> Arc<dyn Calculator> {
        Arc::new(self)
    }

    // Every engine operation leaves the state consistent, so a panic on
    // another thread never invalidates it.
    fn read(&self) -> RwLockReadGuard<'_, CalcState> {
        self.0.read().unwrap_or_else(|poisoned| {
            warn!("recovering poisoned calculator lock");
            PoisonError::into_inner(poisoned)
        })
    }

    fn write(&self) -> RwLockWriteGuard<'_, CalcState> {
        self.0.write().unwrap_or_else(|poisoned| {
            warn!("recovering poisoned calculator lock");
            PoisonError::into_inner(poisoned)
        })
    }
}

impl From<CalcState> for SharedCalculator {
    fn from(state: CalcState) -> Self {
        Self::new(state)
    }
}

impl Calculator for SharedCalculator {
    fn add_digit(&self, digit: Digit) {
        self.write().add_digit(digit);
    }

    fn backspace(&self) {
        self.write().backspace();
    }

    fn apply_op(&self) {
        self.write().apply_op();
    }

    fn set_op(&self, op: CalcOp) {
        self.write().set_op(op);
    }

    fn get(&self) -> f64 {
        self.read().get()
    }

    fn toggle_decimal(&self) {
        self.write().toggle_decimal();
    }

    fn copy(&self) -> Arc<dyn Calculator> {
        Arc::new(Self::new(self.snapshot()))
    }

    fn eq(&self, rhs: &dyn Calculator) -> bool {
        let Some(rhs) = rhs.as_any().downcast_ref::<Self>() else {
            return false;
        };
        if std::ptr::eq(self, rhs) {
            // Same lock; a second read guard could deadlock behind a writer.
            let state = self.read();
            return *state == *state;
        }
        *self.read() == *rhs.read()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
