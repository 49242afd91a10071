//! Abacus Types
//!
//! This crate defines the value types shared by the Abacus workspace
//! (currently `abacus-calculator` and `abacus-cli`): the operator tag, the
//! validated decimal digit, the key commands a keypad or command line can
//! issue, and the fixed keypad layout that maps button labels to commands.

#![deny(warnings)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
#![deny(missing_docs)]

mod command;
mod error;
pub mod keypad;
mod types;

pub use command::{KeyCommand, parse_token};
pub use error::InputError;
pub use types::{CalcOp, Digit};
