//! Command line front end for the Abacus calculator.
//!
//! Loads configuration, sets up logging and drives a
//! [`SharedCalculator`](abacus_calculator::SharedCalculator) from key tokens
//! given as arguments or read from stdin.

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod session;
pub mod tracing_setup;

pub use cli::{Cli, Command};
pub use config::{AbacusConfig, ConfigSource};
pub use error::{ConfigError, SessionError};
pub use session::{OutputFormat, Session};
