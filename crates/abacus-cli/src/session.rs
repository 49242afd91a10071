//! Key sessions: feed tokens into a calculator and render its display.

use serde::Serialize;
use std::io::{BufRead, Write};
use tracing::{debug, warn};

use abacus_calculator::{CalcState, Calculator, KeyCommand, Phase, SharedCalculator, parse_token};

use crate::display::format_value;
use crate::error::SessionError;

/// How each display line is printed.
#[derive(clap::ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Serialize)]
struct Snapshot<'a> {
    display: &'a str,
    #[serde(with = "abacus_calculator::ieee")]
    value: f64,
    phase: Phase,
    state: CalcState,
}

/// A calculator plus the settings used to render it.
#[derive(Debug)]
pub struct Session {
    calc: SharedCalculator,
    precision: Option<usize>,
    format: OutputFormat,
    trace: bool,
}

impl Session {
    pub fn new(precision: Option<usize>, format: OutputFormat, trace: bool) -> Self {
        Self { calc: SharedCalculator::default(), precision, format, trace }
    }

    pub fn calculator(&self) -> &SharedCalculator {
        &self.calc
    }

    /// Parses one token and presses the keys it stands for.
    pub fn press_token(&self, token: &str) -> Result<Vec<KeyCommand>, SessionError> {
        let commands = parse_token(token)?;
        for &command in &commands {
            self.calc.press(command);
        }
        debug!(token, display = self.calc.get(), "token pressed");
        Ok(commands)
    }

    /// The current display in the configured format.
    pub fn render(&self) -> Result<String, SessionError> {
        let value = self.calc.get();
        let display = format_value(value, self.precision);
        match self.format {
            OutputFormat::Text => Ok(display),
            OutputFormat::Json => {
                let state = self.calc.snapshot();
                Ok(serde_json::to_string(&Snapshot {
                    display: &display,
                    value,
                    phase: state.phase(),
                    state,
                })?)
            }
        }
    }

    /// Presses every token in order, then prints the display. In trace mode
    /// the display is printed after each token instead.
    ///
    /// Stops at the first unknown token; keys pressed before it stay applied.
    pub fn run_tokens<'a, I, W>(&self, tokens: I, out: &mut W) -> Result<(), SessionError>
    where
        I: IntoIterator<Item = &'a str>,
        W: Write,
    {
        for token in tokens {
            self.press_token(token)?;
            if self.trace {
                writeln!(out, "{token}\t{}", self.render()?)?;
            }
        }
        if !self.trace {
            writeln!(out, "{}", self.render()?)?;
        }
        Ok(())
    }

    /// Runs whitespace-separated tokens line by line until end of input.
    ///
    /// A line with an unknown token is reported on `err` and the session
    /// continues. Returns how many lines were rejected.
    pub fn run_lines<R, W, E>(&self, input: R, out: &mut W, err: &mut E) -> Result<usize, SessionError>
    where
        R: BufRead,
        W: Write,
        E: Write,
    {
        let mut rejected = 0;
        for line in input.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match self.run_tokens(line.split_whitespace(), out) {
                Ok(()) => {}
                Err(SessionError::Input(e)) => {
                    warn!(error = %e, category = "input", "rejected input line");
                    writeln!(err, "error: {e}")?;
                    rejected += 1;
                }
                Err(e) => return Err(e),
            }
        }
        Ok(rejected)
    }
}
