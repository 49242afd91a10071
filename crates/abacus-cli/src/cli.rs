//! Command line interface.

use clap::{Parser, Subcommand};
use serde::Serialize;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

use abacus_types::keypad::{self, Button, ButtonKind};

use crate::config::AbacusConfig;
use crate::session::{OutputFormat, Session};

/// Keypad calculator
#[derive(Parser, Debug)]
#[command(name = "abacus")]
#[command(about = "Press calculator keys from the command line")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Keys to press, e.g. `12 + 30 =`. Reads lines from stdin when empty.
    #[arg(allow_hyphen_values = true)]
    pub keys: Vec<String>,

    /// Configuration file
    #[arg(long, env = "ABACUS_CONFIG_PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,

    /// Print the display after every key
    #[arg(long)]
    pub trace: bool,

    /// Digits after the decimal point
    #[arg(long)]
    pub precision: Option<usize>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show the keypad layout
    Keys,
}

impl Cli {
    /// Folds command line flags over the loaded configuration.
    pub fn apply_to(&self, mut config: AbacusConfig) -> AbacusConfig {
        if self.trace {
            config.session.trace = true;
        }
        if self.precision.is_some() {
            config.display.precision = self.precision;
        }
        config
    }

    /// Executes the command against stdin/stdout.
    pub fn execute(&self, config: &AbacusConfig) -> anyhow::Result<ExitCode> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        let stdin = io::stdin();
        let mut err = io::stderr();
        self.execute_with(config, stdin.lock(), &mut out, &mut err)
    }

    /// Executes the command against the given streams.
    pub fn execute_with<R, W, E>(
        &self,
        config: &AbacusConfig,
        input: R,
        out: &mut W,
        err: &mut E,
    ) -> anyhow::Result<ExitCode>
    where
        R: BufRead,
        W: Write,
        E: Write,
    {
        if let Some(Command::Keys) = self.command {
            write_keypad(self.format, out)?;
            return Ok(ExitCode::SUCCESS);
        }

        let session = Session::new(config.display.precision, self.format, config.session.trace);
        if self.keys.is_empty() {
            info!("reading keys from stdin");
            let rejected = session.run_lines(input, out, err)?;
            return Ok(if rejected == 0 { ExitCode::SUCCESS } else { ExitCode::FAILURE });
        }

        match session.run_tokens(self.keys.iter().map(String::as_str), out) {
            Ok(()) => Ok(ExitCode::SUCCESS),
            Err(e) => {
                error!(error = %e, category = e.category(), "key session failed");
                writeln!(err, "error: {e}")?;
                Ok(ExitCode::FAILURE)
            }
        }
    }
}

#[derive(Serialize)]
struct KeyEntry {
    label: &'static str,
    kind: ButtonKind,
    column: usize,
    row: usize,
}

fn write_keypad<W: Write>(format: OutputFormat, out: &mut W) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            for row in keypad::BUTTONS.chunks(keypad::ROW_COUNT) {
                let labels: Vec<String> = row.iter().map(|b| format!("{:^5}", b.label)).collect();
                writeln!(out, "{}", labels.join(" "))?;
            }
        }
        OutputFormat::Json => {
            let entries: Vec<KeyEntry> = keypad::BUTTONS
                .iter()
                .enumerate()
                .map(|(i, b)| {
                    let (column, row) = Button::grid_position(i);
                    KeyEntry { label: b.label, kind: b.kind, column, row }
                })
                .collect();
            writeln!(out, "{}", serde_json::to_string_pretty(&entries)?)?;
        }
    }
    Ok(())
}
