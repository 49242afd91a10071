//! Structured logging setup.
//!
//! Logs go to stderr so stdout carries nothing but display values.

use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

const VERBOSE_FILTER: &str = "abacus_calculator=debug,abacus_cli=debug";

/// Picks the filter directives: `RUST_LOG` wins, then `--verbose`, then the
/// configured filter.
pub fn filter_directives(config: &LoggingConfig, verbose: bool) -> String {
    match std::env::var(EnvFilter::DEFAULT_ENV) {
        Ok(directives) if !directives.is_empty() => directives,
        _ if verbose => VERBOSE_FILTER.to_string(),
        _ => config.filter.clone(),
    }
}

/// Installs the global subscriber.
pub fn init_tracing(config: &LoggingConfig, verbose: bool) -> anyhow::Result<()> {
    let directives = filter_directives(config, verbose);
    let filter = EnvFilter::try_new(&directives)?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let installed = if config.json { builder.json().try_init() } else { builder.try_init() };
    installed.map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    debug!(%directives, json = config.json, "tracing initialized");
    Ok(())
}
