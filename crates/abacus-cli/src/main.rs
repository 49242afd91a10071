use abacus_cli::tracing_setup::init_tracing;
use abacus_cli::{AbacusConfig, Cli};
use clap::Parser;
use std::process::ExitCode;
use tracing::info;

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let (config, source) = AbacusConfig::load(cli.config.as_deref())?;
    let config = cli.apply_to(config.apply_env()?);

    init_tracing(&config.logging, cli.verbose)?;
    source.log();
    info!(version = env!("CARGO_PKG_VERSION"), "starting abacus");

    cli.execute(&config)
}
