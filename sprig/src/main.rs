mod commands;

use clap::Parser;
use eyre::Result;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::commands::Cli;

fn setup_logging(verbose: u8) {
    let level = if verbose > 0 { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    setup_logging(cli.verbose);
    cli.run()
}
