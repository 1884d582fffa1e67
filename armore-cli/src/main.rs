//! `armore`: command-line front-end for the ARMore toolchain client

mod cli;
mod commands;
mod workspace;

use anyhow::Result;
use armore_spec::Config;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::workspace::Workspace;

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut workspace = Workspace::open(&cli.data_dir());
    let config = || -> Result<Config> {
        let config = cli.config()?;
        tracing::debug!(%config, "configuration resolved");
        Ok(config)
    };
    let mut out = std::io::stdout().lock();
    commands::dispatch(&cli.command, &mut workspace, config, &mut out).await
}
