//! multilock - distributed reader/writer lock CLI
//!
//! Thin entry point: parses arguments, wires up logging, and dispatches to
//! [`multilock::cli::run`].

use clap::Parser;
use multilock::cli::{self, Cli};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    log::debug!("multilock {}", multilock::VERSION);

    let exit_code = cli::run(cli).await?;
    std::process::exit(exit_code);
}
