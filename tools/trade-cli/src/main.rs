//! # Trade CLI
//!
//! Finds fair trades in a Sleeper league using FantasyCalc values.

mod cli;
mod commands;
mod logging;
mod render;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use commands::{describe_search_error, search_config, CliHandler};
use trade_engine::{CancelToken, SearchConfig};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    logging::initialize_logging(&cli.log_level, &cli.log_format)?;

    if let Commands::InitConfig { path } = &cli.command {
        SearchConfig::default().to_file(path)?;
        println!("Wrote default search config to {}", path.display());
        return Ok(());
    }

    let config = search_config(&cli)?;
    let cancel = CancelToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Interrupt received, cancelling search");
            on_interrupt.cancel();
        }
    });

    let handler = CliHandler::load(&cli, config, cancel).await?;

    // Searches are CPU-bound; keep the runtime free for the interrupt task
    let outcome = tokio::task::block_in_place(|| handler.handle_command(cli.command));
    if let Err(error) = &outcome {
        if let Some(message) = describe_search_error(error) {
            eprintln!("{message}");
            std::process::exit(1);
        }
    }
    outcome
}
