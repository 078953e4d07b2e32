//! notisync CLI - drive the notification sync engine from the terminal
//!
//! Replays scripted snapshot sequences through a live engine and diffs
//! snapshot files the same way the engine does.

mod cli;
mod commands;
mod error;


use std::time::Duration;

use clap::Parser;

use crate::cli::{Cli, Commands};
use crate::commands::common::load_engine_config;
use crate::commands::completions::run_completions;
use crate::commands::diff::run_diff;
use crate::commands::replay::run_replay;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    let directive = "notisync=info"
        .parse::<tracing_subscriber::filter::Directive>()
        .map_err(|error| CliError::Config(format!("invalid log directive: {error}")))?;
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(directive))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Replay {
            script,
            json,
            wait_ms,
        } => {
            let config = load_engine_config(cli.config)?;
            run_replay(&script, &config, Duration::from_millis(wait_ms), json).await?;
        }
        Commands::Diff {
            previous,
            current,
            json,
        } => run_diff(&previous, &current, json)?,
        Commands::Completions { shell, output } => run_completions(shell, output.as_deref())?,
    }

    Ok(())
}
