//! Cadence CLI Application
//!
//! Command-line front end for recurring task patterns: create patterns,
//! generate their instances up to a horizon, and track completion.

mod args;
mod cli;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use cadence_core::{params::ListPatterns, PlannerBuilder};
use clap::Parser;
use cli::Cli;
use log::info;
use renderer::TerminalRenderer;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        no_color,
        today,
        command,
    } = Args::parse();

    let mut builder = PlannerBuilder::new();
    if let Some(path) = database_file {
        builder = builder.with_database_path(path);
    }
    if let Some(today) = today {
        builder = builder.with_today(today);
    }
    let planner = builder
        .build()
        .await
        .context("Failed to initialize planner")?;

    let renderer = TerminalRenderer::new(!no_color && std::env::var_os("NO_COLOR").is_none());

    info!("Cadence started with database {}", planner.database_path().display());

    let cli = Cli::new(planner, renderer);
    match command {
        Some(Pattern { command }) => cli.handle_pattern_command(command).await,
        Some(Generate(args)) => cli.handle_generate(args).await,
        Some(Instance { command }) => cli.handle_instance_command(command).await,
        None => cli.list_patterns(&ListPatterns::default()).await,
    }
}
