//! Regimen CLI Application
//!
//! Command-line interface for composing training plans and tracking
//! exercise completion.

mod args;
mod cli;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use log::info;
use regimen_core::PlannerBuilder;
use renderer::TerminalRenderer;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        no_color,
        command,
    } = Args::parse();

    let planner = PlannerBuilder::new()
        .with_database_path(database_file)
        .build()
        .await
        .context("Failed to initialize planner")?;

    let renderer = TerminalRenderer::new(!no_color);
    let cli = Cli::new(planner, renderer);

    info!("Regimen started");

    match command {
        Some(Exercise { command }) => cli.handle_exercise_command(command).await,
        Some(Plan { command }) => cli.handle_plan_command(command).await,
        Some(Entry { command }) => cli.handle_entry_command(command).await,
        Some(Completion { command }) => cli.handle_completion_command(command).await,
        None => cli.list_plans().await,
    }
}
