use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{CompletionCommands, EntryCommands, ExerciseCommands, PlanCommands};

/// Compose training plans and track which exercises were performed
///
/// Regimen keeps a catalog of exercises, lets you arrange them into ordered
/// training plans with sets, reps, tempo and weight, and records for every
/// exercise of a plan whether it was completed or skipped and why.
#[derive(Parser)]
#[command(version, about, name = "regimen")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/regimen/regimen.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the Regimen CLI
///
/// Running without a command lists all plans.
#[derive(Subcommand)]
pub enum Commands {
    /// Manage the exercise catalog
    #[command(alias = "x")]
    Exercise {
        #[command(subcommand)]
        command: ExerciseCommands,
    },
    /// Manage plans
    #[command(alias = "p")]
    Plan {
        #[command(subcommand)]
        command: PlanCommands,
    },
    /// Edit the exercises of a plan
    #[command(alias = "e")]
    Entry {
        #[command(subcommand)]
        command: EntryCommands,
    },
    /// Record and review completion status
    #[command(alias = "c")]
    Completion {
        #[command(subcommand)]
        command: CompletionCommands,
    },
}
