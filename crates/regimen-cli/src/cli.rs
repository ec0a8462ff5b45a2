//! Command definitions and handlers.
//!
//! Argument structures carry the clap derives and convert into the
//! interface-agnostic parameter types of `regimen_core::params` through
//! `From` impls:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Planner → Display → Renderer
//! ```
//!
//! Positions on the command line are 1-based, matching the numbers shown in
//! plan output.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use regimen_core::{
    display::{CompletionBoard, CreateResult, DeleteResult, Exercises, Reasons, UpdateResult},
    params::*,
    CompletionSync, OperationStatus, Planner, SyncEvent,
};

use crate::renderer::TerminalRenderer;

// ============================================================================
// Exercise catalog
// ============================================================================

/// Add an exercise to the catalog, or rename an existing one
#[derive(Args)]
pub struct AddExerciseArgs {
    /// Stable identifier used to reference the exercise in plans
    pub id: String,
    /// Display name
    pub name: String,
    /// Weight copied into plan entries created from this exercise
    #[arg(short, long)]
    pub weight: Option<f64>,
}

impl From<AddExerciseArgs> for CreateExercise {
    fn from(val: AddExerciseArgs) -> Self {
        CreateExercise {
            id: val.id,
            name: val.name,
            default_weight: val.weight,
        }
    }
}

#[derive(Subcommand)]
pub enum ExerciseCommands {
    /// Add or update a catalog exercise
    #[command(alias = "a")]
    Add(AddExerciseArgs),
    /// List the exercise catalog
    #[command(aliases = ["l", "ls"])]
    List,
}

// ============================================================================
// Plans
// ============================================================================

/// Create a new, empty plan
#[derive(Args)]
pub struct CreatePlanArgs {
    /// Title of the plan
    pub title: String,
    /// Optional description providing more context about the plan
    #[arg(short, long)]
    pub description: Option<String>,
}

impl From<CreatePlanArgs> for CreatePlan {
    fn from(val: CreatePlanArgs) -> Self {
        CreatePlan {
            title: val.title,
            description: val.description,
        }
    }
}

/// Show a plan with its exercises
#[derive(Args)]
pub struct ShowPlanArgs {
    /// ID of the plan to display
    pub id: u64,
    /// Print the plan as JSON instead of markdown
    #[arg(long)]
    pub json: bool,
}

impl From<&ShowPlanArgs> for Id {
    fn from(val: &ShowPlanArgs) -> Self {
        Id { id: val.id }
    }
}

/// Permanently delete a plan with its entries and completion records
#[derive(Args)]
pub struct DeletePlanArgs {
    /// ID of the plan to delete
    pub id: u64,
    /// Confirm the deletion
    #[arg(long)]
    pub confirm: bool,
}

impl From<DeletePlanArgs> for DeletePlan {
    fn from(val: DeletePlanArgs) -> Self {
        DeletePlan {
            id: val.id,
            confirmed: val.confirm,
        }
    }
}

#[derive(Subcommand)]
pub enum PlanCommands {
    /// Create a plan
    #[command(alias = "c")]
    Create(CreatePlanArgs),
    /// List all plans with completion progress
    #[command(aliases = ["l", "ls"])]
    List,
    /// Show a plan
    #[command(alias = "s")]
    Show(ShowPlanArgs),
    /// Delete a plan
    #[command(aliases = ["d", "rm"])]
    Delete(DeletePlanArgs),
}

// ============================================================================
// Plan entries
// ============================================================================

/// Append catalog exercises to a plan
///
/// Exercises the plan already contains are skipped.
#[derive(Args)]
pub struct AddEntryArgs {
    /// ID of the plan to edit
    pub plan_id: u64,
    /// Catalog ids of the exercises to append, in order
    #[arg(required = true)]
    pub exercise_ids: Vec<String>,
    /// Sets for the new entries (default 3)
    #[arg(short, long)]
    pub sets: Option<u32>,
    /// Reps for the new entries (default 10)
    #[arg(short, long)]
    pub reps: Option<u32>,
    /// Tempo for the new entries (default 3-0-1-0)
    #[arg(short, long)]
    pub tempo: Option<String>,
}

impl From<AddEntryArgs> for AddEntries {
    fn from(val: AddEntryArgs) -> Self {
        AddEntries {
            plan_id: val.plan_id,
            exercise_ids: val.exercise_ids,
            sets: val.sets,
            reps: val.reps,
            tempo: val.tempo,
        }
    }
}

/// Remove the exercise at a position
#[derive(Args)]
pub struct RemoveEntryArgs {
    /// ID of the plan to edit
    pub plan_id: u64,
    /// 1-based position of the entry
    pub position: u32,
}

impl From<RemoveEntryArgs> for RemoveEntry {
    fn from(val: RemoveEntryArgs) -> Self {
        RemoveEntry {
            plan_id: val.plan_id,
            position: val.position,
        }
    }
}

/// Change sets, reps, tempo or weight of the exercise at a position
#[derive(Args)]
pub struct UpdateEntryArgs {
    /// ID of the plan to edit
    pub plan_id: u64,
    /// 1-based position of the entry
    pub position: u32,
    #[arg(short, long)]
    pub sets: Option<u32>,
    #[arg(short, long)]
    pub reps: Option<u32>,
    #[arg(short, long)]
    pub tempo: Option<String>,
    #[arg(short, long, conflicts_with = "clear_weight")]
    pub weight: Option<f64>,
    /// Remove the weight from the entry
    #[arg(long)]
    pub clear_weight: bool,
}

impl From<UpdateEntryArgs> for UpdateEntry {
    fn from(val: UpdateEntryArgs) -> Self {
        UpdateEntry {
            plan_id: val.plan_id,
            position: val.position,
            sets: val.sets,
            reps: val.reps,
            tempo: val.tempo,
            weight: val.weight,
            clear_weight: val.clear_weight,
        }
    }
}

/// Move an exercise to another position
#[derive(Args)]
pub struct MoveEntryArgs {
    /// ID of the plan to edit
    pub plan_id: u64,
    /// Current 1-based position
    pub from: u32,
    /// Target 1-based position
    pub to: u32,
}

impl From<MoveEntryArgs> for MoveEntry {
    fn from(val: MoveEntryArgs) -> Self {
        MoveEntry {
            plan_id: val.plan_id,
            from: val.from,
            to: val.to,
        }
    }
}

#[derive(Subcommand)]
pub enum EntryCommands {
    /// Append exercises
    #[command(alias = "a")]
    Add(AddEntryArgs),
    /// Remove an exercise
    #[command(aliases = ["r", "rm"])]
    Remove(RemoveEntryArgs),
    /// Update an exercise
    #[command(alias = "u")]
    Update(UpdateEntryArgs),
    /// Move an exercise
    #[command(alias = "m")]
    Move(MoveEntryArgs),
}

// ============================================================================
// Completion
// ============================================================================

/// Record whether an exercise of a plan was performed
#[derive(Args)]
pub struct SetCompletionArgs {
    /// ID of the plan
    pub plan_id: u64,
    /// Catalog id of the exercise
    pub exercise_id: String,
    /// The exercise was performed
    #[arg(long, conflicts_with = "skipped", required_unless_present = "skipped")]
    pub done: bool,
    /// The exercise was not performed
    #[arg(long)]
    pub skipped: bool,
    /// Predefined reason id, see `completion reasons`
    #[arg(long, requires = "skipped")]
    pub reason: Option<String>,
    /// Free-text explanation
    #[arg(long)]
    pub note: Option<String>,
}

impl From<SetCompletionArgs> for SetCompletion {
    fn from(val: SetCompletionArgs) -> Self {
        SetCompletion {
            plan_id: val.plan_id,
            exercise_id: val.exercise_id,
            completed: val.done,
            reason_id: val.reason,
            custom_reason: val.note,
        }
    }
}

/// Show the completion status of every exercise in a plan
#[derive(Args)]
pub struct ListCompletionsArgs {
    /// ID of the plan
    pub plan_id: u64,
}

#[derive(Subcommand)]
pub enum CompletionCommands {
    /// Mark an exercise done or skipped
    #[command(alias = "s")]
    Set(SetCompletionArgs),
    /// Show completion status for a plan
    #[command(aliases = ["l", "ls"])]
    List(ListCompletionsArgs),
    /// List predefined skip reasons
    #[command(alias = "r")]
    Reasons,
}

// ============================================================================
// Handlers
// ============================================================================

/// Runs parsed commands against a planner and renders the results.
pub struct Cli {
    planner: Planner,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(planner: Planner, renderer: TerminalRenderer) -> Self {
        Self { planner, renderer }
    }

    pub async fn handle_exercise_command(&self, command: ExerciseCommands) -> Result<()> {
        match command {
            ExerciseCommands::Add(args) => {
                let exercise = self
                    .planner
                    .add_exercise(&args.into())
                    .await
                    .context("Failed to save exercise")?;
                self.renderer.show(&CreateResult::new(exercise))
            }
            ExerciseCommands::List => {
                let exercises = self
                    .planner
                    .list_exercises()
                    .await
                    .context("Failed to list exercises")?;
                self.renderer.show(&Exercises(exercises))
            }
        }
    }

    pub async fn handle_plan_command(&self, command: PlanCommands) -> Result<()> {
        match command {
            PlanCommands::Create(args) => {
                let plan = self
                    .planner
                    .create_plan(&args.into())
                    .await
                    .context("Failed to create plan")?;
                self.renderer.show(&CreateResult::new(plan))
            }
            PlanCommands::List => self.list_plans().await,
            PlanCommands::Show(args) => {
                let plan = self
                    .planner
                    .require_plan(&(&args).into())
                    .await
                    .context("Failed to load plan")?;
                if args.json {
                    println!("{}", serde_json::to_string_pretty(&plan)?);
                    Ok(())
                } else {
                    self.renderer.show(&plan)
                }
            }
            PlanCommands::Delete(args) => {
                let plan = self
                    .planner
                    .delete_plan(&args.into())
                    .await
                    .context("Failed to delete plan")?;
                self.renderer.show(&DeleteResult::new(plan))
            }
        }
    }

    pub async fn list_plans(&self) -> Result<()> {
        let summaries = self
            .planner
            .list_plan_summaries()
            .await
            .context("Failed to list plans")?;
        self.renderer.show(&summaries)
    }

    pub async fn handle_entry_command(&self, command: EntryCommands) -> Result<()> {
        let result = match command {
            EntryCommands::Add(args) => self.planner.add_entries(&args.into()).await,
            EntryCommands::Remove(args) => self.planner.remove_entry(&args.into()).await,
            EntryCommands::Update(args) => self.planner.update_entry(&args.into()).await,
            EntryCommands::Move(args) => self.planner.move_entry(&args.into()).await,
        }
        .context("Failed to update plan entries")?;
        self.renderer.show(&result)
    }

    pub async fn handle_completion_command(&self, command: CompletionCommands) -> Result<()> {
        match command {
            CompletionCommands::Set(args) => self.set_completion(args.into()).await,
            CompletionCommands::List(args) => {
                let plan = self
                    .planner
                    .require_plan(&Id { id: args.plan_id })
                    .await
                    .context("Failed to load plan")?;
                let sync = CompletionSync::new(self.planner.clone());
                let records = sync
                    .refresh(plan.id, false)
                    .await
                    .context("Failed to load completion records")?;
                self.renderer.show(&CompletionBoard::new(&plan, &records))
            }
            CompletionCommands::Reasons => {
                let reasons = self
                    .planner
                    .list_reasons()
                    .await
                    .context("Failed to list completion reasons")?;
                self.renderer.show(&Reasons(reasons))
            }
        }
    }

    async fn set_completion(&self, params: SetCompletion) -> Result<()> {
        let sync = CompletionSync::new(self.planner.clone());
        let mut events = sync.subscribe();

        let outcome = sync.set_completion(params.key(), params.request()).await;

        if let Ok(SyncEvent::RolledBack { key, reason }) = events.try_recv() {
            self.renderer.show(&OperationStatus::failure(format!(
                "Completion for '{}' in plan {} was not saved: {reason}",
                key.exercise_id, key.plan_id
            )))?;
        }

        let record = outcome.context("Failed to record completion")?;
        let change = format!("Status set to {}", record.status().with_icon());
        self.renderer
            .show(&UpdateResult::with_changes(record, vec![change]))
    }
}
