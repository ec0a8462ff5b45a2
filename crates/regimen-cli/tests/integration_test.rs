//! Checks that CLI output is exactly the core `Display` output.

use std::process::Command;

use regimen_core::{
    display::{CompletionBoard, Exercises, PlanSummaries},
    params::Id,
    Planner, PlannerBuilder,
};
use tempfile::TempDir;

async fn create_test_planner() -> (Planner, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let db_path = temp_dir.path().join("test.db");

    let planner = PlannerBuilder::new()
        .with_database_path(Some(db_path))
        .build()
        .await
        .expect("Failed to create planner");

    (planner, temp_dir)
}

/// Run a CLI command and capture its output
fn run_cli_command(db_path: &str, args: &[&str]) -> String {
    let output = Command::new(env!("CARGO_BIN_EXE_regimen"))
        .arg("--no-color")
        .arg("--database-file")
        .arg(db_path)
        .args(args)
        .output()
        .expect("Failed to run regimen");
    assert!(
        output.status.success(),
        "command {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).expect("stdout is UTF-8")
}

#[tokio::test]
async fn test_cli_output_matches_display() {
    let (planner, temp_dir) = create_test_planner().await;
    let db_path = temp_dir.path().join("test.db");
    let db = db_path.to_str().unwrap();

    run_cli_command(db, &["exercise", "add", "pullup", "Pull-up"]);
    run_cli_command(db, &["exercise", "add", "dip", "Dip", "--weight", "10"]);
    run_cli_command(db, &["plan", "create", "Bodyweight"]);
    run_cli_command(db, &["entry", "add", "1", "dip", "pullup", "--reps", "8"]);
    run_cli_command(db, &["completion", "set", "1", "dip", "--done"]);

    let exercises = Exercises(planner.list_exercises().await.unwrap());
    assert_eq!(run_cli_command(db, &["exercise", "list"]), exercises.to_string());

    let plan = planner.require_plan(&Id { id: 1 }).await.unwrap();
    assert_eq!(run_cli_command(db, &["plan", "show", "1"]), plan.to_string());

    let summaries: PlanSummaries = planner.list_plan_summaries().await.unwrap();
    assert_eq!(run_cli_command(db, &["plan", "list"]), summaries.to_string());

    let records = planner.get_completions(&Id { id: 1 }).await.unwrap();
    assert_eq!(
        run_cli_command(db, &["completion", "list", "1"]),
        CompletionBoard::new(&plan, &records).to_string()
    );
}
