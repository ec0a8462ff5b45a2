use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Test fixture owning a throwaway database.
struct CliTest {
    _temp_dir: TempDir,
    db_path: String,
}

impl CliTest {
    fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temporary directory");
        let db_path = temp_dir
            .path()
            .join("cli_test.db")
            .to_str()
            .expect("Temporary path is not UTF-8")
            .to_string();
        Self {
            _temp_dir: temp_dir,
            db_path,
        }
    }

    /// Command with --no-color and the fixture database.
    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("regimen").expect("Failed to find regimen binary");
        cmd.args(["--no-color", "--database-file", &self.db_path]);
        cmd
    }

    fn run(&self, args: &[&str]) {
        self.cmd().args(args).assert().success();
    }

    /// Catalog with squat, bench and row plus plan 1 containing all three.
    fn with_plan() -> Self {
        let test = Self::new();
        test.run(&["exercise", "add", "squat", "Back Squat", "--weight", "80"]);
        test.run(&["exercise", "add", "bench", "Bench Press"]);
        test.run(&["exercise", "add", "row", "Barbell Row"]);
        test.run(&["plan", "create", "Full body"]);
        test.run(&["entry", "add", "1", "squat", "bench", "row"]);
        test
    }
}

#[test]
fn test_cli_create_plan_success() {
    let test = CliTest::new();
    test.cmd()
        .args(["plan", "create", "Leg day", "--description", "Heavy squats"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created plan with ID: 1"))
        .stdout(predicate::str::contains("# 1. Leg day"))
        .stdout(predicate::str::contains("Heavy squats"));
}

#[test]
fn test_cli_list_empty_plans() {
    let test = CliTest::new();
    test.cmd()
        .args(["plan", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No plans found."));

    // No subcommand lists plans too
    test.cmd()
        .assert()
        .success()
        .stdout(predicate::str::contains("No plans found."));
}

#[test]
fn test_cli_exercise_catalog() {
    let test = CliTest::new();
    test.cmd()
        .args(["exercise", "add", "squat", "Back Squat", "-w", "100"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved exercise 'squat'"));

    test.cmd()
        .args(["exercise", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("**Back Squat** `squat` (default weight 100)"));
}

#[test]
fn test_cli_entry_add_skips_duplicates() {
    let test = CliTest::with_plan();
    test.cmd()
        .args(["entry", "add", "1", "bench", "--sets", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Skipped 'Bench Press': already in plan"));

    test.cmd()
        .args(["plan", "show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1. **Back Squat** 3x10 @ 3-0-1-0, 80"))
        .stdout(predicate::str::contains("2. **Bench Press** 3x10"))
        .stdout(predicate::str::contains("3. **Barbell Row**"));
}

#[test]
fn test_cli_entry_remove_and_move() {
    let test = CliTest::with_plan();
    test.cmd()
        .args(["entry", "remove", "1", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed bench"))
        .stdout(predicate::str::contains("2. **Barbell Row**"));

    test.cmd()
        .args(["entry", "move", "1", "2", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Moved position 2 to 1"))
        .stdout(predicate::str::contains("1. **Barbell Row**"))
        .stdout(predicate::str::contains("2. **Back Squat**"));
}

#[test]
fn test_cli_entry_update() {
    let test = CliTest::with_plan();
    test.cmd()
        .args(["entry", "update", "1", "1", "--reps", "5", "--clear-weight"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Reps set to 5"))
        .stdout(predicate::str::contains("Weight cleared"))
        .stdout(predicate::str::contains("1. **Back Squat** 3x5 @ 3-0-1-0\n"));
}

#[test]
fn test_cli_entry_update_invalid_values() {
    let test = CliTest::with_plan();
    test.cmd()
        .args(["entry", "update", "1", "2", "--sets", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Entry 2: Sets"));

    test.cmd()
        .args(["entry", "update", "1", "1", "--weight", "5", "--clear-weight"])
        .assert()
        .failure();
}

#[test]
fn test_cli_entry_position_out_of_range() {
    let test = CliTest::with_plan();
    test.cmd()
        .args(["entry", "remove", "1", "9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("out of bounds"));

    test.cmd()
        .args(["entry", "remove", "1", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Positions start at 1"));
}

#[test]
fn test_cli_completion_flow() {
    let test = CliTest::with_plan();
    test.cmd()
        .args(["completion", "set", "1", "squat", "--done"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Recorded completion for 'squat' in plan 1"))
        .stdout(predicate::str::contains("Status set to ✓ Completed"));

    test.cmd()
        .args([
            "completion", "set", "1", "row", "--skipped", "--reason", "equipment", "--note",
            "rack taken",
        ])
        .assert()
        .success();

    test.cmd()
        .args(["completion", "list", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1. **Back Squat** ✓ Completed"))
        .stdout(predicate::str::contains("2. **Bench Press** ○ Pending"))
        .stdout(predicate::str::contains(
            "3. **Barbell Row** ✗ Skipped [equipment] rack taken",
        ));

    test.cmd()
        .args(["plan", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(1/3 done, 1 skipped)"));
}

#[test]
fn test_cli_completion_failure_is_reported() {
    let test = CliTest::with_plan();
    test.cmd()
        .args(["completion", "set", "1", "deadlift", "--done"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Error: Completion for 'deadlift'"))
        .stderr(predicate::str::contains("Failed to record completion"));

    test.cmd()
        .args(["completion", "set", "1", "squat", "--skipped", "--reason", "weather"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("reason_id"));
}

#[test]
fn test_cli_completion_requires_status_flag() {
    let test = CliTest::with_plan();
    test.cmd()
        .args(["completion", "set", "1", "squat"])
        .assert()
        .failure();

    test.cmd()
        .args(["completion", "set", "1", "squat", "--done", "--skipped"])
        .assert()
        .failure();
}

#[test]
fn test_cli_completion_reasons() {
    let test = CliTest::new();
    test.cmd()
        .args(["completion", "reasons"])
        .assert()
        .success()
        .stdout(predicate::str::contains("`injury`"))
        .stdout(predicate::str::contains("`fatigue`"));
}

#[test]
fn test_cli_plan_show_json() {
    let test = CliTest::with_plan();
    let output = test
        .cmd()
        .args(["plan", "show", "1", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let plan: serde_json::Value = serde_json::from_slice(&output).expect("valid JSON");
    assert_eq!(plan["title"], "Full body");
    assert_eq!(plan["entries"][0]["exercise_id"], "squat");
    assert_eq!(plan["entries"][2]["sort_order"], 3);
}

#[test]
fn test_cli_delete_plan_requires_confirm() {
    let test = CliTest::with_plan();
    test.cmd()
        .args(["plan", "delete", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Deletion must be confirmed"));

    test.cmd()
        .args(["plan", "delete", "1", "--confirm"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted plan 'Full body' (ID: 1)"));

    test.cmd()
        .args(["plan", "show", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Plan with ID 1 not found"));
}
