use regimen_core::{params::CreateExercise, Planner, PlannerBuilder};
use tempfile::TempDir;

/// Helper function to create a test planner
pub async fn create_test_planner() -> (TempDir, Planner) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let planner = PlannerBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create planner");
    (temp_dir, planner)
}

/// Adds catalog exercises named after their ids.
#[allow(dead_code)]
pub async fn seed_catalog(planner: &Planner, ids: &[&str]) {
    for id in ids {
        planner
            .add_exercise(&CreateExercise {
                id: id.to_string(),
                name: id.to_uppercase(),
                default_weight: None,
            })
            .await
            .expect("Failed to add exercise");
    }
}
