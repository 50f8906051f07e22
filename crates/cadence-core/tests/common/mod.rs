use cadence_core::{Planner, PlannerBuilder};
use jiff::civil::Date;
use tempfile::TempDir;

/// Helper function to create a test planner pinned to `today`
pub async fn create_test_planner(today: Date) -> (TempDir, Planner) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let planner = PlannerBuilder::new()
        .with_database_path(&db_path)
        .with_today(today)
        .build()
        .await
        .expect("Failed to create planner");
    (temp_dir, planner)
}
