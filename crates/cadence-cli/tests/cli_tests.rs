use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Helper function to create a temporary directory for CLI tests
fn create_cli_test_environment() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Command with plain output, a temp database and a fixed "today"
fn cad_cmd(db_path: &Path) -> Command {
    let mut cmd = Command::cargo_bin("cad").expect("Failed to find cad binary");
    cmd.args([
        "--no-color",
        "--database-file",
        db_path.to_str().unwrap(),
        "--today",
        "2024-01-01",
    ]);
    cmd
}

fn create_every_other_day(db_path: &Path) {
    cad_cmd(db_path)
        .args([
            "pattern",
            "create",
            "Water plants",
            "--type",
            "daily",
            "--start",
            "2024-01-01",
            "--interval",
            "2",
        ])
        .assert()
        .success();
}

#[test]
fn test_cli_create_pattern() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    cad_cmd(&db_path)
        .args([
            "pattern",
            "create",
            "Water plants",
            "--type",
            "daily",
            "--start",
            "2024-01-01",
            "--interval",
            "2",
            "--tags",
            "home,garden",
            "--description",
            "The ferns need the most",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created pattern with ID: 1"))
        .stdout(predicate::str::contains("# 1. Water plants"))
        .stdout(predicate::str::contains("every 2 days, from 2024-01-01"))
        .stdout(predicate::str::contains("- Tags: home, garden"))
        .stdout(predicate::str::contains("The ferns need the most"));
}

#[test]
fn test_cli_create_weekly_with_day_names() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    cad_cmd(&db_path)
        .args([
            "pattern",
            "create",
            "Gym",
            "--type",
            "weekly",
            "--start",
            "2024-01-01",
            "--days-of-week",
            "mon,wed,5",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("every week on Mon, Wed, Fri"));
}

#[test]
fn test_cli_create_rejects_invalid_input() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    cad_cmd(&db_path)
        .args([
            "pattern",
            "create",
            "Gym",
            "--type",
            "weekly",
            "--start",
            "2024-01-01",
            "--days-of-week",
            "someday",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unrecognized weekday"));

    cad_cmd(&db_path)
        .args([
            "pattern",
            "create",
            "Backwards",
            "--type",
            "daily",
            "--start",
            "2024-02-01",
            "--end",
            "2024-01-01",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("end_date"));
}

#[test]
fn test_cli_list_empty_patterns() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    cad_cmd(&db_path)
        .args(["pattern", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No recurrence patterns found."));

    // No subcommand lists active patterns too
    cad_cmd(&db_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("No recurrence patterns found."));
}

#[test]
fn test_cli_generate_every_other_day() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    create_every_other_day(&db_path);

    cad_cmd(&db_path)
        .args(["generate", "1", "--days-ahead", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Generated 5 instance(s) for pattern 1 (horizon: before 2024-01-11)",
        ))
        .stdout(predicate::str::contains("- Mon 2024-01-01"))
        .stdout(predicate::str::contains("- Tue 2024-01-09"))
        .stdout(predicate::str::contains("2024-01-11").count(1));

    // Running again fills nothing
    cad_cmd(&db_path)
        .args(["generate", "1", "--days-ahead", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated 0 instance(s)"));

    cad_cmd(&db_path)
        .args(["pattern", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("## Water plants (ID: 1)"))
        .stdout(predicate::str::contains("5 generated, 0 completed, 5 pending"));
}

#[test]
fn test_cli_generate_preview_creates_nothing() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    create_every_other_day(&db_path);

    cad_cmd(&db_path)
        .args(["generate", "1", "--days-ahead", "6", "--preview"])
        .assert()
        .success()
        .stdout(predicate::str::contains("## Upcoming for Water plants (ID: 1)"))
        .stdout(predicate::str::contains("- Fri 2024-01-05"));

    cad_cmd(&db_path)
        .args(["instance", "list", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No instances found."));
}

#[test]
fn test_cli_generate_all() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    create_every_other_day(&db_path);
    cad_cmd(&db_path)
        .args([
            "pattern",
            "create",
            "Rent",
            "--type",
            "monthly",
            "--start",
            "2024-01-31",
            "--day-of-month",
            "31",
        ])
        .assert()
        .success();

    cad_cmd(&db_path)
        .args(["generate", "--all", "--days-ahead", "61"])
        .assert()
        .success()
        .stdout(predicate::str::contains("across 2 pattern(s)"))
        .stdout(predicate::str::contains("- Pattern 2: 2 created"));

    cad_cmd(&db_path)
        .args(["instance", "list", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wed 2024-01-31"))
        .stdout(predicate::str::contains("Thu 2024-02-29"));
}

#[test]
fn test_cli_generate_requires_target() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    cad_cmd(&db_path).args(["generate"]).assert().failure();
}

#[test]
fn test_cli_generate_unknown_pattern() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    cad_cmd(&db_path)
        .args(["generate", "42"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Recurrence pattern with ID 42 not found"));
}

#[test]
fn test_cli_deactivated_pattern_generates_nothing() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    create_every_other_day(&db_path);

    cad_cmd(&db_path)
        .args(["pattern", "deactivate", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Pattern 1 ('Water plants') deactivated"));

    cad_cmd(&db_path)
        .args(["generate", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("inactive"));

    cad_cmd(&db_path)
        .args(["pattern", "list", "--inactive"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[inactive]"));

    cad_cmd(&db_path)
        .args(["pattern", "activate", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("activated"));
}

#[test]
fn test_cli_update_pattern() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    create_every_other_day(&db_path);

    cad_cmd(&db_path)
        .args(["pattern", "update", "1", "--title", "Water ferns", "--priority", "high"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated title"))
        .stdout(predicate::str::contains("Changed priority to high"))
        .stdout(predicate::str::contains("# 1. Water ferns"));

    cad_cmd(&db_path)
        .args(["pattern", "update", "1", "--interval", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("New schedule applies from 2024-01-01"));

    cad_cmd(&db_path)
        .args(["pattern", "update", "1", "--end", "2024-03-01", "--clear-end"])
        .assert()
        .failure();
}

#[test]
fn test_cli_complete_and_reopen_instance() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    create_every_other_day(&db_path);
    cad_cmd(&db_path)
        .args(["generate", "1", "--days-ahead", "4"])
        .assert()
        .success();

    cad_cmd(&db_path)
        .args(["instance", "complete", "1", "--actual-time", "15"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Marked complete"))
        .stdout(predicate::str::contains("Recorded actual time of 15 min"))
        .stdout(predicate::str::contains("### [x] 1. Water plants (Mon 2024-01-01)"));

    cad_cmd(&db_path)
        .args(["instance", "list", "1", "--pending"])
        .assert()
        .success()
        .stdout(predicate::str::contains("### [ ] 2. Water plants (Wed 2024-01-03)"))
        .stdout(predicate::str::contains("2024-01-01").not());

    cad_cmd(&db_path)
        .args(["instance", "reopen", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Reopened"));

    cad_cmd(&db_path)
        .args(["instance", "show", "99"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Task instance with ID 99 not found"));
}

#[test]
fn test_cli_delete_requires_confirmation() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    create_every_other_day(&db_path);
    cad_cmd(&db_path)
        .args(["generate", "1", "--days-ahead", "4"])
        .assert()
        .success();

    cad_cmd(&db_path)
        .args(["pattern", "delete", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("confirm"));

    cad_cmd(&db_path)
        .args(["pattern", "delete", "1", "--confirm"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Deleted pattern 'Water plants' (ID: 1) and its instances",
        ));

    cad_cmd(&db_path)
        .args(["pattern", "show", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}
