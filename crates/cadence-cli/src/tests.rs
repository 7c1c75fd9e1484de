//! CLI command tests
//!
//! This module contains all tests for the CLI commands.

use cadence_core::{Database, ProjectStatus};

use crate::commands::{self, truncate};

fn setup_test_db() -> Database {
    Database::in_memory().unwrap()
}

// ========== Log Command Tests ==========

#[test]
fn test_cmd_log_without_project() {
    let db = setup_test_db();
    let result = commands::cmd_log(
        &db,
        "ada",
        "Engineering",
        None,
        Some(2.5),
        "completed",
        "Fixed the build",
    );
    assert!(result.is_ok());
    assert_eq!(db.count_work_records().unwrap(), 1);
}

#[test]
fn test_cmd_log_with_known_project() {
    let db = setup_test_db();
    commands::cmd_projects_add(&db, "Atlas", None, None, vec![], vec![]).unwrap();

    let result = commands::cmd_log(
        &db,
        "ada",
        "Engineering",
        Some("Atlas"),
        None,
        "in_progress",
        "Sketching the migration plan",
    );
    assert!(result.is_ok());

    let records = db.list_work_records(10, 0).unwrap();
    assert_eq!(records.len(), 1);
    assert!(records[0].project_id.is_some());
}

#[test]
fn test_cmd_log_with_unknown_project_fails() {
    let db = setup_test_db();
    let result = commands::cmd_log(
        &db,
        "ada",
        "Engineering",
        Some("Ghost"),
        None,
        "completed",
        "work",
    );
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("Ghost"));
}

#[test]
fn test_cmd_log_rejects_bad_status() {
    let db = setup_test_db();
    let result = commands::cmd_log(&db, "ada", "Engineering", None, None, "bogus", "work");
    assert!(result.is_err());
}

// ========== Project Command Tests ==========

#[test]
fn test_cmd_projects_add_and_list() {
    let db = setup_test_db();
    let result = commands::cmd_projects_add(
        &db,
        "Atlas",
        Some("2026-01-01"),
        Some("2026-06-30"),
        vec!["Engineering".to_string()],
        vec!["ada".to_string()],
    );
    assert!(result.is_ok());

    let project = db.get_project_by_name("Atlas").unwrap().unwrap();
    assert_eq!(project.departments, vec!["Engineering".to_string()]);
    assert!(project.ends_on.is_some());

    assert!(commands::cmd_projects_list(&db).is_ok());
}

#[test]
fn test_cmd_projects_add_rejects_bad_date() {
    let db = setup_test_db();
    let result = commands::cmd_projects_add(&db, "Atlas", Some("06/30/2026"), None, vec![], vec![]);
    assert!(result.is_err());
}

#[test]
fn test_cmd_projects_status() {
    let db = setup_test_db();
    commands::cmd_projects_add(&db, "Atlas", None, None, vec![], vec![]).unwrap();
    let project = db.get_project_by_name("Atlas").unwrap().unwrap();

    let result = commands::cmd_projects_status(&db, project.id, "on_hold");
    assert!(result.is_ok());
    assert_eq!(
        db.get_project(project.id).unwrap().unwrap().status,
        ProjectStatus::OnHold
    );

    assert!(commands::cmd_projects_status(&db, project.id, "bogus").is_err());
}

// ========== Objective Command Tests ==========

#[test]
fn test_cmd_objectives_add_and_progress() {
    let db = setup_test_db();
    let result = commands::cmd_objectives_add(
        &db,
        "Close 20 deals",
        20.0,
        4.0,
        Some("grace"),
        None,
        Some("2026-06-30"),
    );
    assert!(result.is_ok());

    let objectives = db.all_objectives().unwrap();
    assert_eq!(objectives.len(), 1);

    let result = commands::cmd_objectives_progress(&db, objectives[0].id, 12.0);
    assert!(result.is_ok());
    assert_eq!(
        db.get_objective(objectives[0].id).unwrap().unwrap().progress,
        12.0
    );
}

#[test]
fn test_cmd_objectives_add_rejects_zero_target() {
    let db = setup_test_db();
    let result = commands::cmd_objectives_add(&db, "Broken", 0.0, 0.0, None, None, None);
    assert!(result.is_err());
}

// ========== Work Command Tests ==========

#[test]
fn test_cmd_work_list_and_delete() {
    let db = setup_test_db();
    commands::cmd_log(&db, "ada", "Engineering", None, None, "completed", "work").unwrap();

    assert!(commands::cmd_work_list(&db, 10).is_ok());

    let records = db.list_work_records(10, 0).unwrap();
    assert!(commands::cmd_work_delete(&db, records[0].id).is_ok());
    assert_eq!(db.count_work_records().unwrap(), 0);

    // Deleting again reports the missing record
    assert!(commands::cmd_work_delete(&db, records[0].id).is_err());
}

// ========== Insights Command Tests ==========

#[tokio::test]
async fn test_cmd_insights_runs_on_empty_db() {
    let db = setup_test_db();
    assert!(commands::cmd_insights(&db, "weekly", false).await.is_ok());
    assert!(commands::cmd_insights(&db, "monthly", true).await.is_ok());
}

#[tokio::test]
async fn test_cmd_insights_rejects_unknown_period() {
    let db = setup_test_db();
    let result = commands::cmd_insights(&db, "yearly", false).await;
    assert!(result.is_err());
}

// ========== Utilities ==========

#[test]
fn test_truncate() {
    assert_eq!(truncate("short", 10), "short");
    assert_eq!(truncate("a longer string", 9), "a long...");
}
