//! Database layer tests

use chrono::{Duration, NaiveDate, Utc};

use super::Database;
use crate::models::{NewObjective, NewProject, NewWorkRecord, ProjectStatus, WorkStatus};

fn sample_work(hash: Option<&str>) -> NewWorkRecord {
    NewWorkRecord {
        logged_at: Utc::now() - Duration::hours(2),
        user: "ada".to_string(),
        department: "Engineering".to_string(),
        project_id: None,
        hours: Some(1.5),
        status: WorkStatus::Completed,
        description: "Wired up the release pipeline".to_string(),
        import_hash: hash.map(|h| h.to_string()),
    }
}

fn sample_project(name: &str) -> NewProject {
    NewProject {
        name: name.to_string(),
        status: ProjectStatus::Active,
        starts_on: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
        ends_on: Some(NaiveDate::from_ymd_opt(2026, 12, 31).unwrap()),
        departments: vec!["Engineering".to_string()],
        members: vec!["ada".to_string(), "grace".to_string()],
    }
}

#[test]
fn test_work_record_round_trip() {
    let db = Database::in_memory().unwrap();

    let id = db.insert_work_record(&sample_work(None)).unwrap().unwrap();
    let record = db.get_work_record(id).unwrap().unwrap();

    assert_eq!(record.user, "ada");
    assert_eq!(record.department, "Engineering");
    assert_eq!(record.status, WorkStatus::Completed);
    assert_eq!(record.hours, Some(1.5));
    assert_eq!(db.count_work_records().unwrap(), 1);
}

#[test]
fn test_work_record_import_dedup() {
    let db = Database::in_memory().unwrap();

    let first = db.insert_work_record(&sample_work(Some("abc123"))).unwrap();
    let second = db.insert_work_record(&sample_work(Some("abc123"))).unwrap();

    assert!(first.is_some());
    assert!(second.is_none());
    assert_eq!(db.count_work_records().unwrap(), 1);
}

#[test]
fn test_unhashed_records_never_dedup() {
    let db = Database::in_memory().unwrap();

    db.insert_work_record(&sample_work(None)).unwrap();
    db.insert_work_record(&sample_work(None)).unwrap();

    assert_eq!(db.count_work_records().unwrap(), 2);
}

#[test]
fn test_work_record_pagination() {
    let db = Database::in_memory().unwrap();

    for i in 0..5 {
        let mut record = sample_work(None);
        record.logged_at = Utc::now() - Duration::days(i);
        db.insert_work_record(&record).unwrap();
    }

    let page = db.list_work_records(2, 0).unwrap();
    assert_eq!(page.len(), 2);
    // Newest first
    assert!(page[0].logged_at >= page[1].logged_at);

    let rest = db.list_work_records(10, 2).unwrap();
    assert_eq!(rest.len(), 3);
}

#[test]
fn test_delete_work_record() {
    let db = Database::in_memory().unwrap();
    let id = db.insert_work_record(&sample_work(None)).unwrap().unwrap();

    db.delete_work_record(id).unwrap();
    assert!(db.get_work_record(id).unwrap().is_none());
    assert!(db.delete_work_record(id).is_err());
}

#[test]
fn test_project_round_trip() {
    let db = Database::in_memory().unwrap();

    let id = db.insert_project(&sample_project("Atlas")).unwrap();
    let project = db.get_project(id).unwrap().unwrap();

    assert_eq!(project.name, "Atlas");
    assert_eq!(project.status, ProjectStatus::Active);
    assert_eq!(project.departments, vec!["Engineering".to_string()]);
    assert_eq!(project.members.len(), 2);

    let by_name = db.get_project_by_name("Atlas").unwrap().unwrap();
    assert_eq!(by_name.id, id);
    assert!(db.get_project_by_name("Borealis").unwrap().is_none());
}

#[test]
fn test_duplicate_project_name_rejected() {
    let db = Database::in_memory().unwrap();

    db.insert_project(&sample_project("Atlas")).unwrap();
    assert!(db.insert_project(&sample_project("Atlas")).is_err());
}

#[test]
fn test_update_project_status() {
    let db = Database::in_memory().unwrap();
    let id = db.insert_project(&sample_project("Atlas")).unwrap();

    db.update_project_status(id, ProjectStatus::OnHold).unwrap();
    assert_eq!(
        db.get_project(id).unwrap().unwrap().status,
        ProjectStatus::OnHold
    );
    assert!(db
        .update_project_status(id + 99, ProjectStatus::Active)
        .is_err());
}

#[test]
fn test_objective_round_trip_and_progress() {
    let db = Database::in_memory().unwrap();

    let id = db
        .insert_objective(&NewObjective {
            title: "Close 20 deals".to_string(),
            progress: 4.0,
            target: 20.0,
            owner: Some("grace".to_string()),
            period_start: Some(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()),
            period_end: Some(NaiveDate::from_ymd_opt(2026, 3, 31).unwrap()),
        })
        .unwrap();

    let objective = db.get_objective(id).unwrap().unwrap();
    assert_eq!(objective.title, "Close 20 deals");
    assert_eq!(objective.completion_ratio(), Some(0.2));

    db.update_objective_progress(id, 12.0).unwrap();
    let updated = db.get_objective(id).unwrap().unwrap();
    assert_eq!(updated.progress, 12.0);
    assert_eq!(db.count_objectives().unwrap(), 1);
}

#[test]
fn test_snapshot_reads_on_empty_database() {
    let db = Database::in_memory().unwrap();

    assert!(db.all_work_records().unwrap().is_empty());
    assert!(db.all_projects().unwrap().is_empty());
    assert!(db.all_objectives().unwrap().is_empty());
}
