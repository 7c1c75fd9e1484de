//! CSV import for exported timesheets
//!
//! Expected header: `date,user,department,project,hours,status,description`.
//! The `project` column is matched by name against existing projects; an
//! unknown name leaves the record unlinked. Rows are deduplicated by a
//! SHA-256 hash so re-importing the same file is a no-op.

use chrono::NaiveDate;
use csv::ReaderBuilder;
use sha2::{Digest, Sha256};
use std::io::Read;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, warn};

use crate::db::Database;
use crate::error::{Error, Result};
use crate::models::{NewWorkRecord, WorkStatus};

/// Outcome of one import run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportStats {
    /// Rows inserted
    pub inserted: usize,
    /// Rows skipped as duplicates of previously imported rows
    pub skipped: usize,
    /// Rows dropped because they could not be parsed
    pub failed: usize,
}

/// Generate a unique hash for row deduplication
fn row_hash(date: &NaiveDate, user: &str, project: &str, hours: &str, description: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(date.to_string().as_bytes());
    hasher.update(user.as_bytes());
    hasher.update(project.as_bytes());
    hasher.update(hours.as_bytes());
    hasher.update(description.as_bytes());
    hex::encode(hasher.finalize())
}

/// Parse timesheet CSV data into work records ready for insertion.
///
/// Malformed rows are counted and skipped, never fatal; `failed` in the
/// returned stats tells the caller how many were dropped.
pub fn parse_timesheet<R: Read>(
    reader: R,
    db: &Database,
) -> Result<(Vec<NewWorkRecord>, usize)> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let column = |name: &str| headers.iter().position(|h| h.eq_ignore_ascii_case(name));

    let date_col = column("date").ok_or_else(|| Error::Import("Missing 'date' column".into()))?;
    let user_col = column("user").ok_or_else(|| Error::Import("Missing 'user' column".into()))?;
    let department_col = column("department")
        .ok_or_else(|| Error::Import("Missing 'department' column".into()))?;
    let project_col = column("project");
    let hours_col = column("hours");
    let status_col = column("status");
    let description_col = column("description");

    let mut records = Vec::new();
    let mut failed = 0usize;

    for (index, result) in rdr.records().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                warn!(row = index + 1, error = %e, "Skipping unreadable timesheet row");
                failed += 1;
                continue;
            }
        };

        let field = |col: Option<usize>| col.and_then(|c| record.get(c)).unwrap_or("");

        let date_str = field(Some(date_col));
        let date = match NaiveDate::parse_from_str(date_str, "%Y-%m-%d") {
            Ok(date) => date,
            Err(_) => {
                warn!(row = index + 1, date = date_str, "Skipping row with bad date");
                failed += 1;
                continue;
            }
        };

        let user = field(Some(user_col)).to_string();
        let department = field(Some(department_col)).to_string();
        if user.is_empty() || department.is_empty() {
            warn!(row = index + 1, "Skipping row missing user or department");
            failed += 1;
            continue;
        }

        let project_name = field(project_col).to_string();
        let project_id = if project_name.is_empty() {
            None
        } else {
            match db.get_project_by_name(&project_name)? {
                Some(project) => Some(project.id),
                None => {
                    debug!(project = project_name, "Unknown project name, leaving unlinked");
                    None
                }
            }
        };

        let hours_str = field(hours_col);
        let hours = if hours_str.is_empty() {
            None
        } else {
            match hours_str.parse::<f64>() {
                Ok(h) if h >= 0.0 => Some(h),
                _ => {
                    warn!(row = index + 1, hours = hours_str, "Skipping row with bad hours");
                    failed += 1;
                    continue;
                }
            }
        };

        let status = WorkStatus::from_str(field(status_col)).unwrap_or_default();
        let description = field(description_col).to_string();

        let hash = row_hash(&date, &user, &project_name, hours_str, &description);

        records.push(NewWorkRecord {
            logged_at: date
                .and_hms_opt(0, 0, 0)
                .expect("midnight is always valid")
                .and_utc(),
            user,
            department,
            project_id,
            hours,
            status,
            description,
            import_hash: Some(hash),
        });
    }

    Ok((records, failed))
}

/// Import a timesheet CSV file into the database
pub fn import_timesheet(db: &Database, path: &Path) -> Result<ImportStats> {
    let file = std::fs::File::open(path)?;
    let (records, failed) = parse_timesheet(file, db)?;

    let mut stats = ImportStats {
        failed,
        ..Default::default()
    };

    for record in &records {
        match db.insert_work_record(record)? {
            Some(_) => stats.inserted += 1,
            None => stats.skipped += 1,
        }
    }

    debug!(
        inserted = stats.inserted,
        skipped = stats.skipped,
        failed = stats.failed,
        "Timesheet import complete"
    );
    Ok(stats)
}
