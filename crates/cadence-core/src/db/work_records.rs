//! Work record operations

use rusqlite::{params, OptionalExtension, Row};
use std::str::FromStr;

use super::{parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::{NewWorkRecord, WorkRecord, WorkStatus};

fn work_record_from_row(row: &Row<'_>) -> rusqlite::Result<WorkRecord> {
    let logged_at: String = row.get("logged_at")?;
    let created_at: String = row.get("created_at")?;
    let status: String = row.get("status")?;

    Ok(WorkRecord {
        id: row.get("id")?,
        logged_at: parse_datetime(&logged_at),
        user: row.get("user")?,
        department: row.get("department")?,
        project_id: row.get("project_id")?,
        hours: row.get("hours")?,
        status: WorkStatus::from_str(&status).unwrap_or_default(),
        description: row.get("description")?,
        import_hash: row.get("import_hash")?,
        created_at: parse_datetime(&created_at),
    })
}

const WORK_COLUMNS: &str =
    "id, logged_at, user, department, project_id, hours, status, description, import_hash, created_at";

impl Database {
    /// Insert a work record.
    ///
    /// Records carrying an import hash are deduplicated: a second insert
    /// with the same hash returns None instead of a new id.
    pub fn insert_work_record(&self, record: &NewWorkRecord) -> Result<Option<i64>> {
        let conn = self.conn()?;

        if let Some(hash) = &record.import_hash {
            let existing: Option<i64> = conn
                .query_row(
                    "SELECT id FROM work_records WHERE import_hash = ?",
                    params![hash],
                    |row| row.get(0),
                )
                .optional()?;

            if existing.is_some() {
                return Ok(None);
            }
        }

        conn.execute(
            r#"
            INSERT INTO work_records (logged_at, user, department, project_id, hours, status, description, import_hash)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
            params![
                record.logged_at.to_rfc3339(),
                record.user,
                record.department,
                record.project_id,
                record.hours,
                record.status.as_str(),
                record.description,
                record.import_hash,
            ],
        )?;

        Ok(Some(conn.last_insert_rowid()))
    }

    /// List all work records, newest first (snapshot read for the engine)
    pub fn all_work_records(&self) -> Result<Vec<WorkRecord>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM work_records ORDER BY logged_at DESC",
            WORK_COLUMNS
        ))?;

        let records = stmt
            .query_map([], work_record_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(records)
    }

    /// List work records with pagination, newest first
    pub fn list_work_records(&self, limit: i64, offset: i64) -> Result<Vec<WorkRecord>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM work_records ORDER BY logged_at DESC LIMIT ? OFFSET ?",
            WORK_COLUMNS
        ))?;

        let records = stmt
            .query_map(params![limit, offset], work_record_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(records)
    }

    /// Get a single work record
    pub fn get_work_record(&self, id: i64) -> Result<Option<WorkRecord>> {
        let conn = self.conn()?;
        let record = conn
            .query_row(
                &format!("SELECT {} FROM work_records WHERE id = ?", WORK_COLUMNS),
                params![id],
                work_record_from_row,
            )
            .optional()?;
        Ok(record)
    }

    /// Delete a work record
    pub fn delete_work_record(&self, id: i64) -> Result<()> {
        let conn = self.conn()?;
        let deleted = conn.execute("DELETE FROM work_records WHERE id = ?", params![id])?;
        if deleted == 0 {
            return Err(Error::NotFound(format!("Work record {} not found", id)));
        }
        Ok(())
    }

    /// Count all work records
    pub fn count_work_records(&self) -> Result<i64> {
        let conn = self.conn()?;
        let count = conn.query_row("SELECT COUNT(*) FROM work_records", [], |row| row.get(0))?;
        Ok(count)
    }
}
