//! Objective operations

use chrono::NaiveDate;
use rusqlite::{params, OptionalExtension, Row};

use super::{parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::{NewObjective, ObjectiveRecord};

fn parse_date(value: Option<String>) -> Option<NaiveDate> {
    value.and_then(|s| NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok())
}

fn objective_from_row(row: &Row<'_>) -> rusqlite::Result<ObjectiveRecord> {
    let period_start: Option<String> = row.get("period_start")?;
    let period_end: Option<String> = row.get("period_end")?;
    let created_at: String = row.get("created_at")?;

    Ok(ObjectiveRecord {
        id: row.get("id")?,
        title: row.get("title")?,
        progress: row.get("progress")?,
        target: row.get("target")?,
        owner: row.get("owner")?,
        period_start: parse_date(period_start),
        period_end: parse_date(period_end),
        created_at: parse_datetime(&created_at),
    })
}

const OBJECTIVE_COLUMNS: &str =
    "id, title, progress, target, owner, period_start, period_end, created_at";

impl Database {
    /// Insert an objective; the target must be positive
    pub fn insert_objective(&self, objective: &NewObjective) -> Result<i64> {
        if objective.target <= 0.0 {
            return Err(Error::InvalidData(
                "Objective target must be positive".to_string(),
            ));
        }

        let conn = self.conn()?;

        conn.execute(
            r#"
            INSERT INTO objectives (title, progress, target, owner, period_start, period_end)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
            params![
                objective.title,
                objective.progress,
                objective.target,
                objective.owner,
                objective.period_start.map(|d| d.to_string()),
                objective.period_end.map(|d| d.to_string()),
            ],
        )?;

        Ok(conn.last_insert_rowid())
    }

    /// List all objectives, newest first
    pub fn all_objectives(&self) -> Result<Vec<ObjectiveRecord>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM objectives ORDER BY created_at DESC, id DESC",
            OBJECTIVE_COLUMNS
        ))?;

        let objectives = stmt
            .query_map([], objective_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(objectives)
    }

    /// Get a single objective
    pub fn get_objective(&self, id: i64) -> Result<Option<ObjectiveRecord>> {
        let conn = self.conn()?;
        let objective = conn
            .query_row(
                &format!("SELECT {} FROM objectives WHERE id = ?", OBJECTIVE_COLUMNS),
                params![id],
                objective_from_row,
            )
            .optional()?;
        Ok(objective)
    }

    /// Update an objective's progress value
    pub fn update_objective_progress(&self, id: i64, progress: f64) -> Result<()> {
        let conn = self.conn()?;
        let updated = conn.execute(
            "UPDATE objectives SET progress = ? WHERE id = ?",
            params![progress, id],
        )?;
        if updated == 0 {
            return Err(Error::NotFound(format!("Objective {} not found", id)));
        }
        Ok(())
    }

    /// Count all objectives
    pub fn count_objectives(&self) -> Result<i64> {
        let conn = self.conn()?;
        let count = conn.query_row("SELECT COUNT(*) FROM objectives", [], |row| row.get(0))?;
        Ok(count)
    }
}
