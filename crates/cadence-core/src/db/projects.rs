//! Project operations

use chrono::NaiveDate;
use rusqlite::{params, OptionalExtension, Row};
use std::str::FromStr;

use super::{parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::{NewProject, ProjectRecord, ProjectStatus};

fn parse_date(value: Option<String>) -> Option<NaiveDate> {
    value.and_then(|s| NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok())
}

fn string_list(value: String) -> Vec<String> {
    serde_json::from_str(&value).unwrap_or_default()
}

fn project_from_row(row: &Row<'_>) -> rusqlite::Result<ProjectRecord> {
    let status: String = row.get("status")?;
    let starts_on: String = row.get("starts_on")?;
    let ends_on: Option<String> = row.get("ends_on")?;
    let departments: String = row.get("departments")?;
    let members: String = row.get("members")?;
    let created_at: String = row.get("created_at")?;

    Ok(ProjectRecord {
        id: row.get("id")?,
        name: row.get("name")?,
        status: ProjectStatus::from_str(&status).unwrap_or_default(),
        starts_on: NaiveDate::parse_from_str(&starts_on, "%Y-%m-%d")
            .unwrap_or_else(|_| chrono::Utc::now().date_naive()),
        ends_on: parse_date(ends_on),
        departments: string_list(departments),
        members: string_list(members),
        created_at: parse_datetime(&created_at),
    })
}

const PROJECT_COLUMNS: &str =
    "id, name, status, starts_on, ends_on, departments, members, created_at";

impl Database {
    /// Insert a project; the name must be unique
    pub fn insert_project(&self, project: &NewProject) -> Result<i64> {
        let conn = self.conn()?;

        conn.execute(
            r#"
            INSERT INTO projects (name, status, starts_on, ends_on, departments, members)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
            params![
                project.name,
                project.status.as_str(),
                project.starts_on.to_string(),
                project.ends_on.map(|d| d.to_string()),
                serde_json::to_string(&project.departments)?,
                serde_json::to_string(&project.members)?,
            ],
        )?;

        Ok(conn.last_insert_rowid())
    }

    /// List all projects, newest first
    pub fn all_projects(&self) -> Result<Vec<ProjectRecord>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM projects ORDER BY created_at DESC, id DESC",
            PROJECT_COLUMNS
        ))?;

        let projects = stmt
            .query_map([], project_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(projects)
    }

    /// Get a single project by id
    pub fn get_project(&self, id: i64) -> Result<Option<ProjectRecord>> {
        let conn = self.conn()?;
        let project = conn
            .query_row(
                &format!("SELECT {} FROM projects WHERE id = ?", PROJECT_COLUMNS),
                params![id],
                project_from_row,
            )
            .optional()?;
        Ok(project)
    }

    /// Get a single project by exact name
    pub fn get_project_by_name(&self, name: &str) -> Result<Option<ProjectRecord>> {
        let conn = self.conn()?;
        let project = conn
            .query_row(
                &format!("SELECT {} FROM projects WHERE name = ?", PROJECT_COLUMNS),
                params![name],
                project_from_row,
            )
            .optional()?;
        Ok(project)
    }

    /// Update a project's lifecycle status
    pub fn update_project_status(&self, id: i64, status: ProjectStatus) -> Result<()> {
        let conn = self.conn()?;
        let updated = conn.execute(
            "UPDATE projects SET status = ? WHERE id = ?",
            params![status.as_str(), id],
        )?;
        if updated == 0 {
            return Err(Error::NotFound(format!("Project {} not found", id)));
        }
        Ok(())
    }

    /// Count all projects
    pub fn count_projects(&self) -> Result<i64> {
        let conn = self.conn()?;
        let count = conn.query_row("SELECT COUNT(*) FROM projects", [], |row| row.get(0))?;
        Ok(count)
    }
}
