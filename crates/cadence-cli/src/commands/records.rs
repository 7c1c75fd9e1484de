//! Work record, project, and objective management commands

use std::str::FromStr;

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};

use cadence_core::{Database, NewObjective, NewProject, ProjectStatus};

use super::truncate;

fn parse_date_flag(value: Option<&str>, flag: &str) -> Result<Option<NaiveDate>> {
    value
        .map(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
        .transpose()
        .with_context(|| format!("Invalid --{} date format (use YYYY-MM-DD)", flag))
}

pub fn cmd_work_list(db: &Database, limit: i64) -> Result<()> {
    let records = db.list_work_records(limit, 0)?;

    if records.is_empty() {
        println!("No work records yet. Log one with 'cadence log'.");
        return Ok(());
    }

    println!(
        "{:>5}  {:<16}  {:<12}  {:<12}  {:>5}  {:<11}  {}",
        "ID", "LOGGED", "USER", "DEPARTMENT", "HRS", "STATUS", "DESCRIPTION"
    );
    for record in records {
        println!(
            "{:>5}  {:<16}  {:<12}  {:<12}  {:>5}  {:<11}  {}",
            record.id,
            record.logged_at.format("%Y-%m-%d %H:%M"),
            truncate(&record.user, 12),
            truncate(&record.department, 12),
            record
                .hours
                .map(|h| format!("{:.1}", h))
                .unwrap_or_else(|| "-".to_string()),
            record.status,
            truncate(&record.description, 40),
        );
    }

    Ok(())
}

pub fn cmd_work_delete(db: &Database, id: i64) -> Result<()> {
    db.delete_work_record(id)?;
    println!("Deleted work record #{}", id);
    Ok(())
}

pub fn cmd_projects_list(db: &Database) -> Result<()> {
    let projects = db.all_projects()?;

    if projects.is_empty() {
        println!("No projects yet. Add one with 'cadence projects add'.");
        return Ok(());
    }

    println!(
        "{:>5}  {:<24}  {:<10}  {:<12}  {:<12}  {}",
        "ID", "NAME", "STATUS", "STARTS", "ENDS", "DEPARTMENTS"
    );
    for project in projects {
        println!(
            "{:>5}  {:<24}  {:<10}  {:<12}  {:<12}  {}",
            project.id,
            truncate(&project.name, 24),
            project.status,
            project.starts_on,
            project
                .ends_on
                .map(|d| d.to_string())
                .unwrap_or_else(|| "-".to_string()),
            project.departments.join(", "),
        );
    }

    Ok(())
}

pub fn cmd_projects_add(
    db: &Database,
    name: &str,
    starts: Option<&str>,
    ends: Option<&str>,
    departments: Vec<String>,
    members: Vec<String>,
) -> Result<()> {
    let starts_on = parse_date_flag(starts, "starts")?.unwrap_or_else(|| Utc::now().date_naive());
    let ends_on = parse_date_flag(ends, "ends")?;

    let id = db.insert_project(&NewProject {
        name: name.to_string(),
        status: ProjectStatus::Active,
        starts_on,
        ends_on,
        departments,
        members,
    })?;

    println!("Added project #{} '{}'", id, name);
    Ok(())
}

pub fn cmd_projects_status(db: &Database, id: i64, status: &str) -> Result<()> {
    let status = ProjectStatus::from_str(status).map_err(|e| anyhow::anyhow!(e))?;
    db.update_project_status(id, status)?;
    println!("Project #{} is now {}", id, status);
    Ok(())
}

pub fn cmd_objectives_list(db: &Database) -> Result<()> {
    let objectives = db.all_objectives()?;

    if objectives.is_empty() {
        println!("No objectives yet. Add one with 'cadence objectives add'.");
        return Ok(());
    }

    println!(
        "{:>5}  {:<32}  {:>8}  {:>8}  {:>6}  {:<12}  {}",
        "ID", "TITLE", "PROGRESS", "TARGET", "PCT", "DUE", "OWNER"
    );
    for objective in objectives {
        let pct = objective
            .completion_ratio()
            .map(|r| format!("{:.0}%", r * 100.0))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:>5}  {:<32}  {:>8.1}  {:>8.1}  {:>6}  {:<12}  {}",
            objective.id,
            truncate(&objective.title, 32),
            objective.progress,
            objective.target,
            pct,
            objective
                .period_end
                .map(|d| d.to_string())
                .unwrap_or_else(|| "-".to_string()),
            objective.owner.as_deref().unwrap_or("-"),
        );
    }

    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub fn cmd_objectives_add(
    db: &Database,
    title: &str,
    target: f64,
    progress: f64,
    owner: Option<&str>,
    starts: Option<&str>,
    ends: Option<&str>,
) -> Result<()> {
    if target <= 0.0 {
        anyhow::bail!("Target must be positive");
    }

    let id = db.insert_objective(&NewObjective {
        title: title.to_string(),
        progress,
        target,
        owner: owner.map(|s| s.to_string()),
        period_start: parse_date_flag(starts, "starts")?,
        period_end: parse_date_flag(ends, "ends")?,
    })?;

    println!("Added objective #{} '{}'", id, title);
    Ok(())
}

pub fn cmd_objectives_progress(db: &Database, id: i64, progress: f64) -> Result<()> {
    db.update_objective_progress(id, progress)?;

    let objective = db
        .get_objective(id)?
        .context("Objective disappeared after update")?;
    match objective.completion_ratio() {
        Some(ratio) => println!(
            "Objective #{} at {:.1}/{:.1} ({:.0}%)",
            id,
            objective.progress,
            objective.target,
            ratio * 100.0
        ),
        None => println!("Objective #{} updated", id),
    }

    Ok(())
}
