//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `open_db` - Shared utility to open the database
//! - `cmd_init` - Initialize the database
//! - `cmd_log` - Log a single unit of work

use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use chrono::Utc;

use cadence_core::{Database, NewWorkRecord, WorkStatus};

/// Open the database, running migrations if needed
pub fn open_db(db_path: &Path) -> Result<Database> {
    let path_str = db_path.to_str().context("Database path is not valid UTF-8")?;
    tracing::debug!(db = path_str, "Opening database");
    Database::new(path_str).context("Failed to open database")
}

pub fn cmd_init(db_path: &Path) -> Result<()> {
    println!("Initializing database at {}...", db_path.display());

    open_db(db_path)?;

    println!("Database initialized successfully!");
    println!();
    println!("Next steps:");
    println!("  1. Add a project:      cadence projects add \"Atlas\"");
    println!("  2. Log work:           cadence log \"Fixed the build\" -u ada -d Engineering");
    println!("  3. Generate insights:  cadence insights --period weekly");

    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub fn cmd_log(
    db: &Database,
    user: &str,
    department: &str,
    project: Option<&str>,
    hours: Option<f64>,
    status: &str,
    description: &str,
) -> Result<()> {
    let status = WorkStatus::from_str(status).map_err(|e| anyhow::anyhow!(e))?;

    let project_id = match project {
        Some(name) => {
            let found = db
                .get_project_by_name(name)?
                .with_context(|| format!("No project named '{}'", name))?;
            Some(found.id)
        }
        None => None,
    };

    let id = db.insert_work_record(&NewWorkRecord {
        logged_at: Utc::now(),
        user: user.to_string(),
        department: department.to_string(),
        project_id,
        hours,
        status,
        description: description.to_string(),
        import_hash: None,
    })?;

    match id {
        Some(id) => println!("Logged work record #{}", id),
        None => println!("Skipped: identical record already exists"),
    }

    Ok(())
}
