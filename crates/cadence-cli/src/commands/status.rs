//! Status command

use std::path::Path;

use anyhow::Result;

use super::open_db;

pub fn cmd_status(db_path: &Path) -> Result<()> {
    let db = open_db(db_path)?;

    let work = db.count_work_records()?;
    let projects = db.count_projects()?;
    let objectives = db.count_objectives()?;

    let size = std::fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);

    println!("Cadence status");
    println!("   ─────────────────────────────");
    println!("   Database:     {}", db_path.display());
    println!("   Size:         {:.1} KB", size as f64 / 1024.0);
    println!("   Work records: {}", work);
    println!("   Projects:     {}", projects);
    println!("   Objectives:   {}", objectives);

    if work == 0 {
        println!();
        println!("No work logged yet. Try 'cadence import --file sheet.csv'.");
    }

    Ok(())
}
