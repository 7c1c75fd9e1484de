//! Timesheet import command

use std::path::Path;

use anyhow::{Context, Result};

use cadence_core::{import_timesheet, Database};

pub fn cmd_import(db: &Database, file: &Path) -> Result<()> {
    println!("Importing timesheet from {}...", file.display());

    let stats = import_timesheet(db, file)
        .with_context(|| format!("Failed to import {}", file.display()))?;

    println!();
    println!("Import complete");
    println!("   Inserted:   {}", stats.inserted);
    println!("   Duplicates: {}", stats.skipped);
    if stats.failed > 0 {
        println!("   Dropped:    {} (malformed rows, see log)", stats.failed);
    }

    Ok(())
}
