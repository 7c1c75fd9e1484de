//! Cadence CLI - Work analytics and insights
//!
//! Usage:
//!   cadence init                      Initialize database
//!   cadence log "..." -u ada -d Eng   Log a unit of work
//!   cadence import --file sheet.csv   Import a timesheet
//!   cadence insights --period weekly  Generate insights
//!   cadence serve --port 3000         Start web server

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Init => commands::cmd_init(&cli.db),
        Commands::Log {
            user,
            department,
            project,
            hours,
            status,
            description,
        } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_log(
                &db,
                &user,
                &department,
                project.as_deref(),
                hours,
                &status,
                &description,
            )
        }
        Commands::Import { file } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_import(&db, &file)
        }
        Commands::Insights { period, json } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_insights(&db, &period, json).await
        }
        Commands::Work { action } => {
            let db = commands::open_db(&cli.db)?;
            match action {
                None | Some(WorkAction::List { limit: 20 }) => commands::cmd_work_list(&db, 20),
                Some(WorkAction::List { limit }) => commands::cmd_work_list(&db, limit),
                Some(WorkAction::Delete { id }) => commands::cmd_work_delete(&db, id),
            }
        }
        Commands::Projects { action } => {
            let db = commands::open_db(&cli.db)?;
            match action {
                None | Some(ProjectsAction::List) => commands::cmd_projects_list(&db),
                Some(ProjectsAction::Add {
                    name,
                    starts,
                    ends,
                    department,
                    member,
                }) => commands::cmd_projects_add(
                    &db,
                    &name,
                    starts.as_deref(),
                    ends.as_deref(),
                    department,
                    member,
                ),
                Some(ProjectsAction::Status { id, status }) => {
                    commands::cmd_projects_status(&db, id, &status)
                }
            }
        }
        Commands::Objectives { action } => {
            let db = commands::open_db(&cli.db)?;
            match action {
                None | Some(ObjectivesAction::List) => commands::cmd_objectives_list(&db),
                Some(ObjectivesAction::Add {
                    title,
                    target,
                    progress,
                    owner,
                    starts,
                    ends,
                }) => commands::cmd_objectives_add(
                    &db,
                    &title,
                    target,
                    progress,
                    owner.as_deref(),
                    starts.as_deref(),
                    ends.as_deref(),
                ),
                Some(ObjectivesAction::Progress { id, progress }) => {
                    commands::cmd_objectives_progress(&db, id, progress)
                }
            }
        }
        Commands::Status => commands::cmd_status(&cli.db),
        Commands::Serve {
            port,
            host,
            allow_origin,
        } => commands::cmd_serve(&cli.db, &host, port, allow_origin).await,
    }
}
