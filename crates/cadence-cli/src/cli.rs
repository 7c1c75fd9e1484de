//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI
//! arguments. The actual command implementations are in the `commands`
//! module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Cadence - Work analytics and period-over-period insights
#[derive(Parser)]
#[command(name = "cadence")]
#[command(about = "Work analytics dashboard backend", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path
    #[arg(long, default_value = "cadence.db", global = true)]
    pub db: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database
    Init,

    /// Log a unit of work
    Log {
        /// User logging the work
        #[arg(short, long)]
        user: String,

        /// Owning department
        #[arg(short, long)]
        department: String,

        /// Project name to link the work to
        #[arg(short, long)]
        project: Option<String>,

        /// Duration in hours
        #[arg(long)]
        hours: Option<f64>,

        /// Status: planned, in_progress, completed
        #[arg(short, long, default_value = "completed")]
        status: String,

        /// What was done
        description: String,
    },

    /// Import work records from a timesheet CSV
    Import {
        /// CSV file to import
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Generate insights for a period
    Insights {
        /// Period kind: weekly, monthly, quarterly
        #[arg(short, long, default_value = "weekly")]
        period: String,

        /// Emit the raw collection as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage work records
    Work {
        #[command(subcommand)]
        action: Option<WorkAction>,
    },

    /// Manage projects
    Projects {
        #[command(subcommand)]
        action: Option<ProjectsAction>,
    },

    /// Manage objectives
    Objectives {
        #[command(subcommand)]
        action: Option<ObjectivesAction>,
    },

    /// Show record counts and database info
    Status,

    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Allowed CORS origins (repeatable)
        #[arg(long)]
        allow_origin: Vec<String>,
    },
}

#[derive(Subcommand)]
pub enum WorkAction {
    /// List recent work records
    List {
        /// Maximum number of records to show
        #[arg(short, long, default_value = "20")]
        limit: i64,
    },

    /// Delete a work record
    Delete {
        /// Record ID
        id: i64,
    },
}

#[derive(Subcommand)]
pub enum ProjectsAction {
    /// List projects
    List,

    /// Add a project
    Add {
        /// Project name
        name: String,

        /// Start date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        starts: Option<String>,

        /// Planned end date (YYYY-MM-DD)
        #[arg(long)]
        ends: Option<String>,

        /// Owning departments (repeatable)
        #[arg(short, long)]
        department: Vec<String>,

        /// Member user names (repeatable)
        #[arg(short, long)]
        member: Vec<String>,
    },

    /// Change a project's status
    Status {
        /// Project ID
        id: i64,

        /// New status: planning, active, on_hold, completed, cancelled
        status: String,
    },
}

#[derive(Subcommand)]
pub enum ObjectivesAction {
    /// List objectives
    List,

    /// Add an objective
    Add {
        /// Objective title
        title: String,

        /// Target value
        #[arg(short, long)]
        target: f64,

        /// Starting progress value
        #[arg(long, default_value = "0")]
        progress: f64,

        /// Owner user name
        #[arg(short, long)]
        owner: Option<String>,

        /// Time box start (YYYY-MM-DD)
        #[arg(long)]
        starts: Option<String>,

        /// Time box end (YYYY-MM-DD)
        #[arg(long)]
        ends: Option<String>,
    },

    /// Update an objective's progress
    Progress {
        /// Objective ID
        id: i64,

        /// New progress value
        progress: f64,
    },
}
