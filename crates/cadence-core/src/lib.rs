//! Cadence Core Library
//!
//! Shared functionality for the Cadence work-analytics service:
//! - Embedded record store (work logs, projects, objectives)
//! - Period resolution and record partitioning
//! - Insight engine with pluggable detectors
//! - Timesheet CSV import

pub mod db;
pub mod error;
pub mod import;
pub mod insights;
pub mod models;
pub mod partition;
pub mod period;
pub mod store;

pub use db::Database;
pub use error::{Error, Result};
pub use import::{import_timesheet, ImportStats};
pub use insights::{
    AnalysisContext, Detector, Insight, InsightCollection, InsightEngine, InsightType, Priority,
};
pub use models::{
    NewObjective, NewProject, NewWorkRecord, ObjectiveRecord, ProjectRecord, ProjectStatus,
    WorkRecord, WorkStatus,
};
pub use period::{resolve_windows, DateWindow, PeriodKind, PeriodWindows};
pub use store::{MemoryStore, RecordStore};
