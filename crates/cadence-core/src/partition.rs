//! Record partitioning into analysis windows
//!
//! Pure functions: inputs are never mutated, outputs are owned collections.
//! Work records partition by their log timestamp against the half-open
//! window. Projects partition by span overlap (a project can be active
//! across many periods). Objectives without a time box are active in every
//! window.

use chrono::{Duration, NaiveDate};

use crate::models::{ObjectiveRecord, ProjectRecord, WorkRecord};
use crate::period::DateWindow;

/// Midnight UTC at the start of the given day
fn day_start(date: NaiveDate) -> chrono::DateTime<chrono::Utc> {
    date.and_hms_opt(0, 0, 0)
        .expect("midnight is always valid")
        .and_utc()
}

/// Exclusive end instant of the given day (start of the next day)
fn day_end(date: NaiveDate) -> chrono::DateTime<chrono::Utc> {
    day_start(date) + Duration::days(1)
}

/// Work records whose log timestamp falls within the window
pub fn work_in_window(records: &[WorkRecord], window: &DateWindow) -> Vec<WorkRecord> {
    records
        .iter()
        .filter(|r| window.contains(r.logged_at))
        .cloned()
        .collect()
}

/// Projects whose date span overlaps the window
pub fn projects_in_window(projects: &[ProjectRecord], window: &DateWindow) -> Vec<ProjectRecord> {
    projects
        .iter()
        .filter(|p| window.overlaps(day_start(p.starts_on), p.ends_on.map(day_end)))
        .cloned()
        .collect()
}

/// Objectives active during the window
///
/// An objective without a period association counts in every window; a
/// time-boxed one counts when its box overlaps the window.
pub fn objectives_in_window(
    objectives: &[ObjectiveRecord],
    window: &DateWindow,
) -> Vec<ObjectiveRecord> {
    objectives
        .iter()
        .filter(|o| match (o.period_start, o.period_end) {
            (None, None) => true,
            (start, end) => {
                let span_start = start.map(day_start).unwrap_or(window.start);
                window.overlaps(span_start, end.map(day_end))
            }
        })
        .cloned()
        .collect()
}
