//! Domain models for Cadence

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Completion state of a logged unit of work
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WorkStatus {
    /// Scheduled but not started
    Planned,
    /// Currently being worked on
    #[default]
    InProgress,
    /// Finished
    Completed,
}

impl WorkStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Planned => "planned",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }
}

impl std::str::FromStr for WorkStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "planned" => Ok(Self::Planned),
            "in_progress" | "in-progress" => Ok(Self::InProgress),
            "completed" | "done" => Ok(Self::Completed),
            _ => Err(format!("Unknown work status: {}", s)),
        }
    }
}

impl std::fmt::Display for WorkStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A logged unit of work
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkRecord {
    pub id: i64,
    /// When the work was logged
    pub logged_at: DateTime<Utc>,
    /// User who logged it
    pub user: String,
    /// Owning department
    pub department: String,
    /// Project this work belongs to, if any
    pub project_id: Option<i64>,
    /// Duration in hours, if tracked
    pub hours: Option<f64>,
    pub status: WorkStatus,
    pub description: String,
    /// Hash for import deduplication (absent for manually logged entries)
    pub import_hash: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl WorkRecord {
    pub fn is_completed(&self) -> bool {
        self.status == WorkStatus::Completed
    }
}

/// A new work record before insertion
#[derive(Debug, Clone)]
pub struct NewWorkRecord {
    pub logged_at: DateTime<Utc>,
    pub user: String,
    pub department: String,
    pub project_id: Option<i64>,
    pub hours: Option<f64>,
    pub status: WorkStatus,
    pub description: String,
    pub import_hash: Option<String>,
}

/// Project lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Planning,
    #[default]
    Active,
    OnHold,
    Completed,
    Cancelled,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Planning => "planning",
            Self::Active => "active",
            Self::OnHold => "on_hold",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl std::str::FromStr for ProjectStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "planning" => Ok(Self::Planning),
            "active" => Ok(Self::Active),
            "on_hold" | "on-hold" | "onhold" => Ok(Self::OnHold),
            "completed" => Ok(Self::Completed),
            "cancelled" | "canceled" => Ok(Self::Cancelled),
            _ => Err(format!("Unknown project status: {}", s)),
        }
    }
}

impl std::fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A named initiative work records roll up to
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub id: i64,
    pub name: String,
    pub status: ProjectStatus,
    pub starts_on: NaiveDate,
    /// Planned end date; open-ended when absent
    pub ends_on: Option<NaiveDate>,
    pub departments: Vec<String>,
    pub members: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// A new project before insertion
#[derive(Debug, Clone)]
pub struct NewProject {
    pub name: String,
    pub status: ProjectStatus,
    pub starts_on: NaiveDate,
    pub ends_on: Option<NaiveDate>,
    pub departments: Vec<String>,
    pub members: Vec<String>,
}

/// A goal with measurable progress toward a target
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectiveRecord {
    pub id: i64,
    pub title: String,
    /// Current progress value, in the same unit as `target`
    pub progress: f64,
    pub target: f64,
    pub owner: Option<String>,
    /// Optional time box; an objective without one is active in every window
    pub period_start: Option<NaiveDate>,
    pub period_end: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl ObjectiveRecord {
    /// Progress-to-target ratio, or None when the target is unusable
    pub fn completion_ratio(&self) -> Option<f64> {
        if self.target > 0.0 {
            Some(self.progress / self.target)
        } else {
            None
        }
    }
}

/// A new objective before insertion
#[derive(Debug, Clone)]
pub struct NewObjective {
    pub title: String,
    pub progress: f64,
    pub target: f64,
    pub owner: Option<String>,
    pub period_start: Option<NaiveDate>,
    pub period_end: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_work_status_round_trip() {
        assert_eq!(WorkStatus::Completed.as_str(), "completed");
        assert_eq!(
            WorkStatus::from_str("in_progress").unwrap(),
            WorkStatus::InProgress
        );
        assert_eq!(WorkStatus::from_str("done").unwrap(), WorkStatus::Completed);
        assert!(WorkStatus::from_str("bogus").is_err());
    }

    #[test]
    fn test_project_status_round_trip() {
        for status in [
            ProjectStatus::Planning,
            ProjectStatus::Active,
            ProjectStatus::OnHold,
            ProjectStatus::Completed,
            ProjectStatus::Cancelled,
        ] {
            assert_eq!(ProjectStatus::from_str(status.as_str()).unwrap(), status);
        }
    }

    #[test]
    fn test_completion_ratio() {
        let objective = ObjectiveRecord {
            id: 1,
            title: "Ship v2".to_string(),
            progress: 30.0,
            target: 100.0,
            owner: None,
            period_start: None,
            period_end: None,
            created_at: Utc::now(),
        };
        assert_eq!(objective.completion_ratio(), Some(0.3));

        let broken = ObjectiveRecord {
            target: 0.0,
            ..objective
        };
        assert_eq!(broken.completion_ratio(), None);
    }
}
