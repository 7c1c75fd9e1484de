//! Period resolution for comparative analysis
//!
//! A period kind selects a fixed window length. Windows are always computed
//! backward from the reference instant as trailing fixed-duration spans
//! (7 / 30 / 90 days), never snapped to calendar boundaries. `monthly` is a
//! 30-day window by policy, so boundary behavior is identical in February
//! and July.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Window length selector for comparative analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodKind {
    Weekly,
    Monthly,
    Quarterly,
}

impl PeriodKind {
    /// Window length in days
    pub fn window_days(&self) -> i64 {
        match self {
            Self::Weekly => 7,
            Self::Monthly => 30,
            Self::Quarterly => 90,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
        }
    }
}

impl std::str::FromStr for PeriodKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "weekly" | "week" => Ok(Self::Weekly),
            "monthly" | "month" => Ok(Self::Monthly),
            "quarterly" | "quarter" => Ok(Self::Quarterly),
            _ => Err(format!("Unknown period kind: {}", s)),
        }
    }
}

impl std::fmt::Display for PeriodKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A half-open date interval `[start, end)`
///
/// End-exclusive so that adjacent windows never double-count a boundary
/// instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Whether an instant falls inside `[start, end)`
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && instant < self.end
    }

    /// Whether a closed span `[span_start, span_end]` overlaps this window.
    /// An absent `span_end` means the span is open-ended.
    pub fn overlaps(&self, span_start: DateTime<Utc>, span_end: Option<DateTime<Utc>>) -> bool {
        if span_start >= self.end {
            return false;
        }
        match span_end {
            Some(end) => end >= self.start,
            None => true,
        }
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

/// Two disjoint, equal-length, contiguous windows for period-over-period
/// comparison: `previous.end == current.start`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodWindows {
    pub current: DateWindow,
    pub previous: DateWindow,
}

/// Resolve the current and previous analysis windows for a period kind,
/// computed backward from the reference instant
pub fn resolve_windows(kind: PeriodKind, reference: DateTime<Utc>) -> PeriodWindows {
    let length = Duration::days(kind.window_days());
    let current = DateWindow::new(reference - length, reference);
    let previous = DateWindow::new(current.start - length, current.start);
    PeriodWindows { current, previous }
}
