//! Performance Detector
//!
//! Compares aggregate work metrics between the current and previous
//! windows: entries logged, entries completed, and hours logged. A metric
//! that moves more than the threshold produces one finding with a full
//! metrics block; a metric that goes from nothing to something produces a
//! qualitative "new activity" finding instead of an infinite percentage.

use crate::models::WorkRecord;

use super::engine::{AnalysisContext, Detector};
use super::types::{Finding, InsightMetrics, InsightType, Priority, RelatedItem};

/// Detector for period-over-period changes in tracked work metrics
pub struct PerformanceDetector {
    /// Minimum percent change magnitude to report (default 15%)
    min_percent_change: f64,
    /// Change magnitude that upgrades the finding to high (default 30%)
    high_percent_change: f64,
}

impl PerformanceDetector {
    pub fn new() -> Self {
        Self {
            min_percent_change: 15.0,
            high_percent_change: 30.0,
        }
    }

    pub fn with_thresholds(min_percent: f64, high_percent: f64) -> Self {
        Self {
            min_percent_change: min_percent,
            high_percent_change: high_percent,
        }
    }

    fn finding_for_metric(&self, metric: &TrackedMetric, ctx: &AnalysisContext) -> Option<Finding> {
        let current = metric.current;
        let previous = metric.previous;

        if current == 0.0 && previous == 0.0 {
            return None;
        }

        let Some(metrics) = InsightMetrics::comparing(current, previous) else {
            // Previous window had nothing. Surface new activity
            // qualitatively, without a numeric comparison block.
            return Some(
                Finding::new(
                    InsightType::Performance,
                    Priority::Medium,
                    format!("New activity: {}", metric.label),
                    format!(
                        "{} {} this {} period after none in the previous one",
                        metric.format_value(current),
                        metric.label,
                        ctx.period
                    ),
                )
                .with_impact(
                    "A metric starting from zero usually means a new team, project, \
                     or reporting habit worth confirming",
                )
                .with_actions(vec![
                    "Confirm the new activity is expected".to_string(),
                    "Check whether earlier periods are missing data".to_string(),
                ])
                .with_related(vec![RelatedItem::new("metric", metric.key)]),
            );
        };

        if metrics.change.abs() < self.min_percent_change {
            return None;
        }

        let priority = if metrics.change.abs() >= self.high_percent_change {
            Priority::High
        } else {
            Priority::Medium
        };

        let direction = if metrics.change >= 0.0 { "up" } else { "down" };
        let title = format!(
            "{} {} {:.0}%",
            metric.title_label(),
            direction,
            metrics.change.abs()
        );
        let description = format!(
            "{} this {} period vs {} in the previous one",
            metric.format_value(current),
            ctx.period,
            metric.format_value(previous),
        );

        let impact = if metrics.change >= 0.0 {
            format!(
                "Sustained growth in {} suggests capacity or scope increased; \
                 plan around the new baseline",
                metric.label
            )
        } else {
            format!(
                "A drop in {} this size usually precedes missed commitments \
                 if it continues",
                metric.label
            )
        };

        let actions = if metrics.change >= 0.0 {
            vec![
                "Verify the increase reflects real output, not double logging".to_string(),
                "Share what changed with other teams".to_string(),
            ]
        } else {
            vec![
                "Review blockers with the affected teams".to_string(),
                "Compare staffing and time off against the previous period".to_string(),
            ]
        };

        Some(
            Finding::new(InsightType::Performance, priority, title, description)
                .with_metrics(metrics)
                .with_impact(impact)
                .with_actions(actions)
                .with_related(vec![RelatedItem::new("metric", metric.key)]),
        )
    }
}

impl Default for PerformanceDetector {
    fn default() -> Self {
        Self::new()
    }
}

/// One aggregate metric tracked across both windows
struct TrackedMetric {
    key: &'static str,
    label: &'static str,
    current: f64,
    previous: f64,
    is_hours: bool,
}

impl TrackedMetric {
    fn format_value(&self, value: f64) -> String {
        if self.is_hours {
            format!("{:.1} hours", value)
        } else {
            format!("{:.0} entries", value)
        }
    }

    fn title_label(&self) -> String {
        let mut label = self.label.to_string();
        if let Some(first) = label.get_mut(0..1) {
            first.make_ascii_uppercase();
        }
        label
    }
}

fn completed_count(records: &[WorkRecord]) -> f64 {
    records.iter().filter(|r| r.is_completed()).count() as f64
}

/// Sum of logged hours; records without a duration are skipped
fn hours_logged(records: &[WorkRecord]) -> f64 {
    records.iter().filter_map(|r| r.hours).sum()
}

impl Detector for PerformanceDetector {
    fn id(&self) -> InsightType {
        InsightType::Performance
    }

    fn name(&self) -> &'static str {
        "Performance"
    }

    fn detect(&self, ctx: &AnalysisContext, _prior: &[Finding]) -> Vec<Finding> {
        let metrics = [
            TrackedMetric {
                key: "work_volume",
                label: "work entries logged",
                current: ctx.current_work.len() as f64,
                previous: ctx.previous_work.len() as f64,
                is_hours: false,
            },
            TrackedMetric {
                key: "completed_work",
                label: "work entries completed",
                current: completed_count(&ctx.current_work),
                previous: completed_count(&ctx.previous_work),
                is_hours: false,
            },
            TrackedMetric {
                key: "hours_logged",
                label: "hours logged",
                current: hours_logged(&ctx.current_work),
                previous: hours_logged(&ctx.previous_work),
                is_hours: true,
            },
        ];

        metrics
            .iter()
            .filter_map(|m| self.finding_for_metric(m, ctx))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WorkStatus;
    use crate::period::PeriodKind;
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn reference() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 4, 10, 9, 0, 0).unwrap()
    }

    fn work_at(logged_at: DateTime<Utc>, status: WorkStatus) -> WorkRecord {
        WorkRecord {
            id: 0,
            logged_at,
            user: "ada".to_string(),
            department: "Engineering".to_string(),
            project_id: None,
            hours: Some(2.0),
            status,
            description: "task".to_string(),
            import_hash: None,
            created_at: logged_at,
        }
    }

    fn context(current: usize, previous: usize) -> AnalysisContext {
        let reference = reference();
        let mut records = Vec::new();
        for i in 0..current {
            records.push(work_at(
                reference - Duration::hours(1 + i as i64 % 48),
                WorkStatus::Completed,
            ));
        }
        for i in 0..previous {
            records.push(work_at(
                reference - Duration::days(8) - Duration::hours(i as i64 % 48),
                WorkStatus::Completed,
            ));
        }
        AnalysisContext::build(PeriodKind::Weekly, reference, &records, &[], &[])
    }

    #[test]
    fn test_sixty_percent_rise_is_high_priority() {
        let ctx = context(16, 10);
        let detector = PerformanceDetector::new();
        let findings = detector.detect(&ctx, &[]);

        let volume = findings
            .iter()
            .find(|f| f.related_items.iter().any(|r| r.name == "completed_work"))
            .expect("completed-work finding");
        assert_eq!(volume.priority, Priority::High);

        let metrics = volume.metrics.as_ref().unwrap();
        assert!((metrics.change - 60.0).abs() < 1e-9);
        assert_eq!(metrics.change_label, "+60%");
        assert!(metrics.change.is_finite());
    }

    #[test]
    fn test_small_change_is_ignored() {
        let ctx = context(10, 10);
        let detector = PerformanceDetector::new();
        assert!(detector.detect(&ctx, &[]).is_empty());
    }

    #[test]
    fn test_moderate_change_is_medium_priority() {
        // 12 vs 10 = +20%: above the 15% floor, below the 30% high bar
        let ctx = context(12, 10);
        let detector = PerformanceDetector::new();
        let findings = detector.detect(&ctx, &[]);

        assert!(!findings.is_empty());
        assert!(findings.iter().all(|f| f.priority == Priority::Medium));
    }

    #[test]
    fn test_new_activity_has_no_numeric_metrics() {
        let ctx = context(5, 0);
        let detector = PerformanceDetector::new();
        let findings = detector.detect(&ctx, &[]);

        assert!(!findings.is_empty());
        for finding in &findings {
            assert!(finding.metrics.is_none());
            assert!(finding.title.starts_with("New activity"));
            assert_eq!(finding.priority, Priority::Medium);
        }
    }

    #[test]
    fn test_empty_windows_yield_nothing() {
        let ctx = context(0, 0);
        let detector = PerformanceDetector::new();
        assert!(detector.detect(&ctx, &[]).is_empty());
    }

    #[test]
    fn test_decline_direction_in_title() {
        let ctx = context(5, 10);
        let detector = PerformanceDetector::new();
        let findings = detector.detect(&ctx, &[]);

        let volume = findings
            .iter()
            .find(|f| f.related_items.iter().any(|r| r.name == "work_volume"))
            .unwrap();
        assert!(volume.title.contains("down"));
        assert_eq!(volume.metrics.as_ref().unwrap().change_label, "-50%");
    }
}
