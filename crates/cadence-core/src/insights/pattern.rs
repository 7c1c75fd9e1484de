//! Pattern Detector
//!
//! Surfaces structural signals in the current window that are not tied to
//! a single period-over-period delta:
//! - work submissions concentrated on one day of the week;
//! - one project absorbing most of the logged work while others starve.
//!
//! Patterns are low priority by default; a pattern whose subject already
//! appears in a risk finding from this run is escalated to medium.

use std::collections::BTreeMap;

use chrono::Datelike;

use super::engine::{AnalysisContext, Detector};
use super::types::{Finding, InsightType, Priority, RelatedItem};

/// Detector for recurring structural signals
pub struct PatternDetector {
    /// Share of submissions on a single weekday that counts as concentration
    concentration: f64,
    /// Share of project-linked work one project must absorb to be dominant
    dominance: f64,
    /// Minimum records in the window before any pattern is meaningful
    min_records: usize,
}

impl PatternDetector {
    pub fn new() -> Self {
        Self {
            concentration: 0.4,
            dominance: 0.6,
            min_records: 5,
        }
    }

    pub fn with_thresholds(concentration: f64, dominance: f64, min_records: usize) -> Self {
        Self {
            concentration,
            dominance,
            min_records,
        }
    }

    fn weekday_concentration(&self, ctx: &AnalysisContext, prior: &[Finding]) -> Option<Finding> {
        if ctx.current_work.len() < self.min_records {
            return None;
        }

        let mut by_weekday: BTreeMap<u8, usize> = BTreeMap::new();
        for record in &ctx.current_work {
            *by_weekday
                .entry(record.logged_at.weekday().num_days_from_monday() as u8)
                .or_insert(0) += 1;
        }

        let (&peak_day, &peak_count) = by_weekday.iter().max_by_key(|(_, &count)| count)?;
        let share = peak_count as f64 / ctx.current_work.len() as f64;
        if share < self.concentration {
            return None;
        }

        let weekday = weekday_name(peak_day);

        // Concentration that involves an already-flagged project is a
        // stronger signal than a standalone scheduling quirk
        let flagged_projects = risk_related_names(prior, "project");
        let correlates = ctx.current_work.iter().any(|w| {
            w.logged_at.weekday().num_days_from_monday() as u8 == peak_day
                && w.project_id
                    .and_then(|id| ctx.project_name(id))
                    .is_some_and(|name| flagged_projects.contains(&name.to_string()))
        });

        let priority = if correlates {
            Priority::Medium
        } else {
            Priority::Low
        };

        Some(
            Finding::new(
                InsightType::Pattern,
                priority,
                format!("Work clusters on {}", weekday),
                format!(
                    "{:.0}% of work entries this {} period were logged on a {}",
                    share * 100.0,
                    ctx.period,
                    weekday
                ),
            )
            .with_impact(
                "Batch logging hides when work actually happened and makes \
                 weekly metrics spiky",
            )
            .with_actions(vec![
                "Encourage logging work the day it happens".to_string(),
                format!("Check whether {} is a reporting-deadline artifact", weekday),
            ])
            .with_related(vec![RelatedItem::new("weekday", weekday)]),
        )
    }

    fn project_dominance(&self, ctx: &AnalysisContext, prior: &[Finding]) -> Option<Finding> {
        let linked: Vec<_> = ctx
            .current_work
            .iter()
            .filter_map(|w| w.project_id)
            .collect();
        if linked.len() < self.min_records {
            return None;
        }

        let mut by_project: BTreeMap<i64, usize> = BTreeMap::new();
        for id in &linked {
            *by_project.entry(*id).or_insert(0) += 1;
        }
        if by_project.len() < 2 {
            return None;
        }

        let (&dominant_id, &dominant_count) = by_project.iter().max_by_key(|(_, &count)| count)?;
        let share = dominant_count as f64 / linked.len() as f64;
        if share < self.dominance {
            return None;
        }

        let name = ctx.project_name(dominant_id)?.to_string();

        let flagged = risk_related_names(prior, "project");
        let priority = if flagged.iter().any(|f| f != &name) {
            // Starvation pattern plus an already-stalled sibling project
            Priority::Medium
        } else {
            Priority::Low
        };

        Some(
            Finding::new(
                InsightType::Pattern,
                priority,
                format!("{} is absorbing most of the work", name),
                format!(
                    "{:.0}% of project-linked work this {} period went to {} \
                     while {} other project(s) were active",
                    share * 100.0,
                    ctx.period,
                    name,
                    by_project.len() - 1
                ),
            )
            .with_impact(
                "Imbalance this strong usually means other projects are \
                 quietly starved of attention",
            )
            .with_actions(vec![
                "Review whether the imbalance matches current priorities".to_string(),
                "Rebalance assignments if the other projects still matter".to_string(),
            ])
            .with_related(vec![RelatedItem::new("project", name)]),
        )
    }
}

impl Default for PatternDetector {
    fn default() -> Self {
        Self::new()
    }
}

/// Names referenced by risk findings already raised in this run
fn risk_related_names(prior: &[Finding], kind: &str) -> Vec<String> {
    prior
        .iter()
        .filter(|f| f.insight_type == InsightType::Risk)
        .flat_map(|f| f.related_items.iter())
        .filter(|r| r.kind == kind)
        .map(|r| r.name.clone())
        .collect()
}

fn weekday_name(days_from_monday: u8) -> &'static str {
    match days_from_monday {
        0 => "Monday",
        1 => "Tuesday",
        2 => "Wednesday",
        3 => "Thursday",
        4 => "Friday",
        5 => "Saturday",
        _ => "Sunday",
    }
}

impl Detector for PatternDetector {
    fn id(&self) -> InsightType {
        InsightType::Pattern
    }

    fn name(&self) -> &'static str {
        "Pattern"
    }

    fn detect(&self, ctx: &AnalysisContext, prior: &[Finding]) -> Vec<Finding> {
        let mut findings = Vec::new();
        if let Some(finding) = self.weekday_concentration(ctx, prior) {
            findings.push(finding);
        }
        if let Some(finding) = self.project_dominance(ctx, prior) {
            findings.push(finding);
        }
        findings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ProjectRecord, ProjectStatus, WorkRecord, WorkStatus};
    use crate::period::PeriodKind;
    use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};

    fn reference() -> DateTime<Utc> {
        // A Friday
        Utc.with_ymd_and_hms(2026, 4, 10, 18, 0, 0).unwrap()
    }

    fn work_at(logged_at: DateTime<Utc>, project_id: Option<i64>) -> WorkRecord {
        WorkRecord {
            id: 0,
            logged_at,
            user: "ada".to_string(),
            department: "Engineering".to_string(),
            project_id,
            hours: None,
            status: WorkStatus::Completed,
            description: "task".to_string(),
            import_hash: None,
            created_at: logged_at,
        }
    }

    fn project(id: i64, name: &str) -> ProjectRecord {
        ProjectRecord {
            id,
            name: name.to_string(),
            status: ProjectStatus::Active,
            starts_on: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            ends_on: None,
            departments: vec![],
            members: vec![],
            created_at: reference(),
        }
    }

    #[test]
    fn test_weekday_concentration_detected() {
        // 4 of 6 records land on the same Monday
        let monday = Utc.with_ymd_and_hms(2026, 4, 6, 10, 0, 0).unwrap();
        let mut records: Vec<WorkRecord> =
            (0..4).map(|i| work_at(monday + Duration::hours(i), None)).collect();
        records.push(work_at(reference() - Duration::days(1), None));
        records.push(work_at(reference() - Duration::days(2), None));

        let ctx = AnalysisContext::build(PeriodKind::Weekly, reference(), &records, &[], &[]);
        let findings = PatternDetector::new().detect(&ctx, &[]);

        let concentration = findings
            .iter()
            .find(|f| f.related_items.iter().any(|r| r.kind == "weekday"))
            .expect("weekday finding");
        assert_eq!(concentration.priority, Priority::Low);
        assert!(concentration.title.contains("Monday"));
    }

    #[test]
    fn test_concentration_escalates_when_correlated_with_risk() {
        let monday = Utc.with_ymd_and_hms(2026, 4, 6, 10, 0, 0).unwrap();
        let mut records: Vec<WorkRecord> = (0..4)
            .map(|i| work_at(monday + Duration::hours(i), Some(1)))
            .collect();
        records.push(work_at(reference() - Duration::days(1), None));
        records.push(work_at(reference() - Duration::days(2), None));

        let projects = vec![project(1, "Atlas")];
        let ctx = AnalysisContext::build(
            PeriodKind::Weekly,
            reference(),
            &records,
            &projects,
            &[],
        );

        let prior = vec![Finding::new(
            InsightType::Risk,
            Priority::High,
            "Atlas has stalled",
            "no work",
        )
        .with_related(vec![RelatedItem::new("project", "Atlas")])];

        let findings = PatternDetector::new().detect(&ctx, &prior);
        let concentration = findings
            .iter()
            .find(|f| f.related_items.iter().any(|r| r.kind == "weekday"))
            .expect("weekday finding");
        assert_eq!(concentration.priority, Priority::Medium);
    }

    #[test]
    fn test_project_dominance_detected() {
        let projects = vec![project(1, "Atlas"), project(2, "Borealis")];
        let mut records: Vec<WorkRecord> = (0..3)
            .map(|i| work_at(reference() - Duration::days(1 + i % 3), Some(1)))
            .collect();
        // Spread over distinct days so no weekday concentration fires
        records.push(work_at(reference() - Duration::days(4), Some(1)));
        records.push(work_at(reference() - Duration::days(5), Some(1)));
        records.push(work_at(reference() - Duration::days(6), Some(2)));

        let ctx = AnalysisContext::build(
            PeriodKind::Weekly,
            reference(),
            &records,
            &projects,
            &[],
        );
        let findings = PatternDetector::new().detect(&ctx, &[]);

        let dominance = findings
            .iter()
            .find(|f| f.related_items.iter().any(|r| r.kind == "project"))
            .expect("dominance finding");
        assert!(dominance.title.contains("Atlas"));
        assert_eq!(dominance.priority, Priority::Low);
    }

    #[test]
    fn test_small_windows_produce_no_patterns() {
        let records = vec![
            work_at(reference() - Duration::days(1), Some(1)),
            work_at(reference() - Duration::days(1), Some(1)),
        ];
        let projects = vec![project(1, "Atlas")];
        let ctx = AnalysisContext::build(
            PeriodKind::Weekly,
            reference(),
            &records,
            &projects,
            &[],
        );

        assert!(PatternDetector::new().detect(&ctx, &[]).is_empty());
    }
}
