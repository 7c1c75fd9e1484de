//! Risk Detector
//!
//! Flags two conditions:
//! - an active project with zero associated work in the trailing
//!   sub-window (last 7 days), escalated to critical when the project's
//!   end date lands within the next period length;
//! - an objective below half of its target with less than one period
//!   length of runway left.

use chrono::Duration;

use crate::models::{ObjectiveRecord, ProjectRecord, ProjectStatus};
use crate::period::DateWindow;

use super::engine::{AnalysisContext, Detector};
use super::types::{Finding, InsightType, Priority, RelatedItem};

/// Detector for stalled projects and off-track objectives
pub struct RiskDetector {
    /// Length of the trailing sub-window checked for project activity
    stale_days: i64,
    /// Progress-to-target ratio below which an objective is off track
    progress_floor: f64,
}

impl RiskDetector {
    pub fn new() -> Self {
        Self {
            stale_days: 7,
            progress_floor: 0.5,
        }
    }

    pub fn with_thresholds(stale_days: i64, progress_floor: f64) -> Self {
        Self {
            stale_days,
            progress_floor,
        }
    }

    fn stalled_project_finding(
        &self,
        project: &ProjectRecord,
        ctx: &AnalysisContext,
    ) -> Option<Finding> {
        if project.status != ProjectStatus::Active {
            return None;
        }

        let trailing = DateWindow::new(
            ctx.reference - Duration::days(self.stale_days),
            ctx.reference,
        );
        let recent_work = ctx
            .current_work
            .iter()
            .filter(|w| w.project_id == Some(project.id))
            .filter(|w| trailing.contains(w.logged_at))
            .count();

        if recent_work > 0 {
            return None;
        }

        // End date inside the next period length makes the stall critical
        let period_days = ctx.period.window_days();
        let ends_soon = project.ends_on.is_some_and(|ends_on| {
            let days_left = (ends_on - ctx.reference.date_naive()).num_days();
            days_left >= 0 && days_left <= period_days
        });

        let (priority, impact) = if ends_soon {
            (
                Priority::Critical,
                format!(
                    "{} ends within the next {} days with no recent activity; \
                     the deadline is at immediate risk",
                    project.name, period_days
                ),
            )
        } else {
            (
                Priority::High,
                format!(
                    "{} is drifting; stalled projects rarely restart without \
                     intervention",
                    project.name
                ),
            )
        };

        let description = match project.ends_on {
            Some(ends_on) => format!(
                "No work logged against {} in the last {} days (ends {})",
                project.name,
                self.stale_days,
                ends_on.format("%b %e, %Y")
            ),
            None => format!(
                "No work logged against {} in the last {} days",
                project.name, self.stale_days
            ),
        };

        Some(
            Finding::new(
                InsightType::Risk,
                priority,
                format!("{} has stalled", project.name),
                description,
            )
            .with_impact(impact)
            .with_actions(vec![
                "Check in with the project members".to_string(),
                "Confirm the project is still staffed".to_string(),
                "Re-plan or put the project on hold explicitly".to_string(),
            ])
            .with_related(vec![RelatedItem::new("project", project.name.clone())]),
        )
    }

    fn off_track_objective_finding(
        &self,
        objective: &ObjectiveRecord,
        ctx: &AnalysisContext,
    ) -> Option<Finding> {
        // Records without a usable target are skipped, not errored
        let ratio = objective.completion_ratio()?;
        if ratio >= self.progress_floor {
            return None;
        }

        let period_end = objective.period_end?;
        let days_left = (period_end - ctx.reference.date_naive()).num_days();
        if days_left < 0 || days_left > ctx.period.window_days() {
            return None;
        }

        Some(
            Finding::new(
                InsightType::Risk,
                Priority::High,
                format!("Objective behind: {}", objective.title),
                format!(
                    "{:.0}% of target with {} days left (due {})",
                    ratio * 100.0,
                    days_left,
                    period_end.format("%b %e, %Y")
                ),
            )
            .with_impact(format!(
                "At the current pace \"{}\" will close at roughly {:.0}% of target",
                objective.title,
                ratio * 100.0
            ))
            .with_actions(vec![
                "Review what is blocking progress with the owner".to_string(),
                "Re-scope the target or extend the time box".to_string(),
            ])
            .with_related(vec![RelatedItem::new(
                "objective",
                objective.title.clone(),
            )]),
        )
    }
}

impl Default for RiskDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for RiskDetector {
    fn id(&self) -> InsightType {
        InsightType::Risk
    }

    fn name(&self) -> &'static str {
        "Risk"
    }

    fn detect(&self, ctx: &AnalysisContext, _prior: &[Finding]) -> Vec<Finding> {
        let mut findings: Vec<Finding> = ctx
            .current_projects
            .iter()
            .filter_map(|p| self.stalled_project_finding(p, ctx))
            .collect();

        findings.extend(
            ctx.objectives
                .iter()
                .filter_map(|o| self.off_track_objective_finding(o, ctx)),
        );

        findings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{WorkRecord, WorkStatus};
    use crate::period::PeriodKind;
    use chrono::{DateTime, NaiveDate, TimeZone, Utc};

    fn reference() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 4, 10, 9, 0, 0).unwrap()
    }

    fn project(id: i64, name: &str, ends_in_days: Option<i64>) -> ProjectRecord {
        ProjectRecord {
            id,
            name: name.to_string(),
            status: ProjectStatus::Active,
            starts_on: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            ends_on: ends_in_days.map(|d| reference().date_naive() + Duration::days(d)),
            departments: vec!["Engineering".to_string()],
            members: vec!["ada".to_string()],
            created_at: reference(),
        }
    }

    fn work_for(project_id: i64, days_ago: i64) -> WorkRecord {
        let logged_at = reference() - Duration::days(days_ago);
        WorkRecord {
            id: 0,
            logged_at,
            user: "ada".to_string(),
            department: "Engineering".to_string(),
            project_id: Some(project_id),
            hours: Some(3.0),
            status: WorkStatus::InProgress,
            description: "work".to_string(),
            import_hash: None,
            created_at: logged_at,
        }
    }

    #[test]
    fn test_stalled_project_ending_soon_is_critical() {
        // One record 2 days ago for another department's work, the flagged
        // project has nothing in the last 7 days and ends in 5
        let projects = vec![project(1, "Atlas", Some(5))];
        let work = vec![work_for(99, 2)];
        let ctx = AnalysisContext::build(
            PeriodKind::Weekly,
            reference(),
            &work,
            &projects,
            &[],
        );

        let findings = RiskDetector::new().detect(&ctx, &[]);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].priority, Priority::Critical);
        assert_eq!(findings[0].insight_type, InsightType::Risk);
        assert!(findings[0]
            .related_items
            .iter()
            .any(|r| r.kind == "project" && r.name == "Atlas"));
    }

    #[test]
    fn test_stalled_project_without_near_deadline_is_high() {
        let projects = vec![project(1, "Atlas", Some(60))];
        let ctx = AnalysisContext::build(PeriodKind::Weekly, reference(), &[], &projects, &[]);

        let findings = RiskDetector::new().detect(&ctx, &[]);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].priority, Priority::High);
    }

    #[test]
    fn test_recent_work_clears_the_stall() {
        let projects = vec![project(1, "Atlas", Some(5))];
        let work = vec![work_for(1, 2)];
        let ctx = AnalysisContext::build(
            PeriodKind::Weekly,
            reference(),
            &work,
            &projects,
            &[],
        );

        assert!(RiskDetector::new().detect(&ctx, &[]).is_empty());
    }

    #[test]
    fn test_non_active_projects_are_ignored() {
        let mut on_hold = project(1, "Atlas", Some(5));
        on_hold.status = ProjectStatus::OnHold;
        let ctx =
            AnalysisContext::build(PeriodKind::Weekly, reference(), &[], &[on_hold], &[]);

        assert!(RiskDetector::new().detect(&ctx, &[]).is_empty());
    }

    #[test]
    fn test_off_track_objective_with_short_runway() {
        let objective = ObjectiveRecord {
            id: 1,
            title: "Close 20 deals".to_string(),
            progress: 6.0,
            target: 20.0,
            owner: Some("grace".to_string()),
            period_start: Some(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()),
            period_end: Some(reference().date_naive() + Duration::days(4)),
            created_at: reference(),
        };
        let ctx = AnalysisContext::build(
            PeriodKind::Weekly,
            reference(),
            &[],
            &[],
            &[objective],
        );

        let findings = RiskDetector::new().detect(&ctx, &[]);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].priority, Priority::High);
        assert!(findings[0]
            .related_items
            .iter()
            .any(|r| r.kind == "objective"));
    }

    #[test]
    fn test_objective_with_long_runway_is_not_flagged() {
        let objective = ObjectiveRecord {
            id: 1,
            title: "Close 20 deals".to_string(),
            progress: 6.0,
            target: 20.0,
            owner: None,
            period_start: None,
            period_end: Some(reference().date_naive() + Duration::days(120)),
            created_at: reference(),
        };
        let ctx = AnalysisContext::build(
            PeriodKind::Weekly,
            reference(),
            &[],
            &[],
            &[objective],
        );

        assert!(RiskDetector::new().detect(&ctx, &[]).is_empty());
    }

    #[test]
    fn test_zero_target_objective_is_skipped_not_fatal() {
        let objective = ObjectiveRecord {
            id: 1,
            title: "Broken".to_string(),
            progress: 1.0,
            target: 0.0,
            owner: None,
            period_start: None,
            period_end: Some(reference().date_naive() + Duration::days(2)),
            created_at: reference(),
        };
        let ctx = AnalysisContext::build(
            PeriodKind::Weekly,
            reference(),
            &[],
            &[],
            &[objective],
        );

        assert!(RiskDetector::new().detect(&ctx, &[]).is_empty());
    }
}
