//! Insight Engine - orchestrates detection and aggregation
//!
//! One generation run: resolve the period windows, snapshot the record
//! store, partition records into the current and previous windows, run
//! every registered detector in order, then aggregate (dedup, rank, id,
//! summarize). The engine holds no mutable state; concurrent runs operate
//! on independent snapshots.

use chrono::{DateTime, Utc};

use crate::partition::{objectives_in_window, projects_in_window, work_in_window};
use crate::period::{resolve_windows, PeriodKind, PeriodWindows};
use crate::models::{ObjectiveRecord, ProjectRecord, WorkRecord};
use crate::store::RecordStore;
use crate::Result;

use super::opportunity::OpportunityDetector;
use super::pattern::PatternDetector;
use super::performance::PerformanceDetector;
use super::risk::RiskDetector;
use super::types::{Finding, Insight, InsightCollection, InsightSummary, InsightType};

/// Partitioned snapshot handed to detectors
pub struct AnalysisContext {
    pub period: PeriodKind,
    pub windows: PeriodWindows,
    /// Instant the windows were computed backward from
    pub reference: DateTime<Utc>,
    /// Work records in the current window
    pub current_work: Vec<WorkRecord>,
    /// Work records in the previous window
    pub previous_work: Vec<WorkRecord>,
    /// Projects whose span overlaps the current window
    pub current_projects: Vec<ProjectRecord>,
    /// Projects whose span overlaps the previous window
    pub previous_projects: Vec<ProjectRecord>,
    /// Objectives active in the current window
    pub objectives: Vec<ObjectiveRecord>,
}

impl AnalysisContext {
    /// Partition a full record snapshot into an analysis context
    pub fn build(
        period: PeriodKind,
        reference: DateTime<Utc>,
        work_records: &[WorkRecord],
        projects: &[ProjectRecord],
        objectives: &[ObjectiveRecord],
    ) -> Self {
        let windows = resolve_windows(period, reference);
        Self {
            period,
            windows,
            reference,
            current_work: work_in_window(work_records, &windows.current),
            previous_work: work_in_window(work_records, &windows.previous),
            current_projects: projects_in_window(projects, &windows.current),
            previous_projects: projects_in_window(projects, &windows.previous),
            objectives: objectives_in_window(objectives, &windows.current),
        }
    }

    /// Name of the project a work record points at, if the project is known
    pub fn project_name(&self, project_id: i64) -> Option<&str> {
        self.current_projects
            .iter()
            .chain(self.previous_projects.iter())
            .find(|p| p.id == project_id)
            .map(|p| p.name.as_str())
    }
}

/// Trait for insight detectors
///
/// Detectors are pure over the context: no I/O, no mutation, and empty
/// inputs yield empty output rather than an error. `prior` carries the
/// findings of detectors that ran earlier in the same run, for the few
/// signals whose priority depends on what was already raised.
pub trait Detector: Send + Sync {
    /// The insight type this detector produces
    fn id(&self) -> InsightType;

    /// Human-readable name
    fn name(&self) -> &'static str;

    /// Inspect the partitioned snapshot and produce findings
    fn detect(&self, ctx: &AnalysisContext, prior: &[Finding]) -> Vec<Finding>;
}

/// The main insight engine
pub struct InsightEngine {
    detectors: Vec<Box<dyn Detector>>,
}

impl Default for InsightEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightEngine {
    /// Create an engine with the built-in detectors.
    ///
    /// Registration order is evaluation order; pattern runs last so it can
    /// see the risk findings it correlates against.
    pub fn new() -> Self {
        let mut engine = Self { detectors: vec![] };

        engine.register(Box::new(PerformanceDetector::new()));
        engine.register(Box::new(RiskDetector::new()));
        engine.register(Box::new(OpportunityDetector::new()));
        engine.register(Box::new(PatternDetector::new()));

        engine
    }

    /// Register a detector
    pub fn register(&mut self, detector: Box<dyn Detector>) {
        self.detectors.push(detector);
    }

    /// Get the list of registered detector types
    pub fn detector_types(&self) -> Vec<InsightType> {
        self.detectors.iter().map(|d| d.id()).collect()
    }

    /// Run all detectors over a prepared context and aggregate the result
    pub fn run(&self, ctx: &AnalysisContext) -> InsightCollection {
        let mut all_findings: Vec<Finding> = vec![];

        for detector in &self.detectors {
            let findings = detector.detect(ctx, &all_findings);
            tracing::debug!(
                detector = detector.id().as_str(),
                count = findings.len(),
                period = ctx.period.as_str(),
                "Detector pass complete"
            );
            all_findings.extend(findings);
        }

        aggregate(all_findings)
    }

    /// Generate insights for a period, reading a fresh snapshot from the
    /// store. Store read failures propagate; empty data does not.
    pub async fn generate(
        &self,
        store: &dyn RecordStore,
        period: PeriodKind,
    ) -> Result<InsightCollection> {
        self.generate_at(store, period, Utc::now()).await
    }

    /// Generate insights for a period with an explicit reference instant
    pub async fn generate_at(
        &self,
        store: &dyn RecordStore,
        period: PeriodKind,
        reference: DateTime<Utc>,
    ) -> Result<InsightCollection> {
        let work_records = store.list_work_records().await?;
        let projects = store.list_projects().await?;
        let objectives = store.list_objectives().await?;

        let ctx = AnalysisContext::build(period, reference, &work_records, &projects, &objectives);
        let collection = self.run(&ctx);

        tracing::info!(
            period = period.as_str(),
            total = collection.summary.total,
            "Insight generation complete"
        );
        Ok(collection)
    }

    /// Generate insights over trailing 7-day windows
    pub async fn generate_weekly_insights(
        &self,
        store: &dyn RecordStore,
    ) -> Result<InsightCollection> {
        self.generate(store, PeriodKind::Weekly).await
    }

    /// Generate insights over trailing 30-day windows
    pub async fn generate_monthly_insights(
        &self,
        store: &dyn RecordStore,
    ) -> Result<InsightCollection> {
        self.generate(store, PeriodKind::Monthly).await
    }

    /// Generate insights over trailing 90-day windows
    pub async fn generate_quarterly_insights(
        &self,
        store: &dyn RecordStore,
    ) -> Result<InsightCollection> {
        self.generate(store, PeriodKind::Quarterly).await
    }
}

/// Collapse duplicates, rank, assign ids, and compute summary counts.
///
/// Duplicates (same type, identical related-items set) keep the
/// higher-priority finding; the earlier one wins a priority tie. The sort
/// is stable, so equal priorities stay in detector evaluation order.
fn aggregate(findings: Vec<Finding>) -> InsightCollection {
    let mut deduped: Vec<Finding> = Vec::with_capacity(findings.len());

    for finding in findings {
        // Findings with no related items never collapse into each other
        let duplicate_of = if finding.related_items.is_empty() {
            None
        } else {
            deduped
                .iter()
                .position(|kept| kept.dedup_key() == finding.dedup_key())
        };

        match duplicate_of {
            Some(index) => {
                if finding.priority.rank() > deduped[index].priority.rank() {
                    deduped[index] = finding;
                }
            }
            None => deduped.push(finding),
        }
    }

    deduped.sort_by(|a, b| b.priority.rank().cmp(&a.priority.rank()));

    let mut summary = InsightSummary::default();
    let mut sequences: std::collections::HashMap<InsightType, usize> =
        std::collections::HashMap::new();

    let insights: Vec<Insight> = deduped
        .into_iter()
        .map(|finding| {
            let seq = sequences.entry(finding.insight_type).or_insert(0);
            *seq += 1;
            let id = format!("{}-{}", finding.insight_type.as_str(), seq);

            summary.total += 1;
            summary.by_type.record(finding.insight_type);

            Insight::from_finding(id, finding)
        })
        .collect();

    InsightCollection { insights, summary }
}
