//! Opportunity Detector
//!
//! Finds entities (departments and individuals) whose completion rate has
//! been above the overall average by a margin for two consecutive windows.
//! One window above average is noise; two is a practice worth spreading.

use std::collections::BTreeMap;

use crate::models::WorkRecord;

use super::engine::{AnalysisContext, Detector};
use super::types::{Finding, InsightType, Priority, RelatedItem};

/// Detector for sustained above-average performance
pub struct OpportunityDetector {
    /// How far above the overall completion rate an entity must sit
    margin: f64,
    /// Minimum records per window for a rate to be meaningful
    min_records: usize,
}

impl OpportunityDetector {
    pub fn new() -> Self {
        Self {
            margin: 0.15,
            min_records: 3,
        }
    }

    pub fn with_thresholds(margin: f64, min_records: usize) -> Self {
        Self {
            margin,
            min_records,
        }
    }

    /// Completion rates keyed by entity, restricted to entities with
    /// enough records to be meaningful
    fn rates_by<F>(&self, records: &[WorkRecord], key: F) -> BTreeMap<String, f64>
    where
        F: Fn(&WorkRecord) -> Option<String>,
    {
        let mut totals: BTreeMap<String, (usize, usize)> = BTreeMap::new();
        for record in records {
            let Some(entity) = key(record) else {
                continue;
            };
            let entry = totals.entry(entity).or_insert((0, 0));
            entry.0 += 1;
            if record.is_completed() {
                entry.1 += 1;
            }
        }

        totals
            .into_iter()
            .filter(|(_, (total, _))| *total >= self.min_records)
            .map(|(entity, (total, completed))| (entity, completed as f64 / total as f64))
            .collect()
    }

    fn sustained_entities<F>(
        &self,
        ctx: &AnalysisContext,
        kind: &str,
        key: F,
    ) -> Vec<Finding>
    where
        F: Fn(&WorkRecord) -> Option<String> + Copy,
    {
        let Some(current_mean) = completion_rate(&ctx.current_work) else {
            return vec![];
        };
        let Some(previous_mean) = completion_rate(&ctx.previous_work) else {
            return vec![];
        };

        let current_rates = self.rates_by(&ctx.current_work, key);
        let previous_rates = self.rates_by(&ctx.previous_work, key);

        current_rates
            .iter()
            .filter_map(|(entity, &current_rate)| {
                let &previous_rate = previous_rates.get(entity)?;
                let sustained = current_rate >= current_mean + self.margin
                    && previous_rate >= previous_mean + self.margin;
                if !sustained {
                    return None;
                }

                Some(
                    Finding::new(
                        InsightType::Opportunity,
                        Priority::Medium,
                        format!("{} is outperforming", entity),
                        format!(
                            "{:.0}% completion this {} period ({:.0}% last) vs a {:.0}% overall average",
                            current_rate * 100.0,
                            ctx.period,
                            previous_rate * 100.0,
                            current_mean * 100.0,
                        ),
                    )
                    .with_impact(format!(
                        "Whatever {} is doing is working across two consecutive periods; \
                         it may transfer to other teams",
                        entity
                    ))
                    .with_actions(vec![
                        format!("Ask {} what changed in their workflow", entity),
                        "Consider routing stretch work their way".to_string(),
                    ])
                    .with_related(vec![RelatedItem::new(kind, entity.clone())]),
                )
            })
            .collect()
    }
}

impl Default for OpportunityDetector {
    fn default() -> Self {
        Self::new()
    }
}

/// Overall completion rate for a window, or None when the window is empty
fn completion_rate(records: &[WorkRecord]) -> Option<f64> {
    if records.is_empty() {
        return None;
    }
    let completed = records.iter().filter(|r| r.is_completed()).count();
    Some(completed as f64 / records.len() as f64)
}

impl Detector for OpportunityDetector {
    fn id(&self) -> InsightType {
        InsightType::Opportunity
    }

    fn name(&self) -> &'static str {
        "Opportunity"
    }

    fn detect(&self, ctx: &AnalysisContext, _prior: &[Finding]) -> Vec<Finding> {
        let mut findings =
            self.sustained_entities(ctx, "department", |r| Some(r.department.clone()));
        findings.extend(self.sustained_entities(ctx, "user", |r| Some(r.user.clone())));
        findings
    }
}
