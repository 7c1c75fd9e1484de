//! Core types for the Insight Engine

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Denominator floor for percentage-change math
const EPSILON: f64 = 1e-9;

/// Types of insights that can be generated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightType {
    /// Period-over-period change in a tracked work metric
    Performance,
    /// Project or objective in danger of stalling or missing its date
    Risk,
    /// Entity sustaining above-average performance
    Opportunity,
    /// Recurring structural signal not tied to a single delta
    Pattern,
}

impl InsightType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsightType::Performance => "performance",
            InsightType::Risk => "risk",
            InsightType::Opportunity => "opportunity",
            InsightType::Pattern => "pattern",
        }
    }
}

impl fmt::Display for InsightType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for InsightType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "performance" => Ok(InsightType::Performance),
            "risk" => Ok(InsightType::Risk),
            "opportunity" => Ok(InsightType::Opportunity),
            "pattern" => Ok(InsightType::Pattern),
            _ => Err(format!("Unknown insight type: {}", s)),
        }
    }
}

/// Urgency of an insight, drives sort order and visual treatment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Critical,
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Critical => "critical",
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }

    /// Numeric rank for sorting (higher = more urgent)
    pub fn rank(&self) -> u8 {
        match self {
            Priority::Critical => 4,
            Priority::High => 3,
            Priority::Medium => 2,
            Priority::Low => 1,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "critical" => Ok(Priority::Critical),
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            _ => Err(format!("Unknown priority: {}", s)),
        }
    }
}

/// Period-over-period comparison attached to an insight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightMetrics {
    pub current: f64,
    pub previous: f64,
    /// Percentage change from previous to current
    pub change: f64,
    /// Human-readable rendering of the change (e.g. "+60%")
    pub change_label: String,
}

impl InsightMetrics {
    /// Build a metrics block comparing two values.
    ///
    /// Returns None when the previous value is effectively zero: a jump
    /// from nothing is a qualitative "new activity" signal, not an
    /// infinite percentage.
    pub fn comparing(current: f64, previous: f64) -> Option<Self> {
        let change = percent_change(current, previous)?;
        let change_label = if change >= 0.0 {
            format!("+{:.0}%", change)
        } else {
            format!("{:.0}%", change)
        };
        Some(Self {
            current,
            previous,
            change,
            change_label,
        })
    }
}

/// Percentage change from previous to current, or None when the previous
/// value is too small to divide by
pub fn percent_change(current: f64, previous: f64) -> Option<f64> {
    if previous.abs() < EPSILON {
        return None;
    }
    Some((current - previous) / previous.max(EPSILON) * 100.0)
}

/// Reference back to a source record that triggered an insight
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RelatedItem {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
}

impl RelatedItem {
    pub fn new(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            name: name.into(),
        }
    }
}

/// A finding produced by a detector (before aggregation assigns ids)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finding {
    pub insight_type: InsightType,
    pub priority: Priority,
    pub title: String,
    pub description: String,
    /// Present only for period-over-period comparisons
    pub metrics: Option<InsightMetrics>,
    /// Expected consequence if acted on (or ignored)
    pub impact: String,
    /// Ordered recommended next steps
    pub suggested_actions: Vec<String>,
    /// Source records that triggered this finding
    pub related_items: Vec<RelatedItem>,
}

impl Finding {
    pub fn new(
        insight_type: InsightType,
        priority: Priority,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            insight_type,
            priority,
            title: title.into(),
            description: description.into(),
            metrics: None,
            impact: String::new(),
            suggested_actions: Vec::new(),
            related_items: Vec::new(),
        }
    }

    pub fn with_metrics(mut self, metrics: InsightMetrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn with_impact(mut self, impact: impl Into<String>) -> Self {
        self.impact = impact.into();
        self
    }

    pub fn with_actions(mut self, actions: Vec<String>) -> Self {
        self.suggested_actions = actions;
        self
    }

    pub fn with_related(mut self, items: Vec<RelatedItem>) -> Self {
        self.related_items = items;
        self
    }

    /// Key used by the aggregator to collapse duplicate findings: same
    /// type referencing the identical related-items set
    pub fn dedup_key(&self) -> (InsightType, Vec<RelatedItem>) {
        let mut items = self.related_items.clone();
        items.sort();
        (self.insight_type, items)
    }
}

/// A generated finding with its run-unique identifier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Insight {
    pub id: String,
    pub insight_type: InsightType,
    pub priority: Priority,
    pub title: String,
    pub description: String,
    pub metrics: Option<InsightMetrics>,
    pub impact: String,
    pub suggested_actions: Vec<String>,
    pub related_items: Vec<RelatedItem>,
}

impl Insight {
    pub fn from_finding(id: String, finding: Finding) -> Self {
        Self {
            id,
            insight_type: finding.insight_type,
            priority: finding.priority,
            title: finding.title,
            description: finding.description,
            metrics: finding.metrics,
            impact: finding.impact,
            suggested_actions: finding.suggested_actions,
            related_items: finding.related_items,
        }
    }
}

/// Per-type counts; every type key is always present
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeCounts {
    pub performance: usize,
    pub risk: usize,
    pub opportunity: usize,
    pub pattern: usize,
}

impl TypeCounts {
    pub fn record(&mut self, insight_type: InsightType) {
        match insight_type {
            InsightType::Performance => self.performance += 1,
            InsightType::Risk => self.risk += 1,
            InsightType::Opportunity => self.opportunity += 1,
            InsightType::Pattern => self.pattern += 1,
        }
    }

    pub fn get(&self, insight_type: InsightType) -> usize {
        match insight_type {
            InsightType::Performance => self.performance,
            InsightType::Risk => self.risk,
            InsightType::Opportunity => self.opportunity,
            InsightType::Pattern => self.pattern,
        }
    }

    pub fn total(&self) -> usize {
        self.performance + self.risk + self.opportunity + self.pattern
    }
}

/// Summary counts for one generation run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InsightSummary {
    pub total: usize,
    pub by_type: TypeCounts,
}

/// The full ranked output of one generation call
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InsightCollection {
    pub insights: Vec<Insight>,
    pub summary: InsightSummary,
}

impl InsightCollection {
    pub fn is_empty(&self) -> bool {
        self.insights.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insight_type_serialization() {
        assert_eq!(InsightType::Performance.as_str(), "performance");
        assert_eq!(
            InsightType::from_str("opportunity").unwrap(),
            InsightType::Opportunity
        );
        assert!(InsightType::from_str("hunch").is_err());
    }

    #[test]
    fn test_priority_rank() {
        assert!(Priority::Critical.rank() > Priority::High.rank());
        assert!(Priority::High.rank() > Priority::Medium.rank());
        assert!(Priority::Medium.rank() > Priority::Low.rank());
    }

    #[test]
    fn test_percent_change_guards_zero_denominator() {
        assert_eq!(percent_change(5.0, 0.0), None);
        assert_eq!(percent_change(16.0, 10.0), Some(60.0));
        let change = percent_change(8.0, 10.0).unwrap();
        assert!((change - -20.0).abs() < 1e-9);
    }

    #[test]
    fn test_metrics_comparing() {
        let metrics = InsightMetrics::comparing(16.0, 10.0).unwrap();
        assert_eq!(metrics.change_label, "+60%");
        assert!(metrics.change.is_finite());

        // Zero previous yields no numeric block rather than Infinity
        assert!(InsightMetrics::comparing(5.0, 0.0).is_none());
    }

    #[test]
    fn test_finding_builder_and_dedup_key() {
        let finding = Finding::new(
            InsightType::Risk,
            Priority::Critical,
            "Stalled project",
            "No work logged for Atlas in 7 days",
        )
        .with_impact("Atlas may miss its end date")
        .with_actions(vec!["Check in with the project lead".to_string()])
        .with_related(vec![
            RelatedItem::new("project", "Atlas"),
            RelatedItem::new("department", "Engineering"),
        ]);

        let other = Finding::new(
            InsightType::Risk,
            Priority::High,
            "Different title",
            "Different body",
        )
        .with_related(vec![
            RelatedItem::new("department", "Engineering"),
            RelatedItem::new("project", "Atlas"),
        ]);

        // Same type + same related set collapses regardless of item order
        assert_eq!(finding.dedup_key(), other.dedup_key());
    }

    #[test]
    fn test_related_item_serializes_with_type_key() {
        let item = RelatedItem::new("project", "Atlas");
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["type"], "project");
        assert_eq!(json["name"], "Atlas");
    }

    #[test]
    fn test_type_counts() {
        let mut counts = TypeCounts::default();
        counts.record(InsightType::Risk);
        counts.record(InsightType::Risk);
        counts.record(InsightType::Pattern);
        assert_eq!(counts.get(InsightType::Risk), 2);
        assert_eq!(counts.get(InsightType::Performance), 0);
        assert_eq!(counts.total(), 3);
    }
}
