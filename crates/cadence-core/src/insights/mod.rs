//! Insight Engine - Period-over-period work analytics
//!
//! The Insight Engine turns raw activity records (work entries, projects,
//! objectives) into a ranked collection of findings for the dashboard.
//! Each generation run compares a trailing window against the equal-length
//! window before it and runs a fixed set of detectors.
//!
//! ## Detectors
//!
//! - **Performance** - Tracked work metrics that moved past a threshold
//! - **Risk** - Stalled projects and off-track objectives
//! - **Opportunity** - Entities sustaining above-average completion
//! - **Pattern** - Structural signals (weekday clustering, project imbalance)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use cadence_core::insights::InsightEngine;
//!
//! let engine = InsightEngine::new();
//! let collection = engine.generate_weekly_insights(&db).await?;
//! ```

pub mod engine;
pub mod opportunity;
pub mod pattern;
pub mod performance;
pub mod risk;
pub mod types;

pub use engine::{AnalysisContext, Detector, InsightEngine};
pub use opportunity::OpportunityDetector;
pub use pattern::PatternDetector;
pub use performance::PerformanceDetector;
pub use risk::RiskDetector;
pub use types::{
    percent_change, Finding, Insight, InsightCollection, InsightMetrics, InsightSummary,
    InsightType, Priority, RelatedItem, TypeCounts,
};
