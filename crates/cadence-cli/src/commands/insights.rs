//! Insight generation command

use std::str::FromStr;

use anyhow::Result;

use cadence_core::insights::InsightCollection;
use cadence_core::{Database, InsightEngine, PeriodKind};

pub async fn cmd_insights(db: &Database, period: &str, json: bool) -> Result<()> {
    let period = PeriodKind::from_str(period).map_err(|e| anyhow::anyhow!(e))?;

    let engine = InsightEngine::new();
    let collection = engine.generate(db, period).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&collection)?);
        return Ok(());
    }

    render_collection(period, &collection);
    Ok(())
}

fn render_collection(period: PeriodKind, collection: &InsightCollection) {
    println!("Insights ({})", period);
    println!("   ─────────────────────────────");
    println!(
        "   {} total | {} performance | {} risk | {} opportunity | {} pattern",
        collection.summary.total,
        collection.summary.by_type.performance,
        collection.summary.by_type.risk,
        collection.summary.by_type.opportunity,
        collection.summary.by_type.pattern,
    );
    println!();

    if collection.insights.is_empty() {
        println!("   Nothing noteworthy this period.");
        return;
    }

    for insight in &collection.insights {
        println!(
            "[{}] {} ({})",
            insight.priority.to_string().to_uppercase(),
            insight.title,
            insight.id
        );
        println!("   {}", insight.description);
        if let Some(metrics) = &insight.metrics {
            println!(
                "   {} (now {:.1}, was {:.1})",
                metrics.change_label, metrics.current, metrics.previous
            );
        }
        if !insight.impact.is_empty() {
            println!("   Impact: {}", insight.impact);
        }
        for action in &insight.suggested_actions {
            println!("   -> {}", action);
        }
        println!();
    }
}
