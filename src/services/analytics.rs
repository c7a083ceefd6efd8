//! Analytics aggregation over stored jobs

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::domain::{AnalyticsSummary, TradeCount};

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// Compute aggregate analytics for all stored jobs.
pub async fn compute_summary(pool: &SqlitePool) -> Result<AnalyticsSummary, sqlx::Error> {
    let total_jobs: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM jobs")
        .fetch_one(pool)
        .await?;

    if total_jobs == 0 {
        return Ok(AnalyticsSummary {
            total_jobs: 0,
            average_bid: 0.0,
            average_profit_margin: 0.0,
            average_material_cost: 0.0,
            average_labor_cost: 0.0,
            top_trades: Vec::new(),
            recent_locations: Vec::new(),
            last_updated: Utc::now(),
        });
    }

    let (avg_bid, avg_margin, avg_material, avg_labor): (
        Option<f64>,
        Option<f64>,
        Option<f64>,
        Option<f64>,
    ) = sqlx::query_as(
        "SELECT AVG(total_bid), AVG(profit_margin), AVG(material_total), AVG(labor_total) \
         FROM jobs",
    )
    .fetch_one(pool)
    .await?;

    let top_trades: Vec<(String, i64)> = sqlx::query_as(
        "SELECT trade, COUNT(*) AS job_count FROM jobs \
         GROUP BY trade ORDER BY job_count DESC LIMIT 5",
    )
    .fetch_all(pool)
    .await?;

    let recent_locations: Vec<String> =
        sqlx::query_scalar("SELECT location FROM jobs ORDER BY created_at DESC LIMIT 5")
            .fetch_all(pool)
            .await?;

    let last_updated: Option<DateTime<Utc>> =
        sqlx::query_scalar("SELECT created_at FROM jobs ORDER BY created_at DESC LIMIT 1")
            .fetch_optional(pool)
            .await?;

    Ok(AnalyticsSummary {
        total_jobs,
        average_bid: round2(avg_bid.unwrap_or(0.0)),
        average_profit_margin: round4(avg_margin.unwrap_or(0.0)),
        average_material_cost: round2(avg_material.unwrap_or(0.0)),
        average_labor_cost: round2(avg_labor.unwrap_or(0.0)),
        top_trades: top_trades
            .into_iter()
            .map(|(trade, count)| TradeCount { trade, count })
            .collect(),
        recent_locations,
        last_updated: last_updated.unwrap_or_else(Utc::now),
    })
}
