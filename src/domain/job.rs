//! Domain types for job bids
//!
//! These types define the canonical bid schema: the request accepted from the
//! API, the normalized dimensional metrics, and the exported bid record that
//! gets persisted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Raw dimensional input as received from the caller.
///
/// Fields arrive as arbitrary JSON (numbers, numeric strings, or garbage);
/// the normalizer coerces each field independently, falling back to the
/// trade profile's defaults. Malformed values are never an error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawDimensions {
    #[serde(default)]
    pub length: Option<serde_json::Value>,
    #[serde(default)]
    pub width: Option<serde_json::Value>,
    #[serde(default)]
    pub depth: Option<serde_json::Value>,
}

/// Materials may be supplied as a list of names or a single comma-separated
/// string.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MaterialsInput {
    List(Vec<String>),
    Csv(String),
}

/// Request DTO for creating a job bid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateJobRequest {
    pub trade: String,
    pub location: String,
    #[serde(default)]
    pub dimensions: RawDimensions,
    #[serde(default)]
    pub materials: Option<MaterialsInput>,
    #[serde(default)]
    pub margin: Option<serde_json::Value>,
}

/// Normalized dimensional metrics, immutable once derived.
///
/// area = length × width, volume_cuft = area × depth, volume_cy =
/// volume_cuft / 27. Inputs are assumed non-negative; the normalizer does not
/// reject negative dimensions (degenerate inputs degrade through the metric
/// fallback chain instead).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectMetrics {
    pub length_ft: f64,
    pub width_ft: f64,
    pub depth_ft: f64,
    pub area_sqft: f64,
    pub linear_ft: f64,
    pub volume_cuft: f64,
    pub volume_cy: f64,
}

impl ProjectMetrics {
    /// Look up a metric by its profile-facing name.
    pub fn metric(&self, name: &str) -> Option<f64> {
        match name {
            "length_ft" | "length" => Some(self.length_ft),
            "width_ft" | "width" => Some(self.width_ft),
            "depth_ft" | "depth" => Some(self.depth_ft),
            "area_sqft" | "area" => Some(self.area_sqft),
            "linear_ft" | "perimeter" => Some(self.linear_ft),
            "volume_cuft" => Some(self.volume_cuft),
            "volume_cy" => Some(self.volume_cy),
            _ => None,
        }
    }
}

/// One material line item on the bid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialLineItem {
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    pub unit_cost: f64,
    pub total_cost: f64,
}

/// Labor cost details.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LaborBreakdown {
    pub hours: f64,
    pub rate: f64,
    pub total: f64,
}

/// Every intermediate value of the aggregation, for auditability.
///
/// The order is load-bearing: the weather modifier applies to the subtotal
/// before profit is taken.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub materials: f64,
    pub labor: f64,
    pub overhead: f64,
    pub subtotal: f64,
    pub weather_modifier: f64,
    pub weather_adjusted_subtotal: f64,
    pub profit: f64,
    pub total: f64,
}

/// Resolved location metadata from geocoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationDetails {
    pub lat: f64,
    pub lon: f64,
    pub display_name: String,
    pub state: Option<String>,
    pub country: Option<String>,
    pub postal_code: Option<String>,
}

/// The terminal bid artifact produced by one pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BidResult {
    pub job_id: Uuid,
    pub trade: String,
    pub location: String,
    pub materials: Vec<MaterialLineItem>,
    pub labor: LaborBreakdown,
    pub overhead: f64,
    pub profit_margin: f64,
    pub profit_amount: f64,
    pub material_total: f64,
    pub labor_total: f64,
    pub weather_modifier: f64,
    pub total_bid: f64,
    pub cost_breakdown: CostBreakdown,
    pub metrics: ProjectMetrics,
    pub location_details: Option<LocationDetails>,
    pub steps: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

/// Lightweight summary used for job listings.
#[derive(Debug, Clone, Serialize)]
pub struct JobSummary {
    pub job_id: Uuid,
    pub trade: String,
    pub location: String,
    pub total_bid: f64,
    pub profit_margin: f64,
    pub material_total: f64,
    pub labor_total: f64,
    pub timestamp: DateTime<Utc>,
}

/// Per-trade job count for analytics.
#[derive(Debug, Clone, Serialize)]
pub struct TradeCount {
    pub trade: String,
    pub count: i64,
}

/// Aggregated analytics over all stored jobs.
#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsSummary {
    pub total_jobs: i64,
    pub average_bid: f64,
    pub average_profit_margin: f64,
    pub average_material_cost: f64,
    pub average_labor_cost: f64,
    pub top_trades: Vec<TradeCount>,
    pub recent_locations: Vec<String>,
    pub last_updated: DateTime<Utc>,
}
