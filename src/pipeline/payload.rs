//! Typed per-stage pipeline payloads
//!
//! Each stage's output is the next stage's sole input. Modeling the stages as
//! distinct records (instead of one dynamically-keyed map) makes "not yet
//! computed" unrepresentable: a field exists only once the stage that
//! produces it has run.

use uuid::Uuid;

use crate::domain::{
    CostBreakdown, LaborBreakdown, LocationDetails, MaterialLineItem, ProjectMetrics,
};

/// Output of the normalize stage.
#[derive(Debug, Clone)]
pub struct NormalizedJob {
    pub trade: &'static str,
    pub location: String,
    pub metrics: ProjectMetrics,
    pub materials: Vec<String>,
    pub margin: f64,
}

/// Output of the enrich stage: the normalized job plus resolved public data.
///
/// Every enrichment slot has a neutral default, so this record is always
/// complete even when every collaborator is unavailable.
#[derive(Debug, Clone)]
pub struct EnrichedJob {
    pub job: NormalizedJob,
    pub geocode: Option<LocationDetails>,
    /// Unit costs in the same order the materials were requested.
    pub material_costs: Vec<(String, f64)>,
    pub labor_rate: f64,
    pub weather_modifier: f64,
}

/// Output of the compute stage: the full bid, minus instructions.
#[derive(Debug, Clone)]
pub struct ComputedBid {
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
}
