//! Bid computation pipeline
//!
//! Five ordered, non-skippable stages: normalize → enrich → compute →
//! instruct → export. Every trade is a configuration value consumed by the
//! one generic [`ProfilePlugin`]; the only failure the pipeline surfaces is
//! an unsupported trade, checked before the first stage runs. Collaborator
//! outages during enrichment degrade to neutral defaults and still produce a
//! complete bid.

pub mod estimate;
pub mod normalize;
pub mod payload;

use async_trait::async_trait;
use chrono::Utc;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::{BidResult, CreateJobRequest};
use crate::services::instructions;
use crate::services::providers::JobDataProviders;
use crate::trades::{self, TradeProfile};

pub use payload::{ComputedBid, EnrichedJob, NormalizedJob};

/// The pipeline's single user-visible failure mode.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("unsupported trade: {0}")]
    UnsupportedTrade(String),
}

/// The five pipeline operations every trade implementation provides.
///
/// Normalize, compute and export are synchronous CPU-bound transforms; the
/// suspension points are exactly the collaborator lookups in enrich and
/// instruct.
#[async_trait]
pub trait TradePlugin: Send + Sync {
    fn trade_name(&self) -> &'static str;

    /// Coerce the raw request into canonical metrics, materials and margin.
    fn normalize(&self, request: CreateJobRequest) -> NormalizedJob;

    /// Resolve public data for the job. Never fails; each lookup has a
    /// neutral default.
    async fn enrich(&self, providers: &dyn JobDataProviders, job: NormalizedJob) -> EnrichedJob;

    /// Derive material quantities and aggregate the bid totals.
    fn compute(&self, job: EnrichedJob) -> ComputedBid;

    /// Produce the instruction step list. Never empty.
    async fn instruct(&self, providers: &dyn JobDataProviders, bid: &ComputedBid) -> Vec<String>;

    /// Assemble the final exportable record.
    fn export(&self, bid: ComputedBid, steps: Vec<String>) -> BidResult;
}

/// Generic profile-driven plugin: one implementation, five trades' worth of
/// configuration.
pub struct ProfilePlugin {
    profile: &'static TradeProfile,
}

impl ProfilePlugin {
    pub fn new(profile: &'static TradeProfile) -> Self {
        Self { profile }
    }

    /// Resolve the plugin for a trade, the pipeline's entry guard.
    pub fn for_trade(trade: &str) -> Result<Self, PipelineError> {
        trades::get_profile(trade)
            .map(Self::new)
            .ok_or_else(|| PipelineError::UnsupportedTrade(trade.trim().to_lowercase()))
    }
}

#[async_trait]
impl TradePlugin for ProfilePlugin {
    fn trade_name(&self) -> &'static str {
        self.profile.trade
    }

    fn normalize(&self, request: CreateJobRequest) -> NormalizedJob {
        let metrics = normalize::normalize_dimensions(&request.dimensions, self.profile);
        let materials = normalize::normalize_materials(request.materials.as_ref(), self.profile);
        let margin = normalize::resolve_margin(request.margin.as_ref(), self.profile);

        tracing::debug!(
            trade = self.profile.trade,
            area_sqft = metrics.area_sqft,
            volume_cy = metrics.volume_cy,
            materials = materials.len(),
            margin,
            "Normalized job payload"
        );

        NormalizedJob {
            trade: self.profile.trade,
            location: request.location,
            metrics,
            materials,
            margin,
        }
    }

    async fn enrich(&self, providers: &dyn JobDataProviders, job: NormalizedJob) -> EnrichedJob {
        // Geocoding and material pricing are independent; labor and weather
        // both consume the geocode result.
        let (geocode, material_costs) = tokio::join!(
            providers.geocode(&job.location),
            providers.material_costs(&job.materials),
        );

        let state = geocode.as_ref().and_then(|g| g.state.clone());
        let (labor_rate, weather) = tokio::join!(
            providers.labor_rate(self.profile.trade, state.as_deref()),
            async {
                match &geocode {
                    Some(geo) => providers.weather_modifier(geo.lat, geo.lon).await,
                    None => None,
                }
            },
        );

        let weather_modifier = weather.unwrap_or(0.0);
        tracing::debug!(
            trade = self.profile.trade,
            geocoded = geocode.is_some(),
            labor_rate,
            weather_modifier,
            "Enriched job payload"
        );

        EnrichedJob {
            job,
            geocode,
            material_costs,
            labor_rate,
            weather_modifier,
        }
    }

    fn compute(&self, enriched: EnrichedJob) -> ComputedBid {
        let EnrichedJob {
            job,
            geocode,
            material_costs,
            labor_rate,
            weather_modifier,
        } = enriched;

        let items = estimate::material_line_items(self.profile, &job.metrics, &material_costs);
        let totals = estimate::aggregate_bid(
            self.profile,
            &job.metrics,
            &items,
            labor_rate,
            weather_modifier,
            job.margin,
        );

        ComputedBid {
            job_id: Uuid::new_v4(),
            trade: self.profile.trade.to_string(),
            location: job.location,
            materials: items,
            labor: totals.labor,
            overhead: totals.overhead,
            profit_margin: totals.profit_margin,
            profit_amount: totals.profit_amount,
            material_total: totals.material_total,
            labor_total: totals.labor.total,
            weather_modifier,
            total_bid: totals.total_bid,
            cost_breakdown: totals.cost_breakdown,
            metrics: job.metrics,
            location_details: geocode,
        }
    }

    async fn instruct(&self, providers: &dyn JobDataProviders, _bid: &ComputedBid) -> Vec<String> {
        let steps = providers
            .instruction_steps(self.profile.instruction_query)
            .await;
        if steps.is_empty() {
            instructions::fallback_steps(self.profile.trade)
        } else {
            steps
        }
    }

    fn export(&self, bid: ComputedBid, steps: Vec<String>) -> BidResult {
        BidResult {
            job_id: bid.job_id,
            trade: bid.trade,
            location: bid.location,
            materials: bid.materials,
            labor: bid.labor,
            overhead: bid.overhead,
            profit_margin: bid.profit_margin,
            profit_amount: bid.profit_amount,
            material_total: bid.material_total,
            labor_total: bid.labor_total,
            weather_modifier: bid.weather_modifier,
            total_bid: bid.total_bid,
            cost_breakdown: bid.cost_breakdown,
            metrics: bid.metrics,
            location_details: bid.location_details,
            steps,
            timestamp: Utc::now(),
        }
    }
}

/// Run the full pipeline for one job request.
///
/// The job payload is exclusively owned by this run; nothing is shared across
/// concurrent jobs. Persistence of the returned record is the caller's
/// responsibility.
pub async fn run_pipeline(
    providers: &dyn JobDataProviders,
    request: CreateJobRequest,
) -> Result<BidResult, PipelineError> {
    let plugin = ProfilePlugin::for_trade(&request.trade)?;

    tracing::info!(
        trade = plugin.trade_name(),
        location = %request.location,
        "Running bid pipeline"
    );

    let normalized = plugin.normalize(request);
    let enriched = plugin.enrich(providers, normalized).await;
    let computed = plugin.compute(enriched);
    let steps = plugin.instruct(providers, &computed).await;
    let bid = plugin.export(computed, steps);

    tracing::info!(
        job_id = %bid.job_id,
        trade = %bid.trade,
        total_bid = bid.total_bid,
        "Bid pipeline complete"
    );

    Ok(bid)
}
