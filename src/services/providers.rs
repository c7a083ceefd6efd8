//! Public-data provider contracts
//!
//! The pipeline consumes external data through this one narrow trait, so the
//! live HTTP-backed implementation can be swapped for stubs in tests without
//! touching the core. Every method has a neutral default behavior on
//! failure; none of them can abort a pipeline run.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::config::Settings;
use crate::domain::LocationDetails;
use crate::services::{geocoding, instructions, labor, materials, weather};

/// External lookups consumed during the enrich and instruct stages.
#[async_trait]
pub trait JobDataProviders: Send + Sync {
    /// Resolve a free-form location. `None` means "no geocode" and
    /// propagates neutral defaults downstream.
    async fn geocode(&self, location: &str) -> Option<LocationDetails>;

    /// Resolve a unit cost for every requested material, in request order.
    /// Never omits an entry; unknown materials get a documented default.
    async fn material_costs(&self, materials: &[String]) -> Vec<(String, f64)>;

    /// Resolve an hourly labor rate. Always usable (> 0); falls back to a
    /// per-trade national average.
    async fn labor_rate(&self, trade: &str, state: Option<&str>) -> f64;

    /// Weather-based cost modifier in [0, 0.1]. `None` is treated as 0.0.
    async fn weather_modifier(&self, lat: f64, lon: f64) -> Option<f64>;

    /// Instruction steps for a query; possibly empty (the pipeline
    /// substitutes static fallbacks).
    async fn instruction_steps(&self, query: &str) -> Vec<String>;
}

/// Live implementation backed by public APIs (Nominatim, OpenWeatherMap,
/// BLS, WikiHow) with offline fallbacks.
#[derive(Clone)]
pub struct LiveProviders {
    client: Client,
    openweather_api_key: Option<String>,
    bls_api_key: Option<String>,
}

impl LiveProviders {
    pub fn new(settings: &Settings) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.provider_timeout_seconds))
            .user_agent(concat!("Bidder/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create provider HTTP client")?;

        tracing::info!(
            timeout_seconds = settings.provider_timeout_seconds,
            weather_enabled = settings.openweather_api_key.is_some(),
            "Public data providers initialized"
        );

        Ok(Self {
            client,
            openweather_api_key: settings.openweather_api_key.clone(),
            bls_api_key: settings.bls_api_key.clone(),
        })
    }
}

#[async_trait]
impl JobDataProviders for LiveProviders {
    async fn geocode(&self, location: &str) -> Option<LocationDetails> {
        geocoding::geocode_location(&self.client, location).await
    }

    async fn material_costs(&self, names: &[String]) -> Vec<(String, f64)> {
        materials::resolve_material_costs(&self.client, names).await
    }

    async fn labor_rate(&self, trade: &str, state: Option<&str>) -> f64 {
        labor::resolve_trade_labor_rate(&self.client, self.bls_api_key.as_deref(), trade, state)
            .await
    }

    async fn weather_modifier(&self, lat: f64, lon: f64) -> Option<f64> {
        weather::fetch_weather_modifier(
            &self.client,
            self.openweather_api_key.as_deref(),
            lat,
            lon,
        )
        .await
    }

    async fn instruction_steps(&self, query: &str) -> Vec<String> {
        instructions::fetch_wikihow_steps(&self.client, query).await
    }
}
